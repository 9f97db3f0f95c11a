/// Core error types for the Text3D compiler.
use std::path::PathBuf;

/// A specialized Result type for Text3D operations.
pub type Text3dResult<T> = Result<T, Text3dError>;

/// Top-level error type encompassing all Text3D subsystems.
///
/// The markup front end (lexer and parser) never fails; these errors come
/// from the edges: loading fonts, fetching textures and reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum Text3dError {
    #[error("font error: {message} ({path:?})")]
    Font { message: String, path: PathBuf },

    #[error("texture error: {message} ({url})")]
    Texture { message: String, url: String },

    #[error("config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Text3dError {
    /// Create a font loading error.
    pub fn font(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Text3dError::Font {
            message: message.into(),
            path: path.into(),
        }
    }

    /// Create a texture fetch or decode error for the given URL.
    pub fn texture(message: impl Into<String>, url: impl Into<String>) -> Self {
        Text3dError::Texture {
            message: message.into(),
            url: url.into(),
        }
    }
}

impl From<toml::de::Error> for Text3dError {
    fn from(err: toml::de::Error) -> Self {
        Text3dError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Text3dError {
    fn from(err: toml::ser::Error) -> Self {
        Text3dError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_texture_error_display() {
        let err = Text3dError::texture("HTTP 404", "https://cdn.example/1.png");
        assert_eq!(
            err.to_string(),
            "texture error: HTTP 404 (https://cdn.example/1.png)"
        );
    }

    #[test]
    fn test_font_error_display() {
        let err = Text3dError::font("file not found", "/fonts/Inter-Bold.ttf");
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_toml_error_converts_to_config() {
        let err: Text3dError = toml::from_str::<toml::Table>("= nope").unwrap_err().into();
        assert!(matches!(err, Text3dError::Config(_)));
    }
}
