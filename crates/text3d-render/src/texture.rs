//! Emote texture loading.
//! Decodes PNG, JPEG, WebP, GIF and the other formats `image` supports.

use async_trait::async_trait;
use text3d_core::{Text3dError, Text3dResult};
use text3d_scene::Texture;

/// Fetches and decodes an image by URL.
#[async_trait]
pub trait TextureLoader: Send + Sync {
    async fn load(&self, url: &str) -> Text3dResult<Texture>;
}

/// Decode raw image bytes into a texture.
pub fn decode_texture(url: &str, data: &[u8]) -> Text3dResult<Texture> {
    let img = image::load_from_memory(data)
        .map_err(|e| Text3dError::texture(format!("failed to decode image: {}", e), url))?;
    Ok(Texture::new(url, img.to_rgba8()))
}

/// Loads emote images over HTTP(S).
#[derive(Debug, Clone, Default)]
pub struct HttpTextureLoader {
    client: reqwest::Client,
}

impl HttpTextureLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TextureLoader for HttpTextureLoader {
    async fn load(&self, url: &str) -> Text3dResult<Texture> {
        let res = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Text3dError::texture(format!("request failed: {}", e), url))?;

        if !res.status().is_success() {
            return Err(Text3dError::texture(
                format!("remote image fetch failed: {}", res.status()),
                url,
            ));
        }

        let bytes = res
            .bytes()
            .await
            .map_err(|e| Text3dError::texture(format!("failed to read body: {}", e), url))?;

        tracing::debug!(url, bytes = bytes.len(), "fetched emote image");
        decode_texture(url, &bytes)
    }
}

/// Never succeeds; every emote keeps its placeholder.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineTextureLoader;

#[async_trait]
impl TextureLoader for OfflineTextureLoader {
    async fn load(&self, url: &str) -> Text3dResult<Texture> {
        Err(Text3dError::texture("texture fetching is disabled", url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba([255, 0, 0, 255]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_decode_png() {
        let texture = decode_texture("mem://emote", &png_bytes(56, 28)).unwrap();
        assert_eq!((texture.width, texture.height), (56, 28));
        assert_eq!(texture.aspect_ratio(), 2.0);
        assert_eq!(texture.url, "mem://emote");
    }

    #[test]
    fn test_decode_garbage() {
        let err = decode_texture("mem://bad", b"not an image").unwrap_err();
        assert!(matches!(err, Text3dError::Texture { ref url, .. } if url == "mem://bad"));
    }

    #[tokio::test]
    async fn test_offline_loader_fails() {
        assert!(OfflineTextureLoader.load("https://x/1").await.is_err());
    }
}
