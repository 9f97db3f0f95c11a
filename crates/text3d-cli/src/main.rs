use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use text3d_core::Text3dConfig;
use text3d_render::{
    compile, Generator, GeneratorOptions, HttpTextureLoader, OfflineTextureLoader,
    ResourceCache, TextureLoader, TextureOutcome,
};
use text3d_scene::{AxisWave, Oscillation, Wave};

#[derive(Parser)]
#[command(
    name = "text3d",
    version,
    about = "Text3D: chat markup to 3D text scenes",
    long_about = "Text3D compiles chat-style markup (ANSI colors, *style* markers and :id: emotes)\ninto a positioned 3D scene graph of extruded text and emote sprites.\n\nWrite ESC as the two characters \\e on the command line."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the tokens of a markup string
    Tokens {
        /// Markup to tokenize
        markup: String,
    },

    /// Print the parsed AST as JSON
    Ast {
        /// Markup to parse
        markup: String,
    },

    /// Compile markup and write the scene graph as JSON
    Render {
        /// Markup to render
        markup: String,

        /// TOML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Regular font face (overrides fonts.regular)
        #[arg(long)]
        font: Option<PathBuf>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skip emote downloads and keep placeholders
        #[arg(long)]
        no_fetch: bool,

        /// Pose the row as if it had been floating for this many seconds
        #[arg(long)]
        float_at: Option<f32>,
    },

    /// Write the default configuration file
    InitConfig {
        /// Where to write the config
        #[arg(default_value = "text3d.toml")]
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so JSON on stdout stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Tokens { markup } => cmd_tokens(&unescape_markup(&markup)),
        Commands::Ast { markup } => cmd_ast(&unescape_markup(&markup)),
        Commands::Render {
            markup,
            config,
            font,
            output,
            no_fetch,
            float_at,
        } => cmd_render(
            &unescape_markup(&markup),
            config,
            font,
            output,
            no_fetch,
            float_at,
        ),
        Commands::InitConfig { file } => cmd_init_config(&file),
    }
}

/// Replace the two-character sequence `\e` with ESC.
fn unescape_markup(markup: &str) -> String {
    markup.replace("\\e", "\x1b")
}

fn cmd_tokens(markup: &str) -> Result<()> {
    for token in text3d_lang::tokenize(markup) {
        println!(
            "{:>3}:{:<3} {:<16} {:?}",
            token.span.line,
            token.span.column,
            token.kind.to_string(),
            token.value
        );
    }
    Ok(())
}

fn cmd_ast(markup: &str) -> Result<()> {
    let ast = text3d_lang::parse(text3d_lang::tokenize(markup));
    let json = serde_json::to_string_pretty(&ast).context("failed to serialize AST")?;
    println!("{}", json);
    Ok(())
}

fn cmd_render(
    markup: &str,
    config: Option<PathBuf>,
    font: Option<PathBuf>,
    output: Option<PathBuf>,
    no_fetch: bool,
    float_at: Option<f32>,
) -> Result<()> {
    let start = Instant::now();

    let mut config = match &config {
        Some(path) => Text3dConfig::load_from_file(path)
            .with_context(|| format!("failed to load config: {}", path.display()))?,
        None => Text3dConfig::default(),
    };
    if let Some(font) = font {
        config.fonts.regular = Some(font);
    }

    let options =
        GeneratorOptions::from_config(&config).context("failed to set up the generator")?;

    let loader: Arc<dyn TextureLoader> = if no_fetch {
        Arc::new(OfflineTextureLoader)
    } else {
        Arc::new(HttpTextureLoader::new())
    };
    let generator = Generator::new(options, loader);

    let mut cache = ResourceCache::new();
    let mut rendered = compile(markup, &generator, &mut cache);

    let pending = rendered.pending_loads();
    if pending > 0 && !no_fetch {
        tracing::info!("fetching {} emote texture(s)", pending);
        let outcomes = run_async(async { Ok(rendered.settle(&mut cache).await) })?;
        let failed = outcomes
            .iter()
            .filter(|o| matches!(o, TextureOutcome::Failed { .. }))
            .count();
        if failed > 0 {
            tracing::warn!("{} emote texture(s) failed, placeholders kept", failed);
        }
    }

    let camera = generator.options().camera;
    let mut scene = rendered.into_scene();
    if let Some(elapsed) = float_at {
        scene.apply_float(elapsed, Wave::Sin, &heading_float());
    }
    scene.transform.rotation.x += camera.tilt_toward(&scene.transform.position);

    let json = serde_json::to_string_pretty(&scene).context("failed to serialize scene")?;
    match &output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("failed to write output: {}", path.display()))?;
            println!("✅ Wrote scene to {}", path.display());
        }
        None => println!("{}", json),
    }

    let stats = cache.stats();
    tracing::info!(
        elapsed_ms = start.elapsed().as_millis() as u64,
        geometry_hit_rate = stats.geometry.hit_rate(),
        textures = cache.texture_count(),
        "render complete"
    );
    Ok(())
}

/// Gentle sway used for overlay headings.
fn heading_float() -> Oscillation {
    Oscillation {
        x: AxisWave::new(0.02, 0.5),
        y: AxisWave::new(0.02, 1.3),
        z: AxisWave::new(0.02, 0.8),
    }
}

fn cmd_init_config(file: &Path) -> Result<()> {
    if file.exists() {
        anyhow::bail!("'{}' already exists", file.display());
    }
    Text3dConfig::default()
        .save_to_file(file)
        .with_context(|| format!("failed to write config: {}", file.display()))?;
    println!("✨ Wrote default config to {}", file.display());
    Ok(())
}

fn run_async<F, T>(future: F) -> Result<T>
where
    F: std::future::Future<Output = Result<T>>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to initialize async runtime")?;
    runtime.block_on(future)
}
