//! bitcanvas demo driver
//!
//! Renders the built-in sample scenes, or a JSON scene file, to BMP files.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use bitcanvas::scene::{self, DEMO_NAMES};
use bitcanvas::{BitDepth, Scene};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "bitcanvas")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Render shapes and gradients to BMP files", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// JSON scene file to render instead of the built-in demos
    #[arg(short, long, conflicts_with = "demo")]
    scene: Option<PathBuf>,

    /// Built-in demo to render (simple-figures, filled-figures, gradient, smile, all)
    #[arg(short, long)]
    demo: Option<String>,

    /// Directory the bitmaps are written to
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Bits per pixel of the written files (24 or 32)
    #[arg(long, default_value_t = BitDepth::Bits24)]
    depth: BitDepth,

    /// Seed for ellipse outlines, overriding the scene's own
    #[arg(long)]
    seed: Option<u64>,

    /// Print the scene JSON instead of rendering
    #[arg(long)]
    emit_scene: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; logs go to stderr so --emit-scene output stays clean
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let scenes = load_scenes(&cli)?;

    if !cli.emit_scene {
        fs::create_dir_all(&cli.out_dir)
            .with_context(|| format!("Failed to create {}", cli.out_dir.display()))?;
    }

    for mut scene in scenes {
        if let Some(seed) = cli.seed {
            scene.seed = Some(seed);
        }

        if cli.emit_scene {
            println!("{}", scene.to_json()?);
            continue;
        }

        let canvas = scene
            .render()
            .with_context(|| format!("Failed to render scene '{}'", scene.name))?;
        let path = cli.out_dir.join(format!("{}.bmp", scene.name));
        canvas
            .export(&path, cli.depth)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Wrote {} ({}x{}, {}-bit)", path.display(), canvas.width(), canvas.height(), cli.depth);
    }

    Ok(())
}

fn load_scenes(cli: &Cli) -> Result<Vec<Scene>> {
    if let Some(path) = &cli.scene {
        let scene = Scene::load(path).with_context(|| format!("Failed to load scene {}", path.display()))?;
        return Ok(vec![scene]);
    }

    match cli.demo.as_deref() {
        None | Some("all") => DEMO_NAMES
            .iter()
            .map(|name| scene::demo(name).map_err(Into::into))
            .collect(),
        Some(name) => Ok(vec![scene::demo(name)?]),
    }
}
