use anyhow::{Context, anyhow};
use bgdraw::session::options_from_config;
use bgdraw::{Config, Engine, RecordingRenderer};
use clap::{ArgAction, Parser};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "bgdraw")]
#[command(
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BGDRAW_GIT_HASH"), ")"),
    about = "Freehand background annotations for game clients"
)]
struct Cli {
    /// Load a saved drawing into a headless engine and print what it holds
    #[arg(long, short = 'i', value_name = "FILE")]
    inspect: Option<PathBuf>,

    /// Override the configured stroke limit while inspecting
    #[arg(long, value_name = "N", requires = "inspect")]
    max_items: Option<usize>,

    /// Write a documented default config file and exit
    #[arg(long, action = ArgAction::SetTrue, conflicts_with = "inspect")]
    init_config: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    if cli.init_config {
        let path = Config::create_default_file()?;
        println!("Wrote default config to {}", path.display());
    } else if let Some(file) = cli.inspect {
        inspect(&file, cli.max_items)?;
    } else {
        // No flags: show usage
        println!("bgdraw: Freehand background annotations for game clients");
        println!();
        println!("Usage:");
        println!("  bgdraw --inspect <FILE>    Load a drawing and print a summary");
        println!("  bgdraw --init-config       Write ~/.config/bgdraw/config.toml");
        println!("  bgdraw --help              Show help");
        println!();
        println!("Set RUST_LOG=debug for per-stroke details.");
    }

    Ok(())
}

fn inspect(file: &Path, max_items: Option<usize>) -> anyhow::Result<()> {
    let config = Config::load().context("Failed to load config")?;
    let mut style = config.drawing_style();
    if let Some(max_items) = max_items {
        style.max_items = max_items;
    }
    log::debug!("Inspecting {} with {:?}", file.display(), style);

    let storage = options_from_config(&config.storage);
    let mut engine = Engine::new(style, storage, RecordingRenderer::new());
    let outcome = engine.load_from_path(file);
    if !outcome.ok {
        return Err(anyhow!(outcome.message));
    }

    let store = engine.store();
    let points: usize = store.iter().map(|(_, item)| item.points().len()).sum();
    let quads: usize = store.iter().map(|(_, item)| item.quad_count()).sum();
    println!("{}", outcome.message);
    println!("Strokes: {} (limit {})", store.len(), store.capacity());
    println!("Points:  {points}");
    println!("Quads:   {quads}");
    Ok(())
}
