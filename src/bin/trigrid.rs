use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use trigrid::{Behavior, GeneratorConfig, PixelSource};

#[derive(Parser, Debug)]
#[command(name = "trigrid", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a storyboard and write it as JSON.
    Generate(GenerateArgs),
    /// List the available behaviors.
    Behaviors,
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Generator config JSON. Defaults are used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the configured behavior.
    #[arg(long)]
    behavior: Option<Behavior>,

    /// Override the configured seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Image sampled by pixel-driven behaviors.
    #[arg(long)]
    pixels: Option<PathBuf>,

    /// Output storyboard JSON path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Generate(args) => cmd_generate(args),
        Command::Behaviors => {
            for b in Behavior::ALL {
                println!("{b}");
            }
            Ok(())
        }
    }
}

fn load_pixels(path: &Path) -> anyhow::Result<image::RgbaImage> {
    let img = image::open(path).with_context(|| format!("open image '{}'", path.display()))?;
    Ok(img.to_rgba8())
}

fn cmd_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let mut cfg = match &args.config {
        Some(path) => GeneratorConfig::from_path(path)?,
        None => GeneratorConfig::default(),
    };
    if let Some(b) = args.behavior {
        cfg.behavior = b;
    }
    if let Some(seed) = args.seed {
        cfg.seed = seed;
    }

    let pixels = args.pixels.as_deref().map(load_pixels).transpose()?;
    let source = pixels.as_ref().map(|img| img as &dyn PixelSource);

    let board = trigrid::generate(&cfg, source)?;
    let json = board.to_json_pretty()?;
    std::fs::write(&args.out, json)
        .with_context(|| format!("write storyboard '{}'", args.out.display()))?;

    eprintln!(
        "wrote {} actors ({}) to {}",
        board.actors.len(),
        cfg.behavior,
        args.out.display()
    );
    Ok(())
}
