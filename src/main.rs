use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use scrollscape::{AppConfig, MorphTiming};

#[derive(Parser)]
#[command(name = "scrollscape")]
#[command(about = "Scroll-driven procedural 3D backdrop", long_about = None)]
#[command(version)]
struct Cli {
    /// Window title
    #[arg(long, default_value = "Scrollscape")]
    title: String,

    /// Window width in logical pixels
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Window height in logical pixels
    #[arg(long, default_value_t = 800)]
    height: u32,

    /// TTF/OTF font for the HUD label (defaults to a system monospace font)
    #[arg(long)]
    font: Option<PathBuf>,

    /// Freeze idle camera rotation and sway
    #[arg(long)]
    reduced_motion: bool,

    /// Morph at a fixed rate per second instead of per frame
    #[arg(long, value_name = "RATE", num_args = 0..=1, default_missing_value = "1.2")]
    timed_morph: Option<f32>,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.quiet {
        log::LevelFilter::Error
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let mut config = AppConfig::new()
        .title(cli.title)
        .size(cli.width, cli.height)
        .reduced_motion(cli.reduced_motion);
    if let Some(font) = cli.font {
        config = config.font(font);
    }
    if let Some(rate) = cli.timed_morph {
        config = config.morph_timing(MorphTiming::PerSecond(rate));
    }

    log::info!("scrollscape starting");
    scrollscape::run(config).context("event loop failed")?;
    Ok(())
}
