//! Arbor CLI
//!
//! Run the choreography engine headless, dump layouts and print the effective
//! configuration.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use arbor_3d::config::ArborConfig;
use arbor_3d::ornament::Category;

mod layout;
mod simulate;

use simulate::SimulateOptions;

#[derive(Parser)]
#[command(name = "arbor")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Arbor formation choreography engine", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the engine without a renderer and print a JSON summary
    Simulate {
        /// Simulated duration in seconds
        #[arg(short, long, default_value = "8.0")]
        seconds: f32,

        /// Frames per second
        #[arg(long, default_value = "60")]
        fps: u32,

        /// Number of participant photos
        #[arg(short, long, default_value = "5")]
        participants: u64,

        /// Number of prizes in the pool
        #[arg(long, default_value = "2")]
        prizes: u64,

        /// Start a draw at this time
        #[arg(long)]
        draw_at: Option<f32>,

        /// Reveal the prize at this time
        #[arg(long)]
        reveal_at: Option<f32>,

        /// Reset the draw at this time
        #[arg(long)]
        reset_at: Option<f32>,

        /// Hold the pointer at `x,y` for the whole run
        #[arg(long, value_parser = parse_pointer, allow_hyphen_values = true)]
        pointer: Option<(f32, f32)>,

        /// Wheel delta applied on the first frame
        #[arg(long, default_value = "0.0", allow_hyphen_values = true)]
        zoom: f32,

        /// Random seed
        #[arg(long, default_value = "1")]
        seed: u64,

        /// Also print every Nth frame
        #[arg(long)]
        every: Option<u64>,
    },

    /// Print the target and chaos poses of one category as JSON
    Layout {
        /// Ornament category
        #[arg(value_enum)]
        category: CategoryArg,

        /// Ornament count (defaults to the configured count)
        #[arg(short = 'n', long)]
        count: Option<usize>,

        /// Random seed for the chaos poses
        #[arg(long, default_value = "1")]
        seed: u64,
    },

    /// Print the effective configuration as TOML
    Config,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CategoryArg {
    Bauble,
    GiftBox,
    Photo,
}

impl From<CategoryArg> for Category {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Bauble => Category::Bauble,
            CategoryArg::GiftBox => Category::GiftBox,
            CategoryArg::Photo => Category::Photo,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Simulate {
            seconds,
            fps,
            participants,
            prizes,
            draw_at,
            reveal_at,
            reset_at,
            pointer,
            zoom,
            seed,
            every,
        } => simulate::cmd_simulate(
            config,
            &SimulateOptions {
                seconds,
                fps,
                participants,
                prizes,
                draw_at,
                reveal_at,
                reset_at,
                pointer,
                zoom,
                seed,
                every,
            },
        ),

        Commands::Layout {
            category,
            count,
            seed,
        } => layout::cmd_layout(&config, category.into(), count, seed),

        Commands::Config => cmd_config(&config),
    }
}

fn load_config(path: Option<&Path>) -> Result<ArborConfig> {
    match path {
        Some(path) => {
            let config = ArborConfig::load(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?;
            info!("Using config {}", path.display());
            Ok(config)
        }
        None => Ok(ArborConfig::default()),
    }
}

fn cmd_config(config: &ArborConfig) -> Result<()> {
    let text = config.to_toml().context("Failed to serialize config")?;
    print!("{}", text);
    Ok(())
}

fn parse_pointer(s: &str) -> Result<(f32, f32), String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `x,y`, got `{}`", s))?;
    let x = x.trim().parse::<f32>().map_err(|e| e.to_string())?;
    let y = y.trim().parse::<f32>().map_err(|e| e.to_string())?;
    Ok((x, y))
}
