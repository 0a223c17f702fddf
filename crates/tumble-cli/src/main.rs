//! Headless front end for the Tumble die widget.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "tumble",
    about = "Tumble: a tappable die, rolled on a virtual frame clock",
    version,
    propagate_version = true
)]
struct Cli {
    /// Log roll lifecycle details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Tap the die and print the event timeline
    Roll {
        /// Number of taps
        #[arg(short, long, default_value = "1")]
        taps: u32,

        /// Milliseconds between taps
        #[arg(short, long, default_value = "250")]
        interval_ms: f64,

        /// Frames per second of the virtual clock
        #[arg(long, default_value = "60")]
        fps: f64,

        /// RNG seed (default: the config file's seed, else random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// JSON roll config
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print events as JSON lines
        #[arg(long)]
        json: bool,
    },

    /// Roll once and print the animated values frame by frame
    Frames {
        /// Frames per second of the virtual clock
        #[arg(long, default_value = "60")]
        fps: f64,

        /// RNG seed (default: the config file's seed, else random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// JSON roll config
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print every Nth frame
        #[arg(short, long, default_value = "1")]
        every: u32,
    },

    /// Roll many times and print how often each face came up
    Stats {
        /// Number of complete rolls
        #[arg(short, long, default_value = "600")]
        rolls: u32,

        /// RNG seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,
    },
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Roll {
            taps,
            interval_ms,
            fps,
            seed,
            config,
            json,
        } => commands::roll::run(taps, interval_ms, fps, seed, config.as_deref(), json),
        Commands::Frames {
            fps,
            seed,
            config,
            every,
        } => commands::frames::run(fps, seed, config.as_deref(), every),
        Commands::Stats { rolls, seed } => commands::stats::run(rolls, seed),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
