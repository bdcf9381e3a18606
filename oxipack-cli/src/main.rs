//! OxiPack CLI - The Oxidized Packer
//!
//! Compresses files with RLE, LZW and tANS pipelines into self-describing
//! containers, and restores them.

mod commands;
mod utils;

use clap::{Parser, Subcommand};
use commands::{BatchArgs, cmd_compress, cmd_decompress, cmd_info, cmd_methods};
use oxipack_container::Method;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use utils::load_config;

#[derive(Parser)]
#[command(name = "oxipack")]
#[command(author, version, about = "The Oxidized Packer - RLE / LZW / tANS compression")]
#[command(long_about = "
OxiPack compresses files with seven pipelines built from three codecs:
run-length encoding, LZW and tANS entropy coding.

Examples:
  oxipack compress -m rle+lzw -o out/ data.bin notes.txt
  oxipack compress -m tans -o out/ --json samples/*
  oxipack decompress -o restored/ out/data.bin
  oxipack info out/data.bin
  oxipack methods
")]
struct Cli {
    /// Pipeline configuration file (JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Show debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress files into containers
    #[command(alias = "c")]
    Compress {
        /// Compression method (lzw, rle, rle+lzw, tans, rle+tans, lzw+tans, rle+lzw+tans)
        #[arg(short, long)]
        method: Method,

        #[command(flatten)]
        batch: BatchArgs,
    },

    /// Restore files from containers
    #[command(alias = "d")]
    Decompress {
        #[command(flatten)]
        batch: BatchArgs,
    },

    /// Show the headers of a container
    #[command(alias = "i")]
    Info {
        /// Container file to inspect
        file: PathBuf,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,
    },

    /// List the supported methods
    Methods,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = load_config(cli.config.as_deref()).and_then(|config| match cli.command {
        Commands::Compress { method, batch } => cmd_compress(method, &batch, &config),
        Commands::Decompress { batch } => cmd_decompress(&batch, &config),
        Commands::Info { file, json } => cmd_info(&file, json),
        Commands::Methods => cmd_methods(),
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
