//! # Stegger Binary Entry Point
//!
//! ## Usage
//!
//! ```bash
//! # writes small_kitten_out.png
//! stegger hide small_kitten.png "I say what it occurs to me to say..."
//! stegger reveal small_kitten_out.png
//! stegger capacity small_kitten.png --json
//! ```

use anyhow::{bail, Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use clap::{Parser, Subcommand};
use log::debug;
use serde::Serialize;
use std::path::PathBuf;

use stegger::common::config::StegConfig;
use stegger::common::image_io::{default_output_path, hide_in_file, load_image, reveal_from_file};
use stegger::processing::{max_message_len, PixelGrid};
use stegger::utils::logging::init_logger;

/// Hide a message in the low bits of an image, or get it back out.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Optional configuration file (TOML format)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log at DEBUG level regardless of the configured level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Hide a message in an image and save the result as PNG
    Hide {
        /// Cover image
        input: PathBuf,

        /// Message text (omit when using --message-file)
        message: Option<String>,

        /// Read the message bytes from a file instead
        #[arg(long, conflicts_with = "message")]
        message_file: Option<PathBuf>,

        /// Output path (default: <input stem><suffix>.png)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the message hidden in an image
    Reveal {
        input: PathBuf,

        /// Print the payload as base64 (needed for binary payloads)
        #[arg(long)]
        base64: bool,
    },

    /// Report how much an image can hold
    Capacity {
        input: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Serialize)]
struct CapacityReport {
    width: u32,
    height: u32,
    capacity_bits: u64,
    max_message_bytes: u64,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = StegConfig::load_or_default(args.config.as_deref())?;
    let level = if args.verbose { "debug" } else { config.logging.level.as_str() };
    init_logger(level);
    debug!("Using config: {:?}", config);

    match args.command {
        Command::Hide {
            input,
            message,
            message_file,
            output,
        } => {
            let message = match (message, message_file) {
                (Some(text), None) => text.into_bytes(),
                (None, Some(path)) => std::fs::read(&path)
                    .with_context(|| format!("Unable to read message file {}", path.display()))?,
                _ => bail!("Give either a message or --message-file"),
            };
            let output = output.unwrap_or_else(|| default_output_path(&input, &config.output.suffix));
            hide_in_file(&input, &output, &message)?;
            println!("{}", output.display());
        }
        Command::Reveal { input, base64 } => {
            let message = reveal_from_file(&input)?;
            if base64 {
                println!("{}", STANDARD.encode(&message));
            } else {
                match String::from_utf8(message) {
                    Ok(text) => println!("{}", text),
                    Err(_) => bail!("Hidden message is not UTF-8 text; rerun with --base64"),
                }
            }
        }
        Command::Capacity { input, json } => {
            let img = load_image(&input)?;
            let capacity_bits = img.capacity_bits();
            let report = CapacityReport {
                width: PixelGrid::width(&img),
                height: PixelGrid::height(&img),
                capacity_bits,
                max_message_bytes: max_message_len(capacity_bits).unwrap_or(0),
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!(
                    "{}x{}: {} bits, up to {} message bytes",
                    report.width, report.height, report.capacity_bits, report.max_message_bytes
                );
            }
        }
    }

    Ok(())
}
