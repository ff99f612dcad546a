// bitshrink-cli/src/cli.rs
//
// Defines the command-line argument structures using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "bitshrink: batch video bitrate reduction",
    long_about = "Re-encodes a directory tree of videos to HEVC at a reduced bit rate, \
                  mirroring the tree into an output directory."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Transcodes every video under the input directory into the output directory
    Encode(EncodeArgs),
}

#[derive(Parser, Debug, Default)]
pub struct EncodeArgs {
    /// TOML configuration file; flags override its values
    #[arg(short, long, value_name = "FILE", env = "BITSHRINK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Root of the directory tree to transcode (default: ./input)
    #[arg(short = 'i', long = "input", value_name = "INPUT_DIR")]
    pub input_dir: Option<PathBuf>,

    /// Root of the mirrored output tree (default: ./output)
    #[arg(short = 'o', long = "output", value_name = "OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Directory for the per-run log file (default: ./log)
    #[arg(short, long, value_name = "LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Temporary directory for ffmpeg/ffprobe (default: the log directory)
    #[arg(long, value_name = "TEMP_DIR")]
    pub temp_dir: Option<PathBuf>,

    /// Maximum number of concurrent encodes (default: 3)
    #[arg(short, long, value_name = "N", value_parser = clap::value_parser!(u16).range(1..))]
    pub jobs: Option<u16>,

    /// Log debug detail, including every ffmpeg/ffprobe command line
    #[arg(short, long)]
    pub verbose: bool,

    /// Only write the log file; do not mirror log records to stderr
    #[arg(short, long)]
    pub quiet: bool,

    /// Exit with status 1 if any file failed or the run was aborted
    #[arg(long)]
    pub strict: bool,
}
