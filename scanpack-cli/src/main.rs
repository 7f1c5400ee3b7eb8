//! ScanPack CLI - encode, decode and inspect range-scan point frames.
//!
//! Input for `encode` and output of `decode` are raw canonical records,
//! 20 bytes each, big-endian.

mod commands;
mod utils;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use commands::{EncodeOverrides, cmd_config, cmd_decode, cmd_encode, cmd_info, cmd_test};
use scanpack::{ByteMethod, EntropyMethod, PipelineConfig, PointMethod};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "scanpack")]
#[command(
    author,
    version,
    about = "Cascading codec for range-scan point records"
)]
#[command(long_about = "
ScanPack compresses range-scan point records through three stages:
point layout (M1), byte compression (M2) and entropy coding (MC).

Examples:
  scanpack encode scan.pts scan.spk
  scanpack encode scan.pts scan.spk --points delta-rle --bytes mtf
  scanpack encode scan.pts scan.spk --config fast.json --adaptive
  scanpack decode scan.spk scan.pts
  scanpack info scan.spk --json
  scanpack test scan.spk
  scanpack config --preset fast > fast.json
")]
struct Cli {
    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode raw point records into a frame
    #[command(alias = "e")]
    Encode {
        /// File of raw 20-byte records
        input: PathBuf,

        /// Output frame file
        output: PathBuf,

        /// JSON pipeline configuration (flags override it)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Stage-1 record layout
        #[arg(short, long, value_enum)]
        points: Option<PointsArg>,

        /// Stage-2 byte compressor
        #[arg(short, long, value_enum)]
        bytes: Option<BytesArg>,

        /// Stage-3 entropy coder
        #[arg(short, long, value_enum)]
        entropy: Option<EntropyArg>,

        /// Keep runs of invalid records instead of collapsing them
        #[arg(long)]
        keep_invalid: bool,

        /// LZSS window size as a power of two (2-16)
        #[arg(long)]
        index_bits: Option<u8>,

        /// LZSS length field width (1-8)
        #[arg(long)]
        len_bits: Option<u8>,

        /// Pick the smallest lossless record layout automatically
        #[arg(short, long)]
        adaptive: bool,
    },

    /// Decode a frame back to raw point records
    #[command(alias = "d")]
    Decode {
        /// Frame file
        input: PathBuf,

        /// Output file of raw 20-byte records
        output: PathBuf,

        /// Expected number of records (defaults to the count in the frame)
        #[arg(short = 'n', long)]
        count: Option<usize>,
    },

    /// Show the headers of every stage
    #[command(alias = "i")]
    Info {
        /// Frame file
        input: PathBuf,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,
    },

    /// Check that a frame decodes
    #[command(alias = "t")]
    Test {
        /// Frame file
        input: PathBuf,
    },

    /// Print a pipeline configuration as JSON
    Config {
        /// Preset to print
        #[arg(short, long, value_enum, default_value = "default")]
        preset: Preset,
    },
}

/// Stage-1 record layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PointsArg {
    /// Raw 20-byte records
    None,
    /// Per-field bit widths
    ReduceBits,
    /// Per-field byte widths
    ReduceBytes,
    /// Truncated 8-byte rows (lossy)
    #[value(name = "reduce-bytes-222110")]
    ReduceBytes222110,
    /// Truncated 8-byte columns (lossy)
    ReduceBytesResort,
    /// Delta and run-length columns
    DeltaRle,
}

impl From<PointsArg> for PointMethod {
    fn from(arg: PointsArg) -> Self {
        match arg {
            PointsArg::None => Self::None,
            PointsArg::ReduceBits => Self::ReduceBits,
            PointsArg::ReduceBytes => Self::ReduceBytes,
            PointsArg::ReduceBytes222110 => Self::ReduceBytes222110,
            PointsArg::ReduceBytesResort => Self::ReduceBytesResort,
            PointsArg::DeltaRle => Self::DeltaRle,
        }
    }
}

/// Stage-2 byte compressor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum BytesArg {
    /// Stored
    None,
    /// LZSS
    Lzss,
    /// Move-to-front
    Mtf,
    /// Move-to-front, then LZSS
    MtfLzss,
}

impl From<BytesArg> for ByteMethod {
    fn from(arg: BytesArg) -> Self {
        match arg {
            BytesArg::None => Self::None,
            BytesArg::Lzss => Self::Lzss,
            BytesArg::Mtf => Self::Mtf,
            BytesArg::MtfLzss => Self::MtfLzss,
        }
    }
}

/// Stage-3 entropy coder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum EntropyArg {
    /// Stored
    None,
    /// Static Huffman
    Huffman,
}

impl From<EntropyArg> for EntropyMethod {
    fn from(arg: EntropyArg) -> Self {
        match arg {
            EntropyArg::None => Self::None,
            EntropyArg::Huffman => Self::Huffman,
        }
    }
}

/// Configuration preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
enum Preset {
    /// No compression in any stage
    Store,
    /// Skip the LZSS search
    Fast,
    /// Bit reduction, MTF+LZSS, Huffman
    #[default]
    Default,
}

impl From<Preset> for PipelineConfig {
    fn from(preset: Preset) -> Self {
        match preset {
            Preset::Store => Self::store(),
            Preset::Fast => Self::fast(),
            Preset::Default => Self::default(),
        }
    }
}

fn main() {
    let cli = Cli::parse();
    utils::init_logging(cli.verbose, cli.quiet);

    let result = match cli.command {
        Commands::Encode {
            input,
            output,
            config,
            points,
            bytes,
            entropy,
            keep_invalid,
            index_bits,
            len_bits,
            adaptive,
        } => {
            let overrides = EncodeOverrides {
                points: points.map(Into::into),
                bytes: bytes.map(Into::into),
                entropy: entropy.map(Into::into),
                keep_invalid,
                index_bits,
                len_bits,
                adaptive,
            };
            cmd_encode(&input, &output, config.as_deref(), &overrides)
        }
        Commands::Decode {
            input,
            output,
            count,
        } => cmd_decode(&input, &output, count),
        Commands::Info { input, json } => cmd_info(&input, json),
        Commands::Test { input } => cmd_test(&input),
        Commands::Config { preset } => cmd_config(preset.into()),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
