// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, error};
use std::io::Write;
use std::path::PathBuf;

use crate::app_config::Config;
use crate::app_controller::Controller;
use crate::file_utils::FileManager;
use crate::timestamp::Timestamp;

mod app_config;
mod app_controller;
mod cue_matcher;
mod errors;
mod file_utils;
mod overlap;
mod resync;
mod timestamp;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Shift every timestamp in a subtitle file by a signed offset
    Resync(ResyncArgs),

    /// Report timestamp ordering violations in a subtitle file
    Overlap(OverlapArgs),

    /// Generate shell completions for srtfix
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct ResyncArgs {
    /// Input .srt file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Output .srt file (default: <stem>_copy.srt next to the input)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Offset in seconds, fractional and negative values allowed
    #[arg(short, long, allow_hyphen_values = true)]
    amount: f64,

    /// Only shift cues starting at or after this timestamp (HH:MM:SS,mmm)
    #[arg(short, long)]
    begin: Option<String>,

    /// Only shift cues starting at or before this timestamp (HH:MM:SS,mmm)
    #[arg(short, long)]
    end: Option<String>,
}

#[derive(Parser, Debug)]
struct OverlapArgs {
    /// Input .srt file or directory to scan
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,
}

/// srtfix - SRT subtitle timing toolkit
///
/// Repairs the timing of SubRip subtitle files: resync shifts every
/// timestamp by a signed fractional-second offset, overlap reports cues
/// whose timestamps are out of order.
#[derive(Parser, Debug)]
#[command(name = "srtfix")]
#[command(version = "1.0.0")]
#[command(about = "SRT subtitle timing toolkit")]
#[command(long_about = "srtfix repairs the timing of SubRip (.srt) subtitle files.

EXAMPLES:
    srtfix resync -a -2.5 movie.srt             # Shift all timestamps back 2.5s
    srtfix resync -a 1.25 -o fixed.srt movie.srt
    srtfix resync -a 3 -b 00:10:00,000 movie.srt # Only shift cues from 10 min on
    srtfix overlap movie.srt                     # Report timestamp inversions
    srtfix overlap /subs/                        # Scan a whole directory
    srtfix completions bash > srtfix.bash        # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a
    different config file with --config-path. Missing config files fall
    back to built-in defaults.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color code for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[0m",
            Level::Debug => "\x1B[1;34m",
            Level::Trace => "\x1B[1;90m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:5} {}\x1B[0m",
                color,
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    let options = CommandLineOptions::parse();

    let config = Config::load_or_default(&options.config_path)?;
    let level = options
        .log_level
        .map(app_config::LogLevel::from)
        .unwrap_or(config.log_level);

    if let Err(e) = CustomLogger::init(level.to_level_filter()) {
        eprintln!("Failed to initialize logger: {}", e);
    }

    match options.command {
        Commands::Resync(args) => run_resync(config, args),
        Commands::Overlap(args) => run_overlap(config, args),
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "srtfix", &mut std::io::stdout());
            Ok(())
        }
    }
}

fn run_resync(config: Config, args: ResyncArgs) -> Result<()> {
    let bounds = parse_bounds(args.begin.as_deref(), args.end.as_deref())?;
    let controller = Controller::with_config(config)?;

    let result = if FileManager::dir_exists(&args.input_path) {
        controller
            .run_resync_directory(&args.input_path, args.amount, bounds)
            .map(|_| ())
    } else {
        controller
            .run_resync(&args.input_path, args.output.as_deref(), args.amount, bounds)
            .map(|_| ())
    };

    if let Err(e) = &result {
        error!("Resync failed: {}", e);
    }
    result
}

fn run_overlap(config: Config, args: OverlapArgs) -> Result<()> {
    let controller = Controller::with_config(config)?;
    let stdout = std::io::stdout();
    let mut sink = stdout.lock();

    let result = if FileManager::dir_exists(&args.input_path) {
        controller.run_overlap_directory(&args.input_path, &mut sink)
    } else {
        controller.run_overlap(&args.input_path, &mut sink)
    };

    if let Err(e) = &result {
        error!("Overlap scan failed: {}", e);
    }
    result.map(|_| ())
}

// Bounds window on the start timestamp; either side defaults to the edge
// of the 24-hour clock
fn parse_bounds(
    begin: Option<&str>,
    end: Option<&str>,
) -> Result<Option<(Timestamp, Timestamp)>> {
    if begin.is_none() && end.is_none() {
        return Ok(None);
    }

    let begin = match begin {
        Some(text) => Timestamp::parse(text)
            .context(errors::SubtitleError::InvalidBound(text.to_string()))?,
        None => Timestamp::default(),
    };
    let end = match end {
        Some(text) => Timestamp::parse(text)
            .context(errors::SubtitleError::InvalidBound(text.to_string()))?,
        None => Timestamp::new(23, 59, 59, 999_999),
    };

    Ok(Some((begin, end)))
}
