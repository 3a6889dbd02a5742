mod app;
mod commands;
mod config;
mod effects;
mod render;

use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use upload_logging::{upload_info, LogDestination};

use crate::config::AppConfig;

const LOG_FILENAME: &str = "./uploader.log";

#[derive(Parser, Debug)]
#[command(author, version, about = "Stage video files and upload them over HTTP", long_about = None)]
struct Args {
    /// Path to the RON config file
    #[arg(short, long, default_value = config::DEFAULT_CONFIG_FILENAME)]
    config: PathBuf,

    /// Upload endpoint, overrides the config file
    #[arg(short, long)]
    endpoint: Option<String>,

    /// Where log records go
    #[arg(long, value_enum, default_value_t = LogTarget::File)]
    log: LogTarget,

    /// Log verbosity
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogTarget {
    File,
    Terminal,
    Both,
}

impl From<LogTarget> for LogDestination {
    fn from(target: LogTarget) -> Self {
        match target {
            LogTarget::File => LogDestination::File,
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::Both => LogDestination::Both,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    upload_logging::initialize(
        args.log.into(),
        args.log_level.into(),
        Path::new(LOG_FILENAME),
    );

    let config = AppConfig::load(&args.config)?.with_endpoint(args.endpoint)?;
    upload_info!("Upload endpoint: {}", config.endpoint);

    app::run_app(config)
}
