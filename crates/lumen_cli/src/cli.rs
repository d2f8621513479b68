use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Log levels accepted on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "lumen")]
#[command(about = "A Whitted-style CPU ray tracer", version)]
pub struct Args {
    /// Scene file (JSON). The built-in demo scene is rendered when omitted.
    pub scene: Option<PathBuf>,

    /// Output file path (.png for PNG, anything else for PPM)
    #[arg(short, long, default_value = "render.ppm")]
    pub output: PathBuf,

    /// Number of worker threads (defaults to the available parallelism)
    #[arg(short = 'j', long)]
    pub workers: Option<usize>,

    /// Maximum reflection depth
    #[arg(long)]
    pub max_depth: Option<u32>,

    /// Bucket edge length in pixels; the viewport must be a multiple of it
    #[arg(long)]
    pub bucket_size: Option<u32>,

    /// Override the scene camera's viewport width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Override the scene camera's viewport height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Average four sub-pixel rays per pixel
    #[arg(long)]
    pub supersample: bool,

    /// Set the logging level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}
