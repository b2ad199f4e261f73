//! Command-line configuration.

use std::path::{Path, PathBuf};

use clap::Parser;
use topo_log::{Level, Logger};

/// Default graph server endpoint.
pub const DEFAULT_GRAPH_URL: &str = "http://127.0.0.1:8000";

/// Load router configuration dumps into the discovery graph.
#[derive(Debug, Parser)]
#[command(name = "confsyncd", version, about)]
pub struct Args {
    /// Device dump files to ingest; the device name is the file stem.
    #[arg(required = true, value_name = "DUMP")]
    pub dumps: Vec<PathBuf>,

    /// Base URL of the discovery graph server.
    #[arg(long, default_value = DEFAULT_GRAPH_URL, value_name = "URL")]
    pub graph: String,

    /// Parse and log without creating endpoints or interfaces.
    #[arg(long)]
    pub dry_run: bool,

    /// Log level threshold.
    #[arg(long, default_value = "info", value_name = "LEVEL")]
    pub level: Level,

    /// Suppress log messages containing this substring (repeatable).
    #[arg(long = "filter", value_name = "SUBSTRING")]
    pub filters: Vec<String>,

    /// Colorize log output.
    #[arg(long)]
    pub color: bool,
}

impl Args {
    /// Builds the shared logger from the logging flags.
    pub fn logger(&self) -> Logger {
        let logger = Logger::stderr();
        logger.set_level(self.level);
        logger.set_color(self.color);
        logger.set_filters(self.filters.clone());
        logger
    }

    /// Device name for a dump path: the file stem, falling back to the
    /// full path when there is none.
    pub fn device_name(path: &Path) -> String {
        path.file_stem()
            .or_else(|| path.file_name())
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string())
    }
}
