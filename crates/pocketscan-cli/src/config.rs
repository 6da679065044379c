mod builder;
mod defaults;
mod file;

pub use builder::build_config;

use pocketscan::engine::config::AnalysisConfig;
use std::path::PathBuf;

/// Everything the `analyze` command needs after merging the config file,
/// command-line flags and defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub analysis: AnalysisConfig,
    /// `None` means the platform data directory.
    pub data_dir: Option<PathBuf>,
}
