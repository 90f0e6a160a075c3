pub mod app_config;
pub mod config;
pub mod filter;
pub mod report;
pub mod venues;

use thiserror::Error;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use filter::NameFilter;
pub use report::{read_report, sort_events, today_stamp, write_report, Event, Report, ReportError};
pub use venues::{load_venues_file, DiscoveryConfig, StaticVenue, VenuesFile};

/// Errors raised while loading environment or file-based configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read venues file {path}: {source}")]
    VenuesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse venues file: {0}")]
    VenuesFileParse(#[from] serde_yaml::Error),

    #[error("venues file validation failed: {0}")]
    Validation(String),
}
