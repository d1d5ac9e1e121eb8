use std::env;
use std::path::PathBuf;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the persisted issue ledger and ban list.
    pub data_dir: PathBuf,

    /// Display filter radius in km. The interaction gate is fixed at the
    /// neighborhood radius and does not read this.
    pub filter_radius_km: f64,
}

impl Config {
    /// Load configuration from environment variables.
    /// Panics with a clear message if a variable fails to parse.
    pub fn from_env() -> Self {
        Self {
            data_dir: env::var("WARDWATCH_DATA_DIR")
                .unwrap_or_else(|_| "./wardwatch-data".to_string())
                .into(),
            filter_radius_km: env::var("WARDWATCH_RADIUS_KM")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .expect("WARDWATCH_RADIUS_KM must be a number"),
        }
    }
}
