use sqlbridge_sql::Flavor;

use serde::Deserialize;
use std::time::Duration;

/// Settings for a [`Db`](crate::Db).
///
/// Deserializes from any serde format; missing fields take their defaults.
///
/// ```
/// let config: sqlbridge::Config = serde_json::from_str(r#"{ "batch_size": 500 }"#).unwrap();
/// assert_eq!(config.batch_size, 500);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// SQL dialect to generate.
    pub flavor: Flavor,

    /// Command timeout in milliseconds, passed through to the driver.
    pub command_timeout: Option<u64>,

    /// Maximum number of rows combined into one batch statement.
    pub batch_size: usize,

    /// Compile SQL on the blocking thread pool in async operations.
    pub offload_compile: bool,
}

impl Config {
    pub const DEFAULT_BATCH_SIZE: usize = 2000;

    pub fn command_timeout(&self) -> Option<Duration> {
        self.command_timeout.map(Duration::from_millis)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            flavor: Flavor::Sqlite,
            command_timeout: None,
            batch_size: Config::DEFAULT_BATCH_SIZE,
            offload_compile: false,
        }
    }
}
