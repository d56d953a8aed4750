pub mod configuration;
pub mod mode;
pub mod settings;

pub use config::FileFormat;
pub use configuration::MongoServiceConfiguration;
pub use mode::Mode;
pub use settings::{DEFAULT_ENV_PREFIX, load, load_from, parse};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("invalid mode: {0}")]
    InvalidMode(String),
    #[error(transparent)]
    Source(#[from] config::ConfigError),
}
