use config::{Config, Environment, File, FileFormat};
use std::path::Path;

use crate::{ConfigurationError, MongoServiceConfiguration};

pub const DEFAULT_ENV_PREFIX: &str = "MGOSRV";

/// Loads a configuration from `config/mongo.*` (if present) and the
/// environment, e.g. `MGOSRV__ADDRESSES=db1:27017,db2:27017`.
pub fn load(prefix: &str) -> Result<MongoServiceConfiguration, ConfigurationError> {
    build(None, environment(prefix))
}

/// Like [`load`], with an explicit file layered on top of `config/mongo.*`.
/// The file must exist; its format is taken from the extension.
pub fn load_from(
    path: impl AsRef<Path>,
    prefix: &str,
) -> Result<MongoServiceConfiguration, ConfigurationError> {
    build(Some(path.as_ref()), environment(prefix))
}

/// Decodes a configuration from text, without consulting files or the environment.
pub fn parse(
    content: &str,
    format: FileFormat,
) -> Result<MongoServiceConfiguration, ConfigurationError> {
    let config = Config::builder()
        .add_source(File::from_str(content, format))
        .build()?;

    Ok(config.try_deserialize()?)
}

// Values stay strings; serde converts the numeric and boolean keys, so a
// password like "0123" is never re-typed.
fn environment(prefix: &str) -> Environment {
    Environment::with_prefix(prefix)
        .prefix_separator("__")
        .separator("__")
}

fn build(
    path: Option<&Path>,
    environment: Environment,
) -> Result<MongoServiceConfiguration, ConfigurationError> {
    let mut builder =
        Config::builder().add_source(File::with_name("config/mongo").required(false));

    if let Some(path) = path {
        builder = builder.add_source(File::from(path).required(true));
    }

    let config = builder.add_source(environment).build()?;

    Ok(config.try_deserialize()?)
}
