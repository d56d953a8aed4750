use async_trait::async_trait;
use mgosrv_config::DEFAULT_ENV_PREFIX;
use std::any::Any;
use std::ops::Deref;
use std::path::PathBuf;

use crate::error::{ServiceError, ServiceResult};

/// Uniform lifecycle contract for pluggable, restartable components.
#[async_trait]
pub trait Service: Send + Sync {
    fn name(&self) -> &str;

    /// Sources the service's own configuration. Services that only know the
    /// shape of their configuration, not where it lives, keep this default.
    async fn load_configuration(&self) -> ServiceResult<Box<dyn Any + Send>> {
        Err(ServiceError::NotImplemented)
    }

    /// Stores a copy of `configuration`. Fails with
    /// [`ServiceError::WrongConfiguration`] when it is not of the type the
    /// service expects, leaving the previous configuration in place.
    fn apply_configuration(&self, configuration: &dyn Any) -> ServiceResult<()>;

    async fn start(&self) -> ServiceResult<()>;

    async fn stop(&self) -> ServiceResult<()>;

    async fn restart(&self) -> ServiceResult<()>;

    /// Loads the configuration and applies it.
    async fn reload_configuration(&self) -> ServiceResult<()> {
        let configuration = self.load_configuration().await?;
        self.apply_configuration(&*configuration)
    }
}

/// Wraps a service so that [`Service::load_configuration`] reads
/// `config/mongo.*`, an optional explicit file, and `<PREFIX>__*`
/// environment variables.
pub struct ConfiguredService<S> {
    inner: S,
    path: Option<PathBuf>,
    prefix: String,
}

impl<S> ConfiguredService<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            path: None,
            prefix: DEFAULT_ENV_PREFIX.to_string(),
        }
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }
}

impl<S> Deref for ConfiguredService<S> {
    type Target = S;

    fn deref(&self) -> &S {
        &self.inner
    }
}

#[async_trait]
impl<S: Service> Service for ConfiguredService<S> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn load_configuration(&self) -> ServiceResult<Box<dyn Any + Send>> {
        let configuration = match &self.path {
            Some(path) => mgosrv_config::load_from(path, &self.prefix)?,
            None => mgosrv_config::load(&self.prefix)?,
        };
        Ok(Box::new(configuration))
    }

    fn apply_configuration(&self, configuration: &dyn Any) -> ServiceResult<()> {
        self.inner.apply_configuration(configuration)
    }

    async fn start(&self) -> ServiceResult<()> {
        self.inner.start().await
    }

    async fn stop(&self) -> ServiceResult<()> {
        self.inner.stop().await
    }

    async fn restart(&self) -> ServiceResult<()> {
        self.inner.restart().await
    }
}
