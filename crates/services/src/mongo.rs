use async_trait::async_trait;
use mgosrv_config::MongoServiceConfiguration;
use mgosrv_db::{ConnectOptions, Driver, MongoDriver};
use parking_lot::RwLock;
use std::any::Any;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::error::{ServiceError, ServiceResult};
use crate::service::Service;

/// A MongoDB client pool managed as a [`Service`].
///
/// The service is either stopped or running; while running it owns exactly
/// one long-lived client, and [`MongoService::run_with_session`] hands out
/// independent sessions derived from it. Lifecycle calls are serialized by
/// an internal lock, so they may be issued from several tasks at once.
pub struct MongoService<D: Driver = MongoDriver> {
    name: String,
    driver: D,
    configuration: RwLock<MongoServiceConfiguration>,
    // `Some` exactly while running.
    client: tokio::sync::RwLock<Option<D::Client>>,
}

impl MongoService<MongoDriver> {
    pub fn new() -> Self {
        Self::with_driver(MongoDriver)
    }
}

impl Default for MongoService<MongoDriver> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Driver> MongoService<D> {
    pub fn with_driver(driver: D) -> Self {
        Self {
            name: "mongo".to_string(),
            driver,
            configuration: RwLock::new(MongoServiceConfiguration::default().with_default_mode()),
            client: tokio::sync::RwLock::new(None),
        }
    }

    /// Name used in logs and by [`crate::ServiceStarter`].
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Typed form of [`Service::apply_configuration`].
    ///
    /// Applying while running is accepted and stored, but the live client
    /// keeps its settings until the next start or restart.
    pub fn configure(&self, configuration: MongoServiceConfiguration) {
        *self.configuration.write() = configuration.with_default_mode();
    }

    pub fn configuration(&self) -> MongoServiceConfiguration {
        self.configuration.read().clone()
    }

    pub async fn is_running(&self) -> bool {
        self.client.read().await.is_some()
    }

    /// Runs `handler` with a session of its own, released when the handler
    /// returns, fails or panics.
    ///
    /// Fails with [`ServiceError::NotRunning`] without calling the handler
    /// when the service is stopped. The handler's result is returned as is;
    /// the broker never times out or cancels it.
    pub async fn run_with_session<F, T, E>(&self, handler: F) -> Result<T, E>
    where
        F: AsyncFnOnce(&mut D::Session) -> Result<T, E>,
        E: From<ServiceError>,
    {
        let client = self
            .client
            .read()
            .await
            .clone()
            .ok_or(ServiceError::NotRunning)?;

        let mut session = self
            .driver
            .session(&client)
            .await
            .map_err(ServiceError::Session)?;
        debug!(service = %self.name, "Session checked out");

        handler(&mut session).await
    }

    async fn start_locked(&self, state: &mut Option<D::Client>) -> ServiceResult<()> {
        if state.is_some() {
            debug!(service = %self.name, "Service already running");
            return Ok(());
        }

        let options = ConnectOptions::from_configuration(&self.configuration.read());
        if options.hosts.is_empty() {
            return Err(ServiceError::NoReachableServers);
        }

        info!(
            service = %self.name,
            hosts = ?options.hosts,
            db = %options.database,
            mode = %options.mode,
            tls = options.tls,
            "Starting service"
        );

        let client = self
            .driver
            .connect(&options)
            .await
            .map_err(ServiceError::Connection)?;

        if let Err(err) = self.driver.ping(&client).await {
            warn!(service = %self.name, error = %err, "Liveness probe failed, discarding client");
            self.driver.close(client).await;
            return Err(ServiceError::Probe(err));
        }

        *state = Some(client);
        info!(service = %self.name, db = %options.database, "Connected to MongoDB");
        Ok(())
    }

    async fn stop_locked(&self, state: &mut Option<D::Client>) {
        match state.take() {
            Some(client) => {
                self.driver.close(client).await;
                info!(service = %self.name, "Service stopped");
            }
            None => debug!(service = %self.name, "Service already stopped"),
        }
    }
}

#[async_trait]
impl<D: Driver> Service for MongoService<D> {
    fn name(&self) -> &str {
        &self.name
    }

    fn apply_configuration(&self, configuration: &dyn Any) -> ServiceResult<()> {
        let configuration = if let Some(c) = configuration.downcast_ref::<MongoServiceConfiguration>() {
            c.clone()
        } else if let Some(c) = configuration.downcast_ref::<Arc<MongoServiceConfiguration>>() {
            MongoServiceConfiguration::clone(c)
        } else if let Some(c) = configuration.downcast_ref::<Box<MongoServiceConfiguration>>() {
            MongoServiceConfiguration::clone(c)
        } else {
            return Err(ServiceError::WrongConfiguration);
        };

        self.configure(configuration);
        Ok(())
    }

    async fn start(&self) -> ServiceResult<()> {
        let mut state = self.client.write().await;
        self.start_locked(&mut state).await
    }

    async fn stop(&self) -> ServiceResult<()> {
        let mut state = self.client.write().await;
        self.stop_locked(&mut state).await;
        Ok(())
    }

    async fn restart(&self) -> ServiceResult<()> {
        let mut state = self.client.write().await;
        if state.is_some() {
            info!(service = %self.name, "Restarting service");
            self.stop_locked(&mut state).await;
        }
        self.start_locked(&mut state).await
    }
}
