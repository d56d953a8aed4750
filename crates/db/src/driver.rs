use async_trait::async_trait;
use mgosrv_config::{Mode, MongoServiceConfiguration};
use std::fmt;
use std::time::Duration;

/// Errors coming out of a driver are passed to callers untouched.
pub type DriverError = Box<dyn std::error::Error + Send + Sync>;

/// The database client capability a service manages.
///
/// A `Client` is the long-lived, pooled handle owned by the service. A
/// `Session` is a cheap per-call handle derived from it; dropping it
/// releases it back to the client.
#[async_trait]
pub trait Driver: Send + Sync + 'static {
    type Client: Clone + Send + Sync + 'static;
    type Session: Send;

    /// Builds a client with read preference, pool limit, credentials and TLS
    /// already applied.
    async fn connect(&self, options: &ConnectOptions) -> Result<Self::Client, DriverError>;

    /// Liveness probe against the server.
    async fn ping(&self, client: &Self::Client) -> Result<(), DriverError>;

    async fn session(&self, client: &Self::Client) -> Result<Self::Session, DriverError>;

    /// Best-effort teardown; there is nothing a caller can do about a failure here.
    async fn close(&self, client: Self::Client);
}

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Connection parameters derived from an applied configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectOptions {
    pub hosts: Vec<String>,
    pub database: String,
    pub credentials: Option<Credentials>,
    pub timeout: Option<Duration>,
    pub tls: bool,
    pub mode: Mode,
    pub pool_limit: Option<u32>,
}

impl ConnectOptions {
    pub fn from_configuration(configuration: &MongoServiceConfiguration) -> Self {
        let credentials = configuration.has_credentials().then(|| Credentials {
            username: configuration.username.clone(),
            password: configuration.password.clone(),
        });

        Self {
            hosts: configuration.addresses.clone(),
            database: configuration.database.clone(),
            credentials,
            timeout: configuration.timeout_duration(),
            tls: configuration.use_tls,
            mode: configuration.mode_or_default(),
            pool_limit: configuration.pool_limit(),
        }
    }
}
