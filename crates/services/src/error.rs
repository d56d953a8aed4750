use mgosrv_config::ConfigurationError;
use mgosrv_db::DriverError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("wrong configuration informed")]
    WrongConfiguration,
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error("no reachable servers")]
    NoReachableServers,
    /// The driver refused to build a client.
    #[error(transparent)]
    Connection(DriverError),
    /// The server did not answer the liveness probe after connecting.
    #[error(transparent)]
    Probe(DriverError),
    #[error(transparent)]
    Session(DriverError),
    #[error("service not running")]
    NotRunning,
    #[error("not implemented")]
    NotImplemented,
}

impl ServiceError {
    /// Whether the error came from reaching the server, as opposed to misuse
    /// of the service.
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            ServiceError::NoReachableServers | ServiceError::Connection(_) | ServiceError::Probe(_)
        )
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
