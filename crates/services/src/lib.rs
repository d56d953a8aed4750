pub mod error;
pub mod mongo;
pub mod service;
pub mod starter;

#[cfg(test)]
mod testing;
#[cfg(test)]
mod tests;

pub use error::{ServiceError, ServiceResult};
pub use mongo::MongoService;
pub use service::{ConfiguredService, Service};
pub use starter::ServiceStarter;

pub use mgosrv_config::{Mode, MongoServiceConfiguration};
pub use mgosrv_db::{Driver, MongoDriver, MongoSession};
