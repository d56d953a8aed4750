use std::sync::Arc;
use tracing::{error, info, warn};

use crate::error::ServiceResult;
use crate::service::Service;

/// Starts a group of services in order and stops them in reverse.
#[derive(Default)]
pub struct ServiceStarter {
    services: Vec<Arc<dyn Service>>,
}

impl ServiceStarter {
    pub fn new(services: Vec<Arc<dyn Service>>) -> Self {
        Self { services }
    }

    pub fn push(&mut self, service: Arc<dyn Service>) {
        self.services.push(service);
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    /// On the first failure, services already started are stopped again
    /// (newest first) and the original error is returned.
    pub async fn start(&self) -> ServiceResult<()> {
        for (index, service) in self.services.iter().enumerate() {
            info!(service = service.name(), "Starting service");
            if let Err(err) = service.start().await {
                error!(service = service.name(), error = %err, "Service failed to start");
                for started in self.services[..index].iter().rev() {
                    if let Err(stop_err) = started.stop().await {
                        warn!(service = started.name(), error = %stop_err, "Rollback stop failed");
                    }
                }
                return Err(err);
            }
        }
        Ok(())
    }

    /// Stops every service, newest first, and reports the first failure.
    pub async fn stop(&self) -> ServiceResult<()> {
        let mut first_error = None;
        for service in self.services.iter().rev() {
            if let Err(err) = service.stop().await {
                warn!(service = service.name(), error = %err, "Service failed to stop");
                if first_error.is_none() {
                    first_error = Some(err);
                }
            }
        }
        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
