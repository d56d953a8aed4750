
use crate::testing::FakeDriver;
use crate::{MongoService, MongoServiceConfiguration, Service};

pub(crate) fn local_configuration() -> MongoServiceConfiguration {
    MongoServiceConfiguration {
        addresses: vec!["localhost".to_string()],
        database: "test-service-database".to_string(),
        pool_size: 1,
        timeout: 60,
        ..Default::default()
    }
}

pub(crate) fn configured_service() -> MongoService<FakeDriver> {
    let service = MongoService::with_driver(FakeDriver::default());
    service.configure(local_configuration());
    service
}

pub(crate) async fn running_service() -> MongoService<FakeDriver> {
    let service = configured_service();
    service.start().await.unwrap();
    service
}
