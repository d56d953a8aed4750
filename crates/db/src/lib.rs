pub mod connection;
pub mod driver;
pub mod session;

pub use connection::{MongoClient, MongoDriver};
pub use driver::{ConnectOptions, Credentials, Driver, DriverError};
pub use session::MongoSession;
