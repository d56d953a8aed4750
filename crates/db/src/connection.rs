use async_trait::async_trait;
use mgosrv_config::Mode;
use mongodb::{
    Client, Database,
    options::{
        ClientOptions, Credential, ReadPreference, SelectionCriteria, ServerAddress, Tls,
        TlsOptions,
    },
};
use tracing::{debug, info};

use crate::driver::{ConnectOptions, Driver, DriverError};
use crate::session::MongoSession;

/// Database used by sessions when the configuration leaves it empty.
pub const DEFAULT_DATABASE: &str = "test";

/// [`Driver`] backed by the official `mongodb` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct MongoDriver;

/// Long-lived pooled client plus the database it was configured for.
#[derive(Debug, Clone)]
pub struct MongoClient {
    client: Client,
    database: String,
}

impl MongoClient {
    pub fn database(&self) -> Database {
        self.client.database(&self.database)
    }
}

#[async_trait]
impl Driver for MongoDriver {
    type Client = MongoClient;
    type Session = MongoSession;

    async fn connect(&self, options: &ConnectOptions) -> Result<MongoClient, DriverError> {
        let client_options = client_options(options)?;
        let client = Client::with_options(client_options)?;

        debug!(
            hosts = ?options.hosts,
            db = %options.database,
            mode = %options.mode,
            tls = options.tls,
            pool_limit = ?options.pool_limit,
            "MongoDB client created"
        );

        let database = if options.database.is_empty() {
            DEFAULT_DATABASE.to_string()
        } else {
            options.database.clone()
        };

        Ok(MongoClient { client, database })
    }

    async fn ping(&self, client: &MongoClient) -> Result<(), DriverError> {
        client
            .client
            .database("admin")
            .run_command(bson::doc! { "ping": 1 })
            .await?;

        Ok(())
    }

    async fn session(&self, client: &MongoClient) -> Result<MongoSession, DriverError> {
        let session = client.client.start_session().await?;
        Ok(MongoSession::new(client.client.clone(), client.database(), session))
    }

    async fn close(&self, client: MongoClient) {
        client.client.shutdown().immediate(true).await;
        info!(db = %client.database, "MongoDB client closed");
    }
}

/// Translates service connection parameters into driver options.
///
/// The driver does not open a connection here; the first operation (the
/// liveness probe) is what actually dials, performs the TLS handshake and
/// authenticates.
pub fn client_options(options: &ConnectOptions) -> mongodb::error::Result<ClientOptions> {
    let mut client_options = ClientOptions::default();

    client_options.hosts = options
        .hosts
        .iter()
        .map(ServerAddress::parse)
        .collect::<mongodb::error::Result<Vec<_>>>()?;

    if !options.database.is_empty() {
        client_options.default_database = Some(options.database.clone());
    }

    if let Some(credentials) = &options.credentials {
        let mut credential = Credential::default();
        credential.username = Some(credentials.username.clone());
        credential.password = Some(credentials.password.clone());
        if !options.database.is_empty() {
            credential.source = Some(options.database.clone());
        }
        client_options.credential = Some(credential);
    }

    if let Some(timeout) = options.timeout {
        client_options.connect_timeout = Some(timeout);
        client_options.server_selection_timeout = Some(timeout);
    }

    if options.tls {
        client_options.tls = Some(Tls::Enabled(TlsOptions::default()));
    }

    client_options.selection_criteria = Some(SelectionCriteria::ReadPreference(
        read_preference(options.mode),
    ));

    if let Some(limit) = options.pool_limit {
        client_options.max_pool_size = Some(limit);
    }

    Ok(client_options)
}

pub fn read_preference(mode: Mode) -> ReadPreference {
    match mode {
        Mode::Primary => ReadPreference::Primary,
        Mode::PrimaryPreferred => ReadPreference::PrimaryPreferred {
            options: Default::default(),
        },
        Mode::Secondary => ReadPreference::Secondary {
            options: Default::default(),
        },
        Mode::SecondaryPreferred => ReadPreference::SecondaryPreferred {
            options: Default::default(),
        },
        Mode::Nearest => ReadPreference::Nearest {
            options: Default::default(),
        },
    }
}
