use mongodb::{Client, ClientSession, Collection, Database};

/// Per-call handle handed out by a running service.
///
/// Shares the pool and topology of the service's client but carries its own
/// server session, so concurrent handlers never see each other's state.
/// Dropping it returns the server session to the pool.
pub struct MongoSession {
    client: Client,
    database: Database,
    session: ClientSession,
}

impl MongoSession {
    pub(crate) fn new(client: Client, database: Database, session: ClientSession) -> Self {
        Self {
            client,
            database,
            session,
        }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.database.collection::<T>(name)
    }

    pub fn client_session(&mut self) -> &mut ClientSession {
        &mut self.session
    }

    pub async fn ping(&mut self) -> mongodb::error::Result<()> {
        self.client
            .database("admin")
            .run_command(bson::doc! { "ping": 1 })
            .session(&mut self.session)
            .await?;

        Ok(())
    }
}
