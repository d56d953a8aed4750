//! In-memory driver used by the unit tests.

use async_trait::async_trait;
use mgosrv_db::{ConnectOptions, Driver, DriverError};
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::ServiceError;

#[derive(Default)]
pub struct FakeState {
    pub connects: AtomicUsize,
    pub closes: AtomicUsize,
    pub pings: AtomicUsize,
    pub sessions_opened: AtomicUsize,
    pub sessions_released: AtomicUsize,
    pub fail_connect: Mutex<Option<String>>,
    pub fail_ping: Mutex<Option<String>>,
    /// Server only speaks plain TCP; a TLS handshake is refused.
    pub plain_only: AtomicBool,
    pub last_options: Mutex<Option<ConnectOptions>>,
}

#[derive(Clone, Default)]
pub struct FakeDriver {
    pub state: Arc<FakeState>,
}

impl FakeDriver {
    pub fn connects(&self) -> usize {
        self.state.connects.load(Ordering::SeqCst)
    }

    pub fn closes(&self) -> usize {
        self.state.closes.load(Ordering::SeqCst)
    }

    pub fn sessions_opened(&self) -> usize {
        self.state.sessions_opened.load(Ordering::SeqCst)
    }

    pub fn sessions_released(&self) -> usize {
        self.state.sessions_released.load(Ordering::SeqCst)
    }

    pub fn fail_connect(&self, message: &str) {
        *self.state.fail_connect.lock() = Some(message.to_string());
    }

    pub fn fail_ping(&self, message: &str) {
        *self.state.fail_ping.lock() = Some(message.to_string());
    }

    pub fn heal(&self) {
        *self.state.fail_connect.lock() = None;
        *self.state.fail_ping.lock() = None;
    }

    pub fn last_options(&self) -> Option<ConnectOptions> {
        self.state.last_options.lock().clone()
    }
}

#[derive(Clone)]
pub struct FakeClient {
    pub id: usize,
}

pub struct FakeSession {
    pub id: usize,
    pub client_id: usize,
    state: Arc<FakeState>,
}

impl FakeSession {
    pub async fn ping(&mut self) -> Result<(), ServiceError> {
        self.state.pings.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

impl Drop for FakeSession {
    fn drop(&mut self) {
        self.state.sessions_released.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl Driver for FakeDriver {
    type Client = FakeClient;
    type Session = FakeSession;

    async fn connect(&self, options: &ConnectOptions) -> Result<FakeClient, DriverError> {
        *self.state.last_options.lock() = Some(options.clone());
        if let Some(message) = self.state.fail_connect.lock().clone() {
            return Err(message.into());
        }
        if options.tls && self.state.plain_only.load(Ordering::SeqCst) {
            return Err("tls handshake failed: server closed the connection".into());
        }
        let id = self.state.connects.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(FakeClient { id })
    }

    async fn ping(&self, _client: &FakeClient) -> Result<(), DriverError> {
        self.state.pings.fetch_add(1, Ordering::SeqCst);
        match self.state.fail_ping.lock().clone() {
            Some(message) => Err(message.into()),
            None => Ok(()),
        }
    }

    async fn session(&self, client: &FakeClient) -> Result<FakeSession, DriverError> {
        let id = self.state.sessions_opened.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(FakeSession {
            id,
            client_id: client.id,
            state: self.state.clone(),
        })
    }

    async fn close(&self, _client: FakeClient) {
        self.state.closes.fetch_add(1, Ordering::SeqCst);
    }
}
