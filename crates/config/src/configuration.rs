use serde::de::{self, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::time::Duration;

use crate::Mode;

/// How a service reaches its MongoDB deployment.
///
/// Every field is optional on input. `addresses` is only checked when the
/// service starts, and a missing `mode` is filled in with [`Mode::Primary`]
/// when the configuration is applied, never while decoding.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MongoServiceConfiguration {
    #[serde(deserialize_with = "deserialize_addresses")]
    pub addresses: Vec<String>,
    pub database: String,
    pub username: String,
    pub password: String,
    pub pool_size: u32,
    pub timeout: u64,
    pub mode: Option<Mode>,
    pub use_tls: bool,
}

impl MongoServiceConfiguration {
    /// Both username and password empty means an unauthenticated connection.
    pub fn has_credentials(&self) -> bool {
        !self.username.is_empty() || !self.password.is_empty()
    }

    pub fn timeout_duration(&self) -> Option<Duration> {
        (self.timeout > 0).then(|| Duration::from_secs(self.timeout))
    }

    pub fn pool_limit(&self) -> Option<u32> {
        (self.pool_size > 0).then_some(self.pool_size)
    }

    pub fn mode_or_default(&self) -> Mode {
        self.mode.unwrap_or_default()
    }

    /// Returns the configuration with `mode` set, defaulting to primary.
    pub fn with_default_mode(mut self) -> Self {
        self.mode = Some(self.mode_or_default());
        self
    }
}

/// Accepts a list of addresses or a single comma-separated string, the form
/// environment variables take.
fn deserialize_addresses<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    struct AddressesVisitor;

    impl<'de> Visitor<'de> for AddressesVisitor {
        type Value = Vec<String>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a list of addresses or a comma-separated string")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            Ok(value
                .split(',')
                .map(str::trim)
                .filter(|address| !address.is_empty())
                .map(str::to_string)
                .collect())
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            let mut addresses = Vec::with_capacity(seq.size_hint().unwrap_or(0));
            while let Some(address) = seq.next_element::<String>()? {
                addresses.push(address);
            }
            Ok(addresses)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(AddressesVisitor)
}

impl fmt::Debug for MongoServiceConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MongoServiceConfiguration")
            .field("addresses", &self.addresses)
            .field("database", &self.database)
            .field("username", &self.username)
            .field("password", &if self.password.is_empty() { "" } else { "***" })
            .field("pool_size", &self.pool_size)
            .field("timeout", &self.timeout)
            .field("mode", &self.mode)
            .field("use_tls", &self.use_tls)
            .finish()
    }
}
