use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::fmt;
use std::str::FromStr;

use crate::ConfigurationError;

/// Replica-set read preference the service applies to its client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    #[default]
    Primary,
    PrimaryPreferred,
    Secondary,
    SecondaryPreferred,
    Nearest,
}

impl Mode {
    pub const ALL: [Mode; 5] = [
        Mode::Primary,
        Mode::PrimaryPreferred,
        Mode::Secondary,
        Mode::SecondaryPreferred,
        Mode::Nearest,
    ];

    /// The token used for this mode in configuration files.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Mode::Primary => "primary",
            Mode::PrimaryPreferred => "primarypreferred",
            Mode::Secondary => "secondary",
            Mode::SecondaryPreferred => "secondarypreferred",
            Mode::Nearest => "nearest",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Tokens are case-sensitive: "Primary" is rejected.
impl FromStr for Mode {
    type Err = ConfigurationError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        Mode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == token)
            .ok_or_else(|| ConfigurationError::InvalidMode(token.to_string()))
    }
}

impl Serialize for Mode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Mode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        token.parse().map_err(de::Error::custom)
    }
}
