//! Application settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `MESTO_*` environment variables, and an
//! optional configuration file, in that order of precedence.

use std::fmt;

use ortho_config::OrthoConfig;
use serde::de::{self, Deserializer, Unexpected, Visitor};
use serde::Deserialize;

use crate::domain::OBJECT_ID_HEX_LEN;

/// Interface the HTTP server binds when none is configured.
pub const DEFAULT_HOST: &str = "0.0.0.0";
/// Port the HTTP server binds when none is configured.
pub const DEFAULT_PORT: u16 = 3000;
/// Caller identity injected into requests when none is configured.
pub const DEFAULT_CALLER_ID: &str = "683c2711f588f756a662f7e9";
/// MongoDB database used when none is configured.
pub const DEFAULT_DATABASE: &str = "mestodb";

/// Runtime configuration for the server binary.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "MESTO")]
pub struct AppSettings {
    /// Interface to bind.
    pub host: Option<String>,
    /// Port to bind.
    #[ortho_config(default = 3000)]
    pub port: u16,
    /// Identifier attached to every request as the acting user.
    #[serde(default, deserialize_with = "deserialize_caller_id")]
    pub caller_id: Option<String>,
    /// MongoDB connection string. Without it the in-memory store is used.
    pub mongo_uri: Option<String>,
    /// MongoDB database name.
    pub database: Option<String>,
}

impl AppSettings {
    /// Return the configured host, falling back to the default.
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Return the configured port.
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// Return the configured caller identity, falling back to the default.
    pub fn caller_id(&self) -> &str {
        self.caller_id.as_deref().unwrap_or(DEFAULT_CALLER_ID)
    }

    /// Return the MongoDB connection string, if configured.
    pub fn mongo_uri(&self) -> Option<&str> {
        self.mongo_uri.as_deref()
    }

    /// Return the configured database name, falling back to the default.
    pub fn database(&self) -> &str {
        self.database.as_deref().unwrap_or(DEFAULT_DATABASE)
    }
}

/// Read the caller id as text.
///
/// The environment layer turns an all-digit value such as
/// `000000000000000000000001` into a number. Such numbers are written back
/// as zero-padded digits so valid identifiers survive the round trip.
/// Quoting the value (`MESTO_CALLER_ID='"..."'`) keeps it a string.
fn deserialize_caller_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(CallerIdVisitor)
}

struct CallerIdVisitor;

fn padded_digits(value: impl fmt::Display) -> String {
    format!("{value:0>width$}", width = OBJECT_ID_HEX_LEN)
}

impl<'de> Visitor<'de> for CallerIdVisitor {
    type Value = Option<String>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a caller identifier")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        Ok(Some(value.to_owned()))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        Ok(Some(padded_digits(value)))
    }

    fn visit_u128<E: de::Error>(self, value: u128) -> Result<Self::Value, E> {
        Ok(Some(padded_digits(value)))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        u64::try_from(value)
            .map(|unsigned| Some(padded_digits(unsigned)))
            .map_err(|_| E::invalid_value(Unexpected::Signed(value), &self))
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }
}
