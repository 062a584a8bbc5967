use std::env;

use thiserror::Error;

/// Application-level constants
pub const APP_NAME: &str = "rtha-server";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_PORT: u16 = 8000;

/// Default tracing filter when RUST_LOG is unset
pub fn default_log_filter() -> String {
    format!("info,{}=debug", APP_NAME.replace('-', "_"))
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Which document store the server runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Firestore,
    /// In-process store, for local development only. Data is lost on exit.
    Memory,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub store_backend: StoreBackend,
    pub firestore: FirestoreConfig,
    pub twilio: TwilioConfig,
    pub identity: IdentityConfig,
}

#[derive(Debug, Clone)]
pub struct FirestoreConfig {
    pub project_id: String,
    pub base_url: String,
    pub auth_token: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TwilioConfig {
    pub account_sid: String,
    pub auth_token: String,
    pub phone_number: String,
    pub base_url: String,
}

#[derive(Debug, Clone)]
pub struct IdentityConfig {
    pub base_url: String,
    pub auth_token: Option<String>,
}

impl Config {
    /// Read configuration from the process environment.
    ///
    /// With `STORE_BACKEND=memory` the Firestore settings become optional,
    /// so a dev instance can run with just the Twilio trio set (and even
    /// those may be dummies if /sendEmergency is never called).
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match env::var("PORT") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value: raw,
            })?,
            Err(_) => DEFAULT_PORT,
        };

        let store_backend = match env::var("STORE_BACKEND").as_deref() {
            Ok("memory") => StoreBackend::Memory,
            Ok("firestore") | Err(_) => StoreBackend::Firestore,
            Ok(other) => {
                return Err(ConfigError::Invalid {
                    name: "STORE_BACKEND",
                    value: other.to_string(),
                })
            }
        };

        let firestore = FirestoreConfig {
            project_id: match store_backend {
                StoreBackend::Firestore => require("FIRESTORE_PROJECT_ID")?,
                StoreBackend::Memory => env::var("FIRESTORE_PROJECT_ID").unwrap_or_default(),
            },
            base_url: env::var("FIRESTORE_API_URL")
                .unwrap_or_else(|_| crate::store::firestore::DEFAULT_BASE_URL.to_string()),
            auth_token: env::var("FIRESTORE_AUTH_TOKEN").ok(),
        };

        let twilio = TwilioConfig {
            account_sid: require("TWILIO_ACCOUNT_SID")?,
            auth_token: require("TWILIO_AUTH_TOKEN")?,
            phone_number: require("TWILIO_PHONE_NUMBER")?,
            base_url: env::var("TWILIO_API_URL")
                .unwrap_or_else(|_| crate::sms::TWILIO_BASE_URL.to_string()),
        };

        let identity = IdentityConfig {
            base_url: env::var("IDENTITY_API_URL")
                .unwrap_or_else(|_| crate::directory::DEFAULT_BASE_URL.to_string()),
            auth_token: env::var("IDENTITY_AUTH_TOKEN").ok(),
        };

        Ok(Self {
            port,
            store_backend,
            firestore,
            twilio,
            identity,
        })
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    match env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.1.0");
    }

    #[test]
    fn default_filter_names_the_crate() {
        assert_eq!(default_log_filter(), "info,rtha_server=debug");
    }
}
