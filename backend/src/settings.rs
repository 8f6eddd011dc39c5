//! Application settings loaded via OrthoConfig.
//!
//! Values come from the command line, `RECIPES_*` environment variables and
//! an optional configuration file. Raw values are kept as strings and parsed
//! by the accessors so a bad value is reported with the offending field.

use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Execution profile for the server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RunMode {
    /// Swagger UI and human-readable logs.
    Debug,
    /// JSON logs, no interactive docs.
    #[default]
    Release,
}

impl RunMode {
    /// Whether interactive API docs should be served.
    pub fn serves_docs(self) -> bool {
        matches!(self, Self::Debug)
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Debug => "debug",
            Self::Release => "release",
        })
    }
}

impl FromStr for RunMode {
    type Err = SettingsError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "release" => Ok(Self::Release),
            _ => Err(SettingsError::InvalidRunMode {
                value: value.to_owned(),
            }),
        }
    }
}

/// Errors raised while interpreting loaded settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// `run_mode` is neither `debug` nor `release`.
    #[error("run mode must be `debug` or `release`, got `{value}`")]
    InvalidRunMode { value: String },
    /// `bind_addr` is not a socket address.
    #[error("invalid bind address `{value}`: {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    /// `database_url` is not a URL.
    #[error("invalid database URL: {source}")]
    InvalidDatabaseUrl {
        #[source]
        source: url::ParseError,
    },
    /// `database_name` cannot be applied to the configured URL.
    #[error("database name `{name}` cannot be applied to the database URL")]
    InvalidDatabaseName { name: String },
}

/// Settings for the recipes server.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "RECIPES")]
pub struct AppSettings {
    /// `debug` or `release`; defaults to `release`.
    pub run_mode: Option<String>,
    /// Socket address to listen on; defaults to `0.0.0.0:8080`.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection URL. In-memory adapters are used when unset.
    pub database_url: Option<String>,
    /// Database name overriding the path of `database_url`.
    pub database_name: Option<String>,
    /// Redis connection URL. Caching is disabled when unset.
    pub cache_url: Option<String>,
    /// JSON file of recipes inserted into an empty store at startup.
    pub seed_path: Option<PathBuf>,
}

impl AppSettings {
    /// Return the configured run mode.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidRunMode`] for unknown values.
    pub fn run_mode(&self) -> Result<RunMode, SettingsError> {
        self.run_mode
            .as_deref()
            .map_or(Ok(RunMode::default()), str::parse)
    }

    /// Return the socket address to bind.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidBindAddr`] if the value does not parse.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.trim()
            .parse()
            .map_err(|source| SettingsError::InvalidBindAddr {
                value: raw.to_owned(),
                source,
            })
    }

    /// Return the effective database URL, if any.
    ///
    /// When `database_name` is set it replaces the path segment of
    /// `database_url`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] if the URL does not parse or the name cannot
    /// be applied.
    pub fn database_url(&self) -> Result<Option<String>, SettingsError> {
        let Some(raw) = self.database_url.as_deref() else {
            return Ok(None);
        };
        let Some(name) = self
            .database_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
        else {
            return Ok(Some(raw.to_owned()));
        };

        let mut url =
            Url::parse(raw).map_err(|source| SettingsError::InvalidDatabaseUrl { source })?;
        if url.cannot_be_a_base() || name.contains('/') {
            return Err(SettingsError::InvalidDatabaseName {
                name: name.to_owned(),
            });
        }
        url.set_path(name);
        Ok(Some(url.to_string()))
    }

    /// Return the cache URL, ignoring blank values.
    pub fn cache_url(&self) -> Option<&str> {
        self.cache_url
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }

    /// Return the seed file path, if seeding is configured.
    pub fn seed_path(&self) -> Option<&PathBuf> {
        self.seed_path.as_ref()
    }
}
