use std::{
    env,
    net::{AddrParseError, SocketAddr},
    num::ParseIntError,
    path::PathBuf,
    time::Duration,
};

use pendulum_engine::EngineConfig;
use pendulum_physics::IntegrationSettings;
use thiserror::Error;

/// Deployment flavour, selected by `PENDULUM_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Dev,
    Production,
}

/// Server settings read from the environment.
///
/// | variable              | default                                   |
/// |-----------------------|-------------------------------------------|
/// | `PENDULUM_ENV`        | `dev`                                     |
/// | `PENDULUM_ADDR`       | `0.0.0.0:8000` (dev), `127.0.0.1:8000`    |
/// | `PENDULUM_TICK_MS`    | `30`                                      |
/// | `PENDULUM_STATIC_DIR` | `$CARGO_MANIFEST_DIR/static`, or `static` |
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub environment: Environment,
    pub addr: SocketAddr,
    pub engine: EngineConfig,
    pub static_dir: PathBuf,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown PENDULUM_ENV {0:?}; expected \"dev\" or \"production\"")]
    UnknownEnvironment(String),

    #[error("invalid PENDULUM_ADDR {value:?}")]
    Addr {
        value: String,
        #[source]
        source: AddrParseError,
    },

    #[error("invalid PENDULUM_TICK_MS {value:?}")]
    TickInterval {
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error(transparent)]
    Engine(#[from] pendulum_engine::ConfigError),
}

impl ServerConfig {
    /// Reads the config from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an unparsable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads the config through `lookup`, which maps a variable name to its
    /// value if set.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an unparsable value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let environment = match lookup("PENDULUM_ENV").as_deref() {
            None | Some("dev") => Environment::Dev,
            Some("production") => Environment::Production,
            Some(other) => return Err(ConfigError::UnknownEnvironment(other.to_string())),
        };

        let addr = match lookup("PENDULUM_ADDR") {
            Some(value) => value
                .parse()
                .map_err(|source| ConfigError::Addr { value, source })?,
            None => match environment {
                Environment::Dev => SocketAddr::from(([0, 0, 0, 0], 8000)),
                Environment::Production => SocketAddr::from(([127, 0, 0, 1], 8000)),
            },
        };

        let tick_interval = match lookup("PENDULUM_TICK_MS") {
            Some(value) => value
                .parse()
                .map(Duration::from_millis)
                .map_err(|source| ConfigError::TickInterval { value, source })?,
            None => EngineConfig::default().tick_interval(),
        };
        let engine = EngineConfig::new(tick_interval, IntegrationSettings::default())?;

        let static_dir = lookup("PENDULUM_STATIC_DIR")
            .map(PathBuf::from)
            .or_else(|| lookup("CARGO_MANIFEST_DIR").map(|dir| PathBuf::from(dir).join("static")))
            .unwrap_or_else(|| PathBuf::from("static"));

        Ok(Self {
            environment,
            addr,
            engine,
            static_dir,
        })
    }

    /// Log filter used when `RUST_LOG` is not set.
    #[must_use]
    pub fn default_log_filter(&self) -> &'static str {
        match self.environment {
            Environment::Dev => "debug",
            Environment::Production => "info",
        }
    }
}
