//! Server configuration.
//!
//! # Responsibility
//! - Load `WebConfig` from defaults, optional `config/default` and
//!   `config/local` files, then `YANOTE__*` environment variables.
//!
//! # Invariants
//! - Every key has a default, so an empty environment yields a usable config.
//! - Later sources override earlier ones key by key.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_DATABASE_PATH: &str = "yanote.sqlite3";
const DEFAULT_USER_HEADER: &str = "x-remote-user";
const DEFAULT_LOGIN_URL: &str = "/auth/login/";

/// Main server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite file path.
    pub path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Header carrying the authenticated username, set by the upstream
    /// authentication provider.
    pub user_header: String,
    /// Where anonymous requesters are sent; `?next=<path>` is appended.
    pub login_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    /// Absolute directory for rolling log files. Logs go to stderr when unset.
    #[serde(default)]
    pub dir: Option<String>,
}

impl WebConfig {
    /// Loads configuration from files and `YANOTE__`-prefixed environment
    /// variables, e.g. `YANOTE__SERVER__PORT=8081`.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_builder(
            Config::builder()
                .add_source(File::with_name("config/default").required(false))
                .add_source(File::with_name("config/local").required(false))
                .add_source(
                    Environment::with_prefix("YANOTE")
                        .separator("__")
                        .try_parsing(true),
                ),
        )
    }

    /// Applies defaults under the sources already added to `builder`.
    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        builder
            .set_default("server.host", DEFAULT_HOST)?
            .set_default("server.port", i64::from(DEFAULT_PORT))?
            .set_default("database.path", DEFAULT_DATABASE_PATH)?
            .set_default("auth.user_header", DEFAULT_USER_HEADER)?
            .set_default("auth.login_url", DEFAULT_LOGIN_URL)?
            .set_default("logging.level", yanote_core::default_log_level())?
            .build()?
            .try_deserialize()
    }

    /// Returns the `host:port` pair to bind.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: DEFAULT_HOST.to_string(),
                port: DEFAULT_PORT,
            },
            database: DatabaseConfig {
                path: DEFAULT_DATABASE_PATH.to_string(),
            },
            auth: AuthConfig {
                user_header: DEFAULT_USER_HEADER.to_string(),
                login_url: DEFAULT_LOGIN_URL.to_string(),
            },
            logging: LoggingConfig {
                level: yanote_core::default_log_level().to_string(),
                dir: None,
            },
        }
    }
}
