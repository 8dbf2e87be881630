use serde::Deserialize;
use std::fmt;

pub const DEFAULT_PORT: u16 = 8080;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Port the HTTP server listens on (`PORT`).
    pub port: u16,
    pub database: DatabaseSettings,
}

/// PostgreSQL connection parameters, one per `POSTGRES_*` variable.
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseSettings {
    pub user: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    /// Database name (`POSTGRES_DB`).
    pub name: String,
}

// Keeps the password out of logs.
impl fmt::Debug for DatabaseSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseSettings")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("name", &self.name)
            .finish()
    }
}

/// The environment as the `config` crate sees it: flat, lowercased keys.
#[derive(Debug, Deserialize)]
pub(crate) struct EnvSettings {
    pub port: u16,
    pub postgres_user: String,
    pub postgres_password: String,
    pub postgres_host: String,
    pub postgres_port: u16,
    pub postgres_db: String,
}

impl EnvSettings {
    /// Names of required variables that are present but blank.
    pub(crate) fn blank_fields(&self) -> Vec<&'static str> {
        [
            ("POSTGRES_USER", &self.postgres_user),
            ("POSTGRES_PASSWORD", &self.postgres_password),
            ("POSTGRES_HOST", &self.postgres_host),
            ("POSTGRES_DB", &self.postgres_db),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

impl From<EnvSettings> for Settings {
    fn from(env: EnvSettings) -> Self {
        Self {
            port: env.port,
            database: DatabaseSettings {
                user: env.postgres_user,
                password: env.postgres_password,
                host: env.postgres_host,
                port: env.postgres_port,
                name: env.postgres_db,
            },
        }
    }
}
