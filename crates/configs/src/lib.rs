//! # configs
//!
//! Layered settings: built-in defaults, then `config/note-board.toml` if it
//! exists, then `NOTE_BOARD__SECTION__KEY` environment variables (a `.env`
//! file is loaded first).

use std::path::PathBuf;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use thiserror::Error;

pub const ENV_PREFIX: &str = "NOTE_BOARD";
pub const CONFIG_FILE: &str = "config/note-board";

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("could not load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("set exactly one of admin.password or admin.password_hash")]
    AmbiguousAdminSecret,

    #[error("admin.password must not be empty")]
    EmptyAdminPassword,
}

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    #[serde(default)]
    pub admin: AdminConfig,
    pub log: LogConfig,
    /// The `.env` file that was loaded, if any. Reported once logging is up.
    #[serde(skip)]
    pub env_file: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct StorageConfig {
    /// The JSON document holding every entry.
    pub data_file: PathBuf,
}

#[derive(Debug, Default, Deserialize)]
pub struct AdminConfig {
    #[serde(default)]
    pub password: Option<SecretString>,
    /// Argon2 PHC string; see the `hash-password` binary.
    #[serde(default)]
    pub password_hash: Option<String>,
}

/// Which credential strategy the admin section selects.
#[derive(Debug)]
pub enum AdminSecret<'a> {
    Plain(&'a SecretString),
    Argon2Hash(&'a str),
}

impl AdminConfig {
    pub fn secret(&self) -> Result<AdminSecret<'_>, SettingsError> {
        match (&self.password, &self.password_hash) {
            (Some(password), None) => {
                if password.expose_secret().is_empty() {
                    return Err(SettingsError::EmptyAdminPassword);
                }
                Ok(AdminSecret::Plain(password))
            }
            (None, Some(hash)) => Ok(AdminSecret::Argon2Hash(hash)),
            _ => Err(SettingsError::AmbiguousAdminSecret),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LogConfig {
    pub format: LogFormat,
    /// `EnvFilter` directive; `RUST_LOG` takes precedence.
    pub filter: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Builder pre-populated with every default.
pub fn defaults() -> Result<ConfigBuilder<DefaultState>, SettingsError> {
    Ok(Config::builder()
        .set_default("server.host", "127.0.0.1")?
        .set_default("server.port", 8080)?
        .set_default("storage.data_file", "data/entries.json")?
        .set_default("log.format", "pretty")?
        .set_default("log.filter", "info")?)
}

/// Loads `.env`, the optional config file and the environment.
pub fn load() -> Result<AppConfig, SettingsError> {
    let env_file = dotenvy::dotenv().ok();

    let builder = defaults()?
        .add_source(File::with_name(CONFIG_FILE).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__"),
        );
    let mut config = from_builder(builder)?;
    config.env_file = env_file;
    Ok(config)
}

/// Finishes a builder and validates the admin section.
pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<AppConfig, SettingsError> {
    let config: AppConfig = builder.build()?.try_deserialize()?;
    config.admin.secret()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn from_toml(toml: &str) -> Result<AppConfig, SettingsError> {
        from_builder(defaults()?.add_source(File::from_str(toml, FileFormat::Toml)))
    }

    #[test]
    fn defaults_apply_when_only_the_password_is_set() {
        let config = from_toml("[admin]\npassword = \"letmein\"").unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.storage.data_file, PathBuf::from("data/entries.json"));
        assert_eq!(config.log.format, LogFormat::Pretty);
        assert!(matches!(config.admin.secret().unwrap(), AdminSecret::Plain(_)));
        assert!(config.env_file.is_none());
    }

    #[test]
    fn file_values_override_defaults() {
        let config = from_toml(
            r#"
            [server]
            port = 9000
            [storage]
            data_file = "/var/lib/note-board/entries.json"
            [admin]
            password_hash = "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHQ$aGFzaA"
            [log]
            format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.log.format, LogFormat::Json);
        assert!(matches!(config.admin.secret().unwrap(), AdminSecret::Argon2Hash(_)));
    }

    #[test]
    fn admin_secret_is_required() {
        assert!(matches!(from_toml(""), Err(SettingsError::AmbiguousAdminSecret)));
    }

    #[test]
    fn both_admin_secrets_are_rejected() {
        let result = from_toml("[admin]\npassword = \"a\"\npassword_hash = \"b\"");
        assert!(matches!(result, Err(SettingsError::AmbiguousAdminSecret)));
    }

    #[test]
    fn empty_password_is_rejected() {
        let result = from_toml("[admin]\npassword = \"\"");
        assert!(matches!(result, Err(SettingsError::EmptyAdminPassword)));
    }

    #[test]
    fn password_is_redacted_in_debug_output() {
        let config = from_toml("[admin]\npassword = \"letmein\"").unwrap();
        assert!(!format!("{:?}", config.admin).contains("letmein"));
    }
}
