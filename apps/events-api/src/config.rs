use core_config::{AppInfo, ConfigError, FromEnv, app_info, env_or_default, server::ServerConfig};
use strum::{Display, EnumString};

// Import MongoDB config from the database library
use database::mongodb::MongoConfig;

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Where events are kept, from `EVENTS_STORAGE`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum StorageBackend {
    Mongodb,
    /// Process-local; contents are lost on restart
    Memory,
}

impl StorageBackend {
    fn from_env() -> Result<Self, ConfigError> {
        let raw = env_or_default("EVENTS_STORAGE", "mongodb");
        raw.trim().parse().map_err(|_| ConfigError::ParseError {
            key: "EVENTS_STORAGE".to_string(),
            details: format!("expected `mongodb` or `memory`, got `{}`", raw),
        })
    }
}

/// Application-specific configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub storage: StorageBackend,
    /// Present when `storage` is [`StorageBackend::Mongodb`]
    pub mongodb: Option<MongoConfig>,
    pub server: ServerConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let storage = StorageBackend::from_env()?;
        let mongodb = match storage {
            StorageBackend::Mongodb => {
                Some(MongoConfig::from_env()?.with_app_name(env!("CARGO_PKG_NAME")))
            }
            StorageBackend::Memory => None,
        };
        let server = ServerConfig::from_env()?;

        Ok(Self {
            app: app_info!(),
            storage,
            mongodb,
            server,
            environment,
        })
    }
}
