use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub templates: TemplateConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_body_size: usize,  // in bytes
    pub static_dir: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StorageConfig {
    pub users_file: PathBuf,
    pub tasks_file: PathBuf,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TemplateConfig {
    pub dir: PathBuf,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct SessionConfig {
    // When set, per-user routes only answer to the user logged in on this session
    pub required: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 5000,
            max_body_size: 64 * 1024,
            static_dir: "static".into(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            users_file: "users.json".into(),
            tasks_file: "tasks.json".into(),
        }
    }
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self { dir: "templates".into() }
    }
}

impl Config {
    /// Built-in defaults, then `config/default.toml` if present, then `APP_*` environment
    /// variables (nested keys separated by `__`, e.g. `APP_SERVER__PORT`).
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::Config::try_from(&Config::default())?)
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
