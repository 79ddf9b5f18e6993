use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Port used when neither the config file nor `PORT` sets one
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
    #[serde(default = "default_log_file")]
    pub log_file: String,
    #[serde(default)]
    pub use_json: bool,
    /// "hourly" | "daily" | anything else means a single file
    #[serde(default = "default_rotation")]
    pub rotation: String,
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub orders: OrdersConfig,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_dir() -> String {
    "./logs".to_string()
}

fn default_log_file() -> String {
    "storefront.log".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_dir: default_log_dir(),
            log_file: default_log_file(),
            use_json: false,
            rotation: default_rotation(),
            gateway: GatewayConfig::default(),
            store: StoreConfig::default(),
            orders: OrdersConfig::default(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
        }
    }
}

/// Which document store backs the collections
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Memory,
    Postgres,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,
    /// Required when `backend` is `postgres`
    #[serde(default)]
    pub postgres_url: Option<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Upper bound for every single store call
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_max_connections() -> u32 {
    10
}

fn default_timeout_ms() -> u64 {
    5000
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Memory,
            postgres_url: None,
            max_connections: default_max_connections(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

/// What `GET /orders/{id}` does when a stored reference points nowhere
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DanglingReference {
    /// Replace the reference field with `null` and log a warning
    #[default]
    Null,
    /// Fail the read with an internal error
    Error,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default)]
pub struct OrdersConfig {
    /// Check that `userId`/`productId` exist before persisting an order
    #[serde(default)]
    pub verify_references: bool,
    #[serde(default)]
    pub dangling_reference: DanglingReference,
}

impl AppConfig {
    /// Load `config/{env}.yaml`, falling back to defaults when the file is absent.
    ///
    /// `PORT` from the environment overrides the configured port.
    pub fn load(env: &str) -> Result<Self> {
        let config_path = format!("config/{}.yaml", env);
        let mut config = if Path::new(&config_path).exists() {
            let content = fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config file: {}", config_path))?;
            Self::from_yaml(&content)
                .with_context(|| format!("Failed to parse config file: {}", config_path))?
        } else {
            Self::default()
        };

        config.apply_port_override(std::env::var("PORT").ok().as_deref())?;
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn apply_port_override(&mut self, port: Option<&str>) -> Result<()> {
        if let Some(port) = port {
            self.gateway.port = port
                .trim()
                .parse()
                .with_context(|| format!("Invalid PORT value: {:?}", port))?;
        }
        Ok(())
    }
}
