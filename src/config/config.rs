use figment::Figment;
use figment::providers::{Env, Format, Yaml};
use schemars::{JsonSchema, schema_for};
use serde::{Deserialize, Serialize};

use super::logging::LoggingConfig;
use super::navigation::NavigationConfig;
use crate::accessors::AccessorConfig;
use crate::navigation::{RouteConfig, default_routes};

pub const CONFIG_PATH_ENV: &str = "ACTIVE_TRACKER_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "./config.yaml";
const ENV_PREFIX: &str = "ACTIVE_TRACKER_";

fn default_bind_address() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_login_route() -> String {
    "login".to_string()
}

/// A top-level enum for versioned configurations.
#[derive(Deserialize, Serialize, JsonSchema)]
#[serde(tag = "version")]
pub enum Config {
    #[serde(rename = "1.0.0")]
    ConfigV1(ConfigV1),
}

/// Main config for v1.0.0: route table, accessor, guard settings and logging.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct ConfigV1 {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    /// Name of the route unauthenticated users are sent to.
    #[serde(default = "default_login_route")]
    pub login_route: String,
    #[serde(default = "default_routes")]
    pub routes: Vec<RouteConfig>,
    #[serde(default)]
    pub accessor: AccessorConfig,
    #[serde(default)]
    pub navigation: NavigationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for ConfigV1 {
    fn default() -> Self {
        ConfigV1 {
            bind_address: default_bind_address(),
            login_route: default_login_route(),
            routes: default_routes(),
            accessor: AccessorConfig::default(),
            navigation: NavigationConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Extracts a versioned config from any figment.
pub fn extract_config(figment: Figment) -> Result<ConfigV1, figment::Error> {
    match figment.extract::<Config>()? {
        Config::ConfigV1(c) => Ok(c),
    }
}

/// Load config from the YAML file named by `ACTIVE_TRACKER_CONFIG` (default
/// `./config.yaml`), overridden by `ACTIVE_TRACKER_*` environment variables.
/// Nested keys use `__`, e.g. `ACTIVE_TRACKER_ACCESSOR__ANON_KEY`.
pub fn load_config() -> Result<ConfigV1, figment::Error> {
    let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let figment = Figment::new()
        .merge(Yaml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"));
    extract_config(figment)
}

/// Print the JSON schema for the configuration to stdout.
pub fn print_schema() -> Result<(), serde_json::Error> {
    let schema = schema_for!(Config);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
