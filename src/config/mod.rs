// Configuration module entry point
// Loads layered configuration and owns the shared runtime state

mod state;
mod types;

use std::net::SocketAddr;

pub use state::AppState;
pub use types::{
    Config, FunctionConfig, HealthConfig, HttpConfig, LoggingConfig, PerformanceConfig,
    ServerConfig,
};

/// Config file used when no path is given
pub const DEFAULT_CONFIG_PATH: &str = "config";

impl Config {
    /// Load configuration from specified file path (extension optional)
    ///
    /// Sources in increasing priority: built-in defaults, the file, then
    /// `FUNCTION_*` environment variables (`__` separates nested keys).
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        Self::load_layered(config_path, environment())
    }

    fn load_layered(
        config_path: &str,
        env: config::Environment,
    ) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(env)
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("http.server_name", "static-web-page/0.1")?
            .set_default("http.max_body_size", 6_291_456)? // 6MB
            .set_default("function.name", "static-web-page")?
            .set_default("function.variant", "plain")?
            .set_default("function.memory_limit_mb", 128)?
            .set_default("function.timeout_secs", 3)?
            .build()?;

        let cfg: Self = settings.try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<(), config::ConfigError> {
        if self.function.timeout_secs == 0 {
            return Err(config::ConfigError::Message(
                "function.timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.function.name.trim().is_empty() {
            return Err(config::ConfigError::Message(
                "function.name must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

fn environment() -> config::Environment {
    config::Environment::with_prefix("FUNCTION")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}
