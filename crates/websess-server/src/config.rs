use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    pub ttl_secs: u64,
    pub poll_interval_ms: u64,
    pub login_path: String,
    pub landing_path: String,
}

impl SessionConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl Settings {
    /// Defaults, then an optional `config/settings` file, then
    /// `WEBSESS__`-prefixed environment overrides
    /// (e.g. `WEBSESS__SESSION__TTL_SECS=300`).
    pub fn load() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("session.ttl_secs", 60)?
            .set_default("session.poll_interval_ms", 500)?
            .set_default("session.login_path", "/login.html")?
            .set_default("session.landing_path", "/")?
            .add_source(File::with_name("config/settings").required(false))
            .add_source(
                Environment::with_prefix("WEBSESS")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_load() {
        let settings = Settings::load().unwrap();
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.session.ttl(), Duration::from_secs(60));
        assert_eq!(settings.session.poll_interval(), Duration::from_millis(500));
        assert_eq!(settings.session.login_path, "/login.html");
        assert_eq!(settings.session.landing_path, "/");
    }
}
