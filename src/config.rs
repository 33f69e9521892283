use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

use crate::http::body::OverlongBody;
use crate::http::connection::ConnectionOptions;
use crate::http::session::SessionOptions;

/// Environment variable naming an optional YAML config file.
pub const CONFIG_ENV: &str = "SWITCHYARD_CONFIG";
/// Environment variable overriding `server.listen_addr`.
pub const LISTEN_ENV: &str = "LISTEN";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub http: HttpConfig,
}

/// Which transport accepts connections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    /// tokio event loop, one task per connection
    #[default]
    Async,
    /// std sockets, one thread per connection
    Blocking,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: String,
    pub transport: Transport,
    /// Seconds without inbound bytes before a connection is dropped; 0 disables.
    pub idle_timeout_secs: u64,
    pub max_request_bytes: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub overlong_body: OverlongBody,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8080".to_string(),
            transport: Transport::Async,
            idle_timeout_secs: 30,
            max_request_bytes: None,
        }
    }
}

impl Config {
    /// Loads the YAML file named by `SWITCHYARD_CONFIG` (defaults when
    /// unset), then applies the `LISTEN` override.
    pub fn load() -> anyhow::Result<Self> {
        let mut cfg = match std::env::var(CONFIG_ENV) {
            Ok(path) => Self::from_file(&path)?,
            Err(_) => Self::default(),
        };

        if let Ok(addr) = std::env::var(LISTEN_ENV) {
            cfg.server.listen_addr = addr;
        }

        Ok(cfg)
    }

    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path))?;
        Self::from_yaml_str(&text).with_context(|| format!("invalid config file {}", path))
    }

    pub fn from_yaml_str(text: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Replaces the port of `listen_addr`, keeping the host.
    pub fn with_port(mut self, port: u16) -> Self {
        let host = self
            .server
            .listen_addr
            .rsplit_once(':')
            .map(|(host, _)| host)
            .unwrap_or("127.0.0.1");
        self.server.listen_addr = format!("{}:{}", host, port);
        self
    }

    pub fn connection_options(&self) -> ConnectionOptions {
        let idle_timeout = match self.server.idle_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        };

        ConnectionOptions {
            session: SessionOptions {
                overlong_body: self.http.overlong_body,
            },
            idle_timeout,
            max_request_bytes: self.server.max_request_bytes,
        }
    }
}
