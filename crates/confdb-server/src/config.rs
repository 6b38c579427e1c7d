use std::net::SocketAddr;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{ServerError, ServerResult};

/// Default listen address: all interfaces, port 8080.
pub const DEFAULT_BIND_ADDR: &str = ":8080";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    #[serde(deserialize_with = "deserialize_bind_addr")]
    pub bind_addr: SocketAddr,
    /// Largest accepted PUT body, in bytes.
    pub max_body_size: usize,
    /// Requests processed at once; the rest wait.
    pub max_connections: usize,
    /// Level at which completed requests are traced.
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            max_body_size: 16 * 1024 * 1024,
            max_connections: 1024,
            log_level: "info".into(),
        }
    }
}

impl ServerConfig {
    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(s: &str) -> ServerResult<Self> {
        toml::from_str(s).map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Read and parse a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> ServerResult<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&raw)
    }

    pub fn to_toml_string(&self) -> ServerResult<String> {
        toml::to_string(self).map_err(|e| ServerError::Config(e.to_string()))
    }

    pub fn trace_level(&self) -> ServerResult<tracing::Level> {
        self.log_level
            .parse()
            .map_err(|_| ServerError::Config(format!("unknown log level: {:?}", self.log_level)))
    }

    /// Reject settings the server cannot run with.
    pub fn validate(&self) -> ServerResult<()> {
        if self.max_connections == 0 {
            return Err(ServerError::Config("max_connections must be at least 1".into()));
        }
        self.trace_level()?;
        Ok(())
    }
}

/// Parse a listen address. A bare `:port` means every interface.
pub fn parse_bind_addr(s: &str) -> ServerResult<SocketAddr> {
    let full = match s.strip_prefix(':') {
        Some(port) => format!("0.0.0.0:{port}"),
        None => s.to_string(),
    };
    full.parse()
        .map_err(|e| ServerError::Config(format!("invalid bind address {s:?}: {e}")))
}

fn deserialize_bind_addr<'de, D>(deserializer: D) -> Result<SocketAddr, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_bind_addr(&raw).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config() {
        let c = ServerConfig::default();
        assert_eq!(c.bind_addr, "0.0.0.0:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(c.bind_addr, parse_bind_addr(DEFAULT_BIND_ADDR).unwrap());
        assert_eq!(c.max_body_size, 16 * 1024 * 1024);
        assert_eq!(c.max_connections, 1024);
        assert_eq!(c.trace_level().unwrap(), tracing::Level::INFO);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn bind_addr_forms() {
        assert_eq!(
            parse_bind_addr(":9000").unwrap(),
            "0.0.0.0:9000".parse::<SocketAddr>().unwrap()
        );
        assert_eq!(
            parse_bind_addr("127.0.0.1:1").unwrap(),
            "127.0.0.1:1".parse::<SocketAddr>().unwrap()
        );
        assert!(parse_bind_addr("localhost").is_err());
        assert!(parse_bind_addr(":http").is_err());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let c = ServerConfig::from_toml_str("bind_addr = \":9090\"\nlog_level = \"debug\"\n").unwrap();
        assert_eq!(c.bind_addr.port(), 9090);
        assert_eq!(c.trace_level().unwrap(), tracing::Level::DEBUG);
        assert_eq!(c.max_connections, 1024);
    }

    #[test]
    fn toml_round_trip() {
        let mut c = ServerConfig::default();
        c.max_body_size = 42;
        let text = c.to_toml_string().unwrap();
        assert_eq!(ServerConfig::from_toml_str(&text).unwrap(), c);
    }

    #[test]
    fn reject_bad_values() {
        assert!(ServerConfig::from_toml_str("bind_addr = \"nowhere\"").is_err());
        assert!(ServerConfig::from_toml_str("max_body_size = \"big\"").is_err());

        let c = ServerConfig { log_level: "loud".into(), ..Default::default() };
        assert!(matches!(c.validate(), Err(ServerError::Config(_))));

        let c = ServerConfig { max_connections: 0, ..Default::default() };
        assert!(c.validate().is_err());
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_connections = 8").unwrap();
        let c = ServerConfig::load(file.path()).unwrap();
        assert_eq!(c.max_connections, 8);

        assert!(matches!(
            ServerConfig::load("/definitely/not/here.toml"),
            Err(ServerError::Io(_))
        ));
    }
}
