use std::env;
use std::net::SocketAddr;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_LOG_FILTER: &str = "info";

/// Server settings read from the environment (and `.env`, if present).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub log_filter: String,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, String> {
        dotenv::dotenv().ok();
        Self::from_values(
            env::var("SCHEDULER_BIND_ADDR").ok(),
            env::var("SCHEDULER_LOG").ok(),
        )
    }

    fn from_values(bind_addr: Option<String>, log_filter: Option<String>) -> Result<Self, String> {
        let raw_addr = bind_addr.unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw_addr
            .parse::<SocketAddr>()
            .map_err(|e| format!("bad SCHEDULER_BIND_ADDR '{}': {}", raw_addr, e))?;
        Ok(Self {
            bind_addr,
            log_filter: log_filter.unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_unset() {
        let config = ServerConfig::from_values(None, None).unwrap();
        assert_eq!(config.bind_addr.to_string(), DEFAULT_BIND_ADDR);
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn overrides_and_rejects_bad_addr() {
        let config =
            ServerConfig::from_values(Some("0.0.0.0:9000".into()), Some("debug".into())).unwrap();
        assert_eq!(config.bind_addr.port(), 9000);
        assert_eq!(config.log_filter, "debug");
        let err = ServerConfig::from_values(Some("nowhere".into()), None).unwrap_err();
        assert!(err.contains("SCHEDULER_BIND_ADDR"));
    }
}
