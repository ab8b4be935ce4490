//! Launcher-facing configuration.
//!
//! The process launcher owns flag parsing, TLS setup, and the listen
//! socket; this struct is the slice of its configuration the credential
//! database consumes, plus the fields it carries through for the front-end.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Result;

use crate::allowlist::SatelliteAllowList;

/// Service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Node URLs of the satellites access grants may originate from. Each
    /// is reduced to `host:port` for the allow-list.
    pub allowed_satellites: Vec<String>,

    /// Address the front-end binds to.
    pub listen_addr: SocketAddr,

    /// Directory to search for TLS certificates, when TLS is enabled.
    pub cert_dir: Option<PathBuf>,

    /// Listen without TLS. Development only.
    pub insecure_disable_tls: bool,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let allowed_satellites = std::env::var("ALLOWED_SATELLITES")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let listen_addr = std::env::var("LISTEN_ADDRESS")
            .unwrap_or_else(|_| "127.0.0.1:8000".to_string())
            .parse()?;

        let cert_dir = std::env::var("CERT_DIR").ok().map(PathBuf::from);

        let insecure_disable_tls = std::env::var("INSECURE_DISABLE_TLS")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        Ok(Config {
            allowed_satellites,
            listen_addr,
            cert_dir,
            insecure_disable_tls,
        })
    }

    /// Build the satellite allow-list from the configured node URLs.
    pub fn allow_list(&self) -> Result<SatelliteAllowList> {
        Ok(SatelliteAllowList::from_node_urls(&self.allowed_satellites)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allow_list_strips_node_ids() {
        let config = Config {
            allowed_satellites: vec![
                "12EayRS2V1k@sat1.example.test:7777".to_string(),
                "sat2.example.test:7777".to_string(),
            ],
            listen_addr: "127.0.0.1:8000".parse().unwrap(),
            cert_dir: None,
            insecure_disable_tls: true,
        };

        let list = config.allow_list().unwrap();
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_allow_list_surfaces_bad_urls() {
        let config = Config {
            allowed_satellites: vec!["no-port-here".to_string()],
            listen_addr: "127.0.0.1:8000".parse().unwrap(),
            cert_dir: None,
            insecure_disable_tls: true,
        };

        assert!(config.allow_list().is_err());
    }
}
