use std::{net::SocketAddr, path::PathBuf, time::Duration};

use anyhow::Context;

pub struct Config {
    pub listen_addr: SocketAddr,
    /// Catalog JSON file; the built-in model portfolio is used when unset
    pub catalog_path: Option<PathBuf>,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    /// Per-lookup bound; the provider's own request timeout when unset
    pub quote_timeout: Option<Duration>,
}

fn millis_from_env(key: &str, default: u64) -> Duration {
    let ms = std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default);
    Duration::from_millis(ms)
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = std::env::var("PF_LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .context("Invalid PF_LISTEN_ADDR")?;
        let catalog_path = std::env::var("PF_CATALOG_PATH")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);
        let cors_allow = std::env::var("PF_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        Ok(Self {
            listen_addr,
            catalog_path,
            cors_allow,
            request_timeout: millis_from_env("PF_REQUEST_TIMEOUT_MS", 30_000),
            quote_timeout: std::env::var("PF_QUOTE_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.trim().parse().ok())
                .map(Duration::from_millis),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            catalog_path: None,
            cors_allow: vec!["*".to_string()],
            request_timeout: Duration::from_millis(30_000),
            quote_timeout: None,
        }
    }
}
