use std::{net::SocketAddr, str::FromStr};

use anyhow::Context;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Backend {
    Sqlite,
    Http,
}

impl FromStr for Backend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Ok(Backend::Sqlite),
            "http" => Ok(Backend::Http),
            other => anyhow::bail!("unknown backend {other:?}, expected sqlite or http"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub backend: Backend,
    pub database_url: String,
    pub api_url: String,
    pub http_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Builds the config from any variable source; missing keys take their defaults.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port: u16 = var("PORT").unwrap_or_else(|| "3000".to_string()).parse().context("PORT")?;

        let backend: Backend = var("MOVIE_BACKEND")
            .unwrap_or_else(|| "sqlite".to_string())
            .parse()
            .context("MOVIE_BACKEND")?;

        let database_url =
            var("DATABASE_URL").unwrap_or_else(|| "sqlite://reelbook.db?mode=rwc".to_string());

        let api_url = var("MOVIE_API_URL").unwrap_or_else(|| "http://localhost:3001".to_string());

        let http_timeout_secs: u64 =
            var("HTTP_TIMEOUT_SECS").and_then(|s| s.parse().ok()).unwrap_or(30);

        Ok(Self {
            addr: format!("{host}:{port}").parse().context("HOST/PORT")?,
            backend,
            database_url,
            api_url,
            http_timeout_secs,
        })
    }
}
