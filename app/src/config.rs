use config::{Config as ConfigBuilder, File};
use std::str::FromStr;

use crate::client::DEFAULT_API_BASE_URL;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interface {
    Web,
    Tui,
}

impl FromStr for Interface {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "web" => Ok(Interface::Web),
            "tui" => Ok(Interface::Tui),
            other => Err(anyhow::anyhow!("Unknown interface: {}", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub region: String,
    pub port: u16,
    pub static_dir: String,
    pub interface: Interface,
    pub request_timeout_secs: u64,
    pub log_file: String,
}

impl Config {
    pub fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let file = ConfigBuilder::builder()
            .add_source(File::with_name("config").required(false))
            .build()?;

        Self::resolve(&file, |key| std::env::var(key).ok())
    }

    /// Layers environment values over the file values over the defaults.
    pub fn resolve(
        file: &ConfigBuilder,
        env: impl Fn(&str) -> Option<String>,
    ) -> anyhow::Result<Self> {
        let pick = |env_key: &str, file_key: &str, default: &str| -> String {
            env(env_key)
                .filter(|v| !v.trim().is_empty())
                .or_else(|| file.get_string(file_key).ok())
                .unwrap_or_else(|| default.to_string())
        };

        let port = pick("PORT", "port", "3000")
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid port"))?;
        let request_timeout_secs = pick("REQUEST_TIMEOUT_SECS", "request_timeout_secs", "30")
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid request timeout"))?;

        Ok(Config {
            api_base_url: pick("MOVIE_API_BASE_URL", "api_base_url", DEFAULT_API_BASE_URL),
            region: pick("OTT_REGION", "region", "IN").trim().to_uppercase(),
            port,
            static_dir: pick("STATIC_DIR", "static_dir", "app/static"),
            interface: pick("OTT_FINDER_UI", "interface", "web").parse()?,
            request_timeout_secs,
            log_file: pick("OTT_FINDER_LOG", "log_file", "ott-finder.log"),
        })
    }
}
