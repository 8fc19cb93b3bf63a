use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use gdc_api::GDC_BASE_URL;
use gdc_transfer::{ClientSetting, DEFAULT_CHUNK_SIZE};
use reqwest::Url;
use serde::{Deserialize, Serialize};

const ENV_PREFIX: &str = "GDC_SLIDES_";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root of the GDC REST API.
    pub api_base: String,
    /// Where `download` puts `<case>/<file name>` when `--out` is not given.
    pub data_dir: PathBuf,
    /// Largest write issued per progress event.
    pub chunk_size: usize,
    pub connect_timeout_secs: u64,
    /// Extra attempts after a resumable failure. Zero means a single attempt.
    pub retries: u32,
    pub retry_backoff_ms: u64,
    pub proxies: Vec<String>,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: GDC_BASE_URL.to_string(),
            data_dir: PathBuf::from("data"),
            chunk_size: DEFAULT_CHUNK_SIZE,
            connect_timeout_secs: 30,
            retries: 0,
            retry_backoff_ms: 500,
            proxies: Vec::new(),
            user_agent: concat!("gdc-slides/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl Config {
    /// Defaults, then the TOML file, then `GDC_SLIDES_*` variables.
    ///
    /// Without an explicit path the per-user file is read if it exists.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));

        if let Some(path) = path {
            anyhow::ensure!(path.is_file(), "config file {} not found", path.display());
            figment = figment.merge(Toml::file(path));
        } else if let Some(path) = default_config_path() {
            figment = figment.merge(Toml::file(path));
        }

        Self::from_figment(figment.merge(Env::prefixed(ENV_PREFIX)))
    }

    pub fn from_figment(figment: Figment) -> Result<Self> {
        figment.extract().context("invalid configuration")
    }

    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }

    pub fn client_setting(&self) -> Result<ClientSetting> {
        let proxies = self
            .proxies
            .iter()
            .map(|p| Url::parse(p).with_context(|| format!("invalid proxy url `{p}`")))
            .collect::<Result<Vec<_>>>()?;

        Ok(ClientSetting {
            proxies: (!proxies.is_empty()).then_some(proxies),
            connect_timeout: Some(Duration::from_secs(self.connect_timeout_secs)),
            user_agent: Some(self.user_agent.clone()),
        })
    }
}

fn default_config_path() -> Option<PathBuf> {
    home::home_dir().map(|home| home.join(".config").join("gdc-slides").join("config.toml"))
}
