use serde::Deserialize;

use std::time::Duration;

use crate::spellcheck::DEFAULT_SPELLCHECK_URL;

/// Deployment environment; picks the log format and default verbosity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Local,
    Dev,
    Prod,
}

impl Environment {
    pub const fn default_directive(self) -> &'static str {
        match self {
            Self::Local | Self::Dev => "debug",
            Self::Prod => "info",
        }
    }
}

/// Read from environment variables named after the fields in upper case
/// (`PG_DSN`, `TOKEN_TTL`, ...). Durations use humantime syntax (`2h`, `10s`).
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub env: Environment,
    #[serde(default = "default_port")]
    pub port: u16,
    pub pg_dsn: String,
    #[serde(default = "default_token_ttl", with = "humantime_serde")]
    pub token_ttl: Duration,
    #[serde(default = "default_spellcheck_url")]
    pub spellcheck_url: String,
    #[serde(default = "default_spellcheck_timeout", with = "humantime_serde")]
    pub spellcheck_timeout: Duration,
}

const fn default_port() -> u16 {
    8000
}

const fn default_token_ttl() -> Duration {
    Duration::from_secs(2 * 60 * 60)
}

fn default_spellcheck_url() -> String {
    DEFAULT_SPELLCHECK_URL.to_owned()
}

const fn default_spellcheck_timeout() -> Duration {
    Duration::from_secs(10)
}

impl Config {
    pub fn from_vars<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter(vars)
    }
}

pub fn load_config() -> Result<Config, envy::Error> {
    Config::from_vars(std::env::vars())
}
