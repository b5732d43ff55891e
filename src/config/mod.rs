use std::{env, fmt::Display, fs, path::Path};

use log::{debug, info};
use serde::Deserialize;

use crate::{
    error::{ConfigError, Result},
    utils,
};

pub const API_KEY: &str = "API_KEY";
pub const API_SECRET_KEY: &str = "API_SECRET_KEY";
pub const ACCESS_TOKEN: &str = "ACCESS_TOKEN";
pub const ACCESS_TOKEN_SECRET: &str = "ACCESS_TOKEN_SECRET";
pub const BEARER_TOKEN: &str = "BEARER_TOKEN";
pub const API_URL: &str = "TWITTER_API_URL";
pub const TIMEOUT_SECS: &str = "TWITTER_TIMEOUT_SECS";

pub const DEFAULT_API_URL: &str = "https://api.twitter.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Credentials and connection settings for one run of the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub access_token: String,
    pub access_secret: String,
    /// OAuth2 bearer token. When set, requests are authorized with it instead
    /// of an OAuth1 signature.
    #[serde(default)]
    pub bearer_token: Option<String>,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Config {
    /// Reads the credentials from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads the credentials through `lookup`, treating empty values as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());
        let require = |key: &str| {
            get(key).ok_or_else(|| ConfigError::MissingField {
                field: key.to_string(),
            })
        };

        let timeout_secs = match get(TIMEOUT_SECS) {
            Some(value) => value.parse().map_err(|_| ConfigError::InvalidValue {
                field: TIMEOUT_SECS.to_string(),
                value,
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            consumer_key: require(API_KEY)?,
            consumer_secret: require(API_SECRET_KEY)?,
            access_token: require(ACCESS_TOKEN)?,
            access_secret: require(ACCESS_TOKEN_SECRET)?,
            bearer_token: get(BEARER_TOKEN),
            api_url: get(API_URL).unwrap_or_else(default_api_url),
            timeout_secs,
        })
    }

    /// Reads the credentials from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let display_path = path.to_string_lossy().to_string();
        let data = fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: display_path.clone(),
            source,
        })?;

        utils::check_permissions(path);

        let config = toml::from_str(&data).map_err(|source| ConfigError::InvalidFormat {
            path: display_path,
            source,
        })?;
        Ok(config)
    }

    /// Picks the credential source for this run.
    ///
    /// An explicit `config_file` wins. Otherwise the environment is used,
    /// after loading `env_file` (or `./.env` when present). If the
    /// environment is incomplete, the default config file is tried before
    /// giving up with the environment error.
    pub fn resolve(config_file: Option<&Path>, env_file: Option<&Path>) -> Result<Self> {
        if let Some(path) = config_file {
            info!("Loading credentials from {}", path.display());
            return Self::from_file(path);
        }

        load_dotenv(env_file)?;

        match Self::from_env() {
            Ok(config) => Ok(config),
            Err(env_err) => {
                let default_file = match utils::get_config_file() {
                    Ok(path) if path.is_file() => path,
                    _ => return Err(env_err),
                };
                debug!("Environment incomplete ({env_err}), falling back to config file");
                Self::from_file(&default_file)
            }
        }
    }
}

/// Populates the process environment from a dotenv file.
///
/// A file requested by path must exist; the implicit `./.env` is optional.
/// Variables already present in the environment are left untouched.
pub fn load_dotenv(path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            dotenvy::from_path(path).map_err(|source| ConfigError::EnvFileFailed {
                path: path.to_string_lossy().to_string(),
                source,
            })?;
            info!("Loaded env file {}", path.display());
        }
        None => match dotenvy::dotenv() {
            Ok(path) => info!("Loaded .env from {}", path.display()),
            Err(err) => debug!("No .env file loaded: {err}"),
        },
    }
    Ok(())
}

impl Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Consumer Key: {}\nConsumer Secret: {}\nAccess Token: {}\nAccess Token Secret: {}\nAPI URL: {}",
            mask(&self.consumer_key),
            mask(&self.consumer_secret),
            mask(&self.access_token),
            mask(&self.access_secret),
            self.api_url
        )
    }
}

/// Shows at most a quarter of a secret, and nothing of short ones.
fn mask(secret: &str) -> String {
    let len = secret.chars().count();
    if len < 16 {
        return "****".to_string();
    }
    let visible: String = secret.chars().take(len / 4).collect();
    format!("{visible}****")
}
