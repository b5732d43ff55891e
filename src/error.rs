use std::fmt;

#[derive(Debug)]
pub enum TweetError {
    ConfigError(ConfigError),
    ApiError(ApiError),
    ReqwestError(reqwest::Error),
}

#[derive(Debug)]
pub enum ConfigError {
    HomeDirNotFound,
    ReadFailed {
        path: String,
        source: std::io::Error,
    },
    InvalidFormat {
        path: String,
        source: toml::de::Error,
    },
    MissingField {
        field: String,
    },
    InvalidValue {
        field: String,
        value: String,
    },
    EnvFileFailed {
        path: String,
        source: dotenvy::Error,
    },
}

#[derive(Debug)]
pub enum ApiError {
    EmptyTweet,
    EmptyTweetId,
    NetworkError {
        context: &'static str,
        source: reqwest::Error,
    },
    UnexpectedStatus {
        status: u16,
        status_text: String,
    },
    DecodeError(serde_json::Error),
}

impl fmt::Display for TweetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TweetError::ConfigError(e) => write!(f, "Configuration error: {e}"),
            TweetError::ApiError(e) => write!(f, "API error: {e}"),
            TweetError::ReqwestError(e) => write!(f, "HTTP error: {e}"),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::HomeDirNotFound => write!(f, "Home directory not found"),
            ConfigError::ReadFailed { path, source } => {
                write!(f, "Failed to read config file '{path}': {source}")
            }
            ConfigError::InvalidFormat { path, source } => {
                write!(f, "Invalid config file format in '{path}': {source}")
            }
            ConfigError::MissingField { field } => {
                write!(f, "Missing required field in config: {field}")
            }
            ConfigError::InvalidValue { field, value } => {
                write!(f, "Invalid value '{value}' for {field}")
            }
            ConfigError::EnvFileFailed { path, source } => {
                write!(f, "Error loading env file '{path}': {source}")
            }
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::EmptyTweet => write!(f, "Tweet text must not be empty"),
            ApiError::EmptyTweetId => write!(f, "Tweet ID must not be empty"),
            ApiError::NetworkError { context, source } => write!(f, "{context}: {source}"),
            ApiError::UnexpectedStatus { status_text, .. } => {
                write!(f, "failed to post tweet: unexpected status {status_text}")
            }
            ApiError::DecodeError(e) => write!(f, "failed to decode response: {e}"),
        }
    }
}

impl std::error::Error for TweetError {}
impl std::error::Error for ConfigError {}
impl std::error::Error for ApiError {}

impl From<reqwest::Error> for TweetError {
    fn from(err: reqwest::Error) -> Self {
        TweetError::ReqwestError(err)
    }
}

impl From<ConfigError> for TweetError {
    fn from(err: ConfigError) -> Self {
        TweetError::ConfigError(err)
    }
}

impl From<ApiError> for TweetError {
    fn from(err: ApiError) -> Self {
        TweetError::ApiError(err)
    }
}

pub type Result<T> = std::result::Result<T, TweetError>;
