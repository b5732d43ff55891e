use std::fmt::Display;

use reqwest::StatusCode;

/// Classification of the status code returned by a tweet operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Unauthorized,
    NotFound,
    RateLimited,
    Unexpected(u16),
}

impl Outcome {
    pub fn from_status(status: u16) -> Self {
        match StatusCode::from_u16(status) {
            Ok(StatusCode::OK) => Outcome::Success,
            Ok(StatusCode::UNAUTHORIZED) => Outcome::Unauthorized,
            Ok(StatusCode::NOT_FOUND) => Outcome::NotFound,
            Ok(StatusCode::TOO_MANY_REQUESTS) => Outcome::RateLimited,
            _ => Outcome::Unexpected(status),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success)
    }

    pub fn exit_code(&self) -> u8 {
        if self.is_success() { 0 } else { 1 }
    }
}

impl From<StatusCode> for Outcome {
    fn from(status: StatusCode) -> Self {
        Outcome::from_status(status.as_u16())
    }
}

impl Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Success => write!(f, "Operation successful!"),
            Outcome::Unauthorized => {
                write!(f, "Unauthorized. Please check your API keys and tokens.")
            }
            Outcome::NotFound => write!(f, "Tweet not found. Invalid tweet ID."),
            Outcome::RateLimited => write!(f, "Rate limit exceeded. Try again later."),
            Outcome::Unexpected(code) => write!(f, "Unexpected error. Status Code: {code}"),
        }
    }
}
