//! Authorization schemes for outgoing API requests.
//!
//! Requests are authorized by a [`RequestSigner`], so the tweet operations
//! never see which scheme is in use.

use oauth::{HMAC_SHA1, Token};
use reqwest::Method;

use crate::config::Config;

/// Produces the `Authorization` header value for a single request.
///
/// Implementations must compute a fresh value on every call.
pub trait RequestSigner {
    fn authorization(&self, method: &Method, url: &str) -> String;
}

/// OAuth 1.0a user-context signing with HMAC-SHA1.
///
/// Every call draws a new nonce and timestamp. JSON bodies are not part of
/// the signature base string.
pub struct OAuth1Signer {
    token: Token<String, String>,
}

impl OAuth1Signer {
    pub fn new(
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
        access_token: impl Into<String>,
        access_secret: impl Into<String>,
    ) -> Self {
        let token = Token::from_parts(
            consumer_key.into(),
            consumer_secret.into(),
            access_token.into(),
            access_secret.into(),
        );
        Self { token }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(
            cfg.consumer_key.as_str(),
            cfg.consumer_secret.as_str(),
            cfg.access_token.as_str(),
            cfg.access_secret.as_str(),
        )
    }
}

impl RequestSigner for OAuth1Signer {
    fn authorization(&self, method: &Method, url: &str) -> String {
        match *method {
            Method::POST => oauth::post(url, &(), &self.token, HMAC_SHA1),
            Method::DELETE => oauth::delete(url, &(), &self.token, HMAC_SHA1),
            Method::PUT => oauth::put(url, &(), &self.token, HMAC_SHA1),
            Method::PATCH => oauth::patch(url, &(), &self.token, HMAC_SHA1),
            _ => oauth::get(url, &(), &self.token, HMAC_SHA1),
        }
    }
}

/// OAuth 2.0 bearer token authorization.
pub struct BearerSigner {
    token: String,
}

impl BearerSigner {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl RequestSigner for BearerSigner {
    fn authorization(&self, _method: &Method, _url: &str) -> String {
        format!("Bearer {}", self.token)
    }
}
