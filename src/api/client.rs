use std::time::Duration;

use log::debug;
use reqwest::{Client, Method, RequestBuilder};

use crate::{
    api::signer::{BearerSigner, OAuth1Signer, RequestSigner},
    config::Config,
    error::Result,
};

/// HTTP client that authorizes every request it builds.
pub struct ApiClient {
    client: Client,
    base_url: String,
    signer: Box<dyn RequestSigner + Send + Sync>,
}

impl ApiClient {
    pub fn new(
        base_url: &str,
        signer: Box<dyn RequestSigner + Send + Sync>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            signer,
        })
    }

    /// Builds a client for `cfg`. A bearer token, when configured, takes the
    /// place of OAuth1 signing.
    pub fn from_config(cfg: &Config) -> Result<Self> {
        let signer: Box<dyn RequestSigner + Send + Sync> = match &cfg.bearer_token {
            Some(token) => Box::new(BearerSigner::new(token.as_str())),
            None => Box::new(OAuth1Signer::from_config(cfg)),
        };
        Self::new(&cfg.api_url, signer, Duration::from_secs(cfg.timeout_secs))
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Starts a signed request to `path` relative to the base URL.
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.url(path);
        debug!("{method} {url}");
        let auth_header = self.signer.authorization(&method, &url);
        self.client
            .request(method, url)
            .header(reqwest::header::AUTHORIZATION, auth_header)
    }
}
