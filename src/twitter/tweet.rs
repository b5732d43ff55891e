use log::{debug, info, warn};
use reqwest::{Method, StatusCode};
use serde::Serialize;

use crate::{
    api::client::ApiClient,
    error::{ApiError, Result},
    twitter::{TWEETS_PATH, TweetCreateResponse, TweetDeleteResponse, outcome::Outcome},
};

/// JSON payload for creating a tweet.
#[derive(Debug, Serialize)]
pub struct TweetBody {
    pub text: String,
}

/// The two operations the CLI performs against the tweets endpoint.
pub trait TwitterApi {
    /// Posts `text` and returns the id the server assigned to it.
    async fn create(&self, text: &str) -> Result<String>;

    /// Deletes the tweet with `id` and reports how the server answered.
    async fn delete(&self, id: &str) -> Result<Outcome>;
}

impl<T: TwitterApi> TwitterApi for &T {
    async fn create(&self, text: &str) -> Result<String> {
        (**self).create(text).await
    }

    async fn delete(&self, id: &str) -> Result<Outcome> {
        (**self).delete(id).await
    }
}

impl TwitterApi for ApiClient {
    async fn create(&self, text: &str) -> Result<String> {
        post_tweet(self, text).await
    }

    async fn delete(&self, id: &str) -> Result<Outcome> {
        delete_tweet(self, id).await
    }
}

/// Posts a new tweet. Anything other than `201 Created` is an error; the
/// response body is only logged.
pub async fn post_tweet(client: &ApiClient, text: &str) -> Result<String> {
    if text.is_empty() {
        return Err(ApiError::EmptyTweet.into());
    }

    let payload = TweetBody {
        text: text.to_string(),
    };

    let response = client
        .request(Method::POST, TWEETS_PATH)
        .json(&payload)
        .send()
        .await
        .map_err(|source| ApiError::NetworkError {
            context: "failed to post tweet",
            source,
        })?;

    let status = response.status();
    if status != StatusCode::CREATED {
        let body = response.text().await.unwrap_or_default();
        warn!("Response body: {body}");
        return Err(ApiError::UnexpectedStatus {
            status: status.as_u16(),
            status_text: status.to_string(),
        }
        .into());
    }

    let body = response
        .text()
        .await
        .map_err(|source| ApiError::NetworkError {
            context: "failed to read created tweet",
            source,
        })?;
    let created: TweetCreateResponse =
        serde_json::from_str(&body).map_err(ApiError::DecodeError)?;
    info!("{created}");

    Ok(created.data.id)
}

/// Deletes a tweet by id. Every HTTP response is classified; only transport
/// failures are errors.
pub async fn delete_tweet(client: &ApiClient, id: &str) -> Result<Outcome> {
    if id.is_empty() {
        return Err(ApiError::EmptyTweetId.into());
    }

    let response = client
        .request(Method::DELETE, &format!("{TWEETS_PATH}/{id}"))
        .send()
        .await
        .map_err(|source| ApiError::NetworkError {
            context: "failed to delete tweet",
            source,
        })?;

    let outcome = Outcome::from(response.status());

    match response.text().await {
        Ok(body) if outcome.is_success() => {
            match serde_json::from_str::<TweetDeleteResponse>(&body) {
                Ok(deleted) => info!("Tweet {id} deleted: {}", deleted.data.deleted),
                Err(err) => debug!("Could not decode delete response: {err}"),
            }
        }
        Ok(body) => warn!("Response body: {body}"),
        Err(err) => debug!("Failed to read delete response body: {err}"),
    }

    Ok(outcome)
}
