use std::fmt::Display;

use serde::Deserialize;

pub mod outcome;
pub mod tweet;

pub const TWEETS_PATH: &str = "/2/tweets";

#[derive(Debug, Deserialize)]
pub struct TweetCreateResponse {
    pub data: TweetData,
}

impl Display for TweetCreateResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tweet Id: {}", self.data.id)
    }
}

#[derive(Debug, Deserialize)]
pub struct TweetData {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct TweetDeleteResponse {
    pub data: DeletedData,
}

#[derive(Debug, Deserialize)]
pub struct DeletedData {
    pub deleted: bool,
}
