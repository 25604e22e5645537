use std::path::PathBuf;
use std::time::Duration;

use crate::github;

pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(7200);

/// Everything the fetch pipeline needs, passed in explicitly at construction.
#[derive(Debug, Clone)]
pub struct Config {
    pub username: String,
    pub cache_file: PathBuf,
    pub cache_ttl: Duration,
    /// Optional GitHub personal access token, sent as a bearer header.
    pub auth_token: Option<String>,
    pub graphql_url: String,
    pub events_api_url: String,
}

impl Config {
    pub fn new(username: impl Into<String>, cache_file: impl Into<PathBuf>) -> Self {
        Self {
            username: username.into(),
            cache_file: cache_file.into(),
            cache_ttl: DEFAULT_CACHE_TTL,
            auth_token: None,
            graphql_url: github::GRAPHQL_URL.to_string(),
            events_api_url: github::API_BASE_URL.to_string(),
        }
    }
}
