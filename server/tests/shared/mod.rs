use std::path::Path;

use axum::{
    Router,
    body::{Body, to_bytes},
};
use http::{Request, Response};
use tower::ServiceExt;

use server::{AppState, DashboardConfig};

/// Config pointing the remote endpoints at a dead local port, so requests
/// fail fast with connection refused instead of reaching GitHub.
pub fn test_config(cache_file: &Path) -> DashboardConfig {
    let mut contributions = contrib::Config::new("octocat", cache_file);
    contributions.graphql_url = "http://127.0.0.1:9/graphql".to_string();
    contributions.events_api_url = "http://127.0.0.1:9".to_string();
    DashboardConfig {
        contributions,
        status: hoststat::StatusConfig::default(),
    }
}

pub struct TestClient {
    router: Router,
}

impl TestClient {
    pub fn new(config: DashboardConfig) -> Self {
        let state = AppState::new(config).expect("unable to build app state");
        Self {
            router: server::server(state),
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Asserter {
        let response = self.router.clone().oneshot(request).await.unwrap(/* Infallible */);
        Asserter::from(response)
    }

    pub async fn get(&self, uri: &str) -> Asserter {
        self.send(
            Request::builder()
                .uri(uri)
                .body(Body::empty())
                .expect("unable to build request"),
        )
        .await
    }
}

pub struct Asserter {
    response: Response<Body>,
}

impl Asserter {
    pub fn status(self, expected: u16) -> Self {
        assert_eq!(
            self.response.status().as_u16(),
            expected,
            "expected status {}, got {}",
            expected,
            self.response.status()
        );
        self
    }

    pub fn header(self, name: &str, expected: &str) -> Self {
        let value = self
            .response
            .headers()
            .get(name)
            .unwrap_or_else(|| panic!("missing header {name}"))
            .to_str()
            .expect("header is not valid utf-8")
            .to_string();
        assert_eq!(value, expected, "header {name}");
        self
    }

    pub async fn into_text_body(self) -> String {
        let bytes = to_bytes(self.response.into_body(), usize::MAX)
            .await
            .expect("unable to read response body");
        String::from_utf8(bytes.to_vec()).expect("response body is not valid utf-8")
    }

    pub async fn into_deserialized_json_body<T>(self) -> T
    where
        T: serde::de::DeserializeOwned,
    {
        let bytes = to_bytes(self.response.into_body(), usize::MAX)
            .await
            .expect("unable to read response body");
        serde_json::from_slice(&bytes).expect("unable to deserialize response body")
    }
}

impl From<Response<Body>> for Asserter {
    fn from(response: Response<Body>) -> Self {
        Self { response }
    }
}
