mod api;
mod config;
mod middleware;
mod span;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{Router, middleware::from_fn, routing::get};
use contrib::{ContributionsService, GithubClient, SystemClock};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

pub use config::DashboardConfig;

#[derive(Debug)]
pub struct ServerOpts {
    pub port: u16,
    pub config: DashboardConfig,
}

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<DashboardConfig>,
    pub contributions: Arc<ContributionsService<GithubClient>>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Result<Self, reqwest::Error> {
        let client = GithubClient::new(&config.contributions)?;
        let contributions = ContributionsService::new(
            client,
            &config.contributions,
            Arc::new(SystemClock),
        );
        Ok(Self {
            config: Arc::new(config),
            contributions: Arc::new(contributions),
        })
    }
}

pub fn server(state: AppState) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(span::span))
        .layer(from_fn(middleware::latency_ms))
        .layer(from_fn(middleware::mw_handle_leaked_5xx))
        .layer(CorsLayer::new().allow_origin(Any));

    Router::new()
        .route(api::health::PATH, get(api::health::handler))
        .route(api::contributions::PATH, get(api::contributions::handler))
        .route(api::status::PATH, get(api::status::handler))
        .with_state(state)
        .layer(middleware)
}

pub async fn serve(opts: ServerOpts) -> Result<(), ServerError> {
    tracing::info!(
        port = opts.port,
        username = %opts.config.contributions.username,
        "starting dashboard server"
    );

    let state = AppState::new(opts.config)?;
    let app = server(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], opts.port));
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

#[derive(thiserror::Error, Debug)]
pub enum ServerError {
    #[error("build github client :: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("{0}")]
    Io(#[from] std::io::Error),
}
