use axum::{Json, extract::State};
use axum_macros::debug_handler;
use hoststat::StatusSnapshot;

use crate::AppState;

pub const PATH: &str = "/status";

/// Samples the host synchronously; takes about a second because of the
/// network-rate measurement window.
#[debug_handler]
#[tracing::instrument(skip_all)]
pub async fn handler(State(AppState { config, .. }): State<AppState>) -> Json<StatusSnapshot> {
    Json(hoststat::sample(&config.status).await)
}
