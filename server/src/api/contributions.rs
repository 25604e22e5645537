use axum::{
    Json,
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use axum_macros::debug_handler;
use serde::Deserialize;
use time::OffsetDateTime;

use crate::AppState;

pub const PATH: &str = "/contributions";

#[derive(Deserialize)]
pub struct ContributionsParams {
    pub format: Option<String>,
}

/// Always answers 200; fetch failures are reported inside the payload via
/// the snapshot's `note`/`error` fields, never as an HTTP error.
#[debug_handler]
#[tracing::instrument(skip_all)]
pub async fn handler(
    State(AppState { contributions, .. }): State<AppState>,
    Query(ContributionsParams { format }): Query<ContributionsParams>,
) -> Response {
    let snapshot = contributions.get().await;

    if format.as_deref() == Some("svg") {
        let today = OffsetDateTime::now_utc().date();
        let markup = snapshot
            .contributions
            .as_ref()
            .map(|data| contrib::render_svg(data, today))
            .unwrap_or_default();
        return ([(header::CONTENT_TYPE, "image/svg+xml")], markup).into_response();
    }

    Json(snapshot).into_response()
}
