use axum::{
    body::{Body, to_bytes},
    http::{Request, Response},
    middleware::Next,
    response::IntoResponse,
};

pub async fn latency_ms(request: Request<Body>, next: Next) -> Response<Body> {
    let start = std::time::Instant::now();
    let response = next.run(request).await;
    tracing::info!(latency_ms = %start.elapsed().as_millis());
    response
}

/// usually 5xx errors with internal details are handled
/// but under unforseen circumstances they leak to the client
/// this is the last line of defense to catch them
pub async fn mw_handle_leaked_5xx(request: Request<Body>, next: Next) -> Response<Body> {
    let response = next.run(request).await;
    let status = response.status();

    if status.is_server_error() {
        match to_bytes(response.into_body(), usize::MAX).await {
            Ok(content) if !content.is_empty() => tracing::error!("{:?}", content),
            Err(e) => tracing::error!(
                "unable to convert INTERNAL_SERVER_ERROR response body to bytes :: {:?}",
                e
            ),
            _ => {}
        }

        return status.into_response();
    }

    response
}
