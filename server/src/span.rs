use http::Request;
use tracing::Span;

// `error_span!` (not `info_span!`) so the span survives restrictive log
// levels: a `warn!`/`error!` deeper in the pipeline still inherits the
// request id, method, and URI.
pub fn span<B>(request: &Request<B>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("<unknown-request-id>");

    tracing::error_span!(
        "request",
        "{} {} {}",
        request_id,
        request.method(),
        request.uri(),
    )
}
