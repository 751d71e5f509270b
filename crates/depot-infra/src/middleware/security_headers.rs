use axum::extract::State;
use axum::http::{header, HeaderValue};
use axum::{extract::Request, middleware::Next, response::Response};

/// Settings for `security_headers_middleware`
#[derive(Clone, Copy, Debug, Default)]
pub struct SecurityHeaders {
    /// Emit `Strict-Transport-Security`. Only enable behind HTTPS.
    pub hsts: bool,
}

/// Security headers middleware
///
/// Responses are JSON only and carry signed URLs, so nothing may be cached,
/// framed or sniffed.
pub async fn security_headers_middleware(
    State(settings): State<SecurityHeaders>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(
        header::REFERRER_POLICY,
        HeaderValue::from_static("no-referrer"),
    );
    headers.insert(
        header::CONTENT_SECURITY_POLICY,
        HeaderValue::from_static("default-src 'none'; frame-ancestors 'none'"),
    );
    headers
        .entry(header::CACHE_CONTROL)
        .or_insert(HeaderValue::from_static("no-store"));

    if settings.hsts {
        headers.insert(
            header::STRICT_TRANSPORT_SECURITY,
            HeaderValue::from_static("max-age=31536000; includeSubDomains"),
        );
    }

    response
}
