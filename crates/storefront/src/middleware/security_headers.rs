//! Security headers middleware.
//!
//! The pages are plain server-rendered HTML with no scripts. Product images
//! are loaded from the product API's image hosts, which is the only
//! cross-origin resource the CSP allows.

use axum::{
    extract::Request,
    http::{
        HeaderName, HeaderValue,
        header::{
            CACHE_CONTROL, CONTENT_SECURITY_POLICY, REFERRER_POLICY, X_CONTENT_TYPE_OPTIONS,
            X_FRAME_OPTIONS,
        },
    },
    middleware::Next,
    response::Response,
};

/// Image hosts product records point at.
const IMAGE_SOURCES: &str = "https://fakestoreapi.com \
     https://*.amazonaws.com \
     https://images.unsplash.com \
     https://i.pravatar.cc \
     https://*.cloudfront.net";

/// Add security headers to all responses.
///
/// Headers applied:
/// - `X-Frame-Options: DENY`
/// - `X-Content-Type-Options: nosniff`
/// - `Referrer-Policy: no-referrer`
/// - `Content-Security-Policy` (no scripts, same-origin styles and forms,
///   images from [`IMAGE_SOURCES`])
/// - `Cache-Control: no-store` so cart and wishlist pages are never stale
///   after a mutation
pub async fn security_headers_middleware(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    headers.insert(X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
    headers.insert(REFERRER_POLICY, HeaderValue::from_static("no-referrer"));

    let csp = format!(
        "default-src 'none'; \
         style-src 'self'; \
         img-src 'self' {IMAGE_SOURCES}; \
         form-action 'self'; \
         base-uri 'self'; \
         frame-ancestors 'none'"
    );
    if let Ok(value) = HeaderValue::from_str(&csp) {
        headers.insert(CONTENT_SECURITY_POLICY, value);
    }

    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-store, max-age=0"));

    headers.insert(
        HeaderName::from_static("cross-origin-opener-policy"),
        HeaderValue::from_static("same-origin"),
    );

    response
}
