//! Request-derived values used when building absolute media URLs.

use std::convert::Infallible;

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::HOST;
use axum::http::request::Parts;

const FORWARDED_PROTO: &str = "x-forwarded-proto";

/// `scheme://host[:port]` of the incoming request.
///
/// The scheme honours `X-Forwarded-Proto` (first value, `http` or `https`),
/// the host comes from the `Host` header or the absolute request URI.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestOrigin(String);

impl RequestOrigin {
    pub fn as_str(&self) -> &str { &self.0 }
}

#[async_trait]
impl<S> FromRequestParts<S> for RequestOrigin
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let scheme = header(parts, FORWARDED_PROTO)
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|s| s.eq_ignore_ascii_case("http") || s.eq_ignore_ascii_case("https"))
            .map(str::to_ascii_lowercase)
            .unwrap_or_else(|| "http".to_string());
        let host = header(parts, HOST.as_str())
            .or_else(|| parts.uri.authority().map(|a| a.as_str()))
            .unwrap_or("localhost")
            .trim()
            .to_string();
        Ok(Self(format!("{scheme}://{host}")))
    }
}

fn header<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts.headers.get(name).and_then(|v| v.to_str().ok())
}
