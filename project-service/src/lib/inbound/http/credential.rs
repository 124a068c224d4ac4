use std::convert::Infallible;

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum_extra::extract::CookieJar;

/// Name of the cookie that carries the session credential.
pub const TOKEN_COOKIE: &str = "token";

/// The raw credential presented with a request, if any.
///
/// Taken from `Authorization: Bearer <token>` (scheme matched without regard
/// to case), falling back to the `token`
/// cookie. Verification is left to the operation, so extraction never fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential(pub Option<String>);

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().split_once(' '))
        .filter(|(scheme, _)| scheme.eq_ignore_ascii_case("Bearer"))
        .map(|(_, token)| token.trim())
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

fn cookie_token(headers: &HeaderMap) -> Option<String> {
    CookieJar::from_headers(headers)
        .get(TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_string())
}

#[async_trait]
impl<S> FromRequestParts<S> for Credential
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Credential(
            bearer_token(&parts.headers).or_else(|| cookie_token(&parts.headers)),
        ))
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn test_header_wins_over_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer from-header"),
        );
        headers.insert(header::COOKIE, HeaderValue::from_static("token=from-cookie"));

        assert_eq!(
            bearer_token(&headers).or_else(|| cookie_token(&headers)),
            Some("from-header".to_string())
        );
    }

    #[test]
    fn test_cookie_fallback() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; token=from-cookie"),
        );

        assert_eq!(bearer_token(&headers), None);
        assert_eq!(cookie_token(&headers), Some("from-cookie".to_string()));
    }

    #[test]
    fn test_non_bearer_scheme_is_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic abc"));

        assert_eq!(bearer_token(&headers), None);
    }

    #[test]
    fn test_bearer_scheme_is_case_insensitive() {
        for value in ["bearer lower-case", "BEARER lower-case", "Bearer   lower-case"] {
            let mut headers = HeaderMap::new();
            headers.insert(header::AUTHORIZATION, HeaderValue::from_static(value));

            assert_eq!(bearer_token(&headers), Some("lower-case".to_string()));
        }
    }

    #[test]
    fn test_bearer_without_token_counts_as_absent() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer"));

        assert_eq!(bearer_token(&headers), None);
    }
}
