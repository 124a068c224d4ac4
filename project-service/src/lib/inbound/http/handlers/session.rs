use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::cookie::SameSite;
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use super::ApiError;
use crate::inbound::http::credential::TOKEN_COOKIE;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SessionRequest {
    pub token: String,
}

/// Store a credential in an HTTP-only cookie so browsers present it on later calls.
pub async fn set_session(
    jar: CookieJar,
    Json(body): Json<SessionRequest>,
) -> Result<(CookieJar, StatusCode), ApiError> {
    if body.token.trim().is_empty() {
        return Err(ApiError::UnprocessableEntity("token is required".to_string()));
    }

    let cookie = Cookie::build((TOKEN_COOKIE, body.token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);

    Ok((jar.add(cookie), StatusCode::NO_CONTENT))
}

pub async fn clear_session(jar: CookieJar) -> (CookieJar, StatusCode) {
    let cookie = Cookie::build(TOKEN_COOKIE).path("/");
    (jar.remove(cookie), StatusCode::NO_CONTENT)
}
