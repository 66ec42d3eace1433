//! Session extractors for Axum handlers.
//!
//! The access token is read from the `Authorization: Bearer` header, or
//! failing that from the `sb-access-token` cookie set by the web client.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;
use pilakon_core::error::CoreError;
use pilakon_core::types::UserId;

use crate::auth::session::{validate_token, ACCESS_TOKEN_COOKIE};
use crate::error::AppError;
use crate::state::AppState;

/// Signed-in user. Rejects the request with 401 when no valid session is
/// present.
///
/// ```ignore
/// async fn my_handler(session: Session) -> AppResult<Json<()>> {
///     tracing::info!(user_id = %session.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: UserId,
    pub email: Option<String>,
}

impl FromRequestParts<AppState> for Session {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let unauthorized = || AppError::Core(CoreError::Unauthorized("Unauthorized".into()));

        let token = access_token(parts).ok_or_else(unauthorized)?;

        let claims = validate_token(&token, &state.config.session).map_err(|err| {
            tracing::debug!(error = %err, "Rejected session token");
            unauthorized()
        })?;

        Ok(Session {
            user_id: claims.sub,
            email: claims.email,
        })
    }
}

/// Optional session for endpoints that serve anonymous callers too.
///
/// A missing or invalid token yields `MaybeSession(None)`; it never rejects.
#[derive(Debug, Clone)]
pub struct MaybeSession(pub Option<Session>);

impl FromRequestParts<AppState> for MaybeSession {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(MaybeSession(
            Session::from_request_parts(parts, state).await.ok(),
        ))
    }
}

/// Token from the bearer header, else from the session cookie.
fn access_token(parts: &Parts) -> Option<String> {
    let bearer = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());

    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    CookieJar::from_headers(&parts.headers)
        .get(ACCESS_TOKEN_COOKIE)
        .map(|cookie| cookie.value_trimmed().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use axum::http::Request;

    use super::*;

    fn parts_with(header: &str, value: &str) -> Parts {
        let (parts, _) = Request::builder()
            .header(header, value)
            .body(())
            .unwrap()
            .into_parts();
        parts
    }

    #[test]
    fn bearer_header_is_read() {
        let parts = parts_with("authorization", "Bearer abc.def");
        assert_eq!(access_token(&parts).as_deref(), Some("abc.def"));
    }

    #[test]
    fn non_bearer_scheme_is_ignored() {
        let parts = parts_with("authorization", "Basic dXNlcg==");
        assert_eq!(access_token(&parts), None);
    }

    #[test]
    fn cookie_is_used_without_header() {
        let parts = parts_with("cookie", "theme=dark; sb-access-token=tok123; other=1");
        assert_eq!(access_token(&parts).as_deref(), Some("tok123"));
    }

    #[test]
    fn quoted_cookie_value_is_unquoted() {
        let parts = parts_with("cookie", "sb-access-token=\"abc\"");
        assert_eq!(access_token(&parts).as_deref(), Some("abc"));
    }

    #[test]
    fn header_wins_over_cookie() {
        let (parts, _) = Request::builder()
            .header("authorization", "Bearer from-header")
            .header("cookie", "sb-access-token=from-cookie")
            .body(())
            .unwrap()
            .into_parts();
        assert_eq!(access_token(&parts).as_deref(), Some("from-header"));
    }

    #[test]
    fn empty_cookie_is_absent() {
        let parts = parts_with("cookie", "sb-access-token=");
        assert_eq!(access_token(&parts), None);
    }
}
