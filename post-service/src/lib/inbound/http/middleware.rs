use auth::Authenticator;
use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use crate::domain::account::models::AccountId;
use crate::inbound::http::router::AppState;

/// Path fragments that bypass authentication.
///
/// Matched as substrings of the request path, so `/user/signup-bonus` and
/// `/posts/login` are also let through the gate.
pub const NO_AUTH_NEEDED: [&str; 2] = ["login", "signup"];

/// Identity of the caller, resolved from a verified token.
///
/// Handlers that take it as an extractor always get a verified identity:
/// the gate's extension is used when present, otherwise the token is
/// verified on the spot, so an allow-listed path cannot reach them
/// anonymously.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedAccount {
    pub account_id: AccountId,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedAccount {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(account) = parts.extensions.get::<AuthenticatedAccount>() {
            return Ok(*account);
        }

        authenticate(&parts.headers, &state.authenticator, parts.uri.path())
    }
}

pub fn requires_token(path: &str) -> bool {
    !NO_AUTH_NEEDED.iter().any(|fragment| path.contains(fragment))
}

/// Trim the header value and drop an optional `Bearer ` scheme.
fn token_from_header(value: &str) -> &str {
    let value = value.trim();
    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .unwrap_or(value)
}

fn reject(reason: &'static str) -> Response {
    (StatusCode::UNAUTHORIZED, reason).into_response()
}

/// Resolve the caller from the `Authorization` header.
fn authenticate(
    headers: &HeaderMap,
    authenticator: &Authenticator,
    path: &str,
) -> Result<AuthenticatedAccount, Response> {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(token_from_header)
        .unwrap_or_default();

    if token.is_empty() {
        tracing::warn!(path = %path, "Rejected request without token");
        return Err(reject("missing authorization token"));
    }

    let subject = authenticator.verify_token(token).map_err(|e| {
        tracing::warn!(path = %path, error = %e, "Rejected request with invalid token");
        reject("invalid or expired token")
    })?;

    let account_id = AccountId::from_string(&subject).map_err(|e| {
        tracing::warn!(path = %path, error = %e, "Rejected token with malformed subject");
        reject("invalid or expired token")
    })?;

    Ok(AuthenticatedAccount { account_id })
}

/// Gate applied to every route.
///
/// Allow-listed paths pass through untouched. Everything else needs a
/// verifiable token in `Authorization`; the account id it carries is
/// inserted as [`AuthenticatedAccount`] for the handlers.
pub async fn auth_gate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    if !requires_token(req.uri().path()) {
        return Ok(next.run(req).await);
    }

    let account = authenticate(req.headers(), &state.authenticator, req.uri().path())?;
    req.extensions_mut().insert(account);

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allow_listed_paths() {
        assert!(!requires_token("/login"));
        assert!(!requires_token("/signup"));
    }

    #[test]
    fn test_allow_list_matches_substrings() {
        assert!(!requires_token("/user/signup-bonus"));
        assert!(!requires_token("/posts/login-history"));
    }

    #[test]
    fn test_everything_else_is_gated() {
        assert!(requires_token("/"));
        assert!(requires_token("/posts"));
        assert!(requires_token("/posts/0191f0c4-5f6a-7000-8000-000000000000"));
        assert!(requires_token("/ws"));
        assert!(requires_token("/sign-up"));
    }

    #[test]
    fn test_token_from_header() {
        assert_eq!(token_from_header("  abc.def.ghi \n"), "abc.def.ghi");
        assert_eq!(token_from_header("Bearer abc.def.ghi"), "abc.def.ghi");
        assert_eq!(token_from_header("   "), "");
    }
}
