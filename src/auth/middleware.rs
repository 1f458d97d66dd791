use actix_web::HttpRequest;

use super::jwt::{AuthError, IdentityProvider};
use super::model::Principal;
use super::session::SessionContext;

/// Extract token from Authorization header
fn extract_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Build the caller's session from the bearer token, anonymous when absent or invalid.
pub fn session_from_request(req: &HttpRequest, provider: &dyn IdentityProvider) -> SessionContext {
    let mut session = SessionContext::init();
    if let Some(token) = extract_token(req) {
        match provider.authenticate(token) {
            Ok(principal) => session.sign_in(principal),
            Err(e) => log::warn!("Token validation failed: {:?}", e),
        }
    }
    session
}

/// Authenticated principal or the reason there is none.
pub fn require_principal(
    req: &HttpRequest,
    provider: &dyn IdentityProvider,
) -> Result<Principal, AuthError> {
    let token = extract_token(req).ok_or(AuthError::MissingToken)?;
    provider.authenticate(token)
}
