use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Authenticated user as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Principal {
    pub uid: String,
    pub email: Option<String>,
}

/// ID token claims issued by the identity provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user id
    #[serde(default)]
    pub email: Option<String>,
    pub exp: usize,
    pub iat: usize,
}

/// Session status response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SessionResponse {
    pub authenticated: bool,
    pub uid: Option<String>,
    pub email: Option<String>,
}
