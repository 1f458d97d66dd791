use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;

use super::model::{Claims, Principal};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Oturum açmanız gerekiyor")]
    MissingToken,
    #[error("Oturum geçersiz veya süresi dolmuş")]
    InvalidToken(#[source] jsonwebtoken::errors::Error),
}

/// External sign-in service. Only verifies tokens; never sees credentials.
pub trait IdentityProvider: Send + Sync {
    fn authenticate(&self, token: &str) -> Result<Principal, AuthError>;
}

/// Verifies HS256 ID tokens signed with a shared secret.
pub struct TokenIdentityProvider {
    decoding_key: DecodingKey,
    encoding_key: EncodingKey,
}

impl TokenIdentityProvider {
    pub fn new(secret: &str) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Issue a token for `uid`, valid for `ttl_seconds`.
    pub fn issue_token(
        &self,
        uid: &str,
        email: Option<&str>,
        ttl_seconds: i64,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: uid.to_string(),
            email: email.map(str::to_string),
            exp: (now + ttl_seconds).max(0) as usize,
            iat: now as usize,
        };
        encode(&Header::default(), &claims, &self.encoding_key)
    }
}

impl IdentityProvider for TokenIdentityProvider {
    fn authenticate(&self, token: &str) -> Result<Principal, AuthError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map_err(AuthError::InvalidToken)?;

        Ok(Principal {
            uid: token_data.claims.sub,
            email: token_data.claims.email,
        })
    }
}
