use crate::model::session::{Identity, SessionClaims};
use crate::util::token::TokenError::{TokenGenerationError, TokenValidationError};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Error generating the session token : {0}")]
    TokenGenerationError(jsonwebtoken::errors::Error),
    #[error("Error validating the session token : {0}")]
    TokenValidationError(jsonwebtoken::errors::Error),
}

/// Signs a session token for `identity` with the process-wide secret (HS256).
pub fn generate_session_token(
    identity: &Identity,
    ttl_seconds: i64,
    secret: &str,
) -> Result<String, TokenError> {
    let now = chrono::Utc::now();
    let claims = SessionClaims::new(
        identity,
        now.timestamp() as usize,
        (now + chrono::Duration::seconds(ttl_seconds)).timestamp() as usize,
    );

    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(TokenGenerationError)
}

/// Rejects tokens with a bad signature or a past `exp`.
pub fn verify_session_token(secret: &str, token: &str) -> Result<SessionClaims, TokenError> {
    jsonwebtoken::decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(TokenValidationError)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> Identity {
        Identity::User {
            user_id: 1,
            username: "alice".to_string(),
        }
    }

    #[test]
    fn token_verifies_with_the_signing_secret() {
        let token = generate_session_token(&alice(), 60, "secret").unwrap();
        let claims = verify_session_token("secret", &token).unwrap();
        assert_eq!(claims.identity(), Some(alice()));
    }

    #[test]
    fn token_signed_with_another_secret_is_rejected() {
        let token = generate_session_token(&alice(), 60, "secret").unwrap();
        assert!(matches!(
            verify_session_token("other-secret", &token),
            Err(TokenValidationError(_))
        ));
    }

    #[test]
    fn expired_token_is_rejected() {
        let token = generate_session_token(&Identity::Guest, -600, "secret").unwrap();
        assert!(verify_session_token("secret", &token).is_err());
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(verify_session_token("secret", "not.a.token").is_err());
    }
}
