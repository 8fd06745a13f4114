use super::claims::{Role, TokenClaims};
use super::config::JwtConfig;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
    errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::sync::Arc;
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("failed to sign token: {0}")]
    Signing(String),

    #[error("token has expired")]
    Expired,

    #[error("invalid token")]
    Invalid,
}

/// Freshly issued access/refresh pair.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// When the refresh token stops verifying; persisted next to its hash.
    #[serde(skip)]
    pub refresh_expires_at: DateTime<Utc>,
}

struct Keys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl Keys {
    fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }
}

/// Signs and verifies access and refresh tokens.
///
/// Both kinds carry the same claims but are signed with different secrets,
/// so a refresh token never passes access verification and vice versa.
#[derive(Clone)]
pub struct JwtAuth {
    access: Arc<Keys>,
    refresh: Arc<Keys>,
    access_ttl: Duration,
    refresh_ttl: Duration,
    validation: Arc<Validation>,
}

impl JwtAuth {
    pub fn new(config: &JwtConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        tracing::info!(
            access_ttl_secs = config.access_ttl_secs,
            refresh_ttl_secs = config.refresh_ttl_secs,
            "JWT auth initialized"
        );

        Self {
            access: Arc::new(Keys::new(&config.access_secret)),
            refresh: Arc::new(Keys::new(&config.refresh_secret)),
            access_ttl: Duration::seconds(config.access_ttl_secs),
            refresh_ttl: Duration::seconds(config.refresh_ttl_secs),
            validation: Arc::new(validation),
        }
    }

    /// Issue a new access/refresh pair for the user.
    pub fn issue_pair(&self, user_id: Uuid, email: &str, role: Role) -> Result<TokenPair, TokenError> {
        let now = Utc::now();
        let refresh_expires_at = now + self.refresh_ttl;

        let access_token = sign(&self.access, claims(user_id, email, role, now, now + self.access_ttl))?;
        let refresh_token = sign(&self.refresh, claims(user_id, email, role, now, refresh_expires_at))?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            refresh_expires_at,
        })
    }

    pub fn verify_access(&self, token: &str) -> Result<TokenClaims, TokenError> {
        self.verify(&self.access, token)
    }

    pub fn verify_refresh(&self, token: &str) -> Result<TokenClaims, TokenError> {
        self.verify(&self.refresh, token)
    }

    fn verify(&self, keys: &Keys, token: &str) -> Result<TokenClaims, TokenError> {
        decode::<TokenClaims>(token, &keys.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => {
                    tracing::debug!(error = %e, "JWT verification failed");
                    TokenError::Invalid
                }
            })
    }
}

/// SHA-256 hex digest used to persist refresh tokens.
pub fn hash_token(token: &str) -> String {
    const_hex::encode(Sha256::digest(token.as_bytes()))
}

fn claims(
    user_id: Uuid,
    email: &str,
    role: Role,
    issued_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
) -> TokenClaims {
    TokenClaims {
        sub: user_id,
        email: email.to_string(),
        role,
        exp: expires_at.timestamp(),
        iat: issued_at.timestamp(),
        jti: Uuid::new_v4(),
    }
}

fn sign(keys: &Keys, claims: TokenClaims) -> Result<String, TokenError> {
    encode(&Header::new(Algorithm::HS256), &claims, &keys.encoding)
        .map_err(|e| TokenError::Signing(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACCESS: &str = "access-secret-that-is-at-least-32-chars!";
    const REFRESH: &str = "refresh-secret-that-is-at-least-32-chars";

    fn auth() -> JwtAuth {
        JwtAuth::new(&JwtConfig::new(ACCESS, REFRESH).unwrap())
    }

    #[test]
    fn test_issue_and_verify_pair() {
        let auth = auth();
        let user_id = Uuid::now_v7();
        let pair = auth.issue_pair(user_id, "a@example.com", Role::Staff).unwrap();

        let access = auth.verify_access(&pair.access_token).unwrap();
        assert_eq!(access.sub, user_id);
        assert_eq!(access.role, Role::Staff);

        let refresh = auth.verify_refresh(&pair.refresh_token).unwrap();
        assert_eq!(refresh.email, "a@example.com");
        assert!(refresh.exp > access.exp);
    }

    #[test]
    fn test_tokens_are_not_interchangeable() {
        let auth = auth();
        let pair = auth.issue_pair(Uuid::now_v7(), "a@example.com", Role::Customer).unwrap();

        assert!(matches!(auth.verify_access(&pair.refresh_token), Err(TokenError::Invalid)));
        assert!(matches!(auth.verify_refresh(&pair.access_token), Err(TokenError::Invalid)));
    }

    #[test]
    fn test_foreign_signature_is_rejected() {
        let other = JwtAuth::new(
            &JwtConfig::new(
                "another-access-secret-of-enough-length!!",
                "another-refresh-secret-of-enough-length!",
            )
            .unwrap(),
        );
        let pair = other.issue_pair(Uuid::now_v7(), "a@example.com", Role::Customer).unwrap();
        assert!(auth().verify_access(&pair.access_token).is_err());
    }

    #[test]
    fn test_expired_tokens_are_rejected() {
        let auth = auth();
        let now = Utc::now();
        let stale = claims(
            Uuid::now_v7(),
            "a@example.com",
            Role::Customer,
            now - Duration::hours(2),
            now - Duration::hours(1),
        );
        let access = sign(&auth.access, stale.clone()).unwrap();
        let refresh = sign(&auth.refresh, stale).unwrap();

        assert!(matches!(auth.verify_access(&access), Err(TokenError::Expired)));
        assert!(matches!(auth.verify_refresh(&refresh), Err(TokenError::Expired)));
    }

    #[test]
    fn test_garbage_is_invalid() {
        assert!(matches!(auth().verify_access("not.a.jwt"), Err(TokenError::Invalid)));
    }

    #[test]
    fn test_pairs_issued_together_differ() {
        let auth = auth();
        let id = Uuid::now_v7();
        let first = auth.issue_pair(id, "a@example.com", Role::Customer).unwrap();
        let second = auth.issue_pair(id, "a@example.com", Role::Customer).unwrap();
        assert_ne!(first.refresh_token, second.refresh_token);
        assert_ne!(hash_token(&first.refresh_token), hash_token(&second.refresh_token));
    }

    #[test]
    fn test_hash_token_is_sha256_hex() {
        let hash = hash_token("abc");
        assert_eq!(
            hash,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_ne!(hash, "abc");
    }
}
