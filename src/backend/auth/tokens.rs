/**
 * JWT Tokens
 *
 * Tokens are issued by the platform's authentication service; this server
 * only verifies them. `create_token` exists so local tooling and tests can
 * mint tokens signed with the same secret.
 */

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Token lifetime for locally minted tokens (30 days)
const TOKEN_TTL_SECS: u64 = 30 * 24 * 60 * 60;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// Email (optional, informational)
    #[serde(default)]
    pub email: Option<String>,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
    /// Issued at time (Unix timestamp)
    pub iat: u64,
}

/// Signing and verification keys derived from the shared secret
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl JwtKeys {
    pub fn from_secret(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }

    /// Create a JWT token for a user
    pub fn create_token(
        &self,
        user_id: Uuid,
        email: Option<String>,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = u64::try_from(Utc::now().timestamp()).unwrap_or(0);
        let claims = Claims {
            sub: user_id.to_string(),
            email,
            exp: now + TOKEN_TTL_SECS,
            iat: now,
        };

        encode(&Header::default(), &claims, &self.encoding)
    }

    /// Verify and decode a JWT token
    pub fn verify_token(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let token_data = decode::<Claims>(token, &self.decoding, &Validation::default())?;
        Ok(token_data.claims)
    }

    /// Verify a token and extract the user ID from its `sub` claim
    pub fn user_id_from_token(&self, token: &str) -> Result<Uuid, String> {
        let claims = self
            .verify_token(token)
            .map_err(|e| format!("Token verification failed: {}", e))?;
        Uuid::parse_str(&claims.sub).map_err(|e| format!("Invalid user ID in token: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys() -> JwtKeys {
        JwtKeys::from_secret(b"unit-test-secret-0123456789")
    }

    #[test]
    fn test_verify_token() {
        let user_id = Uuid::new_v4();
        let token = keys().create_token(user_id, Some("ada@example.com".into())).unwrap();

        let claims = keys().verify_token(&token).unwrap();
        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.email.as_deref(), Some("ada@example.com"));
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_user_id_from_token() {
        let user_id = Uuid::new_v4();
        let token = keys().create_token(user_id, None).unwrap();
        assert_eq!(keys().user_id_from_token(&token).unwrap(), user_id);
    }

    #[test]
    fn test_verify_invalid_token() {
        assert!(keys().verify_token("invalid.token.here").is_err());
    }

    #[test]
    fn test_token_from_other_secret_is_rejected() {
        let other = JwtKeys::from_secret(b"a-completely-different-secret");
        let token = other.create_token(Uuid::new_v4(), None).unwrap();
        assert!(keys().verify_token(&token).is_err());
    }

    #[test]
    fn test_non_uuid_subject_is_rejected() {
        let now = u64::try_from(Utc::now().timestamp()).unwrap();
        let claims = Claims { sub: "not-a-uuid".into(), email: None, exp: now + 60, iat: now };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"unit-test-secret-0123456789"),
        )
        .unwrap();
        assert!(keys().user_id_from_token(&token).is_err());
    }
}
