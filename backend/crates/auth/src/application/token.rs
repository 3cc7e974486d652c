//! Access Token Service
//!
//! Issues and validates HS256-signed JWTs carrying the account id (`sub`)
//! and identifier (`email`). Tokens are stateless: a token stays valid until
//! `exp` and nothing revokes it earlier.

use std::time::Duration;

use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::application::config::AuthConfig;
use crate::domain::value_object::{account_id::AccountId, identifier::Identifier};

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token expired")]
    Expired,

    #[error("token signature mismatch")]
    InvalidSignature,

    #[error("malformed token")]
    Malformed,

    #[error("failed to encode token: {0}")]
    Encoding(jsonwebtoken::errors::Error),
}

/// JWT claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Account id
    pub sub: String,
    /// Identifier at issue time
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

/// Account reference decoded from a valid token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountRef {
    pub account_id: AccountId,
    pub identifier: Identifier,
}

pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_secs: i64,
}

impl TokenService {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl_secs: i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX),
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(config.jwt_secret.expose(), config.token_ttl)
    }

    /// Issue a token expiring `ttl` from now
    pub fn issue(
        &self,
        account_id: &AccountId,
        identifier: &Identifier,
    ) -> Result<String, TokenError> {
        self.issue_at(account_id, identifier, Utc::now())
    }

    /// Issue a token as if the current time were `now`
    pub fn issue_at(
        &self,
        account_id: &AccountId,
        identifier: &Identifier,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let iat = now.timestamp();
        let claims = TokenClaims {
            sub: account_id.to_string(),
            email: identifier.as_str().to_string(),
            iat,
            exp: iat.saturating_add(self.ttl_secs),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(TokenError::Encoding)
    }

    /// Verify signature and expiry, then decode the account reference
    pub fn validate(&self, token: &str) -> Result<AccountRef, TokenError> {
        let data = decode::<TokenClaims>(token, &self.decoding_key, &self.validation).map_err(
            |e| match e.kind() {
                JwtErrorKind::ExpiredSignature => TokenError::Expired,
                JwtErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::Malformed,
            },
        )?;

        let account_id = Uuid::parse_str(&data.claims.sub)
            .map(AccountId::from_uuid)
            .map_err(|_| TokenError::Malformed)?;

        Ok(AccountRef {
            account_id,
            identifier: Identifier::from_db(data.claims.email),
        })
    }
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("ttl_secs", &self.ttl_secs)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;

    fn service() -> TokenService {
        TokenService::new(b"test-secret", Duration::from_secs(15 * 60))
    }

    fn identifier() -> Identifier {
        Identifier::new("ada@example.com").unwrap()
    }

    #[test]
    fn test_issue_and_validate() {
        let tokens = service();
        let account_id = AccountId::new();
        let token = tokens.issue(&account_id, &identifier()).unwrap();

        let account = tokens.validate(&token).unwrap();
        assert_eq!(account.account_id, account_id);
        assert_eq!(account.identifier, identifier());
    }

    #[test]
    fn test_claims_shape() {
        let tokens = service();
        let account_id = AccountId::new();
        let now = Utc::now();
        let token = tokens.issue_at(&account_id, &identifier(), now).unwrap();

        let payload = token.split('.').nth(1).unwrap();
        let claims: TokenClaims =
            serde_json::from_slice(&URL_SAFE_NO_PAD.decode(payload).unwrap()).unwrap();
        assert_eq!(claims.sub, account_id.to_string());
        assert_eq!(claims.email, "ada@example.com");
        assert_eq!(claims.exp - claims.iat, 900);
    }

    #[test]
    fn test_expiry_boundary() {
        let tokens = service();
        let account_id = AccountId::new();

        let fresh = tokens
            .issue_at(&account_id, &identifier(), Utc::now() - chrono::Duration::minutes(14))
            .unwrap();
        assert!(tokens.validate(&fresh).is_ok());

        let stale = tokens
            .issue_at(&account_id, &identifier(), Utc::now() - chrono::Duration::minutes(16))
            .unwrap();
        assert!(matches!(tokens.validate(&stale), Err(TokenError::Expired)));
    }

    #[test]
    fn test_wrong_secret() {
        let other = TokenService::new(b"another-secret", Duration::from_secs(900));
        let token = other.issue(&AccountId::new(), &identifier()).unwrap();
        assert!(matches!(
            service().validate(&token),
            Err(TokenError::InvalidSignature)
        ));
    }

    #[test]
    fn test_tampered_payload() {
        let tokens = service();
        let token = tokens.issue(&AccountId::new(), &identifier()).unwrap();
        let parts: Vec<&str> = token.split('.').collect();

        let forged = TokenClaims {
            sub: AccountId::new().to_string(),
            email: "mallory@example.com".to_string(),
            iat: Utc::now().timestamp(),
            exp: Utc::now().timestamp() + 900,
        };
        let forged_payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&forged).unwrap());
        let tampered = format!("{}.{}.{}", parts[0], forged_payload, parts[2]);

        assert!(matches!(
            tokens.validate(&tampered),
            Err(TokenError::InvalidSignature)
        ));
    }

    #[test]
    fn test_garbage() {
        let tokens = service();
        for token in ["", "abc", "a.b.c", "not.a.jwt.at.all"] {
            assert!(matches!(tokens.validate(token), Err(TokenError::Malformed)));
        }
    }

    #[test]
    fn test_other_algorithm_rejected() {
        let claims = TokenClaims {
            sub: AccountId::new().to_string(),
            email: "ada@example.com".to_string(),
            iat: Utc::now().timestamp(),
            exp: Utc::now().timestamp() + 900,
        };
        let token = encode(
            &Header::new(Algorithm::HS384),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();
        assert!(matches!(service().validate(&token), Err(TokenError::Malformed)));
    }

    #[test]
    fn test_non_uuid_subject() {
        let tokens = service();
        let claims = TokenClaims {
            sub: "42".to_string(),
            email: "ada@example.com".to_string(),
            iat: Utc::now().timestamp(),
            exp: Utc::now().timestamp() + 900,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();
        assert!(matches!(tokens.validate(&token), Err(TokenError::Malformed)));
    }
}
