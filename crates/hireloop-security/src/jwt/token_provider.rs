//! JWT token provider for creating and validating tokens.

use super::Claims;
use chrono::{Duration, Utc};
use hireloop_config::SecurityConfig;
use hireloop_core::{HireloopError, HireloopResult, Role, UserId};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::sync::Arc;
use tracing::{debug, warn};

/// HS256 token issuer and verifier.
#[derive(Clone)]
pub struct TokenProvider {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    config: Arc<SecurityConfig>,
    validation: Validation,
}

impl TokenProvider {
    #[must_use]
    pub fn new(config: Arc<SecurityConfig>) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.jwt_issuer]);
        validation.set_audience(&[&config.jwt_audience]);
        validation.validate_exp = true;
        validation.validate_nbf = true;

        Self {
            encoding_key,
            decoding_key,
            config,
            validation,
        }
    }

    /// Issues a token for a user.
    pub fn generate_token(&self, user_id: UserId, email: &str, role: Role) -> HireloopResult<String> {
        let lifetime = i64::try_from(self.config.jwt_expiration_secs).unwrap_or(i64::MAX);
        let expires_at = Utc::now() + Duration::seconds(lifetime);

        let claims = Claims::new(
            user_id,
            email.to_string(),
            role,
            self.config.jwt_issuer.clone(),
            self.config.jwt_audience.clone(),
            expires_at,
        );

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| HireloopError::Internal(format!("Failed to generate token: {e}")))?;

        debug!("Generated token for user {}", user_id);
        Ok(token)
    }

    /// Validates a token and returns the claims.
    pub fn validate_token(&self, token: &str) -> HireloopResult<Claims> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            warn!("Token validation failed: {}", e);
            match e.kind() {
                ErrorKind::ExpiredSignature => HireloopError::TokenExpired,
                ErrorKind::InvalidToken | ErrorKind::InvalidSignature => {
                    HireloopError::InvalidToken("Invalid token signature".to_string())
                }
                ErrorKind::InvalidIssuer => HireloopError::InvalidToken("Invalid token issuer".to_string()),
                ErrorKind::InvalidAudience => HireloopError::InvalidToken("Invalid token audience".to_string()),
                _ => HireloopError::InvalidToken(e.to_string()),
            }
        })?;

        Ok(token_data.claims)
    }
}

impl std::fmt::Debug for TokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenProvider")
            .field("issuer", &self.config.jwt_issuer)
            .field("audience", &self.config.jwt_audience)
            .finish_non_exhaustive()
    }
}
