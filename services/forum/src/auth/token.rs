//! Access-token issuer
//!
//! Tokens are HS256-signed JWTs carrying the owning user's identity and an
//! expiry claim, so a token is verifiable independent of the session store.
//! The random `jti` claim makes every minted token unique and unguessable.
//! Note that the authenticator deliberately does NOT enforce the `exp`
//! claim: the session store's signed-out boundary is the source of truth
//! for usability, and the wall-clock expiry is advisory metadata.

use anyhow::Result;
use chrono::{DateTime, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fixed session lifetime claim stamped on every token.
pub const SESSION_TTL_HOURS: i64 = 8;

/// Token signing configuration
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// Shared secret for signing and verifying tokens
    pub secret: String,
}

impl TokenConfig {
    /// Create a new TokenConfig from environment variables
    ///
    /// # Environment Variables
    /// - `FORUM_TOKEN_SECRET`: HS256 signing secret
    pub fn from_env() -> Result<Self> {
        let secret = std::env::var("FORUM_TOKEN_SECRET")
            .map_err(|_| anyhow::anyhow!("FORUM_TOKEN_SECRET environment variable not set"))?;

        Ok(TokenConfig { secret })
    }
}

/// Claims embedded in an access token
#[derive(Debug, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Owning user ID
    pub sub: Uuid,
    /// Issued at time (unix seconds)
    pub iat: i64,
    /// Expiration time (unix seconds)
    pub exp: i64,
    /// Unique token ID
    pub jti: Uuid,
}

/// Access-token issuer
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenIssuer {
    /// Create a new token issuer
    pub fn new(config: &TokenConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
        }
    }

    /// Mint a token bound to a user and an issue/expiry window.
    pub fn issue(
        &self,
        user_id: Uuid,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Result<String> {
        let claims = AccessClaims {
            sub: user_id,
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| anyhow::anyhow!("Failed to generate access token: {}", e))?;

        Ok(token)
    }

    /// Decode and verify a token's signature and expiry claim.
    pub fn decode(&self, token: &str) -> Result<AccessClaims> {
        let validation = Validation::default();
        let data = decode::<AccessClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| anyhow::anyhow!("Failed to validate token: {}", e))?;

        Ok(data.claims)
    }
}
