use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::TokenConfig;

/// Bearer token payload: subject account, the role names held at issuance
/// time, and the usual iss/aud/iat/exp set. Role changes after issuance do
/// not revoke an unexpired token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: Uuid,
    pub roles: Vec<String>,
    pub iss: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(account_id: Uuid, roles: Vec<String>, cfg: &TokenConfig) -> Self {
        let now = Utc::now();
        Self {
            sub: account_id,
            roles,
            iss: cfg.issuer.clone(),
            aud: cfg.audience.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(cfg.lifetime_secs)).timestamp(),
        }
    }
}

pub fn encode_token(claims: &Claims, cfg: &TokenConfig) -> Result<String, String> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(cfg.secret.as_bytes()),
    )
    .map_err(|e| format!("JWT encode failed: {e}"))
}

/// Decode and validate a token: signature, issuer, audience, expiry (no
/// leeway). Callers surface any failure uniformly as 401 without detail.
pub fn decode_token(token: &str, cfg: &TokenConfig) -> Result<Claims, String> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.set_issuer(&[&cfg.issuer]);
    validation.set_audience(&[&cfg.audience]);
    validation.set_required_spec_claims(&["exp", "iss", "aud"]);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(cfg.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| format!("JWT decode failed: {e}"))
}
