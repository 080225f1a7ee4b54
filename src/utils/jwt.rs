//! The token subsystem: codec, issuers, and subject resolver.
//!
//! This is the only module that touches the signing primitive. Tokens are
//! HS256 JWTs; the [`JwtConfig`] passed into every function is the signing
//! context (secret plus expiry policies), threaded explicitly so nothing
//! here reads ambient state. Encoding is deterministic for an identical
//! claim set, and decoding classifies every failure into [`TokenError`] so
//! callers can log the real reason while the client only ever sees one
//! undifferentiated authentication failure.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::config::jwt::JwtConfig;
use crate::modules::auth::model::{Claims, TokenPurpose};

const ALGORITHM: Algorithm = Algorithm::HS256;

#[derive(Debug, Error)]
pub enum TokenError {
    /// The string does not parse into the expected token structure.
    #[error("token is malformed")]
    Malformed,
    /// The signature does not verify against the configured secret.
    #[error("token signature is invalid")]
    InvalidSignature,
    /// Structurally and cryptographically valid, but past its expiry.
    #[error("token has expired")]
    Expired,
    /// Valid signature and not expired, but no usable subject claim.
    #[error("token has no subject")]
    MissingSubject,
    /// The token was issued for a different purpose than the caller expects.
    #[error("token purpose does not match its use")]
    WrongPurpose,
    #[error("failed to sign token")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

/// Serializes and signs a claim set into an opaque token string.
pub fn encode_claims(claims: &Claims, jwt_config: &JwtConfig) -> Result<String, TokenError> {
    encode(
        &Header::new(ALGORITHM),
        claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(TokenError::Signing)
}

/// Verifies the signature and expiry of a token and returns the exact
/// claim set that was encoded.
pub fn decode_claims(token: &str, jwt_config: &JwtConfig) -> Result<Claims, TokenError> {
    let mut validation = Validation::new(ALGORITHM);
    validation.leeway = 0;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        ErrorKind::InvalidSignature => TokenError::InvalidSignature,
        _ => TokenError::Malformed,
    })
}

/// Issues a short-lived access token for a just-authenticated user.
///
/// `extra_claims` is merged into the claim set as-is; `sub`, `exp`, `iat`
/// and `purpose` are reserved and always set here. `expires_in` overrides
/// the configured TTL for this call only.
pub fn create_access_token(
    subject: &str,
    extra_claims: Map<String, Value>,
    expires_in: Option<Duration>,
    jwt_config: &JwtConfig,
) -> Result<String, TokenError> {
    let now = Utc::now();
    let ttl = expires_in.unwrap_or_else(|| jwt_config.access_token_ttl());

    let claims = Claims {
        sub: Some(subject.to_owned()),
        exp: (now + ttl).timestamp(),
        iat: now.timestamp(),
        purpose: TokenPurpose::Access,
        extra: extra_claims,
    };

    encode_claims(&claims, jwt_config)
}

/// Issues a long-lived token proving control of an email address. The
/// subject is the email itself and nothing else is carried.
pub fn create_email_verification_token(
    email: &str,
    jwt_config: &JwtConfig,
) -> Result<String, TokenError> {
    let now = Utc::now();

    let claims = Claims {
        sub: Some(email.to_owned()),
        exp: (now + jwt_config.verification_token_ttl()).timestamp(),
        iat: now.timestamp(),
        purpose: TokenPurpose::EmailVerification,
        extra: Map::new(),
    };

    encode_claims(&claims, jwt_config)
}

/// Decodes a presented token and returns its subject verbatim.
///
/// The caller states which [`TokenPurpose`] it accepts; a mismatch is
/// rejected like any other invalid token. No interpretation of the subject
/// happens here — the calling layer decides whether it names a user to
/// look up or an email to mark verified.
pub fn resolve_subject(
    token: &str,
    expected: TokenPurpose,
    jwt_config: &JwtConfig,
) -> Result<String, TokenError> {
    let claims = decode_claims(token, jwt_config)?;

    if claims.purpose != expected {
        return Err(TokenError::WrongPurpose);
    }

    match claims.sub {
        Some(sub) if !sub.is_empty() => Ok(sub),
        _ => Err(TokenError::MissingSubject),
    }
}
