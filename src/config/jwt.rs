use anyhow::{Context, bail};
use chrono::Duration;
use std::env;

/// Signing context for the token subsystem: one secret and the two expiry
/// policies, built once at startup and passed explicitly to every issue and
/// verify call. The same secret signs both token kinds; the `purpose` claim
/// keeps them apart.
#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expiry_minutes: i64,
    pub verification_token_expiry_hours: i64,
}

impl JwtConfig {
    /// Loads the signing context from the environment.
    ///
    /// A missing or empty `JWT_SECRET` is a fatal configuration error: the
    /// process must not sign tokens with a predictable key. Expiry values
    /// that are present but unparseable or non-positive are also fatal
    /// rather than silently falling back to a default.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_values(
            env::var("JWT_SECRET").ok(),
            env::var("ACCESS_TOKEN_EXPIRE_MINUTES").ok(),
            env::var("EMAIL_VERIFICATION_TOKEN_EXPIRE_HOURS").ok(),
        )
    }

    fn from_values(
        secret: Option<String>,
        access_minutes: Option<String>,
        verification_hours: Option<String>,
    ) -> anyhow::Result<Self> {
        let secret = match secret {
            Some(s) if !s.trim().is_empty() => s,
            _ => bail!("JWT_SECRET must be set to a non-empty value"),
        };

        Ok(Self {
            secret,
            access_token_expiry_minutes: parse_expiry(
                access_minutes,
                "ACCESS_TOKEN_EXPIRE_MINUTES",
                15,
            )?,
            verification_token_expiry_hours: parse_expiry(
                verification_hours,
                "EMAIL_VERIFICATION_TOKEN_EXPIRE_HOURS",
                24,
            )?,
        })
    }

    pub fn access_token_ttl(&self) -> Duration {
        Duration::minutes(self.access_token_expiry_minutes)
    }

    pub fn verification_token_ttl(&self) -> Duration {
        Duration::hours(self.verification_token_expiry_hours)
    }
}

fn parse_expiry(value: Option<String>, name: &str, default: i64) -> anyhow::Result<i64> {
    let Some(raw) = value else {
        return Ok(default);
    };

    let parsed: i64 = raw
        .trim()
        .parse()
        .with_context(|| format!("{} must be an integer, got {:?}", name, raw))?;

    if parsed <= 0 {
        bail!("{} must be positive, got {}", name, parsed);
    }

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_expiries_are_unset() {
        let config =
            JwtConfig::from_values(Some("test-secret".to_string()), None, None).unwrap();

        assert_eq!(config.access_token_expiry_minutes, 15);
        assert_eq!(config.verification_token_expiry_hours, 24);
        assert_eq!(config.access_token_ttl(), Duration::minutes(15));
        assert_eq!(config.verification_token_ttl(), Duration::hours(24));
    }

    #[test]
    fn explicit_expiries_are_parsed() {
        let config = JwtConfig::from_values(
            Some("test-secret".to_string()),
            Some("30".to_string()),
            Some("48".to_string()),
        )
        .unwrap();

        assert_eq!(config.access_token_expiry_minutes, 30);
        assert_eq!(config.verification_token_expiry_hours, 48);
    }

    #[test]
    fn missing_secret_is_fatal() {
        assert!(JwtConfig::from_values(None, None, None).is_err());
    }

    #[test]
    fn empty_secret_is_fatal() {
        assert!(JwtConfig::from_values(Some("   ".to_string()), None, None).is_err());
    }

    #[test]
    fn unparseable_expiry_is_fatal() {
        // The literal text "None" is what a missing env var becomes when
        // string-interpolated; it must fail at startup, not at first use.
        let result = JwtConfig::from_values(
            Some("test-secret".to_string()),
            Some("None".to_string()),
            None,
        );
        assert!(result.is_err());
    }

    #[test]
    fn non_positive_expiry_is_fatal() {
        let result = JwtConfig::from_values(
            Some("test-secret".to_string()),
            Some("0".to_string()),
            None,
        );
        assert!(result.is_err());
    }
}
