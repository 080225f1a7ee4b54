use chrono::{Duration, Utc};
use contactly::config::jwt::JwtConfig;
use contactly::modules::auth::model::{Claims, TokenPurpose};
use contactly::utils::jwt::{
    TokenError, create_access_token, create_email_verification_token, decode_claims,
    encode_claims, resolve_subject,
};
use serde_json::{Map, Value, json};

fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test_secret_key_for_testing_purposes".to_string(),
        access_token_expiry_minutes: 15,
        verification_token_expiry_hours: 24,
    }
}

fn claims_with(sub: Option<&str>, purpose: TokenPurpose, exp_offset: Duration) -> Claims {
    let now = Utc::now();
    Claims {
        sub: sub.map(|s| s.to_string()),
        exp: (now + exp_offset).timestamp(),
        iat: now.timestamp(),
        purpose,
        extra: Map::new(),
    }
}

#[test]
fn round_trip_preserves_claims_exactly() {
    let config = test_jwt_config();

    let mut extra = Map::new();
    extra.insert("role".to_string(), json!("admin"));
    extra.insert("department".to_string(), json!({"name": "sales", "floor": 3}));

    let mut claims = claims_with(Some("alice@example.com"), TokenPurpose::Access, Duration::minutes(15));
    claims.extra = extra;

    let token = encode_claims(&claims, &config).unwrap();
    let decoded = decode_claims(&token, &config).unwrap();

    assert_eq!(decoded, claims);
}

#[test]
fn encoding_is_deterministic_for_identical_claims() {
    let config = test_jwt_config();
    let claims = claims_with(Some("alice@example.com"), TokenPurpose::Access, Duration::minutes(15));

    let first = encode_claims(&claims, &config).unwrap();
    let second = encode_claims(&claims, &config).unwrap();

    assert_eq!(first, second);
}

#[test]
fn access_token_resolves_to_its_subject() {
    let config = test_jwt_config();

    let token = create_access_token("alice@example.com", Map::new(), None, &config).unwrap();
    let subject = resolve_subject(&token, TokenPurpose::Access, &config).unwrap();

    assert_eq!(subject, "alice@example.com");
}

#[test]
fn verification_token_resolves_to_its_email() {
    let config = test_jwt_config();

    let token = create_email_verification_token("bob@example.com", &config).unwrap();
    let subject = resolve_subject(&token, TokenPurpose::EmailVerification, &config).unwrap();

    assert_eq!(subject, "bob@example.com");
}

#[test]
fn access_token_carries_extra_claims() {
    let config = test_jwt_config();

    let mut extra = Map::new();
    extra.insert("role".to_string(), json!("admin"));

    let token = create_access_token("alice@example.com", extra, None, &config).unwrap();
    let claims = decode_claims(&token, &config).unwrap();

    assert_eq!(claims.extra.get("role"), Some(&Value::String("admin".to_string())));
}

#[test]
fn ttl_override_applies_to_single_call() {
    let config = test_jwt_config();
    let before = Utc::now().timestamp();

    let token =
        create_access_token("alice@example.com", Map::new(), Some(Duration::minutes(5)), &config)
            .unwrap();
    let claims = decode_claims(&token, &config).unwrap();

    let expected = before + 5 * 60;
    assert!((claims.exp - expected).abs() <= 2);
    // The configured default is untouched.
    assert_eq!(config.access_token_expiry_minutes, 15);
}

#[test]
fn tokens_for_same_subject_differ_by_purpose() {
    let config = test_jwt_config();

    let access = create_access_token("carol@example.com", Map::new(), None, &config).unwrap();
    let verification = create_email_verification_token("carol@example.com", &config).unwrap();

    assert_ne!(access, verification);
    assert_eq!(
        resolve_subject(&access, TokenPurpose::Access, &config).unwrap(),
        "carol@example.com"
    );
    assert_eq!(
        resolve_subject(&verification, TokenPurpose::EmailVerification, &config).unwrap(),
        "carol@example.com"
    );
}

#[test]
fn verification_token_is_rejected_as_access_token() {
    let config = test_jwt_config();

    let token = create_email_verification_token("carol@example.com", &config).unwrap();
    let result = resolve_subject(&token, TokenPurpose::Access, &config);

    assert!(matches!(result, Err(TokenError::WrongPurpose)));
}

#[test]
fn access_token_is_rejected_as_verification_token() {
    let config = test_jwt_config();

    let token = create_access_token("carol@example.com", Map::new(), None, &config).unwrap();
    let result = resolve_subject(&token, TokenPurpose::EmailVerification, &config);

    assert!(matches!(result, Err(TokenError::WrongPurpose)));
}

#[test]
fn expired_token_is_rejected_despite_valid_signature() {
    let config = test_jwt_config();

    let claims = claims_with(Some("alice@example.com"), TokenPurpose::Access, Duration::hours(-1));
    let token = encode_claims(&claims, &config).unwrap();

    assert!(matches!(decode_claims(&token, &config), Err(TokenError::Expired)));
    assert!(matches!(
        resolve_subject(&token, TokenPurpose::Access, &config),
        Err(TokenError::Expired)
    ));
}

#[test]
fn expired_verification_token_is_rejected() {
    let config = test_jwt_config();

    // A verification token after the configured TTL has elapsed.
    let claims = claims_with(
        Some("bob@example.com"),
        TokenPurpose::EmailVerification,
        Duration::hours(-25),
    );
    let token = encode_claims(&claims, &config).unwrap();

    assert!(matches!(
        resolve_subject(&token, TokenPurpose::EmailVerification, &config),
        Err(TokenError::Expired)
    ));
}

#[test]
fn wrong_secret_fails_signature_check() {
    let config = test_jwt_config();
    let other_config = JwtConfig {
        secret: "a_completely_different_secret".to_string(),
        ..test_jwt_config()
    };

    let token = create_access_token("alice@example.com", Map::new(), None, &config).unwrap();
    let result = decode_claims(&token, &other_config);

    assert!(matches!(result, Err(TokenError::InvalidSignature)));
}

#[test]
fn garbage_input_is_malformed() {
    let config = test_jwt_config();

    for input in ["not-a-real-token", "", "a.b", "a.b.c.d", "..", "header.payload."] {
        let result = resolve_subject(input, TokenPurpose::Access, &config);
        assert!(result.is_err(), "input {:?} should be rejected", input);
    }
}

#[test]
fn any_single_character_change_is_rejected() {
    let config = test_jwt_config();
    let token = create_access_token("alice@example.com", Map::new(), None, &config).unwrap();

    for i in 0..token.len() {
        let mut tampered: Vec<char> = token.chars().collect();
        tampered[i] = if tampered[i] == 'A' { 'B' } else { 'A' };
        let tampered: String = tampered.into_iter().collect();

        if tampered == token {
            continue;
        }

        assert!(
            decode_claims(&tampered, &config).is_err(),
            "tampering at index {} was not detected",
            i
        );
    }
}

#[test]
fn missing_subject_is_rejected() {
    let config = test_jwt_config();

    let claims = claims_with(None, TokenPurpose::Access, Duration::minutes(15));
    let token = encode_claims(&claims, &config).unwrap();

    // Structurally valid and correctly signed, still unusable.
    assert!(decode_claims(&token, &config).is_ok());
    assert!(matches!(
        resolve_subject(&token, TokenPurpose::Access, &config),
        Err(TokenError::MissingSubject)
    ));
}

#[test]
fn empty_subject_is_rejected() {
    let config = test_jwt_config();

    let claims = claims_with(Some(""), TokenPurpose::Access, Duration::minutes(15));
    let token = encode_claims(&claims, &config).unwrap();

    assert!(matches!(
        resolve_subject(&token, TokenPurpose::Access, &config),
        Err(TokenError::MissingSubject)
    ));
}
