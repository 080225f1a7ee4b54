use contactly::utils::password::{hash_password, verify_password};

#[test]
fn hash_and_verify_round_trip() {
    let password = "correct horse battery staple";

    let hashed = hash_password(password).unwrap();

    assert_ne!(hashed, password);
    assert!(verify_password(password, &hashed).unwrap());
}

#[test]
fn wrong_password_does_not_verify() {
    let hashed = hash_password("right-password").unwrap();

    assert!(!verify_password("wrong-password", &hashed).unwrap());
}

#[test]
fn same_password_hashes_differently() {
    let first = hash_password("duplicate").unwrap();
    let second = hash_password("duplicate").unwrap();

    // bcrypt salts every hash.
    assert_ne!(first, second);
    assert!(verify_password("duplicate", &first).unwrap());
    assert!(verify_password("duplicate", &second).unwrap());
}
