//! Shared utilities:
//!
//! - [`email`]: SMTP delivery of verification emails
//! - [`errors`]: application error type and HTTP mapping
//! - [`jwt`]: the token codec, issuers, and subject resolver
//! - [`password`]: bcrypt hashing and verification

pub mod email;
pub mod errors;
pub mod jwt;
pub mod password;
