//! Request-processing middleware.
//!
//! Authentication flow:
//!
//! 1. Client sends `Authorization: Bearer <token>`.
//! 2. The [`auth::AuthUser`] extractor verifies the token, checks its
//!    purpose is `access`, and resolves the subject to a user row.
//! 3. The handler runs with the authenticated [`crate::modules::users::model::User`].

pub mod auth;
