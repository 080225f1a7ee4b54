//! Configuration modules for the Contactly API.
//!
//! Each submodule handles one aspect of configuration, loaded from
//! environment variables at startup:
//!
//! - [`cors`]: allowed CORS origins
//! - [`database`]: PostgreSQL connection pool initialization
//! - [`email`]: SMTP settings for verification emails
//! - [`jwt`]: token signing secret and expiry policies
//! - [`rate_limit`]: API rate limiting buckets
//!
//! All configuration is read once when [`crate::state::init_app_state`]
//! runs; nothing reads the environment afterwards.

pub mod cors;
pub mod database;
pub mod email;
pub mod jwt;
pub mod rate_limit;
