//! PostgreSQL connection pool initialization.
//!
//! The connection string is read from `DATABASE_URL`. The pool is created
//! once at startup and cloned into the application state; embedded
//! migrations run before the server starts accepting requests.

use sqlx::PgPool;
use std::env;

/// Initializes the connection pool and runs pending migrations.
///
/// # Panics
///
/// Panics if `DATABASE_URL` is not set, the database is unreachable, or a
/// migration fails. All three are startup-fatal conditions.
pub async fn init_db_pool() -> PgPool {
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    pool
}
