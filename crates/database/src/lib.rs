//! # Classboard Database Crate
//!
//! This crate acts as a high-level, application-specific interface to the
//! PostgreSQL database. It owns the two things every endpoint relies on:
//! the connection pool and the per-request unit-of-work scope.
//!
//! ## Architectural Principles
//!
//! - **Adapter layer:** encapsulates all database-specific logic behind a
//!   clean API, hiding the underlying SQL from the rest of the application.
//! - **One scope per unit of work:** every request runs its statements
//!   inside exactly one [`SessionScope`], which commits on success and
//!   rolls back on failure or cancellation. Scopes are never shared across
//!   tasks; the pool bounds how many can be open at once.
//! - **Asynchronous & Pooled:** all operations are asynchronous, using a
//!   connection pool (`PgPool`) for concurrent database access.
//!
//! ## Public API
//!
//! - `connect`: the async function to establish the database connection pool.
//! - `run_migrations`: applies embedded migrations, ensuring the schema is up-to-date.
//! - `SessionScope` / `with_scope`: the unit-of-work scope and its entry point.
//! - `repository`: the row types and query functions issued against a scope.
//! - `DbError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
pub mod repository;
pub mod scope;

// Re-export the key components to create a clean, public-facing API.
pub use connection::{connect, run_migrations};
pub use sqlx::PgPool;
pub use error::DbError;
pub use repository::{ClassNoticeRecord, ClassRecord};
pub use scope::{with_scope, ScopeState, SessionScope};
