//! # Inkwell Infrastructure
//!
//! Concrete implementations of the ports defined in `inkwell-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `postgres` - PostgreSQL post store via SeaORM
//! - `auth` - JWT bearer tokens

pub mod database;
pub mod logging;

#[cfg(feature = "auth")]
pub mod auth;

pub use database::{DatabaseConfig, InMemoryPostStore};
pub use logging::TracingEventLogger;

#[cfg(feature = "postgres")]
pub use database::PostgresPostStore;

#[cfg(feature = "auth")]
pub use auth::{JwtConfig, JwtTokenService};
