//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod logger;
mod repository;

pub use auth::{AuthError, TokenClaims, TokenService};
pub use logger::EventLogger;
pub use repository::{ChangeTracker, DataContext, DataStore, PostRepository};
