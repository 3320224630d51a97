//! # Inkwell Core
//!
//! The domain layer of the Inkwell post editor.
//! This crate contains the post model, its validation rules and the ports
//! that infrastructure implements. It has zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;

pub use error::{DomainError, RepoError};
