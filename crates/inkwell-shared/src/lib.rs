//! # Inkwell Shared
//!
//! Wire types shared between the editor frontend and the API server.

pub mod dto;
pub mod response;

pub use response::ErrorResponse;
