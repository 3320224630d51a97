//! Post stores and database connection management.

mod changes;
mod connections;
mod memory;

#[cfg(feature = "postgres")]
pub mod entity;
#[cfg(feature = "postgres")]
mod postgres;

pub use connections::DatabaseConfig;
pub use memory::InMemoryPostStore;

#[cfg(feature = "postgres")]
pub use connections::connect;
#[cfg(feature = "postgres")]
pub use postgres::PostgresPostStore;

#[cfg(feature = "postgres")]
#[cfg(test)]
mod tests;
