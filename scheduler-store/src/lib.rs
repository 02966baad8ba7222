//! MySQL storage for the scheduler
//!
//! Implements `scheduler_core::store::Dao` for each table over a sqlx pool.

pub mod connection;
pub mod repos;
pub mod schema;

pub use connection::{connect, DbCredentials};
pub use repos::daos;
