//! Database layer: row models, store traits and their PostgreSQL implementations.

pub mod errors;
pub mod handlers;
pub mod models;
