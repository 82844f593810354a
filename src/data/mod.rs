//! Data layer module
//!
//! Handles all data persistence:
//! - SQLite database operations (users, store snapshots)
//! - Built-in trend catalog (seed data)

pub mod catalog;
mod database;
mod models;

pub use database::{Database, SnapshotRow};
pub use models::*;

#[cfg(test)]
mod database_test;
