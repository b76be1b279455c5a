//! Database library providing the PostgreSQL connector and the generic
//! repository used by the domain crates.
//!
//! # Examples
//!
//! ```ignore
//! use core_config::FromEnv;
//! use database::postgres::{self, PostgresConfig};
//! use migration::Migrator;
//!
//! let config = PostgresConfig::from_env()?;
//! let db = postgres::connect_from_config(config).await?;
//! postgres::run_migrations::<Migrator>(&db, "catalog_api").await?;
//! ```

pub mod common;
pub mod postgres;
pub mod repository;

// Re-exports for convenience
pub use common::{DatabaseError, DatabaseResult};
pub use repository::BaseRepository;
