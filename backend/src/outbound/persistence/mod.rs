//! Product persistence adapters.
//!
//! - **Diesel**: PostgreSQL via `diesel-async` and a `bb8` pool. Row structs
//!   (`models.rs`) and the table definition (`schema.rs`) stay private to this
//!   module.
//! - **In-memory**: an ordered map behind a mutex, used when no database URL
//!   is configured and by tests.
//!
//! Both adapters only translate between storage and domain types; all field
//! validation happens before they are called.
//!
//! # Example
//!
//! ```ignore
//! use estoque::outbound::persistence::{DbPool, DieselProductRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/estoque")).await?;
//! let repo = DieselProductRepository::new(pool);
//! ```

mod diesel_error_mapping;
mod diesel_product_repository;
mod in_memory_product_repository;
mod models;
mod pool;
mod schema;

pub use diesel_product_repository::DieselProductRepository;
pub use in_memory_product_repository::InMemoryProductRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
