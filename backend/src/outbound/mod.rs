//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: product storage, either PostgreSQL via Diesel or an
//!   in-process map for database-less runs and tests.
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod persistence;
