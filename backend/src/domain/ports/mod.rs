//! Driven ports at the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod product_repository;

#[cfg(test)]
pub use product_repository::MockProductRepository;
pub use product_repository::{ProductRepository, ProductRepositoryError};
