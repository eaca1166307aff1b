//! Port for product persistence.
//!
//! Adapters translate between their storage rows and [`Product`]; they never
//! validate field constraints themselves.

use async_trait::async_trait;

use crate::domain::{Product, ProductId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by product repository adapters.
    pub enum ProductRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "product repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "product repository query failed: {message}",
    }
}

/// Storage contract for products.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Every stored product, ordered by identifier.
    async fn list_all(&self) -> Result<Vec<Product>, ProductRepositoryError>;

    /// Product with the given identifier, or `None` when absent.
    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, ProductRepositoryError>;

    /// Insert the product when its identifier is unassigned, otherwise
    /// overwrite the row with that identifier. Returns the stored record.
    async fn save(&self, product: &Product) -> Result<Product, ProductRepositoryError>;

    /// Remove the product; absent identifiers are a no-op.
    async fn delete_by_id(&self, id: ProductId) -> Result<(), ProductRepositoryError>;

    /// Products whose name contains `name_fragment` (case-insensitive) and
    /// whose price does not exceed `max_price`.
    async fn search_by_name_and_max_price(
        &self,
        name_fragment: &str,
        max_price: f64,
    ) -> Result<Vec<Product>, ProductRepositoryError>;
}
