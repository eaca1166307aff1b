//! Product domain service.
//!
//! Orchestrates repository calls for the HTTP adapter and owns the
//! partial-update merge. A partial update re-runs the field constraints on
//! every touched field, so it cannot leave a record in a state that full
//! validation would have rejected.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::ports::{ProductRepository, ProductRepositoryError};
use crate::domain::{
    Error, Product, ProductDraft, ProductId, ProductPatch, ValidationErrors, validate_name,
    validate_price, validate_stock_quantity,
};

/// Failures surfaced by [`ProductService`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProductServiceError {
    /// No product has the requested identifier.
    #[error("product {0} not found")]
    NotFound(ProductId),
    /// One or more touched fields broke a constraint.
    #[error("{0}")]
    Invalid(ValidationErrors),
    /// The repository failed.
    #[error(transparent)]
    Repository(#[from] ProductRepositoryError),
}

impl From<ProductRepositoryError> for Error {
    fn from(error: ProductRepositoryError) -> Self {
        match error {
            ProductRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("product repository unavailable: {message}"))
            }
            ProductRepositoryError::Query { message } => {
                Error::internal(format!("product repository error: {message}"))
            }
        }
    }
}

/// Product use-cases over a [`ProductRepository`].
///
/// `R` may be unsized, as in `ProductService<dyn ProductRepository>`.
pub struct ProductService<R: ?Sized> {
    repository: Arc<R>,
}

impl<R: ?Sized> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: ?Sized> ProductService<R> {
    /// Create a service over the given repository.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

impl<R> ProductService<R>
where
    R: ProductRepository + ?Sized,
{
    /// Every stored product.
    ///
    /// # Errors
    /// Propagates repository failures.
    pub async fn list(&self) -> Result<Vec<Product>, ProductRepositoryError> {
        let products = self.repository.list_all().await?;
        debug!(count = products.len(), "listed products");
        Ok(products)
    }

    /// Persist a product as given; callers validate beforehand.
    ///
    /// # Errors
    /// Propagates repository failures.
    pub async fn save(&self, product: &Product) -> Result<Product, ProductRepositoryError> {
        let saved = self.repository.save(product).await?;
        info!(product_id = %saved.id(), "product saved");
        Ok(saved)
    }

    /// Product with the given identifier.
    ///
    /// # Errors
    /// [`ProductServiceError::NotFound`] when absent; repository failures
    /// otherwise.
    pub async fn find_by_id(&self, id: ProductId) -> Result<Product, ProductServiceError> {
        debug!(product_id = %id, "looking up product");
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ProductServiceError::NotFound(id))
    }

    /// Delete a product, returning the snapshot taken before deletion.
    ///
    /// # Errors
    /// Propagates repository failures.
    pub async fn delete(&self, id: ProductId) -> Result<Option<Product>, ProductRepositoryError> {
        let Some(existing) = self.repository.find_by_id(id).await? else {
            debug!(product_id = %id, "delete skipped: product not found");
            return Ok(None);
        };
        self.repository.delete_by_id(id).await?;
        info!(product_id = %id, "product deleted");
        Ok(Some(existing))
    }

    /// Overwrite every mutable field of an existing product.
    ///
    /// Returns `None` when no product has the identifier.
    ///
    /// # Errors
    /// Propagates repository failures.
    pub async fn update_full(
        &self,
        id: ProductId,
        draft: ProductDraft,
    ) -> Result<Option<Product>, ProductRepositoryError> {
        let Some(mut product) = self.repository.find_by_id(id).await? else {
            debug!(product_id = %id, "full update skipped: product not found");
            return Ok(None);
        };
        product.replace_fields(draft);
        let saved = self.repository.save(&product).await?;
        info!(product_id = %id, "product replaced");
        Ok(Some(saved))
    }

    /// Merge the supplied fields into an existing product.
    ///
    /// Each touched field is validated with the full-object rules; if any
    /// fails nothing is persisted.
    ///
    /// # Errors
    /// [`ProductServiceError::NotFound`] when absent,
    /// [`ProductServiceError::Invalid`] listing every failed touched field,
    /// or repository failures.
    pub async fn update_partial(
        &self,
        id: ProductId,
        patch: ProductPatch,
    ) -> Result<Product, ProductServiceError> {
        let mut product = self.find_by_id(id).await?;
        let touched = patch.touched_fields();
        let mut errors = ValidationErrors::default();

        if let Some(name) = patch.name {
            match validate_name(name) {
                Ok(name) => product.set_name(name),
                Err(violation) => errors.push(violation),
            }
        }
        if let Some(description) = patch.description {
            product.set_description(description);
        }
        if let Some(price) = patch.price {
            match validate_price(price) {
                Ok(price) => product.set_price(price),
                Err(violation) => errors.push(violation),
            }
        }
        if let Some(stock_quantity) = patch.stock_quantity {
            match validate_stock_quantity(stock_quantity) {
                Ok(stock_quantity) => product.set_stock_quantity(stock_quantity),
                Err(violation) => errors.push(violation),
            }
        }

        if !errors.is_empty() {
            warn!(product_id = %id, errors = %errors, "partial update rejected");
            return Err(ProductServiceError::Invalid(errors));
        }

        let saved = self.repository.save(&product).await?;
        info!(product_id = %id, fields = ?touched, "product partially updated");
        Ok(saved)
    }

    /// Products matching a name fragment and a price ceiling.
    ///
    /// # Errors
    /// Propagates repository failures.
    pub async fn search_by_name_and_max_price(
        &self,
        name_fragment: &str,
        max_price: f64,
    ) -> Result<Vec<Product>, ProductRepositoryError> {
        self.repository
            .search_by_name_and_max_price(name_fragment, max_price)
            .await
    }
}

#[cfg(test)]
#[path = "product_service_tests.rs"]
mod tests;
