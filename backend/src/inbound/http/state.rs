//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on the product service and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ProductService;
use crate::domain::ports::ProductRepository;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub products: ProductService<dyn ProductRepository>,
}

impl HttpState {
    /// Build state over whichever repository adapter the server selected.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use estoque::inbound::http::state::HttpState;
    /// use estoque::outbound::persistence::InMemoryProductRepository;
    ///
    /// let state = HttpState::new(Arc::new(InMemoryProductRepository::new()));
    /// # let _ = state;
    /// ```
    pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
        Self {
            products: ProductService::new(repository),
        }
    }
}
