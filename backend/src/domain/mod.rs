//! Domain primitives, services, and ports.
//!
//! Purpose: Define the product entity, its field constraints, and the
//! use-cases the HTTP adapter drives. Nothing here depends on Actix or
//! Diesel; adapters plug in through [`ports`].
//!
//! Public surface:
//! - Error (alias to `error::Error`): transport-agnostic error payload.
//! - Product (alias to `product::Product`): inventory record.
//! - ProductService (alias to `product_service::ProductService`): product
//!   use-cases over a repository port.

pub mod error;
pub mod ports;
pub mod product;
pub mod product_service;
pub mod trace_id;

pub use self::error::{Error, ErrorCode};
pub use self::product::{
    ConstraintViolation, Product, ProductDraft, ProductField, ProductForm, ProductId,
    ProductPatch, ValidationErrors, validate_name, validate_price, validate_stock_quantity,
};
pub use self::product_service::{ProductService, ProductServiceError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
