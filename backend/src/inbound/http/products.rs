//! Product HTTP handlers.
//!
//! ```text
//! GET    /api/produtos/selecionar
//! POST   /api/produtos/inserir
//! DELETE /api/produtos/excluir/{id}
//! PUT    /api/produtos/atualizar/{id}
//! PATCH  /api/produtos/atualizarParcial/{id}
//! ```
//!
//! Validation failures and missing records keep their established response
//! shapes (`{"erros": ...}`, a field map, plain-text 404 bodies). Malformed
//! input and repository failures use the [`crate::domain::Error`] envelope.

use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, delete, get, patch, post, put, web};
use serde_json::json;
use tracing::debug;

use crate::domain::{Product, ProductForm, ProductId, ProductPatch, ProductServiceError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::{json_error_handler, path_error_handler};
use crate::inbound::http::schemas::{
    ErrorSchema, FieldErrorsSchema, ProductFormSchema, ProductPatchSchema, ProductSchema,
    ValidationSummarySchema,
};
use crate::inbound::http::state::HttpState;

/// Base path shared by every product route.
pub const PRODUCTS_SCOPE: &str = "/api/produtos";

const REMOVED: &str = "Produto removido com sucesso";
const NOT_FOUND: &str = "Produto não encontrado";
const NOT_FOUND_PARTIAL: &str = "Produto não encontrado.";

fn plain_text(status: StatusCode, body: &'static str) -> HttpResponse {
    HttpResponse::build(status)
        .content_type(ContentType::plaintext())
        .body(body)
}

/// The product routes under [`PRODUCTS_SCOPE`], with extractor errors
/// rendered as `invalid_request` envelopes.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use actix_web::{App, web};
/// use estoque::inbound::http::products;
/// use estoque::inbound::http::state::HttpState;
/// use estoque::outbound::persistence::InMemoryProductRepository;
///
/// let state = HttpState::new(Arc::new(InMemoryProductRepository::new()));
/// let _app = App::new()
///     .app_data(web::Data::new(state))
///     .service(products::scope());
/// ```
pub fn scope() -> actix_web::Scope {
    web::scope(PRODUCTS_SCOPE)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .service(list_products)
        .service(insert_product)
        .service(delete_product)
        .service(update_product)
        .service(patch_product)
}

/// List every product.
#[utoipa::path(
    get,
    path = "/api/produtos/selecionar",
    responses(
        (status = 200, description = "All products, ordered by id", body = [ProductSchema]),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["products"],
    operation_id = "listProducts"
)]
#[get("/selecionar")]
pub async fn list_products(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Product>>> {
    let products = state.products.list().await?;
    Ok(web::Json(products))
}

/// Create a product from a full payload.
#[utoipa::path(
    post,
    path = "/api/produtos/inserir",
    request_body = ProductFormSchema,
    responses(
        (status = 201, description = "Product created", body = ProductSchema),
        (status = 400, description = "Constraint violations", body = ValidationSummarySchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["products"],
    operation_id = "insertProduct"
)]
#[post("/inserir")]
pub async fn insert_product(
    state: web::Data<HttpState>,
    payload: web::Json<ProductForm>,
) -> ApiResult<HttpResponse> {
    let draft = match payload.into_inner().validate() {
        Ok(draft) => draft,
        Err(errors) => {
            debug!(%errors, "insert rejected");
            return Ok(HttpResponse::BadRequest().json(json!({ "erros": errors.summary() })));
        }
    };

    let saved = state.products.save(&Product::new(draft)).await?;
    Ok(HttpResponse::Created().json(saved))
}

/// Delete a product.
#[utoipa::path(
    delete,
    path = "/api/produtos/excluir/{id}",
    params(("id" = i64, Path, description = "Product identifier")),
    responses(
        (status = 200, description = "Product removed", body = String, content_type = "text/plain"),
        (status = 404, description = "No product with this id", body = String, content_type = "text/plain"),
        (status = 400, description = "Non-numeric id", body = ErrorSchema)
    ),
    tags = ["products"],
    operation_id = "deleteProduct"
)]
#[delete("/excluir/{id}")]
pub async fn delete_product(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let id = ProductId::new(path.into_inner());
    let response = match state.products.delete(id).await? {
        Some(_) => plain_text(StatusCode::OK, REMOVED),
        None => plain_text(StatusCode::NOT_FOUND, NOT_FOUND),
    };
    Ok(response)
}

/// Replace every mutable field of a product.
#[utoipa::path(
    put,
    path = "/api/produtos/atualizar/{id}",
    params(("id" = i64, Path, description = "Product identifier")),
    request_body = ProductFormSchema,
    responses(
        (status = 201, description = "Product replaced", body = ProductSchema),
        (status = 400, description = "Constraint violations", body = ValidationSummarySchema),
        (status = 404, description = "No product with this id", body = String, content_type = "text/plain")
    ),
    tags = ["products"],
    operation_id = "updateProduct"
)]
#[put("/atualizar/{id}")]
pub async fn update_product(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<ProductForm>,
) -> ApiResult<HttpResponse> {
    let id = ProductId::new(path.into_inner());
    let draft = match payload.into_inner().validate() {
        Ok(draft) => draft,
        Err(errors) => {
            debug!(product_id = %id, %errors, "full update rejected");
            return Ok(HttpResponse::BadRequest().json(json!({ "erros": errors.summary() })));
        }
    };

    let response = match state.products.update_full(id, draft).await? {
        Some(updated) => HttpResponse::Created().json(updated),
        None => plain_text(StatusCode::NOT_FOUND, NOT_FOUND),
    };
    Ok(response)
}

/// Merge the supplied fields into a product.
#[utoipa::path(
    patch,
    path = "/api/produtos/atualizarParcial/{id}",
    params(("id" = i64, Path, description = "Product identifier")),
    request_body = ProductPatchSchema,
    responses(
        (status = 200, description = "Merged product", body = ProductSchema),
        (status = 400, description = "Failed fields", body = FieldErrorsSchema),
        (status = 404, description = "No product with this id", body = String, content_type = "text/plain")
    ),
    tags = ["products"],
    operation_id = "patchProduct"
)]
#[patch("/atualizarParcial/{id}")]
pub async fn patch_product(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<ProductPatch>,
) -> ApiResult<HttpResponse> {
    let id = ProductId::new(path.into_inner());
    match state.products.update_partial(id, payload.into_inner()).await {
        Ok(merged) => Ok(HttpResponse::Ok().json(merged)),
        Err(ProductServiceError::NotFound(_)) => {
            Ok(plain_text(StatusCode::NOT_FOUND, NOT_FOUND_PARTIAL))
        }
        Err(ProductServiceError::Invalid(errors)) => {
            Ok(HttpResponse::BadRequest().json(errors.field_messages()))
        }
        Err(ProductServiceError::Repository(error)) => Err(error.into()),
    }
}

#[cfg(test)]
#[path = "products_tests.rs"]
mod tests;
