//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every product route, the health probes, and the schema
//! wrappers from [`crate::inbound::http::schemas`]. Swagger UI serves it in
//! debug builds and `cargo run --bin openapi-dump` exports it for tooling.

use crate::inbound::http::schemas::{
    ErrorCodeSchema, ErrorSchema, FieldErrorsSchema, ProductFormSchema, ProductPatchSchema,
    ProductSchema, ValidationSummarySchema,
};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Estoque API",
        description = "CRUD interface for inventory products, plus health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::products::list_products,
        crate::inbound::http::products::insert_product,
        crate::inbound::http::products::delete_product,
        crate::inbound::http::products::update_product,
        crate::inbound::http::products::patch_product,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ProductSchema,
        ProductFormSchema,
        ProductPatchSchema,
        ValidationSummarySchema,
        FieldErrorsSchema,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "products", description = "Inventory product records"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
