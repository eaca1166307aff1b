//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. The
//! wrappers here mirror their wire shape and are registered under the domain
//! type's name.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The database is unreachable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "malformed request body: expected value at line 1 column 1")]
    message: String,
    /// Correlation identifier, also sent in the `trace-id` header.
    #[schema(rename = "traceId", example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary error details for clients.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::Product`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Product)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ProductSchema {
    /// Store-assigned identifier.
    #[schema(example = 1)]
    id: i64,
    #[schema(example = "Patinho moído")]
    nome: String,
    #[schema(example = "Carne bovina magra")]
    descricao: Option<String>,
    #[schema(example = 22.32)]
    preco: f64,
    #[schema(rename = "quantidadeEstoque", example = 12)]
    quantidade_estoque: i32,
}

/// OpenAPI schema for [`crate::domain::ProductForm`].
///
/// Every field is accepted as optional on the wire; missing required fields
/// are reported as validation messages.
#[derive(ToSchema)]
#[schema(as = crate::domain::ProductForm)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ProductFormSchema {
    /// At least two characters.
    #[schema(example = "Patinho moído")]
    nome: Option<String>,
    descricao: Option<String>,
    /// At least 1.
    #[schema(example = 22.32)]
    preco: Option<f64>,
    /// At least 1.
    #[schema(rename = "quantidadeEstoque", example = 12)]
    quantidade_estoque: Option<i32>,
}

/// OpenAPI schema for [`crate::domain::ProductPatch`].
///
/// Absent keys leave the field untouched; `null` clears `descricao` and is
/// rejected for the other fields.
#[derive(ToSchema)]
#[schema(as = crate::domain::ProductPatch)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ProductPatchSchema {
    nome: Option<String>,
    descricao: Option<String>,
    preco: Option<f64>,
    #[schema(rename = "quantidadeEstoque")]
    quantidade_estoque: Option<i32>,
}

/// Body of a rejected insert or full update.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ValidationSummarySchema {
    /// Every failed constraint, in field order.
    #[schema(
        example = "Especificação: O nome deve ter no mínimo 2 caracteres; O preço tem que existir"
    )]
    erros: String,
}

/// Body of a rejected partial update: one message per failed field.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct FieldErrorsSchema {
    #[schema(example = "O nome deve ter no mínimo 2 caracteres")]
    nome: Option<String>,
    #[schema(example = "O preço tem que existir")]
    preco: Option<String>,
    #[schema(rename = "quantidadeEstoque")]
    quantidade_estoque: Option<String>,
}
