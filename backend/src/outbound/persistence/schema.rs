//! Diesel table definitions for the PostgreSQL schema.
//!
//! The table is provisioned outside this service; these definitions must match
//! it exactly. `diesel print-schema` against a live database regenerates them.

diesel::table! {
    /// Inventory products.
    ///
    /// `id` is a `BIGSERIAL` primary key assigned on insert.
    produto (id) {
        id -> Int8,
        nome -> Varchar,
        descricao -> Nullable<Text>,
        preco -> Float8,
        quantidadeestoque -> Int4,
    }
}
