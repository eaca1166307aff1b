//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use diesel::prelude::*;

use crate::domain::{Product, ProductDraft, ProductId};

use super::schema::produto;

/// Row struct for reading from the `produto` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = produto)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ProductRow {
    pub id: i64,
    pub nome: String,
    pub descricao: Option<String>,
    pub preco: f64,
    pub quantidadeestoque: i32,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product::with_id(
            ProductId::new(row.id),
            ProductDraft {
                name: row.nome,
                description: row.descricao,
                price: row.preco,
                stock_quantity: row.quantidadeestoque,
            },
        )
    }
}

/// Insertable struct for product rows.
///
/// A `None` id lets the sequence assign one.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = produto)]
pub(crate) struct NewProductRow<'a> {
    pub id: Option<i64>,
    pub nome: &'a str,
    pub descricao: Option<&'a str>,
    pub preco: f64,
    pub quantidadeestoque: i32,
}

impl<'a> From<&'a Product> for NewProductRow<'a> {
    fn from(product: &'a Product) -> Self {
        let id = product.id();
        Self {
            id: (!id.is_unassigned()).then_some(id.get()),
            nome: product.name(),
            descricao: product.description(),
            preco: product.price(),
            quantidadeestoque: product.stock_quantity(),
        }
    }
}

/// Changeset overwriting every mutable column, including clearing
/// `descricao`.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = produto)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct ProductUpdate<'a> {
    pub nome: &'a str,
    pub descricao: Option<&'a str>,
    pub preco: f64,
    pub quantidadeestoque: i32,
}

impl<'a> From<&'a Product> for ProductUpdate<'a> {
    fn from(product: &'a Product) -> Self {
        Self {
            nome: product.name(),
            descricao: product.description(),
            preco: product.price(),
            quantidadeestoque: product.stock_quantity(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn product(id: i64) -> Product {
        Product::with_id(
            ProductId::new(id),
            ProductDraft {
                name: "Maminha".to_owned(),
                description: None,
                price: 49.9,
                stock_quantity: 6,
            },
        )
    }

    #[rstest]
    #[case(0, None)]
    #[case(12, Some(12))]
    fn new_row_leaves_unassigned_ids_to_the_sequence(
        #[case] id: i64,
        #[case] expected: Option<i64>,
    ) {
        let product = product(id);
        let row = NewProductRow::from(&product);
        assert_eq!(row.id, expected);
        assert_eq!(row.nome, "Maminha");
    }

    #[rstest]
    fn row_converts_into_product() {
        let product = Product::from(ProductRow {
            id: 4,
            nome: "Picanha".to_owned(),
            descricao: Some("Peça inteira".to_owned()),
            preco: 89.0,
            quantidadeestoque: 2,
        });

        assert_eq!(product.id(), ProductId::new(4));
        assert_eq!(product.description(), Some("Peça inteira"));
        assert_eq!(product.stock_quantity(), 2);
    }
}
