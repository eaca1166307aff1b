//! Product entity and its field constraints.
//!
//! The entity itself is a plain data holder. Constraints are declared here as
//! constants and checked by the validation functions, which both the
//! full-object path ([`ProductForm::validate`]) and the partial-update path
//! (`ProductService::update_partial`) consume.
//!
//! Wire names follow the storage table: `nome`, `descricao`, `preco`,
//! `quantidadeEstoque`.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Minimum number of characters in a product name.
pub const NAME_MIN_CHARS: usize = 2;
/// Minimum accepted price.
pub const PRICE_MIN: f64 = 1.0;
/// Minimum accepted stock quantity.
pub const STOCK_QUANTITY_MIN: i32 = 1;

const SUMMARY_PREFIX: &str = "Especificação:";

/// Store-assigned product identifier.
///
/// [`ProductId::UNASSIGNED`] marks a record that has not been persisted yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(i64);

impl ProductId {
    /// Identifier carried by records the store has not seen yet.
    pub const UNASSIGNED: Self = Self(0);

    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw identifier value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }

    /// Whether the store still has to assign an identifier.
    #[must_use]
    pub const fn is_unassigned(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Mutable product fields, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProductField {
    Name,
    Description,
    Price,
    StockQuantity,
}

impl ProductField {
    /// JSON key used for the field on the wire.
    #[must_use]
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::Name => "nome",
            Self::Description => "descricao",
            Self::Price => "preco",
            Self::StockQuantity => "quantidadeEstoque",
        }
    }
}

impl fmt::Display for ProductField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// A single failed field constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintViolation {
    NameMissing,
    NameTooShort,
    PriceMissing,
    PriceTooLow,
    StockQuantityMissing,
    StockQuantityTooLow,
}

impl ConstraintViolation {
    /// Field the violation belongs to.
    #[must_use]
    pub const fn field(self) -> ProductField {
        match self {
            Self::NameMissing | Self::NameTooShort => ProductField::Name,
            Self::PriceMissing | Self::PriceTooLow => ProductField::Price,
            Self::StockQuantityMissing | Self::StockQuantityTooLow => ProductField::StockQuantity,
        }
    }
}

impl fmt::Display for ConstraintViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NameMissing => f.write_str("O nome não pode ser nulo"),
            Self::NameTooShort => {
                write!(f, "O nome deve ter no mínimo {NAME_MIN_CHARS} caracteres")
            }
            Self::PriceMissing => f.write_str("O preço não pode ser nulo"),
            Self::PriceTooLow => f.write_str("O preço tem que existir"),
            Self::StockQuantityMissing => f.write_str("A quantidade não pode ser nula"),
            Self::StockQuantityTooLow => f.write_str("O estoque deve ter no mínimo um produto"),
        }
    }
}

impl std::error::Error for ConstraintViolation {}

/// Check a candidate name: present and at least [`NAME_MIN_CHARS`] long.
pub fn validate_name(name: Option<String>) -> Result<String, ConstraintViolation> {
    let name = name.ok_or(ConstraintViolation::NameMissing)?;
    if name.chars().count() < NAME_MIN_CHARS {
        return Err(ConstraintViolation::NameTooShort);
    }
    Ok(name)
}

/// Check a candidate price: present and at least [`PRICE_MIN`].
pub fn validate_price(price: Option<f64>) -> Result<f64, ConstraintViolation> {
    let price = price.ok_or(ConstraintViolation::PriceMissing)?;
    if price.is_nan() || price < PRICE_MIN {
        return Err(ConstraintViolation::PriceTooLow);
    }
    Ok(price)
}

/// Check a candidate stock quantity: present and at least
/// [`STOCK_QUANTITY_MIN`].
pub fn validate_stock_quantity(quantity: Option<i32>) -> Result<i32, ConstraintViolation> {
    let quantity = quantity.ok_or(ConstraintViolation::StockQuantityMissing)?;
    if quantity < STOCK_QUANTITY_MIN {
        return Err(ConstraintViolation::StockQuantityTooLow);
    }
    Ok(quantity)
}

/// Ordered collection of constraint violations.
///
/// # Examples
/// ```
/// use estoque::domain::{ConstraintViolation, ValidationErrors};
///
/// let errors = ValidationErrors::from(vec![
///     ConstraintViolation::NameTooShort,
///     ConstraintViolation::PriceTooLow,
/// ]);
/// assert_eq!(
///     errors.summary(),
///     "Especificação: O nome deve ter no mínimo 2 caracteres; O preço tem que existir"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    violations: Vec<ConstraintViolation>,
}

impl ValidationErrors {
    /// Record a violation.
    pub fn push(&mut self, violation: ConstraintViolation) {
        self.violations.push(violation);
    }

    /// Whether no violation was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Recorded violations in the order they were found.
    #[must_use]
    pub fn violations(&self) -> &[ConstraintViolation] {
        &self.violations
    }

    /// Single-line rendering: `"Especificação: msg1; msg2"`.
    #[must_use]
    pub fn summary(&self) -> String {
        let messages = self
            .violations
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        format!("{SUMMARY_PREFIX} {messages}")
    }

    /// Field wire name to message.
    #[must_use]
    pub fn field_messages(&self) -> BTreeMap<&'static str, String> {
        self.violations
            .iter()
            .map(|violation| (violation.field().wire_name(), violation.to_string()))
            .collect()
    }
}

impl From<Vec<ConstraintViolation>> for ValidationErrors {
    fn from(violations: Vec<ConstraintViolation>) -> Self {
        Self { violations }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

impl std::error::Error for ValidationErrors {}

/// Validated values for every mutable product field.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub stock_quantity: i32,
}

/// Unvalidated full-object input.
///
/// Every field is optional so that a missing value is reported as a
/// constraint violation instead of a deserialisation failure. Unknown keys,
/// including `id`, are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ProductForm {
    #[serde(rename = "nome", default)]
    pub name: Option<String>,
    #[serde(rename = "descricao", default)]
    pub description: Option<String>,
    #[serde(rename = "preco", default)]
    pub price: Option<f64>,
    #[serde(rename = "quantidadeEstoque", default)]
    pub stock_quantity: Option<i32>,
}

impl ProductForm {
    /// Check every constrained field, collecting all violations.
    ///
    /// # Errors
    /// Returns [`ValidationErrors`] listing each failed field in declaration
    /// order.
    pub fn validate(self) -> Result<ProductDraft, ValidationErrors> {
        let name = validate_name(self.name);
        let price = validate_price(self.price);
        let stock_quantity = validate_stock_quantity(self.stock_quantity);

        match (name, price, stock_quantity) {
            (Ok(name), Ok(price), Ok(stock_quantity)) => Ok(ProductDraft {
                name,
                description: self.description,
                price,
                stock_quantity,
            }),
            (name, price, stock_quantity) => Err([name.err(), price.err(), stock_quantity.err()]
                .into_iter()
                .flatten()
                .collect::<Vec<_>>()
                .into()),
        }
    }
}

/// Partial update payload.
///
/// Each field distinguishes an absent key (`None`) from an explicit `null`
/// (`Some(None)`). Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProductPatch {
    #[serde(rename = "nome", default, deserialize_with = "present")]
    pub name: Option<Option<String>>,
    #[serde(rename = "descricao", default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
    #[serde(rename = "preco", default, deserialize_with = "present")]
    pub price: Option<Option<f64>>,
    #[serde(rename = "quantidadeEstoque", default, deserialize_with = "present")]
    pub stock_quantity: Option<Option<i32>>,
}

impl ProductPatch {
    /// Fields supplied by the caller, in declaration order.
    #[must_use]
    pub fn touched_fields(&self) -> Vec<ProductField> {
        [
            (self.name.is_some(), ProductField::Name),
            (self.description.is_some(), ProductField::Description),
            (self.price.is_some(), ProductField::Price),
            (self.stock_quantity.is_some(), ProductField::StockQuantity),
        ]
        .into_iter()
        .filter_map(|(touched, field)| touched.then_some(field))
        .collect()
    }
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Inventory product record.
///
/// # Examples
/// ```
/// use estoque::domain::{Product, ProductDraft, ProductId};
///
/// let product = Product::new(ProductDraft {
///     name: "Patinho moído".to_owned(),
///     description: None,
///     price: 22.32,
///     stock_quantity: 12,
/// });
/// assert_eq!(product.id(), ProductId::UNASSIGNED);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    #[serde(rename = "nome")]
    name: String,
    #[serde(rename = "descricao")]
    description: Option<String>,
    #[serde(rename = "preco")]
    price: f64,
    #[serde(rename = "quantidadeEstoque")]
    stock_quantity: i32,
}

impl Product {
    /// Build a record the store has not persisted yet.
    #[must_use]
    pub fn new(draft: ProductDraft) -> Self {
        Self::with_id(ProductId::UNASSIGNED, draft)
    }

    /// Build a record with a known identifier.
    #[must_use]
    pub fn with_id(id: ProductId, draft: ProductDraft) -> Self {
        let ProductDraft {
            name,
            description,
            price,
            stock_quantity,
        } = draft;
        Self {
            id,
            name,
            description,
            price,
            stock_quantity,
        }
    }

    /// Store-assigned identifier; unassigned until first saved.
    #[must_use]
    pub fn id(&self) -> ProductId {
        self.id
    }

    /// Product name (`nome`).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Optional free-text description (`descricao`).
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Unit price (`preco`).
    #[must_use]
    pub fn price(&self) -> f64 {
        self.price
    }

    /// Units in stock (`quantidadeEstoque`).
    #[must_use]
    pub fn stock_quantity(&self) -> i32 {
        self.stock_quantity
    }

    /// Replace the name without validating it.
    pub fn set_name(&mut self, name: String) {
        self.name = name;
    }

    /// Replace or clear the description.
    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description;
    }

    /// Replace the price without validating it.
    pub fn set_price(&mut self, price: f64) {
        self.price = price;
    }

    /// Replace the stock quantity without validating it.
    pub fn set_stock_quantity(&mut self, stock_quantity: i32) {
        self.stock_quantity = stock_quantity;
    }

    /// Overwrite every mutable field, keeping the identifier.
    pub fn replace_fields(&mut self, draft: ProductDraft) {
        *self = Self::with_id(self.id, draft);
    }
}

#[cfg(test)]
mod tests;
