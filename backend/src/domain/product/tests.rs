//! Tests for product field constraints and payload decoding.

use super::*;
use rstest::rstest;
use serde_json::json;

fn form(name: Option<&str>, price: Option<f64>, stock_quantity: Option<i32>) -> ProductForm {
    ProductForm {
        name: name.map(str::to_owned),
        description: Some("Carne bovina magra".to_owned()),
        price,
        stock_quantity,
    }
}

#[rstest]
#[case(None, Err(ConstraintViolation::NameMissing))]
#[case(Some("A"), Err(ConstraintViolation::NameTooShort))]
#[case(Some(""), Err(ConstraintViolation::NameTooShort))]
#[case(Some("AB"), Ok("AB"))]
#[case(Some("Ré"), Ok("Ré"))]
fn name_requires_two_characters(
    #[case] input: Option<&str>,
    #[case] expected: Result<&str, ConstraintViolation>,
) {
    let result = validate_name(input.map(str::to_owned));
    assert_eq!(result.as_deref().map_err(|err| *err), expected);
}

#[rstest]
#[case(None, Err(ConstraintViolation::PriceMissing))]
#[case(Some(0.0), Err(ConstraintViolation::PriceTooLow))]
#[case(Some(0.99), Err(ConstraintViolation::PriceTooLow))]
#[case(Some(f64::NAN), Err(ConstraintViolation::PriceTooLow))]
#[case(Some(1.0), Ok(1.0))]
#[case(Some(22.32), Ok(22.32))]
fn price_must_be_at_least_one(
    #[case] input: Option<f64>,
    #[case] expected: Result<f64, ConstraintViolation>,
) {
    assert_eq!(validate_price(input), expected);
}

#[rstest]
#[case(None, Err(ConstraintViolation::StockQuantityMissing))]
#[case(Some(-3), Err(ConstraintViolation::StockQuantityTooLow))]
#[case(Some(0), Err(ConstraintViolation::StockQuantityTooLow))]
#[case(Some(1), Ok(1))]
fn stock_quantity_must_be_at_least_one(
    #[case] input: Option<i32>,
    #[case] expected: Result<i32, ConstraintViolation>,
) {
    assert_eq!(validate_stock_quantity(input), expected);
}

#[rstest]
fn valid_form_produces_draft() {
    let draft = form(Some("Patinho"), Some(22.32), Some(12))
        .validate()
        .expect("valid form");

    assert_eq!(
        draft,
        ProductDraft {
            name: "Patinho".to_owned(),
            description: Some("Carne bovina magra".to_owned()),
            price: 22.32,
            stock_quantity: 12,
        }
    );
}

#[rstest]
fn invalid_form_reports_every_failed_field_in_order() {
    let errors = form(Some("P"), Some(0.0), Some(0))
        .validate()
        .expect_err("invalid form");

    assert_eq!(
        errors.violations(),
        &[
            ConstraintViolation::NameTooShort,
            ConstraintViolation::PriceTooLow,
            ConstraintViolation::StockQuantityTooLow,
        ]
    );
    assert_eq!(
        errors.summary(),
        "Especificação: O nome deve ter no mínimo 2 caracteres; O preço tem que existir; \
         O estoque deve ter no mínimo um produto"
    );
}

#[rstest]
fn empty_form_reports_missing_fields() {
    let errors = ProductForm::default().validate().expect_err("empty form");

    assert_eq!(
        errors.summary(),
        "Especificação: O nome não pode ser nulo; O preço não pode ser nulo; \
         A quantidade não pode ser nula"
    );
}

#[rstest]
#[case(ConstraintViolation::NameMissing, "O nome não pode ser nulo")]
#[case(ConstraintViolation::NameTooShort, "O nome deve ter no mínimo 2 caracteres")]
#[case(ConstraintViolation::PriceMissing, "O preço não pode ser nulo")]
#[case(ConstraintViolation::PriceTooLow, "O preço tem que existir")]
#[case(ConstraintViolation::StockQuantityMissing, "A quantidade não pode ser nula")]
#[case(
    ConstraintViolation::StockQuantityTooLow,
    "O estoque deve ter no mínimo um produto"
)]
fn violation_messages_are_fixed(#[case] violation: ConstraintViolation, #[case] expected: &str) {
    assert_eq!(violation.to_string(), expected);
}

#[rstest]
fn single_violation_summary_has_no_separator() {
    let errors = ValidationErrors::from(vec![ConstraintViolation::PriceTooLow]);
    assert_eq!(errors.summary(), "Especificação: O preço tem que existir");
}

#[rstest]
fn field_messages_use_wire_names() {
    let errors = ValidationErrors::from(vec![
        ConstraintViolation::PriceTooLow,
        ConstraintViolation::StockQuantityMissing,
    ]);

    let messages = errors.field_messages();
    assert_eq!(
        messages.get("preco").map(String::as_str),
        Some("O preço tem que existir")
    );
    assert_eq!(
        messages.get("quantidadeEstoque").map(String::as_str),
        Some("A quantidade não pode ser nula")
    );
    assert_eq!(messages.len(), 2);
}

#[rstest]
fn form_ignores_unknown_keys_and_id() {
    let form: ProductForm = serde_json::from_value(json!({
        "id": 99,
        "nome": "Alcatra",
        "preco": 39.9,
        "quantidadeEstoque": 4,
        "fornecedor": "ignored"
    }))
    .expect("decode form");

    assert_eq!(form.name.as_deref(), Some("Alcatra"));
    assert!(form.description.is_none());
}

#[rstest]
fn patch_distinguishes_absent_from_null() {
    let patch: ProductPatch = serde_json::from_value(json!({
        "descricao": null,
        "preco": 0,
        "desconhecido": true
    }))
    .expect("decode patch");

    assert_eq!(patch.name, None);
    assert_eq!(patch.description, Some(None));
    assert_eq!(patch.price, Some(Some(0.0)));
    assert_eq!(patch.stock_quantity, None);
    assert_eq!(
        patch.touched_fields(),
        vec![ProductField::Description, ProductField::Price]
    );
}

#[rstest]
fn patch_rejects_mistyped_values() {
    let result = serde_json::from_value::<ProductPatch>(json!({"quantidadeEstoque": "dez"}));
    assert!(result.is_err());
}

#[rstest]
fn product_serialises_with_wire_names() {
    let product = Product::with_id(
        ProductId::new(7),
        ProductDraft {
            name: "Fraldinha".to_owned(),
            description: None,
            price: 45.5,
            stock_quantity: 3,
        },
    );

    let value = serde_json::to_value(&product).expect("serialise");
    assert_eq!(
        value,
        json!({
            "id": 7,
            "nome": "Fraldinha",
            "descricao": null,
            "preco": 45.5,
            "quantidadeEstoque": 3
        })
    );
}

#[rstest]
fn replace_fields_keeps_identifier() {
    let mut product = Product::with_id(
        ProductId::new(3),
        ProductDraft {
            name: "Acém".to_owned(),
            description: None,
            price: 10.0,
            stock_quantity: 1,
        },
    );

    product.replace_fields(ProductDraft {
        name: "Cupim".to_owned(),
        description: Some("Novo".to_owned()),
        price: 55.0,
        stock_quantity: 8,
    });

    assert_eq!(product.id(), ProductId::new(3));
    assert_eq!(product.name(), "Cupim");
    assert_eq!(product.description(), Some("Novo"));
}
