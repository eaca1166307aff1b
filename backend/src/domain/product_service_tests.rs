//! Tests for the product service.

use std::sync::Arc;

use mockall::predicate::eq;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ConstraintViolation;
use crate::domain::ports::MockProductRepository;

fn make_service(repo: MockProductRepository) -> ProductService<MockProductRepository> {
    ProductService::new(Arc::new(repo))
}

#[fixture]
fn stored() -> Product {
    Product::with_id(
        ProductId::new(5),
        ProductDraft {
            name: "Patinho moído".to_owned(),
            description: Some("Carne magra".to_owned()),
            price: 22.32,
            stock_quantity: 12,
        },
    )
}

fn expect_lookup(repo: &mut MockProductRepository, found: Option<Product>) {
    repo.expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(found));
}

#[rstest]
#[tokio::test]
async fn list_returns_empty_sequence_without_error() {
    let mut repo = MockProductRepository::new();
    repo.expect_list_all().times(1).return_once(|| Ok(Vec::new()));

    let products = make_service(repo).list().await.expect("list succeeds");
    assert!(products.is_empty());
}

#[rstest]
#[tokio::test]
async fn save_delegates_to_repository(stored: Product) {
    let unsaved = Product::new(ProductDraft {
        name: stored.name().to_owned(),
        description: stored.description().map(str::to_owned),
        price: stored.price(),
        stock_quantity: stored.stock_quantity(),
    });
    let mut repo = MockProductRepository::new();
    let returned = stored.clone();
    repo.expect_save()
        .withf(|product| product.id().is_unassigned())
        .times(1)
        .return_once(move |_| Ok(returned));

    let saved = make_service(repo).save(&unsaved).await.expect("save");
    assert_eq!(saved, stored);
}

#[rstest]
#[tokio::test]
async fn find_by_id_reports_not_found() {
    let mut repo = MockProductRepository::new();
    expect_lookup(&mut repo, None);

    let err = make_service(repo)
        .find_by_id(ProductId::new(9))
        .await
        .expect_err("missing product");
    assert_eq!(err, ProductServiceError::NotFound(ProductId::new(9)));
}

#[rstest]
#[tokio::test]
async fn delete_returns_snapshot_when_present(stored: Product) {
    let mut repo = MockProductRepository::new();
    expect_lookup(&mut repo, Some(stored.clone()));
    repo.expect_delete_by_id()
        .with(eq(ProductId::new(5)))
        .times(1)
        .return_once(|_| Ok(()));

    let deleted = make_service(repo)
        .delete(ProductId::new(5))
        .await
        .expect("delete");
    assert_eq!(deleted, Some(stored));
}

#[rstest]
#[tokio::test]
async fn delete_skips_repository_when_absent() {
    let mut repo = MockProductRepository::new();
    expect_lookup(&mut repo, None);
    repo.expect_delete_by_id().never();

    let deleted = make_service(repo)
        .delete(ProductId::new(5))
        .await
        .expect("delete");
    assert!(deleted.is_none());
}

#[rstest]
#[tokio::test]
async fn update_full_overwrites_fields_and_keeps_id(stored: Product) {
    let mut repo = MockProductRepository::new();
    expect_lookup(&mut repo, Some(stored));
    repo.expect_save()
        .times(1)
        .returning(|product| Ok(product.clone()));

    let updated = make_service(repo)
        .update_full(
            ProductId::new(5),
            ProductDraft {
                name: "Alcatra".to_owned(),
                description: None,
                price: 39.9,
                stock_quantity: 2,
            },
        )
        .await
        .expect("update")
        .expect("product present");

    assert_eq!(updated.id(), ProductId::new(5));
    assert_eq!(updated.name(), "Alcatra");
    assert_eq!(updated.description(), None);
    assert_eq!(updated.price(), 39.9);
    assert_eq!(updated.stock_quantity(), 2);
}

#[rstest]
#[tokio::test]
async fn update_full_returns_none_when_absent() {
    let mut repo = MockProductRepository::new();
    expect_lookup(&mut repo, None);
    repo.expect_save().never();

    let updated = make_service(repo)
        .update_full(
            ProductId::new(42),
            ProductDraft {
                name: "Alcatra".to_owned(),
                description: None,
                price: 39.9,
                stock_quantity: 2,
            },
        )
        .await
        .expect("update");
    assert!(updated.is_none());
}

#[rstest]
#[tokio::test]
async fn update_partial_merges_touched_fields_only(stored: Product) {
    let mut repo = MockProductRepository::new();
    expect_lookup(&mut repo, Some(stored.clone()));
    repo.expect_save()
        .times(1)
        .returning(|product| Ok(product.clone()));

    let patch = ProductPatch {
        name: Some(Some("AB".to_owned())),
        ..ProductPatch::default()
    };
    let merged = make_service(repo)
        .update_partial(ProductId::new(5), patch)
        .await
        .expect("partial update");

    assert_eq!(merged.name(), "AB");
    assert_eq!(merged.description(), stored.description());
    assert_eq!(merged.price(), stored.price());
    assert_eq!(merged.stock_quantity(), stored.stock_quantity());
}

#[rstest]
#[tokio::test]
async fn update_partial_rejects_invalid_price_without_saving(stored: Product) {
    let mut repo = MockProductRepository::new();
    expect_lookup(&mut repo, Some(stored));
    repo.expect_save().never();

    let patch = ProductPatch {
        name: Some(Some("Valid name".to_owned())),
        price: Some(Some(0.0)),
        ..ProductPatch::default()
    };
    let err = make_service(repo)
        .update_partial(ProductId::new(5), patch)
        .await
        .expect_err("invalid price");

    let ProductServiceError::Invalid(errors) = err else {
        panic!("expected validation failure, got {err:?}");
    };
    assert_eq!(errors.violations(), &[ConstraintViolation::PriceTooLow]);
    assert!(errors.field_messages().contains_key("preco"));
}

#[rstest]
#[tokio::test]
async fn update_partial_collects_every_failed_field(stored: Product) {
    let mut repo = MockProductRepository::new();
    expect_lookup(&mut repo, Some(stored));
    repo.expect_save().never();

    let patch = ProductPatch {
        name: Some(None),
        stock_quantity: Some(Some(0)),
        ..ProductPatch::default()
    };
    let err = make_service(repo)
        .update_partial(ProductId::new(5), patch)
        .await
        .expect_err("invalid fields");

    assert_eq!(
        err,
        ProductServiceError::Invalid(ValidationErrors::from(vec![
            ConstraintViolation::NameMissing,
            ConstraintViolation::StockQuantityTooLow,
        ]))
    );
}

#[rstest]
#[tokio::test]
async fn update_partial_clears_description_on_null(stored: Product) {
    let mut repo = MockProductRepository::new();
    expect_lookup(&mut repo, Some(stored));
    repo.expect_save()
        .times(1)
        .returning(|product| Ok(product.clone()));

    let patch = ProductPatch {
        description: Some(None),
        ..ProductPatch::default()
    };
    let merged = make_service(repo)
        .update_partial(ProductId::new(5), patch)
        .await
        .expect("partial update");
    assert_eq!(merged.description(), None);
}

#[rstest]
#[tokio::test]
async fn update_partial_reports_not_found() {
    let mut repo = MockProductRepository::new();
    expect_lookup(&mut repo, None);
    repo.expect_save().never();

    let err = make_service(repo)
        .update_partial(ProductId::new(77), ProductPatch::default())
        .await
        .expect_err("missing product");
    assert_eq!(err, ProductServiceError::NotFound(ProductId::new(77)));
}

#[rstest]
#[tokio::test]
async fn repository_failures_propagate() {
    let mut repo = MockProductRepository::new();
    repo.expect_find_by_id()
        .times(1)
        .return_once(|_| Err(ProductRepositoryError::connection("refused")));

    let err = make_service(repo)
        .find_by_id(ProductId::new(1))
        .await
        .expect_err("repository failure");
    assert!(matches!(
        err,
        ProductServiceError::Repository(ProductRepositoryError::Connection { .. })
    ));
}

#[rstest]
#[case(ProductRepositoryError::connection("down"), crate::domain::ErrorCode::ServiceUnavailable)]
#[case(ProductRepositoryError::query("bad sql"), crate::domain::ErrorCode::InternalError)]
fn repository_errors_map_to_domain_codes(
    #[case] error: ProductRepositoryError,
    #[case] expected: crate::domain::ErrorCode,
) {
    assert_eq!(Error::from(error).code(), expected);
}

#[rstest]
#[tokio::test]
async fn search_delegates_to_repository(stored: Product) {
    let mut repo = MockProductRepository::new();
    let found = vec![stored.clone()];
    repo.expect_search_by_name_and_max_price()
        .withf(|fragment, max_price| fragment == "patinho" && *max_price == 30.0)
        .times(1)
        .return_once(move |_, _| Ok(found));

    let products = make_service(repo)
        .search_by_name_and_max_price("patinho", 30.0)
        .await
        .expect("search");
    assert_eq!(products, vec![stored]);
}
