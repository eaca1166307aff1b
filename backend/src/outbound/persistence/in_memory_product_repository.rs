//! In-process `ProductRepository` used when no database is configured.
//!
//! Identifiers are handed out from a counter starting at 1. Saving a product
//! whose identifier is assigned but unknown stores it under that identifier,
//! matching the upsert the Diesel adapter performs.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{ProductRepository, ProductRepositoryError};
use crate::domain::{Product, ProductDraft, ProductId};

#[derive(Debug)]
struct Store {
    rows: BTreeMap<ProductId, Product>,
    next_id: i64,
}

/// Product repository backed by a mutex-guarded ordered map.
#[derive(Debug)]
pub struct InMemoryProductRepository {
    store: Mutex<Store>,
}

impl Default for InMemoryProductRepository {
    fn default() -> Self {
        Self {
            store: Mutex::new(Store {
                rows: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Store>, ProductRepositoryError> {
        self.store
            .lock()
            .map_err(|_| ProductRepositoryError::query("in-memory product store poisoned"))
    }
}

fn with_assigned_id(id: ProductId, product: &Product) -> Product {
    Product::with_id(
        id,
        ProductDraft {
            name: product.name().to_owned(),
            description: product.description().map(str::to_owned),
            price: product.price(),
            stock_quantity: product.stock_quantity(),
        },
    )
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn list_all(&self) -> Result<Vec<Product>, ProductRepositoryError> {
        Ok(self.lock()?.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, ProductRepositoryError> {
        Ok(self.lock()?.rows.get(&id).cloned())
    }

    async fn save(&self, product: &Product) -> Result<Product, ProductRepositoryError> {
        let mut store = self.lock()?;
        let id = if product.id().is_unassigned() {
            let id = ProductId::new(store.next_id);
            store.next_id += 1;
            id
        } else {
            let id = product.id();
            store.next_id = store.next_id.max(id.get().saturating_add(1));
            id
        };
        let stored = with_assigned_id(id, product);
        store.rows.insert(id, stored.clone());
        Ok(stored)
    }

    async fn delete_by_id(&self, id: ProductId) -> Result<(), ProductRepositoryError> {
        self.lock()?.rows.remove(&id);
        Ok(())
    }

    async fn search_by_name_and_max_price(
        &self,
        name_fragment: &str,
        max_price: f64,
    ) -> Result<Vec<Product>, ProductRepositoryError> {
        let needle = name_fragment.to_lowercase();
        Ok(self
            .lock()?
            .rows
            .values()
            .filter(|product| {
                product.name().to_lowercase().contains(&needle) && product.price() <= max_price
            })
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    fn draft(name: &str, price: f64) -> ProductDraft {
        ProductDraft {
            name: name.to_owned(),
            description: None,
            price,
            stock_quantity: 3,
        }
    }

    #[fixture]
    fn repo() -> InMemoryProductRepository {
        InMemoryProductRepository::new()
    }

    #[rstest]
    #[tokio::test]
    async fn save_assigns_sequential_ids(repo: InMemoryProductRepository) {
        let first = repo
            .save(&Product::new(draft("Acém", 30.0)))
            .await
            .expect("save first");
        let second = repo
            .save(&Product::new(draft("Cupim", 45.0)))
            .await
            .expect("save second");

        assert_eq!(first.id(), ProductId::new(1));
        assert_eq!(second.id(), ProductId::new(2));
        assert_eq!(repo.list_all().await.expect("list").len(), 2);
    }

    #[rstest]
    #[tokio::test]
    async fn save_with_assigned_id_overwrites(repo: InMemoryProductRepository) {
        let stored = repo
            .save(&Product::new(draft("Acém", 30.0)))
            .await
            .expect("save");
        let mut changed = stored.clone();
        changed.set_price(31.5);

        repo.save(&changed).await.expect("overwrite");

        let found = repo
            .find_by_id(stored.id())
            .await
            .expect("find")
            .expect("present");
        assert_eq!(found.price(), 31.5);
        assert_eq!(repo.list_all().await.expect("list").len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_assigned_id_is_inserted_and_counter_skips_it(
        repo: InMemoryProductRepository,
    ) {
        repo.save(&Product::with_id(ProductId::new(7), draft("Músculo", 20.0)))
            .await
            .expect("save explicit id");
        let next = repo
            .save(&Product::new(draft("Fraldinha", 40.0)))
            .await
            .expect("save next");

        assert_eq!(next.id(), ProductId::new(8));
    }

    #[rstest]
    #[tokio::test]
    async fn delete_is_a_no_op_when_absent(repo: InMemoryProductRepository) {
        repo.delete_by_id(ProductId::new(99)).await.expect("delete");
        assert!(repo.list_all().await.expect("list").is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn search_matches_name_case_insensitively_under_price_cap(
        repo: InMemoryProductRepository,
    ) {
        for (name, price) in [("Patinho moído", 22.0), ("PATINHO peça", 35.0), ("Acém", 18.0)] {
            repo.save(&Product::new(draft(name, price)))
                .await
                .expect("seed");
        }

        let found = repo
            .search_by_name_and_max_price("patinho", 30.0)
            .await
            .expect("search");

        let names: Vec<_> = found.iter().map(Product::name).collect();
        assert_eq!(names, vec!["Patinho moído"]);
    }
}
