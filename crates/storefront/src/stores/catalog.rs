//! Catalog store.
//!
//! Owns the product list the storefront is currently showing. Each load
//! replaces the list wholesale; individual products are never mutated. A
//! failed load keeps the previous list on screen instead of blanking it.
//!
//! Loads are ticketed: each call takes a monotonically increasing number,
//! and a response may only land if no later load has landed before it.
//! Out-of-order completions are discarded, so a slow early response can
//! never overwrite a fast later one.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;
use tracing::{debug, instrument, warn};

use woodnook_core::CategoryFilter;

use crate::error::{Result, StoreError};
use crate::models::Product;
use crate::remote::{DataService, ProductOrder};

#[derive(Default)]
struct CatalogState {
    products: Vec<Product>,
    /// Ticket of the last load whose outcome was applied.
    applied: u64,
}

/// Keeps the in-flight count honest even when a load future is dropped
/// mid-call (navigation away abandons the fetch with no side effects).
struct LoadGuard<'a>(&'a AtomicU64);

impl<'a> LoadGuard<'a> {
    fn new(counter: &'a AtomicU64) -> Self {
        counter.fetch_add(1, Ordering::Relaxed);
        Self(counter)
    }
}

impl Drop for LoadGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::Relaxed);
    }
}

/// Store for the storefront's product listing.
///
/// Cheap to clone; all clones share the same state.
#[derive(Clone)]
pub struct CatalogStore {
    inner: Arc<CatalogStoreInner>,
}

struct CatalogStoreInner {
    remote: Arc<dyn DataService>,
    state: RwLock<CatalogState>,
    next_ticket: AtomicU64,
    in_flight: AtomicU64,
}

impl CatalogStore {
    /// Create a store over the given data service.
    #[must_use]
    pub fn new(remote: Arc<dyn DataService>) -> Self {
        Self {
            inner: Arc::new(CatalogStoreInner {
                remote,
                state: RwLock::new(CatalogState::default()),
                next_ticket: AtomicU64::new(0),
                in_flight: AtomicU64::new(0),
            }),
        }
    }

    /// Load products matching a category filter and an optional
    /// case-insensitive name search term.
    ///
    /// On success the store's list is replaced and returned. On remote
    /// failure the previous list is retained and the error surfaced. If a
    /// later load lands first, this call's response is discarded and
    /// [`StoreError::Superseded`] is returned.
    ///
    /// # Errors
    ///
    /// [`StoreError::Remote`] or [`StoreError::Superseded`].
    #[instrument(skip(self))]
    pub async fn load(
        &self,
        filter: CategoryFilter,
        search: Option<&str>,
    ) -> Result<Vec<Product>> {
        let ticket = self.inner.next_ticket.fetch_add(1, Ordering::Relaxed) + 1;
        let _guard = LoadGuard::new(&self.inner.in_flight);

        let result = self
            .inner
            .remote
            .list_products(&filter, search, ProductOrder::Unspecified)
            .await;

        let mut state = self.inner.state.write().await;
        if ticket <= state.applied {
            debug!(ticket, applied = state.applied, "Discarding stale load");
            return Err(StoreError::Superseded);
        }
        state.applied = ticket;

        match result {
            Ok(products) => {
                debug!(count = products.len(), "Catalog loaded");
                state.products.clone_from(&products);
                Ok(products)
            }
            Err(e) => {
                // Previous list stays in place; the view keeps showing it.
                warn!(error = %e, "Catalog load failed, keeping previous list");
                Err(StoreError::Remote(e))
            }
        }
    }

    /// Snapshot of the current product list.
    pub async fn products(&self) -> Vec<Product> {
        self.inner.state.read().await.products.clone()
    }

    /// Whether any load is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.inner.in_flight.load(Ordering::Relaxed) > 0
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use woodnook_core::{Category, Price};

    use crate::models::ProductDraft;
    use crate::remote::MemoryDataService;

    use super::*;

    fn draft(name: &str, category: Category) -> ProductDraft {
        ProductDraft {
            name: name.to_owned(),
            description: String::new(),
            price: "99".parse::<Price>().unwrap(),
            category,
            image_url: format!("https://img.example/{name}.jpg"),
        }
    }

    async fn seeded_service() -> MemoryDataService {
        let service = MemoryDataService::new();
        for (name, category) in [
            ("Sofa bed deluxe", Category::Sofa),
            ("Plain sofa", Category::Sofa),
            ("Cot bed", Category::Furniture),
            ("Steel cupboard", Category::Cupboard),
        ] {
            service.insert_product(&draft(name, category)).await.unwrap();
        }
        service
    }

    #[tokio::test]
    async fn load_replaces_the_list_wholesale() {
        let service = seeded_service().await;
        let catalog = CatalogStore::new(Arc::new(service));

        let all = catalog.load(CategoryFilter::All, None).await.unwrap();
        assert_eq!(all.len(), 4);

        let sofas = catalog
            .load(CategoryFilter::Only(Category::Sofa), None)
            .await
            .unwrap();
        assert_eq!(sofas.len(), 2);
        assert_eq!(catalog.products().await, sofas);
        assert!(!catalog.is_loading());
    }

    #[tokio::test]
    async fn category_and_search_exclude_near_misses() {
        let service = seeded_service().await;
        let catalog = CatalogStore::new(Arc::new(service));

        // "Cot bed" matches the term but not the category; "Plain sofa"
        // matches the category but not the term.
        let hits = catalog
            .load(CategoryFilter::Only(Category::Sofa), Some("bed"))
            .await
            .unwrap();
        assert_eq!(
            hits.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(),
            vec!["Sofa bed deluxe"]
        );
    }

    #[tokio::test]
    async fn failed_load_retains_previous_list() {
        let service = seeded_service().await;
        let catalog = CatalogStore::new(Arc::new(service.clone()));

        let before = catalog.load(CategoryFilter::All, None).await.unwrap();
        assert!(!before.is_empty());

        service.fail_next();
        let err = catalog
            .load(CategoryFilter::Only(Category::Sofa), None)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Remote(_)));
        assert_eq!(catalog.products().await, before);
        assert!(!catalog.is_loading());
    }

    #[tokio::test]
    async fn slow_early_response_does_not_overwrite_fast_later_one() {
        let service = seeded_service().await;
        let catalog = CatalogStore::new(Arc::new(service.clone()));

        service.delay_next_listing(Duration::from_millis(50));
        let slow = {
            let catalog = catalog.clone();
            tokio::spawn(async move { catalog.load(CategoryFilter::All, None).await })
        };

        // Give the slow load time to start, then issue a newer one.
        tokio::time::sleep(Duration::from_millis(10)).await;
        let fast = catalog
            .load(CategoryFilter::Only(Category::Cupboard), None)
            .await
            .unwrap();
        assert_eq!(fast.len(), 1);

        let stale = slow.await.unwrap();
        assert!(matches!(stale, Err(StoreError::Superseded)));
        assert_eq!(catalog.products().await, fast);
    }
}
