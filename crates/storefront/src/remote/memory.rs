//! In-memory data service backend.
//!
//! Implements [`DataService`] over plain collections so store behavior can
//! be exercised without a network. Supports injecting a one-shot failure to
//! drive the error paths, and counts writes so tests can assert that a
//! rejected operation never reached the backend.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use woodnook_core::{CategoryFilter, LineItemId, ProductId, UserId};

use crate::models::{CartLine, Product, ProductDraft, Profile};
use crate::remote::{DataService, ProductOrder, RemoteError};

#[derive(Debug, Clone)]
struct StoredCartItem {
    id: LineItemId,
    user_id: UserId,
    product_id: ProductId,
    quantity: u32,
}

#[derive(Default)]
struct Inner {
    products: Vec<Product>,
    cart_items: Vec<StoredCartItem>,
    profiles: HashMap<UserId, Profile>,
    fail_next: bool,
    delay_listing: Option<std::time::Duration>,
    writes: usize,
}

/// An in-memory [`DataService`] for tests.
#[derive(Clone, Default)]
pub struct MemoryDataService {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryDataService {
    /// Create an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a product directly, bypassing the insert path.
    pub fn seed_product(&self, product: Product) {
        self.lock().products.push(product);
    }

    /// Make the next operation fail with a 503 before touching state.
    pub fn fail_next(&self) {
        self.lock().fail_next = true;
    }

    /// Delay the next product listing, for exercising out-of-order
    /// responses against the catalog store.
    pub fn delay_next_listing(&self, delay: std::time::Duration) {
        self.lock().delay_listing = Some(delay);
    }

    /// Number of writes (inserts, updates, deletes, upserts) that reached
    /// the backend.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.lock().writes
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // A poisoned lock means a test already panicked; propagate.
        #[allow(clippy::unwrap_used)]
        self.inner.lock().unwrap()
    }

    fn take_failure(inner: &mut Inner) -> Result<(), RemoteError> {
        if inner.fail_next {
            inner.fail_next = false;
            return Err(RemoteError::Api {
                status: 503,
                message: "injected failure".to_owned(),
            });
        }
        Ok(())
    }

    fn resolve(inner: &Inner, item: &StoredCartItem) -> Option<CartLine> {
        let product = inner
            .products
            .iter()
            .find(|p| p.id == item.product_id)?
            .clone();
        Some(CartLine {
            id: item.id.clone(),
            user_id: item.user_id.clone(),
            product,
            quantity: item.quantity,
        })
    }
}

#[async_trait]
impl DataService for MemoryDataService {
    async fn list_products(
        &self,
        filter: &CategoryFilter,
        search: Option<&str>,
        order: ProductOrder,
    ) -> Result<Vec<Product>, RemoteError> {
        // Sleep outside the lock so a delayed listing does not block others.
        let delay = self.lock().delay_listing.take();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let mut inner = self.lock();
        Self::take_failure(&mut inner)?;

        let term = search.map(str::trim).filter(|t| !t.is_empty());
        let mut products: Vec<Product> = inner
            .products
            .iter()
            .filter(|p| filter.matches(p.category))
            .filter(|p| {
                term.is_none_or(|t| p.name.to_lowercase().contains(&t.to_lowercase()))
            })
            .cloned()
            .collect();

        if order == ProductOrder::NewestFirst {
            products.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        }

        Ok(products)
    }

    async fn insert_product(&self, draft: &ProductDraft) -> Result<Product, RemoteError> {
        let mut inner = self.lock();
        Self::take_failure(&mut inner)?;
        inner.writes += 1;

        let product = Product {
            id: ProductId::new(Uuid::new_v4().to_string()),
            name: draft.name.clone(),
            description: draft.description.clone(),
            price: draft.price,
            category: draft.category,
            image_url: draft.image_url.clone(),
            created_at: Utc::now(),
        };
        inner.products.push(product.clone());
        Ok(product)
    }

    async fn delete_product(&self, id: &ProductId) -> Result<(), RemoteError> {
        let mut inner = self.lock();
        Self::take_failure(&mut inner)?;
        inner.writes += 1;
        inner.products.retain(|p| &p.id != id);
        Ok(())
    }

    async fn list_cart_lines(&self, user_id: &UserId) -> Result<Vec<CartLine>, RemoteError> {
        let mut inner = self.lock();
        Self::take_failure(&mut inner)?;

        let items: Vec<StoredCartItem> = inner
            .cart_items
            .iter()
            .filter(|i| &i.user_id == user_id)
            .cloned()
            .collect();
        Ok(items
            .iter()
            .filter_map(|i| Self::resolve(&inner, i))
            .collect())
    }

    async fn insert_cart_item(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<CartLine, RemoteError> {
        let mut inner = self.lock();
        Self::take_failure(&mut inner)?;

        // Foreign key: inserting a line for an absent product is rejected.
        let Some(product) = inner.products.iter().find(|p| &p.id == product_id).cloned() else {
            return Err(RemoteError::Api {
                status: 409,
                message: format!("foreign key violation: product {product_id} does not exist"),
            });
        };

        inner.writes += 1;
        let item = StoredCartItem {
            id: LineItemId::new(Uuid::new_v4().to_string()),
            user_id: user_id.clone(),
            product_id: product_id.clone(),
            quantity,
        };
        inner.cart_items.push(item.clone());
        Ok(CartLine {
            id: item.id,
            user_id: item.user_id,
            product,
            quantity: item.quantity,
        })
    }

    async fn update_cart_item_quantity(
        &self,
        id: &LineItemId,
        quantity: u32,
    ) -> Result<CartLine, RemoteError> {
        let mut inner = self.lock();
        Self::take_failure(&mut inner)?;

        let updated = match inner.cart_items.iter_mut().find(|i| &i.id == id) {
            Some(item) => {
                item.quantity = quantity;
                item.clone()
            }
            // Matching zero rows returns an empty representation.
            None => return Err(RemoteError::MissingRepresentation("cart_items")),
        };

        inner.writes += 1;
        Self::resolve(&inner, &updated).ok_or(RemoteError::MissingRepresentation("cart_items"))
    }

    async fn delete_cart_item(&self, id: &LineItemId) -> Result<(), RemoteError> {
        let mut inner = self.lock();
        Self::take_failure(&mut inner)?;
        inner.writes += 1;
        inner.cart_items.retain(|i| &i.id != id);
        Ok(())
    }

    async fn fetch_profile(&self, user_id: &UserId) -> Result<Option<Profile>, RemoteError> {
        let mut inner = self.lock();
        Self::take_failure(&mut inner)?;
        Ok(inner.profiles.get(user_id).cloned())
    }

    async fn upsert_profile(&self, profile: &Profile) -> Result<(), RemoteError> {
        let mut inner = self.lock();
        Self::take_failure(&mut inner)?;
        inner.writes += 1;
        inner
            .profiles
            .insert(profile.user_id.clone(), profile.clone());
        Ok(())
    }
}
