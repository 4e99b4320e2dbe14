//! Cart store.
//!
//! Owns the signed-in user's cart lines. Every mutation is
//! remote-confirmed-first: the data service write happens before any local
//! change, so a remote failure leaves local state exactly as it was. The
//! total is recomputed from the lines on every read, never stored.
//!
//! Invariants:
//! - at most one line per (user, product) pair - adding an already-carted
//!   product increments its line instead of duplicating it; the check runs
//!   against the user's remote cart (hydrated once, on the first mutation),
//!   so lines written in an earlier session are seen too
//! - quantity never drops below 1 - [`CartStore::update_quantity`] clamps,
//!   so a decrement at 1 is a no-op and removal is only ever explicit

use std::sync::Arc;

use rust_decimal::Decimal;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use woodnook_core::{LineItemId, ProductId, UserId};

use crate::error::{Result, StoreError};
use crate::models::CartLine;
use crate::remote::DataService;
use crate::session::SessionHandle;

/// Store for the current user's cart.
///
/// Cheap to clone; all clones share the same state.
#[derive(Clone)]
pub struct CartStore {
    inner: Arc<CartStoreInner>,
}

#[derive(Default)]
struct CartState {
    lines: Vec<CartLine>,
    /// Whether `lines` has been loaded from the remote for this session.
    hydrated: bool,
}

struct CartStoreInner {
    remote: Arc<dyn DataService>,
    session: SessionHandle,
    state: RwLock<CartState>,
}

impl CartStore {
    /// Create a store over the given data service and session.
    #[must_use]
    pub fn new(remote: Arc<dyn DataService>, session: SessionHandle) -> Self {
        Self {
            inner: Arc::new(CartStoreInner {
                remote,
                session,
                state: RwLock::new(CartState::default()),
            }),
        }
    }

    fn require_user(&self) -> Result<UserId> {
        self.inner
            .session
            .current_user()
            .map(|identity| identity.user_id)
            .ok_or(StoreError::Unauthenticated)
    }

    /// Replace the local lines with the user's remote cart.
    ///
    /// # Errors
    ///
    /// [`StoreError::Unauthenticated`] without a session,
    /// [`StoreError::Remote`] on fetch failure (local lines are retained).
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<Vec<CartLine>> {
        let user_id = self.require_user()?;
        let lines = self.inner.remote.list_cart_lines(&user_id).await?;
        debug!(count = lines.len(), "Cart refreshed");
        let mut state = self.inner.state.write().await;
        state.lines = lines.clone();
        state.hydrated = true;
        Ok(lines)
    }

    /// Load the remote lines once per session, so the one-line-per-product
    /// check sees rows written before this store existed.
    async fn hydrate(&self, user_id: &UserId) -> Result<()> {
        if self.inner.state.read().await.hydrated {
            return Ok(());
        }
        let lines = self.inner.remote.list_cart_lines(user_id).await?;
        let mut state = self.inner.state.write().await;
        if !state.hydrated {
            state.lines = lines;
            state.hydrated = true;
        }
        Ok(())
    }

    /// Add one unit of a product to the cart.
    ///
    /// If a line for the product already exists, its quantity is
    /// incremented by 1; otherwise a new line with quantity 1 is created.
    ///
    /// # Errors
    ///
    /// [`StoreError::Unauthenticated`] without a session (checked before
    /// any remote call), [`StoreError::Remote`] on write failure.
    #[instrument(skip(self))]
    pub async fn add_to_cart(&self, product_id: &ProductId) -> Result<CartLine> {
        let user_id = self.require_user()?;
        self.hydrate(&user_id).await?;

        let existing = {
            let state = self.inner.state.read().await;
            state
                .lines
                .iter()
                .find(|line| &line.product.id == product_id)
                .map(|line| (line.id.clone(), line.quantity))
        };

        let line = match existing {
            Some((line_id, quantity)) => {
                self.inner
                    .remote
                    .update_cart_item_quantity(&line_id, quantity + 1)
                    .await?
            }
            None => {
                self.inner
                    .remote
                    .insert_cart_item(&user_id, product_id, 1)
                    .await?
            }
        };

        self.commit(line.clone()).await;
        debug!(line_id = %line.id, quantity = line.quantity, "Added to cart");
        Ok(line)
    }

    /// Set a line's quantity, clamped to a minimum of 1.
    ///
    /// Clamping lives here rather than in callers so no UI path can store a
    /// quantity below 1.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] if the line is not in the cart,
    /// [`StoreError::Unauthenticated`] / [`StoreError::Remote`] as above.
    #[instrument(skip(self))]
    pub async fn update_quantity(&self, line_id: &LineItemId, quantity: u32) -> Result<CartLine> {
        let user_id = self.require_user()?;
        self.hydrate(&user_id).await?;
        let quantity = quantity.max(1);

        let known = {
            let state = self.inner.state.read().await;
            state.lines.iter().any(|line| &line.id == line_id)
        };
        if !known {
            return Err(StoreError::NotFound(format!("cart line {line_id}")));
        }

        let line = self
            .inner
            .remote
            .update_cart_item_quantity(line_id, quantity)
            .await?;
        self.commit(line.clone()).await;
        Ok(line)
    }

    /// Remove a line from the cart.
    ///
    /// Idempotent: removing an id that is not in the cart is a no-op, not
    /// an error.
    ///
    /// # Errors
    ///
    /// [`StoreError::Unauthenticated`] / [`StoreError::Remote`] as above.
    #[instrument(skip(self))]
    pub async fn remove_from_cart(&self, line_id: &LineItemId) -> Result<()> {
        self.require_user()?;
        self.inner.remote.delete_cart_item(line_id).await?;
        let mut state = self.inner.state.write().await;
        state.lines.retain(|line| &line.id != line_id);
        Ok(())
    }

    /// The cart total: `sum(quantity × price)` over the current lines.
    ///
    /// Recomputed on every call.
    pub async fn total(&self) -> Decimal {
        let state = self.inner.state.read().await;
        state.lines.iter().map(CartLine::line_total).sum()
    }

    /// Snapshot of the current lines.
    pub async fn items(&self) -> Vec<CartLine> {
        self.inner.state.read().await.lines.clone()
    }

    /// Drop all local lines. Called when the session ends; the remote rows
    /// are the user's and stay put for their next sign-in.
    pub async fn clear_local(&self) {
        let mut state = self.inner.state.write().await;
        state.lines.clear();
        state.hydrated = false;
    }

    /// Insert or replace the local copy of a confirmed line.
    async fn commit(&self, line: CartLine) {
        let mut state = self.inner.state.write().await;
        match state.lines.iter_mut().find(|l| l.id == line.id) {
            Some(slot) => *slot = line,
            None => state.lines.push(line),
        }
    }
}
