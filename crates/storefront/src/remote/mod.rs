//! Remote data service seam.
//!
//! The hosted service exposes `products`, `profiles`, and `cart_items`
//! tables behind a REST interface. Everything the stores need from it is
//! captured by the [`DataService`] trait, with two implementations:
//!
//! - [`RestDataService`] - the production HTTPS client
//! - [`MemoryDataService`] - an in-memory backend for tests
//!
//! Stores hold `Arc<dyn DataService>` and never see wire details.

pub mod memory;
pub mod rest;

pub use memory::MemoryDataService;
pub use rest::RestDataService;

use async_trait::async_trait;
use thiserror::Error;

use woodnook_core::{CategoryFilter, LineItemId, ProductId, UserId};

use crate::models::{CartLine, Product, ProductDraft, Profile};

/// Errors that can occur when talking to the data service.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// HTTP request failed (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("API error: {status} - {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, truncated.
        message: String,
    },

    /// The response body did not parse as the expected shape.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A write that asked for its representation back got an empty one.
    #[error("Service returned no representation for {0}")]
    MissingRepresentation(&'static str),

    /// The client could not be constructed from the configuration.
    #[error("Client construction failed: {0}")]
    Configuration(String),
}

/// Ordering of a product listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProductOrder {
    /// Whatever order the service returns by default.
    #[default]
    Unspecified,
    /// Reverse-chronological by creation time (the admin listing).
    NewestFirst,
}

/// Operations the stores need from the hosted data service.
///
/// All filters are evaluated remotely: category as an equality match, the
/// search term as a case-insensitive substring of the product name. Deletes
/// are idempotent - deleting an absent row succeeds.
#[async_trait]
pub trait DataService: Send + Sync {
    /// List products, optionally filtered and ordered.
    async fn list_products(
        &self,
        filter: &CategoryFilter,
        search: Option<&str>,
        order: ProductOrder,
    ) -> Result<Vec<Product>, RemoteError>;

    /// Insert a product and return the stored row.
    async fn insert_product(&self, draft: &ProductDraft) -> Result<Product, RemoteError>;

    /// Delete a product by id.
    async fn delete_product(&self, id: &ProductId) -> Result<(), RemoteError>;

    /// List a user's cart lines with their products resolved.
    ///
    /// Lines whose product no longer exists are dropped by the
    /// implementation (weak reference - the row outlives the product).
    async fn list_cart_lines(&self, user_id: &UserId) -> Result<Vec<CartLine>, RemoteError>;

    /// Insert a cart line and return it with its product resolved.
    async fn insert_cart_item(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<CartLine, RemoteError>;

    /// Set a cart line's quantity and return the updated line.
    async fn update_cart_item_quantity(
        &self,
        id: &LineItemId,
        quantity: u32,
    ) -> Result<CartLine, RemoteError>;

    /// Delete a cart line by id.
    async fn delete_cart_item(&self, id: &LineItemId) -> Result<(), RemoteError>;

    /// Fetch a user's profile. A missing row is `Ok(None)`, not an error.
    async fn fetch_profile(&self, user_id: &UserId) -> Result<Option<Profile>, RemoteError>;

    /// Insert or replace a user's profile, keyed by user id.
    async fn upsert_profile(&self, profile: &Profile) -> Result<(), RemoteError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_display() {
        let err = RemoteError::Api {
            status: 503,
            message: "service unavailable".to_owned(),
        };
        assert_eq!(err.to_string(), "API error: 503 - service unavailable");
    }

    #[test]
    fn missing_representation_display() {
        let err = RemoteError::MissingRepresentation("products");
        assert_eq!(
            err.to_string(),
            "Service returned no representation for products"
        );
    }
}
