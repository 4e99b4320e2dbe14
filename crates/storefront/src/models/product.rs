//! Product domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use woodnook_core::{Category, Price, ProductId};

/// A product as loaded from the `products` table.
///
/// Immutable from the storefront's perspective: products are created and
/// deleted only through the admin operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product ID, issued by the data service.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Non-negative unit price.
    pub price: Price,
    /// One of the shop's fixed categories.
    pub category: Category,
    /// URL of the product image.
    pub image_url: String,
    /// When the product was created (drives the admin listing order).
    pub created_at: DateTime<Utc>,
}

/// Input for creating a product through the admin operations.
///
/// The data service assigns the id and `created_at` on insert.
#[derive(Debug, Clone, Serialize)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: Price,
    pub category: Category,
    pub image_url: String,
}
