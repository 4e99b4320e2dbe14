//! CLI command implementations.
//!
//! - `products` - catalog listing and the category set
//! - `image` - image URL probing

pub mod image;
pub mod products;
