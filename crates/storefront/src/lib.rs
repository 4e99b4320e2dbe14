//! Woodnook Storefront library.
//!
//! The view-model layer of the shop: stores that synchronize remote data
//! with local state and expose the derived values a front end renders.
//!
//! # Architecture
//!
//! - The hosted data service is the source of truth - tables `products`,
//!   `profiles`, `cart_items` reached over HTTPS via [`remote::RestDataService`]
//! - Stores own their in-memory state and replace it wholesale from remote
//!   responses; derived values (cart total) are recomputed, never stored
//! - Cart mutations are remote-confirmed-first: local state changes only
//!   after the remote write is acknowledged
//! - Authentication is delegated to the hosted auth service; this crate only
//!   consumes the resulting [`session::Identity`]
//!
//! # Example
//!
//! ```rust,ignore
//! use woodnook_storefront::{remote::RestDataService, stores::CatalogStore};
//! use woodnook_core::CategoryFilter;
//!
//! let remote = Arc::new(RestDataService::new(&config)?);
//! let catalog = CatalogStore::new(remote.clone());
//!
//! let products = catalog.load(CategoryFilter::All, Some("sofa")).await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod image;
pub mod models;
pub mod remote;
pub mod session;
pub mod stores;

pub use error::{Result, StoreError};
