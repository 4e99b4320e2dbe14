//! Woodnook Core - Shared types library.
//!
//! This crate provides common types used across all Woodnook components:
//! - `storefront` - Catalog, cart, profile, and admin stores over the hosted data service
//! - `cli` - Command-line front end for browsing the catalog
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no store
//! logic. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, categories, and roles

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
