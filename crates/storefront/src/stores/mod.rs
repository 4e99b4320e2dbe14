//! Stores: state synchronization between remote data and local views.
//!
//! Each store owns its in-memory state, replaces it wholesale from remote
//! responses, and exposes snapshot accessors for rendering. Mutations are
//! remote-confirmed-first: local state changes only after the data service
//! acknowledges the write, so a failure leaves the previous state intact.

pub mod admin;
pub mod cart;
pub mod catalog;
pub mod profile;

pub use admin::AdminCatalog;
pub use cart::CartStore;
pub use catalog::CatalogStore;
pub use profile::ProfileStore;
