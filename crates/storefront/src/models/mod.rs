//! Domain models.
//!
//! Validated domain objects, separate from the wire rows the data service
//! returns (those live next to the REST client).

pub mod cart;
pub mod identity;
pub mod product;
pub mod profile;

pub use cart::CartLine;
pub use identity::Identity;
pub use product::{Product, ProductDraft};
pub use profile::{Profile, ProfileDraft};
