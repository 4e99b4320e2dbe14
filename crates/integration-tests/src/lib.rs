//! Shared fixtures for Woodnook integration tests.
//!
//! Scenarios run against [`MemoryDataService`], the in-memory backend the
//! storefront crate ships for exactly this purpose.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use woodnook_core::{Category, CategoryFilter, Email, Price, Role, UserId};
use woodnook_storefront::image::ImageProbe;
use woodnook_storefront::models::{Identity, Product, ProductDraft};
use woodnook_storefront::remote::{DataService, MemoryDataService, ProductOrder};
use woodnook_storefront::session::SessionHandle;

/// An image probe that accepts everything.
pub struct AlwaysImage;

#[async_trait::async_trait]
impl ImageProbe for AlwaysImage {
    async fn is_displayable_image(&self, _url: &str) -> bool {
        true
    }
}

/// A session signed in as a regular shopper.
#[must_use]
pub fn shopper_session(user: &str) -> SessionHandle {
    signed_in(user, "shopper@example.com", Role::Customer)
}

/// A session signed in with the admin role claim.
#[must_use]
pub fn admin_session() -> SessionHandle {
    signed_in("u-admin", "owner@example.com", Role::Admin)
}

fn signed_in(user: &str, email: &str, role: Role) -> SessionHandle {
    let session = SessionHandle::new();
    session.sign_in(Identity {
        user_id: UserId::new(user),
        email: Email::parse(email).expect("fixture email is well-formed"),
        role,
    });
    session
}

/// A data service seeded with a small showroom of products.
///
/// The fixture set deliberately contains near misses for the
/// category-plus-search tests: a product matching "bed" outside the Sofa
/// category, and Sofa products not matching "bed".
pub async fn seeded_service() -> MemoryDataService {
    let service = MemoryDataService::new();
    for (name, category, price) in [
        ("Sofa bed deluxe", Category::Sofa, "24999.00"),
        ("Three-seater sofa", Category::Sofa, "32000.00"),
        ("Cot bed", Category::Furniture, "15499.50"),
        ("Steel cupboard", Category::Cupboard, "8999.00"),
        ("Linen curtains", Category::Curtains, "1299.00"),
    ] {
        service
            .insert_product(&ProductDraft {
                name: name.to_owned(),
                description: format!("{name} from the showroom floor"),
                price: price.parse::<Price>().expect("fixture price is valid"),
                category,
                image_url: format!("https://img.example/{}.jpg", name.replace(' ', "-")),
            })
            .await
            .expect("seeding the in-memory service cannot fail");
    }
    service
}

/// Find a seeded product by name.
pub async fn product_named(service: &MemoryDataService, name: &str) -> Product {
    service
        .list_products(&CategoryFilter::All, Some(name), ProductOrder::Unspecified)
        .await
        .expect("listing the in-memory service cannot fail")
        .into_iter()
        .next()
        .unwrap_or_else(|| panic!("fixture product {name} not seeded"))
}

/// The service as the trait object the stores take.
#[must_use]
pub fn as_remote(service: &MemoryDataService) -> Arc<dyn DataService> {
    Arc::new(service.clone())
}
