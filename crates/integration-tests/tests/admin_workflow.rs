//! Admin catalog management end to end: create, list, delete, and the
//! knock-on effects on shoppers' carts.

use std::sync::Arc;

use woodnook_core::{Category, CategoryFilter, Price};
use woodnook_integration_tests::{
    admin_session, as_remote, product_named, seeded_service, shopper_session,
};
use woodnook_storefront::StoreError;
use woodnook_storefront::models::ProductDraft;
use woodnook_storefront::stores::{AdminCatalog, CartStore, CatalogStore};

fn draft(name: &str, image_url: &str) -> ProductDraft {
    ProductDraft {
        name: name.to_owned(),
        description: "New arrival".to_owned(),
        price: "9999.00".parse::<Price>().unwrap(),
        category: Category::TvStand,
        image_url: image_url.to_owned(),
    }
}

#[tokio::test]
async fn created_products_show_up_for_shoppers() {
    let service = seeded_service().await;
    let admin = AdminCatalog::new(
        as_remote(&service),
        admin_session(),
        Arc::new(woodnook_integration_tests::AlwaysImage),
    );
    let catalog = CatalogStore::new(as_remote(&service));

    admin
        .create_product(draft("Walnut TV stand", "https://img.example/tv.jpg"))
        .await
        .unwrap();

    // Newest first on the admin side.
    let listed = admin.list_products().await.unwrap();
    assert_eq!(listed.first().unwrap().name, "Walnut TV stand");

    // Visible through the storefront filter too.
    let stands = catalog
        .load(CategoryFilter::Only(Category::TvStand), None)
        .await
        .unwrap();
    assert_eq!(stands.len(), 1);
}

#[tokio::test]
async fn deleting_a_product_drops_it_from_carts_on_refresh() {
    let service = seeded_service().await;
    let admin = AdminCatalog::new(
        as_remote(&service),
        admin_session(),
        Arc::new(woodnook_integration_tests::AlwaysImage),
    );
    let cart = CartStore::new(as_remote(&service), shopper_session("u-1"));

    let curtains = product_named(&service, "Linen curtains").await;
    let cot = product_named(&service, "Cot bed").await;
    cart.add_to_cart(&curtains.id).await.unwrap();
    cart.add_to_cart(&cot.id).await.unwrap();

    admin.delete_product(&curtains.id).await.unwrap();

    // The orphaned line disappears when the cart is next refreshed; the
    // surviving line and the total reflect only the remaining product.
    let lines = cart.refresh().await.unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines.first().unwrap().product.id, cot.id);
    assert_eq!(cart.total().await, cot.price.line_total(1));
}

#[tokio::test]
async fn shoppers_cannot_manage_the_catalog() {
    let service = seeded_service().await;
    let not_admin = AdminCatalog::new(
        as_remote(&service),
        shopper_session("u-1"),
        Arc::new(woodnook_integration_tests::AlwaysImage),
    );

    assert!(matches!(
        not_admin
            .create_product(draft("Sneaky stand", "https://img.example/x.jpg"))
            .await
            .unwrap_err(),
        StoreError::Forbidden
    ));

    let curtains = product_named(&service, "Linen curtains").await;
    assert!(matches!(
        not_admin.delete_product(&curtains.id).await.unwrap_err(),
        StoreError::Forbidden
    ));
    // Nothing was deleted.
    assert_eq!(product_named(&service, "Linen curtains").await.id, curtains.id);
}
