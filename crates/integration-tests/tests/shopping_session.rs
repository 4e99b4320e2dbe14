//! A full shopper session: browse, fill a cart, come back later.

use rust_decimal::Decimal;

use woodnook_core::{Category, CategoryFilter};
use woodnook_integration_tests::{as_remote, product_named, seeded_service, shopper_session};
use woodnook_storefront::StoreError;
use woodnook_storefront::stores::{CartStore, CatalogStore};

#[tokio::test]
async fn browse_filter_and_fill_a_cart() {
    let service = seeded_service().await;
    let session = shopper_session("u-1");
    let catalog = CatalogStore::new(as_remote(&service));
    let cart = CartStore::new(as_remote(&service), session.clone());

    // Landing page: everything.
    let all = catalog.load(CategoryFilter::All, None).await.unwrap();
    assert_eq!(all.len(), 5);

    // Category bar plus search narrows to the one real match; the near
    // misses ("Cot bed" in Furniture, "Three-seater sofa" without the term)
    // are excluded.
    let hits = catalog
        .load(CategoryFilter::Only(Category::Sofa), Some("bed"))
        .await
        .unwrap();
    assert_eq!(hits.len(), 1);
    let sofa_bed = hits.into_iter().next().unwrap();
    assert_eq!(sofa_bed.name, "Sofa bed deluxe");

    // Two of the sofa bed, one cupboard.
    cart.add_to_cart(&sofa_bed.id).await.unwrap();
    cart.add_to_cart(&sofa_bed.id).await.unwrap();
    let cupboard = product_named(&service, "Steel cupboard").await;
    cart.add_to_cart(&cupboard.id).await.unwrap();

    let items = cart.items().await;
    assert_eq!(items.len(), 2);
    // 2 × 24999.00 + 1 × 8999.00
    assert_eq!(cart.total().await, "58997.00".parse::<Decimal>().unwrap());
}

#[tokio::test]
async fn totals_stay_exact_across_interleaved_mutations() {
    let service = seeded_service().await;
    let cart = CartStore::new(as_remote(&service), shopper_session("u-1"));

    let curtains = product_named(&service, "Linen curtains").await;
    let cot = product_named(&service, "Cot bed").await;

    cart.add_to_cart(&curtains.id).await.unwrap();
    cart.add_to_cart(&cot.id).await.unwrap();
    cart.add_to_cart(&curtains.id).await.unwrap();

    let curtain_line = cart
        .items()
        .await
        .into_iter()
        .find(|l| l.product.id == curtains.id)
        .unwrap();
    cart.update_quantity(&curtain_line.id, 4).await.unwrap();
    // 4 × 1299.00 + 1 × 15499.50
    assert_eq!(cart.total().await, "20695.50".parse::<Decimal>().unwrap());

    cart.remove_from_cart(&curtain_line.id).await.unwrap();
    assert_eq!(cart.total().await, "15499.50".parse::<Decimal>().unwrap());

    // Decrement at quantity 1 clamps instead of removing.
    let cot_line = cart.items().await.into_iter().next().unwrap();
    let updated = cart.update_quantity(&cot_line.id, 0).await.unwrap();
    assert_eq!(updated.quantity, 1);
    assert_eq!(cart.total().await, "15499.50".parse::<Decimal>().unwrap());
}

#[tokio::test]
async fn sign_out_clears_locally_but_the_cart_survives_remotely() {
    let service = seeded_service().await;
    let session = shopper_session("u-1");
    let cart = CartStore::new(as_remote(&service), session.clone());

    let cupboard = product_named(&service, "Steel cupboard").await;
    cart.add_to_cart(&cupboard.id).await.unwrap();

    // Session ends: local state goes, mutations are rejected.
    session.sign_out();
    cart.clear_local().await;
    assert!(cart.items().await.is_empty());
    assert!(matches!(
        cart.add_to_cart(&cupboard.id).await.unwrap_err(),
        StoreError::Unauthenticated
    ));

    // Next sign-in picks the cart back up from the remote rows.
    let session = shopper_session("u-1");
    let cart = CartStore::new(as_remote(&service), session);
    let lines = cart.refresh().await.unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(cart.total().await, "8999.00".parse::<Decimal>().unwrap());
}

#[tokio::test]
async fn a_failed_reload_keeps_the_shelves_stocked() {
    let service = seeded_service().await;
    let catalog = CatalogStore::new(as_remote(&service));

    let before = catalog.load(CategoryFilter::All, None).await.unwrap();

    service.fail_next();
    let err = catalog
        .load(CategoryFilter::Only(Category::Curtains), None)
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Remote(_)));

    // The previous list is still on screen, not an empty grid.
    assert_eq!(catalog.products().await, before);

    // And the next load works again.
    let curtains = catalog
        .load(CategoryFilter::Only(Category::Curtains), None)
        .await
        .unwrap();
    assert_eq!(curtains.len(), 1);
}
