//! Catalog listing commands.

#![allow(clippy::print_stdout)]

use std::sync::Arc;

use woodnook_core::{Category, CategoryFilter};
use woodnook_storefront::config::StorefrontConfig;
use woodnook_storefront::remote::RestDataService;
use woodnook_storefront::stores::CatalogStore;

/// List products matching the filter and search term.
pub async fn list(
    filter: CategoryFilter,
    search: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = StorefrontConfig::from_env()?;
    let remote = Arc::new(RestDataService::new(&config)?);
    let catalog = CatalogStore::new(remote);

    let products = catalog.load(filter, search).await?;

    if products.is_empty() {
        println!("No products found");
        return Ok(());
    }

    for product in products {
        println!(
            "{:<36}  {:<30}  {:<24}  {}",
            product.id,
            product.name,
            product.category,
            product.price.display()
        );
    }
    Ok(())
}

/// Print the fixed category set, plus the "all" sentinel the filter accepts.
pub fn categories() {
    println!("all");
    for category in Category::ALL {
        println!("{category}");
    }
}
