//! Image probe command.

#![allow(clippy::print_stdout)]

use woodnook_storefront::config::StorefrontConfig;
use woodnook_storefront::image::{ImageProbe, ImageValidator};

/// Probe a URL and report whether it serves a displayable image.
pub async fn check(url: &str) -> Result<(), Box<dyn std::error::Error>> {
    // Config is optional here; fall back to the default probe timeout when
    // the service variables are not set.
    let timeout = StorefrontConfig::from_env()
        .map_or(std::time::Duration::from_secs(10), |c| c.image_probe_timeout);

    let validator = ImageValidator::new(timeout);
    if validator.is_displayable_image(url).await {
        println!("displayable image: {url}");
    } else {
        println!("not a displayable image: {url}");
    }
    Ok(())
}
