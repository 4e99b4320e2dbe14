//! Image URL validation.
//!
//! A product image URL is accepted only if a header-only probe of the URL
//! comes back with an `image/` content type. The check is a plain boolean:
//! malformed URLs, unreachable hosts, timeouts, and non-success statuses
//! all read as "not displayable", never as errors.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, instrument};
use url::Url;

/// Boolean probe for whether a URL references a displayable image.
///
/// A trait so admin operations can be tested without a network.
#[async_trait]
pub trait ImageProbe: Send + Sync {
    /// Whether the URL points at something a browser can render as an image.
    async fn is_displayable_image(&self, url: &str) -> bool;
}

/// Probes image URLs with a HEAD request.
#[derive(Clone)]
pub struct ImageValidator {
    client: reqwest::Client,
}

impl ImageValidator {
    /// Create a validator whose probes time out after `timeout`.
    ///
    /// Falls back to a default client if one cannot be built with the
    /// timeout applied; probes then rely on the service's own limits.
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();
        Self { client }
    }
}

#[async_trait]
impl ImageProbe for ImageValidator {
    #[instrument(skip(self))]
    async fn is_displayable_image(&self, url: &str) -> bool {
        // Reject anything that is not an absolute http(s) URL before
        // touching the network.
        let Ok(parsed) = Url::parse(url) else {
            return false;
        };
        if !matches!(parsed.scheme(), "http" | "https") {
            return false;
        }

        let response = match self.client.head(parsed).send().await {
            Ok(response) => response,
            Err(e) => {
                debug!(error = %e, "Image probe failed");
                return false;
            }
        };

        if !response.status().is_success() {
            return false;
        }

        response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(is_image_content_type)
    }
}

/// Whether a `Content-Type` header value declares an image.
#[must_use]
pub fn is_image_content_type(value: &str) -> bool {
    value.trim_start().to_ascii_lowercase().starts_with("image/")
}
