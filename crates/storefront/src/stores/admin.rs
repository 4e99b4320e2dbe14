//! Admin catalog operations.
//!
//! Product creation and deletion, gated on the identity's role claim.
//! Creation validates its input - including probing the image URL - before
//! any remote call, so a rejected draft never reaches the data service.

use std::sync::Arc;

use tracing::{info, instrument};

use woodnook_core::{CategoryFilter, ProductId};

use crate::error::{Result, StoreError};
use crate::image::ImageProbe;
use crate::models::{Product, ProductDraft};
use crate::remote::{DataService, ProductOrder};
use crate::session::SessionHandle;

/// Admin-side catalog management.
#[derive(Clone)]
pub struct AdminCatalog {
    remote: Arc<dyn DataService>,
    session: SessionHandle,
    probe: Arc<dyn ImageProbe>,
}

impl AdminCatalog {
    /// Create the admin operations over the given collaborators.
    #[must_use]
    pub fn new(
        remote: Arc<dyn DataService>,
        session: SessionHandle,
        probe: Arc<dyn ImageProbe>,
    ) -> Self {
        Self {
            remote,
            session,
            probe,
        }
    }

    fn require_admin(&self) -> Result<()> {
        let identity = self
            .session
            .current_user()
            .ok_or(StoreError::Unauthenticated)?;
        if !identity.is_admin() {
            return Err(StoreError::Forbidden);
        }
        Ok(())
    }

    /// List every product, newest first.
    ///
    /// # Errors
    ///
    /// [`StoreError::Unauthenticated`] / [`StoreError::Forbidden`] without
    /// the admin role, [`StoreError::Remote`] on fetch failure.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>> {
        self.require_admin()?;
        let products = self
            .remote
            .list_products(&CategoryFilter::All, None, ProductOrder::NewestFirst)
            .await?;
        Ok(products)
    }

    /// Create a product.
    ///
    /// The draft must carry a name and an image URL that the probe confirms
    /// is displayable; both checks happen before the insert is attempted.
    ///
    /// # Errors
    ///
    /// [`StoreError::Validation`] for a rejected draft,
    /// [`StoreError::Unauthenticated`] / [`StoreError::Forbidden`] without
    /// the admin role, [`StoreError::Remote`] on write failure.
    #[instrument(skip_all, fields(name = %draft.name))]
    pub async fn create_product(&self, draft: ProductDraft) -> Result<Product> {
        self.require_admin()?;

        if draft.name.trim().is_empty() {
            return Err(StoreError::Validation("product name is required".to_owned()));
        }
        if draft.image_url.trim().is_empty() {
            return Err(StoreError::Validation("an image URL is required".to_owned()));
        }
        if !self.probe.is_displayable_image(&draft.image_url).await {
            return Err(StoreError::Validation(
                "the image URL does not reference a displayable image".to_owned(),
            ));
        }

        let product = self.remote.insert_product(&draft).await?;
        info!(product_id = %product.id, "Product created");
        Ok(product)
    }

    /// Delete a product. Idempotent: deleting an absent id succeeds.
    ///
    /// # Errors
    ///
    /// [`StoreError::Unauthenticated`] / [`StoreError::Forbidden`] without
    /// the admin role, [`StoreError::Remote`] on write failure.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: &ProductId) -> Result<()> {
        self.require_admin()?;
        self.remote.delete_product(id).await?;
        info!(product_id = %id, "Product deleted");
        Ok(())
    }
}
