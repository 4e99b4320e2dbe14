//! REST client for the hosted data service.
//!
//! Speaks the service's PostgREST-style dialect: filters as query
//! parameters (`category=eq.Sofa`, `name=ilike.*bed*`), writes that return
//! their representation via a `Prefer` header, and nested product
//! resolution on cart rows via resource embedding.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use woodnook_core::{CategoryFilter, LineItemId, ProductId, UserId};

use crate::config::StorefrontConfig;
use crate::models::{CartLine, Product, ProductDraft, Profile};
use crate::remote::{DataService, ProductOrder, RemoteError};

/// `Prefer` header value asking a write to return the stored row.
const PREFER_REPRESENTATION: &str = "return=representation";

/// `Prefer` header value for an upsert keyed on the table's unique column.
const PREFER_UPSERT: &str = "resolution=merge-duplicates";

/// Cart select clause resolving each row's product in the same response.
const CART_SELECT: &str = "*,product:products(*)";

/// Client for the hosted data service's REST interface.
#[derive(Clone)]
pub struct RestDataService {
    inner: Arc<RestDataServiceInner>,
}

struct RestDataServiceInner {
    client: reqwest::Client,
    base_url: String,
}

impl RestDataService {
    /// Create a new data service client.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is not a valid header value or the
    /// HTTP client fails to build.
    pub fn new(config: &StorefrontConfig) -> Result<Self, RemoteError> {
        let mut headers = HeaderMap::new();

        let key = config.service_key.expose_secret();
        let api_key = HeaderValue::from_str(key)
            .map_err(|e| RemoteError::Configuration(format!("invalid API key: {e}")))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {key}"))
            .map_err(|e| RemoteError::Configuration(format!("invalid API key: {e}")))?;

        headers.insert("apikey", api_key);
        headers.insert("Authorization", bearer);
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            inner: Arc::new(RestDataServiceInner {
                client,
                base_url: format!("{}/rest/v1", config.service_url),
            }),
        })
    }

    fn url(&self, table: &str) -> String {
        format!("{}/{table}", self.inner.base_url)
    }

    /// Check the response status, then parse the body.
    ///
    /// Reads the body as text first so a parse failure can be logged with
    /// what the service actually sent.
    async fn check_and_parse<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, RemoteError> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(api_error(status.as_u16(), &body));
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "Failed to parse data service response"
            );
            RemoteError::Parse(e)
        })
    }

    /// Check the response status, discarding the body.
    async fn check(response: reqwest::Response) -> Result<(), RemoteError> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(api_error(status.as_u16(), &body))
    }
}

fn api_error(status: u16, body: &str) -> RemoteError {
    RemoteError::Api {
        status,
        message: body.chars().take(200).collect(),
    }
}

/// Build the query parameters for a product listing.
fn product_query(
    filter: &CategoryFilter,
    search: Option<&str>,
    order: ProductOrder,
) -> Vec<(&'static str, String)> {
    let mut params = vec![("select", "*".to_owned())];

    if let Some(category) = filter.category() {
        params.push(("category", format!("eq.{}", category.as_str())));
    }

    if let Some(term) = search {
        let term = term.trim();
        if !term.is_empty() {
            params.push(("name", format!("ilike.*{term}*")));
        }
    }

    if order == ProductOrder::NewestFirst {
        params.push(("order", "created_at.desc".to_owned()));
    }

    params
}

/// A `cart_items` row with its product embedded.
///
/// `product` is `None` when the referenced product has been deleted; such
/// rows are dropped rather than surfaced.
#[derive(Debug, Deserialize)]
struct CartItemRow {
    id: LineItemId,
    user_id: UserId,
    product_id: ProductId,
    quantity: u32,
    product: Option<Product>,
}

impl CartItemRow {
    fn into_line(self) -> Option<CartLine> {
        match self.product {
            Some(product) => Some(CartLine {
                id: self.id,
                user_id: self.user_id,
                product,
                quantity: self.quantity,
            }),
            None => {
                warn!(
                    line_id = %self.id,
                    product_id = %self.product_id,
                    "Dropping cart line whose product no longer exists"
                );
                None
            }
        }
    }
}

#[async_trait]
impl DataService for RestDataService {
    #[instrument(skip(self))]
    async fn list_products(
        &self,
        filter: &CategoryFilter,
        search: Option<&str>,
        order: ProductOrder,
    ) -> Result<Vec<Product>, RemoteError> {
        let response = self
            .inner
            .client
            .get(self.url("products"))
            .query(&product_query(filter, search, order))
            .send()
            .await?;

        let products: Vec<Product> = Self::check_and_parse(response).await?;
        debug!(count = products.len(), "Listed products");
        Ok(products)
    }

    #[instrument(skip_all, fields(name = %draft.name))]
    async fn insert_product(&self, draft: &ProductDraft) -> Result<Product, RemoteError> {
        let response = self
            .inner
            .client
            .post(self.url("products"))
            .header("Prefer", PREFER_REPRESENTATION)
            .query(&[("select", "*")])
            .json(&[draft])
            .send()
            .await?;

        let mut rows: Vec<Product> = Self::check_and_parse(response).await?;
        rows.pop()
            .ok_or(RemoteError::MissingRepresentation("products"))
    }

    #[instrument(skip(self))]
    async fn delete_product(&self, id: &ProductId) -> Result<(), RemoteError> {
        let response = self
            .inner
            .client
            .delete(self.url("products"))
            .query(&[("id", format!("eq.{id}"))])
            .send()
            .await?;

        Self::check(response).await
    }

    #[instrument(skip(self))]
    async fn list_cart_lines(&self, user_id: &UserId) -> Result<Vec<CartLine>, RemoteError> {
        let response = self
            .inner
            .client
            .get(self.url("cart_items"))
            .query(&[
                ("select", CART_SELECT.to_owned()),
                ("user_id", format!("eq.{user_id}")),
            ])
            .send()
            .await?;

        let rows: Vec<CartItemRow> = Self::check_and_parse(response).await?;
        Ok(rows.into_iter().filter_map(CartItemRow::into_line).collect())
    }

    #[instrument(skip(self))]
    async fn insert_cart_item(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<CartLine, RemoteError> {
        let body = serde_json::json!([{
            "user_id": user_id,
            "product_id": product_id,
            "quantity": quantity,
        }]);

        let response = self
            .inner
            .client
            .post(self.url("cart_items"))
            .header("Prefer", PREFER_REPRESENTATION)
            .query(&[("select", CART_SELECT)])
            .json(&body)
            .send()
            .await?;

        let mut rows: Vec<CartItemRow> = Self::check_and_parse(response).await?;
        rows.pop()
            .and_then(CartItemRow::into_line)
            .ok_or(RemoteError::MissingRepresentation("cart_items"))
    }

    #[instrument(skip(self))]
    async fn update_cart_item_quantity(
        &self,
        id: &LineItemId,
        quantity: u32,
    ) -> Result<CartLine, RemoteError> {
        let response = self
            .inner
            .client
            .patch(self.url("cart_items"))
            .header("Prefer", PREFER_REPRESENTATION)
            .query(&[
                ("select", CART_SELECT.to_owned()),
                ("id", format!("eq.{id}")),
            ])
            .json(&serde_json::json!({ "quantity": quantity }))
            .send()
            .await?;

        let mut rows: Vec<CartItemRow> = Self::check_and_parse(response).await?;
        rows.pop()
            .and_then(CartItemRow::into_line)
            .ok_or(RemoteError::MissingRepresentation("cart_items"))
    }

    #[instrument(skip(self))]
    async fn delete_cart_item(&self, id: &LineItemId) -> Result<(), RemoteError> {
        let response = self
            .inner
            .client
            .delete(self.url("cart_items"))
            .query(&[("id", format!("eq.{id}"))])
            .send()
            .await?;

        Self::check(response).await
    }

    #[instrument(skip(self))]
    async fn fetch_profile(&self, user_id: &UserId) -> Result<Option<Profile>, RemoteError> {
        let response = self
            .inner
            .client
            .get(self.url("profiles"))
            .query(&[
                ("select", "*".to_owned()),
                ("user_id", format!("eq.{user_id}")),
            ])
            .send()
            .await?;

        let rows: Vec<Profile> = Self::check_and_parse(response).await?;
        Ok(rows.into_iter().next())
    }

    #[instrument(skip_all, fields(user_id = %profile.user_id))]
    async fn upsert_profile(&self, profile: &Profile) -> Result<(), RemoteError> {
        let response = self
            .inner
            .client
            .post(self.url("profiles"))
            .header("Prefer", PREFER_UPSERT)
            .query(&[("on_conflict", "user_id")])
            .json(&[profile])
            .send()
            .await?;

        Self::check(response).await
    }
}

#[cfg(test)]
mod tests {
    use woodnook_core::Category;

    use super::*;

    #[test]
    fn product_query_unfiltered() {
        let params = product_query(&CategoryFilter::All, None, ProductOrder::Unspecified);
        assert_eq!(params, vec![("select", "*".to_owned())]);
    }

    #[test]
    fn product_query_with_category_and_search() {
        let params = product_query(
            &CategoryFilter::Only(Category::Sofa),
            Some("bed"),
            ProductOrder::Unspecified,
        );
        assert_eq!(
            params,
            vec![
                ("select", "*".to_owned()),
                ("category", "eq.Sofa".to_owned()),
                ("name", "ilike.*bed*".to_owned()),
            ]
        );
    }

    #[test]
    fn product_query_skips_blank_search_terms() {
        let params = product_query(&CategoryFilter::All, Some("   "), ProductOrder::Unspecified);
        assert_eq!(params, vec![("select", "*".to_owned())]);
    }

    #[test]
    fn product_query_newest_first_adds_order() {
        let params = product_query(&CategoryFilter::All, None, ProductOrder::NewestFirst);
        assert!(params.contains(&("order", "created_at.desc".to_owned())));
    }

    #[test]
    fn cart_row_without_product_is_dropped() {
        let row: CartItemRow = serde_json::from_value(serde_json::json!({
            "id": "li-1",
            "user_id": "u-1",
            "product_id": "p-gone",
            "quantity": 2,
            "product": null,
        }))
        .unwrap();
        assert!(row.into_line().is_none());
    }

    #[test]
    fn cart_row_with_product_resolves() {
        let row: CartItemRow = serde_json::from_value(serde_json::json!({
            "id": "li-1",
            "user_id": "u-1",
            "product_id": "p-1",
            "quantity": 2,
            "product": {
                "id": "p-1",
                "name": "Oak cot",
                "description": "",
                "price": "8999.00",
                "category": "Furniture",
                "image_url": "https://img.example/cot.jpg",
                "created_at": "2026-01-05T10:00:00Z",
            },
        }))
        .unwrap();
        let line = row.into_line().unwrap();
        assert_eq!(line.quantity, 2);
        assert_eq!(line.product.name, "Oak cot");
    }
}
