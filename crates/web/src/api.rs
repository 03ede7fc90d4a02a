//! Typed client for the storefront REST API.
//!
//! `StoreApi` is the seam every page controller talks through; `HttpStoreApi`
//! is the `reqwest` implementation (hyper natively, `fetch` in the browser).

use serde::Deserialize;
use serde::de::DeserializeOwned;

use storefront_cart::{Cart, CartCount, CartLineRequest, PurchaseResult};
use storefront_core::ProductId;
use storefront_products::{CategoryFilter, Product, ProductDraft};

use crate::config::ClientConfig;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    #[error("network error: {0}")]
    Network(String),
    /// The API answered with a non-success status.
    #[error("API error ({status}): {}", .message.as_deref().unwrap_or("no message"))]
    Rejected {
        status: u16,
        message: Option<String>,
        details: Vec<String>,
    },
    /// A success response whose body did not match the expected shape.
    #[error("parse error: {0}")]
    Parse(String),
}

/// Error body convention of the API: `{"error": "...", "detalles": [...]}`.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(rename = "detalles", default)]
    details: Option<Vec<String>>,
}

impl ApiError {
    /// Build a rejection from a raw response body; unparsable bodies carry no message.
    pub fn rejected(status: u16, body: &str) -> Self {
        let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
        ApiError::Rejected {
            status,
            message: parsed.error.filter(|m| !m.trim().is_empty()),
            details: parsed.details.unwrap_or_default(),
        }
    }

    /// Text to show the user.
    ///
    /// Server-provided messages are shown verbatim; everything else (transport
    /// failures, missing messages, unexpected bodies) falls back to `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Rejected {
                message: Some(message),
                ..
            } => message.clone(),
            _ => fallback.to_string(),
        }
    }

    pub fn details(&self) -> &[String] {
        match self {
            ApiError::Rejected { details, .. } => details,
            _ => &[],
        }
    }
}

/// REST surface consumed by the storefront pages.
///
/// Futures are not `Send`: the client runs on a single cooperative thread.
#[allow(async_fn_in_trait)]
pub trait StoreApi {
    /// `GET /api/productos[?categoria=]`
    async fn list_products(&self, filter: CategoryFilter) -> ApiResult<Vec<Product>>;
    /// `GET /api/productos/buscar?q=`
    async fn search_products(&self, term: &str) -> ApiResult<Vec<Product>>;
    /// `GET /api/productos/{id}`
    async fn get_product(&self, id: &ProductId) -> ApiResult<Product>;
    /// `POST /api/productos`
    async fn create_product(&self, draft: &ProductDraft) -> ApiResult<Product>;
    /// `PUT /api/productos/{id}`
    async fn update_product(&self, id: &ProductId, draft: &ProductDraft) -> ApiResult<Product>;
    /// `DELETE /api/productos/{id}`
    async fn delete_product(&self, id: &ProductId) -> ApiResult<()>;

    /// `GET /api/carrito`
    async fn get_cart(&self) -> ApiResult<Cart>;
    /// `POST /api/carrito/agregar`
    async fn add_to_cart(&self, line: &CartLineRequest) -> ApiResult<()>;
    /// `PUT /api/carrito/actualizar`
    async fn update_cart_item(&self, line: &CartLineRequest) -> ApiResult<()>;
    /// `DELETE /api/carrito/eliminar/{producto_id}`
    async fn remove_cart_item(&self, id: &ProductId) -> ApiResult<()>;
    /// `DELETE /api/carrito/vaciar`
    async fn clear_cart(&self) -> ApiResult<()>;
    /// `POST /api/carrito/comprar`
    async fn checkout(&self) -> ApiResult<PurchaseResult>;
    /// `GET /api/carrito/cantidad`
    async fn cart_count(&self) -> ApiResult<CartCount>;
}

/// `reqwest`-backed API client.
///
/// Session cookies are handled by the browser; natively the client is
/// anonymous.
#[derive(Debug, Clone)]
pub struct HttpStoreApi {
    api_url: String,
    client: reqwest::Client,
}

impl HttpStoreApi {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            api_url: config.api_base_url.clone(),
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    /// `path` followed by `id` as a single percent-encoded segment.
    fn resource_url(&self, path: &str, id: &ProductId) -> ApiResult<reqwest::Url> {
        let mut url = reqwest::Url::parse(&self.url(path))
            .map_err(|e| ApiError::Network(format!("invalid request URL: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| ApiError::Network("API base URL cannot take a path".to_string()))?
            .push(id.as_str());
        Ok(url)
    }

    async fn execute(&self, req: reqwest::RequestBuilder) -> ApiResult<reqwest::Response> {
        let resp = req.send().await.map_err(|e| ApiError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::rejected(status.as_u16(), &body));
        }

        Ok(resp)
    }

    async fn fetch_json<T: DeserializeOwned>(&self, req: reqwest::RequestBuilder) -> ApiResult<T> {
        let resp = self.execute(req).await?;
        resp.json::<T>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    /// Product listings decode item by item; one product the client cannot
    /// represent is logged and left out instead of failing the whole page.
    async fn fetch_products(&self, req: reqwest::RequestBuilder) -> ApiResult<Vec<Product>> {
        let raw: Vec<serde_json::Value> = self.fetch_json(req).await?;
        Ok(raw
            .into_iter()
            .filter_map(|value| match serde_json::from_value::<Product>(value) {
                Ok(product) => Some(product),
                Err(err) => {
                    tracing::warn!(error = %err, "skipping product that failed to decode");
                    None
                }
            })
            .collect())
    }

    /// Mutations whose success body is only an acknowledgement.
    async fn fetch_ack(&self, req: reqwest::RequestBuilder) -> ApiResult<()> {
        self.execute(req).await.map(|_| ())
    }
}

impl StoreApi for HttpStoreApi {
    async fn list_products(&self, filter: CategoryFilter) -> ApiResult<Vec<Product>> {
        let mut req = self.client.get(self.url("/api/productos"));
        if let Some(category) = filter.query_value() {
            req = req.query(&[("categoria", category)]);
        }
        self.fetch_products(req).await
    }

    async fn search_products(&self, term: &str) -> ApiResult<Vec<Product>> {
        let req = self
            .client
            .get(self.url("/api/productos/buscar"))
            .query(&[("q", term)]);
        self.fetch_products(req).await
    }

    async fn get_product(&self, id: &ProductId) -> ApiResult<Product> {
        let req = self.client.get(self.resource_url("/api/productos", id)?);
        self.fetch_json(req).await
    }

    async fn create_product(&self, draft: &ProductDraft) -> ApiResult<Product> {
        let req = self.client.post(self.url("/api/productos")).json(draft);
        self.fetch_json(req).await
    }

    async fn update_product(&self, id: &ProductId, draft: &ProductDraft) -> ApiResult<Product> {
        let req = self
            .client
            .put(self.resource_url("/api/productos", id)?)
            .json(draft);
        self.fetch_json(req).await
    }

    async fn delete_product(&self, id: &ProductId) -> ApiResult<()> {
        let req = self.client.delete(self.resource_url("/api/productos", id)?);
        self.fetch_ack(req).await
    }

    async fn get_cart(&self) -> ApiResult<Cart> {
        let req = self.client.get(self.url("/api/carrito"));
        self.fetch_json(req).await
    }

    async fn add_to_cart(&self, line: &CartLineRequest) -> ApiResult<()> {
        let req = self.client.post(self.url("/api/carrito/agregar")).json(line);
        self.fetch_ack(req).await
    }

    async fn update_cart_item(&self, line: &CartLineRequest) -> ApiResult<()> {
        let req = self.client.put(self.url("/api/carrito/actualizar")).json(line);
        self.fetch_ack(req).await
    }

    async fn remove_cart_item(&self, id: &ProductId) -> ApiResult<()> {
        let req = self
            .client
            .delete(self.resource_url("/api/carrito/eliminar", id)?);
        self.fetch_ack(req).await
    }

    async fn clear_cart(&self) -> ApiResult<()> {
        let req = self.client.delete(self.url("/api/carrito/vaciar"));
        self.fetch_ack(req).await
    }

    async fn checkout(&self) -> ApiResult<PurchaseResult> {
        let req = self.client.post(self.url("/api/carrito/comprar"));
        self.fetch_json(req).await
    }

    async fn cart_count(&self) -> ApiResult<CartCount> {
        let req = self.client.get(self.url("/api/carrito/cantidad"));
        self.fetch_json(req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_carries_server_message_verbatim() {
        let err = ApiError::rejected(400, r#"{"error": "Only 3 units available"}"#);
        assert_eq!(err.user_message("Could not update"), "Only 3 units available");
        assert!(err.details().is_empty());
    }

    #[test]
    fn rejection_keeps_checkout_details() {
        let err = ApiError::rejected(
            400,
            r#"{"error": "Nothing could be purchased", "detalles": ["Dune: out of stock"]}"#,
        );
        assert_eq!(err.details(), ["Dune: out of stock".to_string()]);
    }

    #[test]
    fn missing_or_unparsable_message_falls_back() {
        for body in ["", "<html>502</html>", "{}", r#"{"error": "  "}"#] {
            let err = ApiError::rejected(502, body);
            assert_eq!(err.user_message("Something went wrong"), "Something went wrong");
        }
    }

    #[test]
    fn transport_failures_use_the_generic_message() {
        let err = ApiError::Network("connection refused".to_string());
        assert_eq!(err.user_message("Something went wrong"), "Something went wrong");

        let err = ApiError::Parse("expected value".to_string());
        assert_eq!(err.user_message("Something went wrong"), "Something went wrong");
    }

    #[test]
    fn ids_are_sent_as_one_encoded_segment() {
        let api = HttpStoreApi::new(&ClientConfig::new("http://shop.local:8080/").unwrap());

        let url = api.resource_url("/api/productos", &ProductId::new("p1")).unwrap();
        assert_eq!(url.as_str(), "http://shop.local:8080/api/productos/p1");

        let url = api
            .resource_url("/api/carrito/eliminar", &ProductId::new("a/b?c#d"))
            .unwrap();
        assert_eq!(url.path(), "/api/carrito/eliminar/a%2Fb%3Fc%23d");
        assert_eq!(url.query(), None);
    }
}
