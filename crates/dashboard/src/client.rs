use async_trait::async_trait;
use catalog_model::{Book, BookId, BookPatch, CatalogStats, DeletedBook};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Deserialize};

use crate::error::{DashboardError, Result};

/// Request/response operations of the catalog API.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn list_books(&self) -> Result<Vec<Book>>;

    async fn get_book(&self, id: BookId) -> Result<Book>;

    async fn stats(&self) -> Result<CatalogStats>;

    async fn create_book(&self, patch: &BookPatch) -> Result<Book>;

    async fn update_book(&self, id: BookId, patch: &BookPatch) -> Result<Book>;

    /// Returns the removed record
    async fn delete_book(&self, id: BookId) -> Result<Book>;

    /// Reachability check used by the login gate
    async fn ping(&self) -> Result<()> {
        self.list_books().await.map(|_| ())
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: String,
}

/// `CatalogApi` over HTTP/JSON.
#[derive(Debug, Clone)]
pub struct HttpCatalogClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpCatalogClient {
    /// `base_url` is the API root, e.g. `http://localhost:3000/api`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, format!("{}{}", self.base_url, path))
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request
            .send()
            .await
            .map_err(|e| DashboardError::Connectivity(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(DashboardError::NotFound);
        }
        if !status.is_success() {
            let message = match response.json::<ApiErrorBody>().await {
                Ok(body) => body.error,
                Err(_) => status.to_string(),
            };
            return Err(DashboardError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response.json::<T>().await.map_err(|e| DashboardError::Api {
            status: status.as_u16(),
            message: format!("unreadable response: {e}"),
        })
    }
}

#[async_trait]
impl CatalogApi for HttpCatalogClient {
    async fn list_books(&self) -> Result<Vec<Book>> {
        self.send(self.request(Method::GET, "/books")).await
    }

    async fn get_book(&self, id: BookId) -> Result<Book> {
        self.send(self.request(Method::GET, &format!("/books/{id}")))
            .await
    }

    async fn stats(&self) -> Result<CatalogStats> {
        self.send(self.request(Method::GET, "/stats")).await
    }

    async fn create_book(&self, patch: &BookPatch) -> Result<Book> {
        self.send(self.request(Method::POST, "/books").json(patch))
            .await
    }

    async fn update_book(&self, id: BookId, patch: &BookPatch) -> Result<Book> {
        self.send(self.request(Method::PUT, &format!("/books/{id}")).json(patch))
            .await
    }

    async fn delete_book(&self, id: BookId) -> Result<Book> {
        let deleted: DeletedBook = self
            .send(self.request(Method::DELETE, &format!("/books/{id}")))
            .await?;
        tracing::debug!(book_id = id, message = %deleted.message, "book deleted");
        Ok(deleted.book)
    }
}
