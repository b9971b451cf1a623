//! In-process `CatalogApi` backed by a real store, for unit tests.

use std::sync::Mutex;

use async_trait::async_trait;
use catalog_app::{CatalogError, CatalogStore};
use catalog_model::{Book, BookId, BookPatch, CatalogStats};

use crate::client::CatalogApi;
use crate::error::{DashboardError, Result};

pub struct FakeApi {
    store: Mutex<CatalogStore>,
    calls: Mutex<Vec<&'static str>>,
    reachable: bool,
}

impl FakeApi {
    pub fn new(store: CatalogStore) -> Self {
        Self {
            store: Mutex::new(store),
            calls: Mutex::new(Vec::new()),
            reachable: true,
        }
    }

    pub fn seeded() -> Self {
        let books = catalog_app::modules::books::seed::sample_books().unwrap();
        Self::new(CatalogStore::with_books(books))
    }

    pub fn unreachable() -> Self {
        Self {
            reachable: false,
            ..Self::new(CatalogStore::new())
        }
    }

    /// Operations issued so far, in order.
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    fn enter(&self, call: &'static str) -> Result<std::sync::MutexGuard<'_, CatalogStore>> {
        if !self.reachable {
            return Err(DashboardError::Connectivity("connection refused".to_string()));
        }
        self.calls.lock().unwrap().push(call);
        Ok(self.store.lock().unwrap())
    }
}

fn not_found(err: CatalogError) -> DashboardError {
    match err {
        CatalogError::NotFound(_) => DashboardError::NotFound,
    }
}

#[async_trait]
impl CatalogApi for FakeApi {
    async fn list_books(&self) -> Result<Vec<Book>> {
        Ok(self.enter("list")?.list().to_vec())
    }

    async fn get_book(&self, id: BookId) -> Result<Book> {
        self.enter("get")?.get(id).cloned().map_err(not_found)
    }

    async fn stats(&self) -> Result<CatalogStats> {
        Ok(self.enter("stats")?.stats())
    }

    async fn create_book(&self, patch: &BookPatch) -> Result<Book> {
        Ok(self.enter("create")?.create(patch.clone()))
    }

    async fn update_book(&self, id: BookId, patch: &BookPatch) -> Result<Book> {
        self.enter("update")?
            .update(id, patch.clone())
            .map_err(not_found)
    }

    async fn delete_book(&self, id: BookId) -> Result<Book> {
        self.enter("delete")?.delete(id).map_err(not_found)
    }
}
