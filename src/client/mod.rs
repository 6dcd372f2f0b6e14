//! Client layer - the seam between screens and the sales REST API.
//!
//! [`SalesApi`] is what the screens depend on. [`ApiClient`] implements it
//! over HTTP; tests substitute an in-memory implementation.

/// `reqwest` implementation of [`SalesApi`]
pub mod http;

pub use http::ApiClient;

use crate::{
    entities::{ItemPenjualan, Page, PageRequest, Resource},
    errors::Result,
};
use async_trait::async_trait;

/// The resource surface exposed by the API, generic over the entity.
///
/// | Operation | Method | Path                      |
/// |-----------|--------|---------------------------|
/// | list      | GET    | `/api/{resource}`         |
/// | get       | GET    | `/api/{resource}/{key}`   |
/// | create    | POST   | `/api/{resource}`         |
/// | update    | PUT    | `/api/{resource}/{key}`   |
/// | delete    | DELETE | `/api/{resource}/{key}`   |
#[async_trait]
pub trait SalesApi: Send + Sync {
    /// Fetches the default list and returns its `data.data` array.
    async fn list<R: Resource>(&self) -> Result<Vec<R>>;

    /// Fetches one page of the list with `?page=&limit=`.
    async fn list_page<R: Resource>(&self, page: PageRequest) -> Result<Page<R>>;

    /// Fetches a single record.
    async fn get<R: Resource>(&self, key: &R::Key) -> Result<R>;

    /// Creates a record; returns it when the server echoes it back.
    async fn create<R: Resource>(&self, payload: &R::Create) -> Result<Option<R>>;

    /// Updates the mutable fields of a record.
    async fn update<R: Resource>(&self, key: &R::Key, payload: &R::Update) -> Result<Option<R>>;

    /// Deletes a record and returns the server's confirmation message.
    async fn delete<R: Resource>(&self, key: &R::Key) -> Result<String>;

    /// Line items of one sale.
    ///
    /// The API has no per-sale item endpoint, so this lists every item and
    /// keeps those whose `nota` matches.
    async fn items_for_nota(&self, nota: &str) -> Result<Vec<ItemPenjualan>> {
        let items = self.list::<ItemPenjualan>().await?;
        Ok(items.into_iter().filter(|item| item.nota == nota).collect())
    }
}
