use async_trait::async_trait;
use thiserror::Error;

use crate::domain::product::{NewProduct, Product, ProductId, ProductPatch};

pub mod ids;
pub mod memory;
pub mod store;

pub use ids::LocalIdGenerator;
pub use memory::InMemoryProductApi;
pub use store::CatalogStore;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("unexpected status {status} from {url}")]
    Status { status: u16, url: String },
    #[error("decode error: {0}")]
    Decode(String),
}

/// Remote product service. Mutating calls are not trusted to persist anything;
/// callers reconcile their own state after a call succeeds.
#[async_trait]
pub trait ProductApi: Send + Sync {
    async fn list(&self) -> Result<Vec<Product>, ApiError>;
    async fn create(&self, input: &NewProduct) -> Result<Product, ApiError>;
    async fn update(&self, id: ProductId, patch: &ProductPatch) -> Result<(), ApiError>;
    async fn delete(&self, id: ProductId) -> Result<(), ApiError>;
}
