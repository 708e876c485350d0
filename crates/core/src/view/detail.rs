use std::sync::Arc;

use tracing::info;

use crate::catalog::{ApiError, CatalogStore};
use crate::domain::product::{Product, ProductId};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DetailState {
    Found(Product),
    NotFound(ProductId),
}

impl DetailState {
    pub fn product(&self) -> Option<&Product> {
        match self {
            Self::Found(product) => Some(product),
            Self::NotFound(_) => None,
        }
    }
}

/// Single-product view backed by the shared store.
pub struct DetailView {
    store: Arc<CatalogStore>,
}

impl DetailView {
    pub fn new(store: Arc<CatalogStore>) -> Self {
        Self { store }
    }

    /// Looks the id up locally, refetching the whole catalog once on a miss.
    pub async fn load(&self, id: ProductId) -> Result<DetailState, ApiError> {
        if let Some(product) = self.store.get_by_id(id) {
            return Ok(DetailState::Found(product));
        }

        let products = self.store.fetch_all().await?;
        match products.into_iter().find(|product| product.id == id) {
            Some(product) => Ok(DetailState::Found(product)),
            None => {
                info!(
                    event_name = "view.detail.not_found",
                    product_id = %id,
                    "product missing after catalog refetch"
                );
                Ok(DetailState::NotFound(id))
            }
        }
    }
}
