//! Authoritative in-memory catalog mirrored from a [`ProductApi`].
//!
//! The remote service does not persist writes, so every successful mutating
//! call is followed by a local reconciliation step that applies the intended
//! change to the cache regardless of what the service answered. A failed call
//! skips reconciliation and leaves the cache untouched.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::product::{NewProduct, Product, ProductId, ProductPatch};

use super::{ApiError, LocalIdGenerator, ProductApi};

#[derive(Debug, Default)]
struct CacheState {
    products: Vec<Product>,
    loaded: bool,
}

pub struct CatalogStore {
    api: Arc<dyn ProductApi>,
    cache: RwLock<CacheState>,
    ids: LocalIdGenerator,
}

impl CatalogStore {
    pub fn new(api: Arc<dyn ProductApi>) -> Self {
        Self { api, cache: RwLock::new(CacheState::default()), ids: LocalIdGenerator::new() }
    }

    /// Replaces the cache with the remote catalog. Later duplicates of an id are dropped.
    pub async fn fetch_all(&self) -> Result<Vec<Product>, ApiError> {
        let fetched = self.api.list().await?;
        let fetched_count = fetched.len();

        let mut seen = HashSet::with_capacity(fetched_count);
        let products: Vec<Product> =
            fetched.into_iter().filter(|product| seen.insert(product.id)).collect();
        if products.len() != fetched_count {
            warn!(
                event_name = "catalog.store.duplicate_ids_dropped",
                fetched = fetched_count,
                kept = products.len(),
                "remote catalog contained duplicate product ids"
            );
        }

        {
            let mut cache = self.cache.write();
            cache.products = products.clone();
            cache.loaded = true;
        }
        info!(event_name = "catalog.store.fetched", count = products.len(), "catalog refreshed");
        Ok(products)
    }

    pub fn cached(&self) -> Vec<Product> {
        self.cache.read().products.clone()
    }

    pub fn is_loaded(&self) -> bool {
        self.cache.read().loaded
    }

    pub fn get_by_id(&self, id: ProductId) -> Option<Product> {
        self.cache.read().products.iter().find(|product| product.id == id).cloned()
    }

    /// Creates the product remotely, then inserts it at the front under a locally generated id.
    pub async fn create(&self, input: NewProduct) -> Result<Product, ApiError> {
        let correlation_id = Uuid::new_v4().to_string();
        let echoed = self.api.create(&input).await.map_err(|error| {
            warn!(
                event_name = "catalog.store.create_failed",
                correlation_id = %correlation_id,
                error = %error,
                "create call failed; catalog left unchanged"
            );
            error
        })?;

        let mut cache = self.cache.write();
        let id = self.ids.next_id(|candidate| {
            cache.products.iter().any(|product| product.id == candidate)
        });
        let mut product = echoed;
        product.apply_patch(&ProductPatch::from(input));
        product.id = id;
        cache.products.insert(0, product.clone());
        drop(cache);

        info!(
            event_name = "catalog.store.created",
            correlation_id = %correlation_id,
            product_id = %product.id,
            "product created and inserted locally"
        );
        Ok(product)
    }

    /// Sends the patch remotely, then merges it into the cached entry whatever the response was.
    pub async fn update(&self, id: ProductId, patch: ProductPatch) -> Result<(), ApiError> {
        let correlation_id = Uuid::new_v4().to_string();
        self.api.update(id, &patch).await.map_err(|error| {
            warn!(
                event_name = "catalog.store.update_failed",
                correlation_id = %correlation_id,
                product_id = %id,
                error = %error,
                "update call failed; catalog left unchanged"
            );
            error
        })?;

        let applied = {
            let mut cache = self.cache.write();
            match cache.products.iter_mut().find(|product| product.id == id) {
                Some(product) => {
                    product.apply_patch(&patch);
                    true
                }
                None => false,
            }
        };
        info!(
            event_name = "catalog.store.updated",
            correlation_id = %correlation_id,
            product_id = %id,
            applied,
            "product update reconciled locally"
        );
        Ok(())
    }

    /// Sends the delete remotely, then drops the id from the cache.
    pub async fn delete(&self, id: ProductId) -> Result<(), ApiError> {
        let correlation_id = Uuid::new_v4().to_string();
        self.api.delete(id).await.map_err(|error| {
            warn!(
                event_name = "catalog.store.delete_failed",
                correlation_id = %correlation_id,
                product_id = %id,
                error = %error,
                "delete call failed; catalog left unchanged"
            );
            error
        })?;

        self.cache.write().products.retain(|product| product.id != id);
        info!(
            event_name = "catalog.store.deleted",
            correlation_id = %correlation_id,
            product_id = %id,
            "product removed locally"
        );
        Ok(())
    }
}
