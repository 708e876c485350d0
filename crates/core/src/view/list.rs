//! List view controller: search, category filter, pagination, and the
//! add/edit/delete flows on top of a shared [`CatalogStore`].
//!
//! Derived state (`categories`, filtered count, visible page) is recomputed
//! synchronously from the store snapshot after every input change.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::catalog::{ApiError, CatalogStore};
use crate::domain::product::{Product, ProductId};

use super::filter::{distinct_categories, CategoryFilter, FilterState};
use super::form::ProductForm;
use super::pagination::PaginationState;
use super::ViewError;

pub const DEFAULT_NOTIFICATION_TITLE: &str = "Success";
pub const DELETE_CONFIRMATION_PROMPT: &str = "Are you sure you want to delete this product?";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub title: String,
    pub message: String,
}

impl Notification {
    fn success(message: &str) -> Self {
        Self { title: DEFAULT_NOTIFICATION_TITLE.to_string(), message: message.to_string() }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created(Product),
    Updated(ProductId),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Cancelled,
}

pub struct ListView {
    store: Arc<CatalogStore>,
    filter: FilterState,
    pagination: PaginationState,
    categories: Vec<String>,
    filtered_count: usize,
    visible: Vec<Product>,
    form: ProductForm,
    editing: bool,
    notification: Option<Notification>,
}

impl ListView {
    pub fn new(store: Arc<CatalogStore>, page_size: usize) -> Self {
        let mut view = Self {
            store,
            filter: FilterState::default(),
            pagination: PaginationState::new(page_size),
            categories: Vec::new(),
            filtered_count: 0,
            visible: Vec::new(),
            form: ProductForm::default(),
            editing: false,
            notification: None,
        };
        view.refresh();
        view
    }

    /// Uses the cached catalog when it has products, otherwise fetches it.
    pub async fn load(&mut self) -> Result<(), ApiError> {
        if self.store.cached().is_empty() {
            self.store.fetch_all().await?;
        }
        self.refresh();
        Ok(())
    }

    pub async fn reload(&mut self) -> Result<(), ApiError> {
        self.store.fetch_all().await?;
        self.refresh();
        Ok(())
    }

    /// Recomputes categories, the filtered count, and the visible page.
    pub fn refresh(&mut self) {
        let snapshot = self.store.cached();
        self.categories = distinct_categories(&snapshot);
        let filtered = self.filter.apply(&snapshot);
        self.filtered_count = filtered.len();
        self.visible = self.pagination.slice(&filtered).to_vec();
        debug!(
            event_name = "view.list.refreshed",
            catalog = snapshot.len(),
            filtered = self.filtered_count,
            visible = self.visible.len(),
            page = self.pagination.current_page(),
            "list view recomputed"
        );
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.filter.search_text = text.into();
        self.pagination.reset();
        self.refresh();
    }

    pub fn set_category(&mut self, category: &str) {
        self.filter.category = CategoryFilter::parse(category);
        self.pagination.reset();
        self.refresh();
    }

    pub fn next_page(&mut self) {
        self.pagination.next();
        self.refresh();
    }

    pub fn prev_page(&mut self) {
        if self.pagination.prev() {
            self.refresh();
        }
    }

    pub fn go_to_page(&mut self, page: usize) {
        self.pagination.go_to(page);
        self.refresh();
    }

    pub fn has_next_page(&self) -> bool {
        self.pagination.has_next(self.filtered_count)
    }

    pub fn total_pages(&self) -> usize {
        self.pagination.total_pages(self.filtered_count)
    }

    pub fn current_page(&self) -> usize {
        self.pagination.current_page()
    }

    pub fn page_size(&self) -> usize {
        self.pagination.page_size()
    }

    pub fn filtered_count(&self) -> usize {
        self.filtered_count
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn visible_products(&self) -> &[Product] {
        &self.visible
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn store(&self) -> &Arc<CatalogStore> {
        &self.store
    }

    pub fn form(&self) -> &ProductForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ProductForm {
        &mut self.form
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// Loads a cached product into the form and switches to edit mode.
    pub fn begin_edit(&mut self, id: ProductId) -> Result<(), ViewError> {
        let product = self.store.get_by_id(id).ok_or(ViewError::UnknownProduct(id))?;
        self.form = ProductForm::from_product(&product);
        self.editing = true;
        Ok(())
    }

    pub fn reset_form(&mut self) {
        self.form.reset();
        self.editing = false;
    }

    /// Validates the form, then creates or updates through the store.
    ///
    /// Invalid input makes no remote call. On a failed call the form is kept
    /// as typed and no notification is raised.
    pub async fn submit_form(&mut self) -> Result<SubmitOutcome, ViewError> {
        let valid = self.form.validate(&self.categories)?;

        let editing_id = valid.id.filter(|_| self.editing);
        let outcome = match editing_id {
            Some(id) => {
                self.store.update(id, valid.into_patch()).await?;
                SubmitOutcome::Updated(id)
            }
            None => SubmitOutcome::Created(self.store.create(valid.input).await?),
        };

        self.reset_form();
        self.refresh();
        self.notification = Some(Notification::success(match outcome {
            SubmitOutcome::Created(_) => "Product added successfully",
            SubmitOutcome::Updated(_) => "Product updated successfully",
        }));
        Ok(outcome)
    }

    /// Deletes after `confirm` approves the prompt; a declined prompt makes no remote call.
    pub async fn delete_product(
        &mut self,
        id: ProductId,
        confirm: impl FnOnce(&str) -> bool,
    ) -> Result<DeleteOutcome, ViewError> {
        if !confirm(DELETE_CONFIRMATION_PROMPT) {
            return Ok(DeleteOutcome::Cancelled);
        }

        self.store.delete(id).await?;
        self.refresh();
        self.notification = Some(Notification::success("Product deleted successfully"));
        Ok(DeleteOutcome::Deleted)
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    pub fn dismiss_notification(&mut self) {
        self.notification = None;
    }
}
