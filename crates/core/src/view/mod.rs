use thiserror::Error;

use crate::catalog::ApiError;
use crate::domain::product::ProductId;

pub mod detail;
pub mod filter;
pub mod form;
pub mod list;
pub mod pagination;

pub use detail::{DetailState, DetailView};
pub use filter::{distinct_categories, CategoryFilter, FilterState, ALL_CATEGORIES};
pub use form::{FieldError, FieldErrorKind, FormErrors, FormField, ProductForm};
pub use list::{DeleteOutcome, ListView, Notification, SubmitOutcome};
pub use pagination::{PaginationState, DEFAULT_PAGE_SIZE};

#[derive(Debug, Error)]
pub enum ViewError {
    #[error(transparent)]
    Form(#[from] FormErrors),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("product {0} is not in the catalog")]
    UnknownProduct(ProductId),
}
