pub mod catalog;
pub mod config;
pub mod domain;
pub mod errors;
pub mod routes;
pub mod view;

pub use catalog::{ApiError, CatalogStore, InMemoryProductApi, LocalIdGenerator, ProductApi};
pub use domain::product::{NewProduct, Product, ProductId, ProductPatch};
pub use errors::{ApplicationError, DomainError, InterfaceError};
pub use routes::{Route, RouteError};
pub use view::{
    CategoryFilter, DeleteOutcome, DetailState, DetailView, FilterState, FormErrors, FormField,
    ListView, Notification, PaginationState, ProductForm, SubmitOutcome, ViewError,
};
