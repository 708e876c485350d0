use thiserror::Error;

use crate::catalog::ApiError;
use crate::config::ConfigError;
use crate::domain::product::ProductId;
use crate::view::form::FormErrors;
use crate::view::ViewError;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid product: {reason}")]
    InvalidProduct { id: Option<ProductId>, reason: String },
}

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Validation(#[from] FormErrors),
    #[error("product {0} was not found")]
    NotFound(ProductId),
    #[error("integration failure: {0}")]
    Integration(#[from] ApiError),
    #[error("configuration failure: {0}")]
    Configuration(#[from] ConfigError),
}

impl From<ViewError> for ApplicationError {
    fn from(value: ViewError) -> Self {
        match value {
            ViewError::Form(errors) => Self::Validation(errors),
            ViewError::Api(error) => Self::Integration(error),
            ViewError::UnknownProduct(id) => Self::NotFound(id),
        }
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InterfaceError {
    #[error("bad request: {message}")]
    BadRequest { message: String, correlation_id: String },
    #[error("not found: {message}")]
    NotFound { message: String, correlation_id: String },
    #[error("service unavailable: {message}")]
    ServiceUnavailable { message: String, correlation_id: String },
    #[error("internal error: {message}")]
    Internal { message: String, correlation_id: String },
}

impl InterfaceError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::BadRequest { .. } => {
                "The request could not be processed. Check inputs and try again."
            }
            Self::NotFound { .. } => "The requested product does not exist.",
            Self::ServiceUnavailable { .. } => {
                "The product service is temporarily unavailable. Please retry shortly."
            }
            Self::Internal { .. } => "An unexpected internal error occurred.",
        }
    }

    /// Stable machine-readable class used in CLI payloads.
    pub fn error_class(&self) -> &'static str {
        match self {
            Self::BadRequest { .. } => "bad_request",
            Self::NotFound { .. } => "not_found",
            Self::ServiceUnavailable { .. } => "service_unavailable",
            Self::Internal { .. } => "internal",
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            Self::BadRequest { .. } => 2,
            Self::NotFound { .. } => 3,
            Self::ServiceUnavailable { .. } => 4,
            Self::Internal { .. } => 5,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::BadRequest { message, .. }
            | Self::NotFound { message, .. }
            | Self::ServiceUnavailable { message, .. }
            | Self::Internal { message, .. } => message,
        }
    }

    pub fn correlation_id(&self) -> &str {
        match self {
            Self::BadRequest { correlation_id, .. }
            | Self::NotFound { correlation_id, .. }
            | Self::ServiceUnavailable { correlation_id, .. }
            | Self::Internal { correlation_id, .. } => correlation_id,
        }
    }
}

impl ApplicationError {
    pub fn into_interface(self, correlation_id: impl Into<String>) -> InterfaceError {
        let correlation_id = correlation_id.into();
        let mut mapped = InterfaceError::from(self);
        match &mut mapped {
            InterfaceError::BadRequest { correlation_id: id, .. }
            | InterfaceError::NotFound { correlation_id: id, .. }
            | InterfaceError::ServiceUnavailable { correlation_id: id, .. }
            | InterfaceError::Internal { correlation_id: id, .. } => *id = correlation_id,
        }
        mapped
    }
}

impl From<ApplicationError> for InterfaceError {
    fn from(value: ApplicationError) -> Self {
        let unassigned = || "unassigned".to_owned();
        match value {
            ApplicationError::Domain(error) => {
                Self::BadRequest { message: error.to_string(), correlation_id: unassigned() }
            }
            ApplicationError::Validation(errors) => {
                Self::BadRequest { message: errors.to_string(), correlation_id: unassigned() }
            }
            ApplicationError::NotFound(id) => Self::NotFound {
                message: format!("product {id} was not found"),
                correlation_id: unassigned(),
            },
            ApplicationError::Integration(error) => {
                Self::ServiceUnavailable { message: error.to_string(), correlation_id: unassigned() }
            }
            ApplicationError::Configuration(error) => {
                Self::Internal { message: error.to_string(), correlation_id: unassigned() }
            }
        }
    }
}
