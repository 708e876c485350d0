use thiserror::Error;

use crate::domain::product::ProductId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    List,
    Detail(ProductId),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("no route matches `{0}`")]
    Unknown(String),
    #[error("`{0}` is not a valid product id")]
    InvalidId(String),
}

impl Route {
    /// `/` is the list; `/product/{id}` (or the legacy `/producto/{id}`) is a detail page.
    pub fn parse(path: &str) -> Result<Self, RouteError> {
        let trimmed = path.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Ok(Self::List);
        }

        let mut segments = trimmed.trim_start_matches('/').split('/');
        match (segments.next(), segments.next(), segments.next()) {
            (Some("product" | "producto"), Some(raw_id), None) => raw_id
                .parse::<ProductId>()
                .map(Self::Detail)
                .map_err(|_| RouteError::InvalidId(raw_id.to_string())),
            _ => Err(RouteError::Unknown(path.to_string())),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Self::List => "/".to_string(),
            Self::Detail(id) => format!("/product/{id}"),
        }
    }
}
