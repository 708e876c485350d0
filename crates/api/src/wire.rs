//! JSON shapes exchanged with the remote product service.
//!
//! Prices travel as JSON numbers; extra fields such as `rating` are ignored.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, NewProduct, Product, ProductId, ProductPatch};

#[derive(Debug, Deserialize)]
pub(crate) struct WireProduct {
    id: u64,
    #[serde(default)]
    title: String,
    #[serde(with = "rust_decimal::serde::float")]
    price: Decimal,
    #[serde(default)]
    description: String,
    #[serde(default)]
    category: String,
    #[serde(default)]
    image: Option<String>,
}

impl TryFrom<WireProduct> for Product {
    type Error = DomainError;

    fn try_from(value: WireProduct) -> Result<Self, Self::Error> {
        let product = Product {
            id: ProductId(value.id),
            title: value.title,
            price: value.price,
            description: value.description,
            category: value.category,
            image: value.image.filter(|image| !image.trim().is_empty()),
        };
        product.validate()?;
        Ok(product)
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct WireNewProduct<'a> {
    title: &'a str,
    #[serde(with = "rust_decimal::serde::float")]
    price: Decimal,
    description: &'a str,
    category: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<&'a str>,
}

impl<'a> From<&'a NewProduct> for WireNewProduct<'a> {
    fn from(value: &'a NewProduct) -> Self {
        Self {
            title: &value.title,
            price: value.price,
            description: &value.description,
            category: &value.category,
            image: value.image.as_deref(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct WirePatch<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
    #[serde(with = "rust_decimal::serde::float_option", skip_serializing_if = "Option::is_none")]
    price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<&'a str>,
    /// `Some(None)` is sent as `null` to clear the image.
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<Option<&'a str>>,
}

impl<'a> From<&'a ProductPatch> for WirePatch<'a> {
    fn from(value: &'a ProductPatch) -> Self {
        Self {
            title: value.title.as_deref(),
            price: value.price,
            description: value.description.as_deref(),
            category: value.category.as_deref(),
            image: value.image.as_ref().map(|image| image.as_deref()),
        }
    }
}

/// Whatever the service answers to a create. Only the id is read, and any
/// other shape (missing fields, empty or non-JSON body) is tolerated.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct WireCreateEcho {
    #[serde(default)]
    pub(crate) id: Option<u64>,
}
