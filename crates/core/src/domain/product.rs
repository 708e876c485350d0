use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u64);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ProductId {
    type Err = std::num::ParseIntError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        value.trim().parse::<u64>().map(Self)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: Decimal,
    pub description: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Product {
    /// Checks the field shapes every cached product must satisfy.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.title.trim().is_empty() {
            return Err(DomainError::InvalidProduct {
                id: Some(self.id),
                reason: "title must not be empty".to_string(),
            });
        }
        if self.price <= Decimal::ZERO {
            return Err(DomainError::InvalidProduct {
                id: Some(self.id),
                reason: format!("price must be positive, got {}", self.price),
            });
        }
        Ok(())
    }

    /// Merges every field present in `patch` over this product. The id never changes.
    pub fn apply_patch(&mut self, patch: &ProductPatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(category) = &patch.category {
            self.category = category.clone();
        }
        if let Some(image) = &patch.image {
            self.image = image.clone();
        }
    }
}

/// Payload for creating a product; the id is assigned locally after the remote call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub title: String,
    pub price: Decimal,
    pub description: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl NewProduct {
    pub fn into_product(self, id: ProductId) -> Product {
        Product {
            id,
            title: self.title,
            price: self.price,
            description: self.description,
            category: self.category,
            image: self.image,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// `Some(None)` clears the image; `None` leaves it unchanged.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<Option<String>>,
}

impl ProductPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.price.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.image.is_none()
    }
}

impl From<NewProduct> for ProductPatch {
    fn from(value: NewProduct) -> Self {
        Self {
            title: Some(value.title),
            price: Some(value.price),
            description: Some(value.description),
            category: Some(value.category),
            image: Some(value.image),
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{Product, ProductId, ProductPatch};
    use crate::errors::DomainError;

    fn shirt() -> Product {
        Product {
            id: ProductId(1),
            title: "Shirt".to_string(),
            price: Decimal::new(1000, 2),
            description: "cotton".to_string(),
            category: "clothes".to_string(),
            image: None,
        }
    }

    #[test]
    fn patch_overrides_only_present_fields() {
        let mut product = shirt();
        product.apply_patch(&ProductPatch {
            price: Some(Decimal::new(1250, 2)),
            ..ProductPatch::default()
        });

        assert_eq!(product.price, Decimal::new(1250, 2));
        assert_eq!(product.title, "Shirt");
        assert_eq!(product.category, "clothes");
        assert_eq!(product.id, ProductId(1));
    }

    #[test]
    fn patch_can_set_or_clear_image() {
        let mut product = shirt();
        product.apply_patch(&ProductPatch {
            image: Some(Some("https://example.test/shirt.png".to_string())),
            ..ProductPatch::default()
        });
        assert_eq!(product.image.as_deref(), Some("https://example.test/shirt.png"));

        product.apply_patch(&ProductPatch::default());
        assert!(product.image.is_some());

        product.apply_patch(&ProductPatch { image: Some(None), ..ProductPatch::default() });
        assert_eq!(product.image, None);
    }

    #[test]
    fn non_positive_price_is_rejected() {
        let mut product = shirt();
        product.price = Decimal::ZERO;

        assert!(matches!(
            product.validate(),
            Err(DomainError::InvalidProduct { id: Some(ProductId(1)), .. })
        ));
    }

    #[test]
    fn product_id_parses_from_route_segment() {
        assert_eq!(" 42 ".parse::<ProductId>().ok(), Some(ProductId(42)));
        assert!("abc".parse::<ProductId>().is_err());
    }
}
