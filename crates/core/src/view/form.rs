use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::domain::product::{NewProduct, Product, ProductId, ProductPatch};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    Title,
    Price,
    Description,
    Category,
    Image,
}

impl FormField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Price => "price",
            Self::Description => "description",
            Self::Category => "category",
            Self::Image => "image",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "title" => Some(Self::Title),
            "price" => Some(Self::Price),
            "description" => Some(Self::Description),
            "category" => Some(Self::Category),
            "image" => Some(Self::Image),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum FieldErrorKind {
    #[serde(rename = "required")]
    Required,
    #[serde(rename = "invalidNumber")]
    InvalidNumber,
    #[serde(rename = "min")]
    BelowMinimum,
    #[serde(rename = "invalidCategory")]
    InvalidCategory,
}

impl FieldErrorKind {
    /// Error key as exposed to the form surface.
    pub fn code(self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::InvalidNumber => "invalidNumber",
            Self::BelowMinimum => "min",
            Self::InvalidCategory => "invalidCategory",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: FormField,
    pub kind: FieldErrorKind,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Error, Serialize)]
#[error("invalid form:{}", summarize(.errors))]
#[serde(transparent)]
pub struct FormErrors {
    errors: Vec<FieldError>,
}

fn summarize(errors: &[FieldError]) -> String {
    errors.iter().map(|error| format!(" {}={}", error.field.as_str(), error.kind.code())).collect()
}

impl FormErrors {
    pub fn push(&mut self, field: FormField, kind: FieldErrorKind) {
        self.errors.push(FieldError { field, kind });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn for_field(&self, field: FormField) -> Option<FieldErrorKind> {
        self.errors.iter().find(|error| error.field == field).map(|error| error.kind)
    }
}

/// Smallest price the form accepts.
pub fn minimum_price() -> Decimal {
    Decimal::new(1, 2)
}

/// Raw add/edit form input. `id` is set only while editing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProductForm {
    pub id: Option<ProductId>,
    pub title: String,
    pub price: String,
    pub description: String,
    pub category: String,
    /// Optional; blank means no image.
    pub image: String,
}

/// A form that passed validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidProduct {
    pub id: Option<ProductId>,
    pub input: NewProduct,
}

impl ValidProduct {
    pub fn into_patch(self) -> ProductPatch {
        ProductPatch::from(self.input)
    }
}

impl ProductForm {
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: Some(product.id),
            title: product.title.clone(),
            price: product.price.to_string(),
            description: product.description.clone(),
            category: product.category.clone(),
            image: product.image.clone().unwrap_or_default(),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Title => self.title = value,
            FormField::Price => self.price = value,
            FormField::Description => self.description = value,
            FormField::Category => self.category = value,
            FormField::Image => self.image = value,
        }
    }

    /// Collects the first failing rule of every field. `known_categories` is the
    /// category list currently derived from the catalog.
    pub fn validate(&self, known_categories: &[String]) -> Result<ValidProduct, FormErrors> {
        let mut errors = FormErrors::default();

        let title = self.title.trim();
        if title.is_empty() {
            errors.push(FormField::Title, FieldErrorKind::Required);
        }

        let price = match self.price.trim() {
            "" => {
                errors.push(FormField::Price, FieldErrorKind::Required);
                None
            }
            raw => match Decimal::from_str(raw) {
                Ok(price) if price >= minimum_price() => Some(price),
                Ok(_) => {
                    errors.push(FormField::Price, FieldErrorKind::BelowMinimum);
                    None
                }
                Err(_) => {
                    errors.push(FormField::Price, FieldErrorKind::InvalidNumber);
                    None
                }
            },
        };

        let description = self.description.trim();
        if description.is_empty() {
            errors.push(FormField::Description, FieldErrorKind::Required);
        }

        let category = self.category.as_str();
        if category.trim().is_empty() {
            errors.push(FormField::Category, FieldErrorKind::Required);
        } else if !known_categories.iter().any(|known| known == category) {
            errors.push(FormField::Category, FieldErrorKind::InvalidCategory);
        }

        let image = Some(self.image.trim()).filter(|image| !image.is_empty());

        match price {
            Some(price) if errors.is_empty() => Ok(ValidProduct {
                id: self.id,
                input: NewProduct {
                    title: title.to_string(),
                    price,
                    description: description.to_string(),
                    category: category.to_string(),
                    image: image.map(str::to_string),
                },
            }),
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{FieldErrorKind, FormField, ProductForm};
    use crate::domain::product::{Product, ProductId};

    fn categories() -> Vec<String> {
        vec!["clothes".to_string(), "home".to_string()]
    }

    fn filled() -> ProductForm {
        ProductForm {
            id: None,
            title: "Lamp".to_string(),
            price: "19.99".to_string(),
            description: "desk lamp".to_string(),
            category: "home".to_string(),
            image: String::new(),
        }
    }

    #[test]
    fn complete_form_produces_new_product() {
        let valid = filled().validate(&categories()).expect("form should validate");

        assert_eq!(valid.id, None);
        assert_eq!(valid.input.title, "Lamp");
        assert_eq!(valid.input.price, Decimal::new(1999, 2));
        assert_eq!(valid.input.category, "home");
        assert_eq!(valid.input.image, None);
    }

    #[test]
    fn image_is_optional_and_trimmed() {
        let mut form = filled();
        form.set(FormField::Image, "  https://example.test/lamp.png ");

        let valid = form.validate(&categories()).expect("form should validate");
        assert_eq!(valid.input.image.as_deref(), Some("https://example.test/lamp.png"));
    }

    #[test]
    fn empty_form_reports_required_on_every_field() {
        let errors = ProductForm::default().validate(&categories()).expect_err("must fail");

        for field in
            [FormField::Title, FormField::Price, FormField::Description, FormField::Category]
        {
            assert_eq!(errors.for_field(field), Some(FieldErrorKind::Required));
        }
    }

    #[test]
    fn price_below_one_cent_is_rejected() {
        let mut form = filled();
        form.set(FormField::Price, "0");
        let errors = form.validate(&categories()).expect_err("must fail");
        assert_eq!(errors.for_field(FormField::Price), Some(FieldErrorKind::BelowMinimum));

        form.set(FormField::Price, "-3");
        let errors = form.validate(&categories()).expect_err("must fail");
        assert_eq!(errors.for_field(FormField::Price), Some(FieldErrorKind::BelowMinimum));

        form.set(FormField::Price, "0.01");
        assert!(form.validate(&categories()).is_ok());
    }

    #[test]
    fn non_numeric_price_is_rejected() {
        let mut form = filled();
        form.set(FormField::Price, "cheap");

        let errors = form.validate(&categories()).expect_err("must fail");
        assert_eq!(errors.for_field(FormField::Price), Some(FieldErrorKind::InvalidNumber));
    }

    #[test]
    fn unknown_category_is_flagged_with_named_error() {
        let mut form = filled();
        form.set(FormField::Category, "garden");

        let errors = form.validate(&categories()).expect_err("must fail");
        assert_eq!(errors.for_field(FormField::Category), Some(FieldErrorKind::InvalidCategory));
        assert_eq!(errors.to_string(), "invalid form: category=invalidCategory");
    }

    #[test]
    fn editing_form_keeps_product_id() {
        let product = Product {
            id: ProductId(7),
            title: "Mug".to_string(),
            price: Decimal::new(500, 2),
            description: "ceramic".to_string(),
            category: "home".to_string(),
            image: None,
        };

        let valid = ProductForm::from_product(&product).validate(&categories()).expect("valid");
        assert_eq!(valid.id, Some(ProductId(7)));
        assert_eq!(valid.into_patch().price, Some(Decimal::new(500, 2)));
    }
}
