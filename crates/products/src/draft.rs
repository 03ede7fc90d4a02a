//! Admin product form and its pre-flight validation.

use rust_decimal::Decimal;
use serde::Serialize;

use storefront_core::{Money, ValidationError, ValidationResult};

use crate::product::{Category, Product};

/// Image path used when a product has none.
pub const DEFAULT_IMAGE: &str = "/static/img/default.jpg";

pub const MIN_CODE_LEN: usize = 3;
pub const MIN_NAME_LEN: usize = 3;
pub const MIN_DESCRIPTION_LEN: usize = 10;

/// Body of `POST /api/productos` and `PUT /api/productos/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductDraft {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "codigo")]
    pub code: String,
    #[serde(rename = "precio")]
    pub price: Money,
    #[serde(rename = "categoria")]
    pub category: Category,
    pub stock: u32,
    #[serde(rename = "imagen")]
    pub image: String,
    #[serde(rename = "descripcion")]
    pub description: String,
}

impl ProductDraft {
    /// Check the form rules in order; the first failing rule wins.
    ///
    /// Lengths are counted in characters, not bytes.
    pub fn validate(&self) -> ValidationResult<()> {
        if self.price <= Decimal::ZERO {
            return Err(ValidationError::PriceNotPositive);
        }
        if self.code.chars().count() < MIN_CODE_LEN {
            return Err(ValidationError::CodeTooShort { min: MIN_CODE_LEN });
        }
        if self.name.chars().count() < MIN_NAME_LEN {
            return Err(ValidationError::NameTooShort { min: MIN_NAME_LEN });
        }
        if self.description.chars().count() < MIN_DESCRIPTION_LEN {
            return Err(ValidationError::DescriptionTooShort {
                min: MIN_DESCRIPTION_LEN,
            });
        }
        Ok(())
    }
}

/// Raw text of the admin form, exactly as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductForm {
    pub name: String,
    pub code: String,
    pub price: String,
    pub category: Category,
    pub stock: String,
    pub image: String,
    pub description: String,
}

impl Default for ProductForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            code: String::new(),
            price: String::new(),
            category: Category::Movies,
            stock: String::new(),
            image: String::new(),
            description: String::new(),
        }
    }
}

impl ProductForm {
    /// Pre-fill the form for editing an existing product.
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            code: product.code.clone(),
            price: product.price.normalize().to_string(),
            category: product.category,
            stock: product.stock.to_string(),
            image: product.image.clone().unwrap_or_default(),
            description: product.description.clone(),
        }
    }

    /// Trim and parse the form into a draft without validating it.
    ///
    /// An unparsable price becomes zero (and so fails validation); an
    /// unparsable stock becomes zero; a blank image becomes the default.
    pub fn to_draft(&self) -> ProductDraft {
        let image = self.image.trim();
        ProductDraft {
            name: self.name.trim().to_string(),
            code: self.code.trim().to_string(),
            price: self.price.trim().parse::<Decimal>().unwrap_or(Decimal::ZERO),
            category: self.category,
            stock: self.stock.trim().parse::<u32>().unwrap_or(0),
            image: if image.is_empty() {
                DEFAULT_IMAGE.to_string()
            } else {
                image.to_string()
            },
            description: self.description.trim().to_string(),
        }
    }

    /// Parse and validate; this is the gate in front of every admin submission.
    pub fn submit(&self) -> ValidationResult<ProductDraft> {
        let draft = self.to_draft();
        draft.validate()?;
        Ok(draft)
    }
}
