//! Presentation models for product listings.

use storefront_core::{ProductId, format_price};

use crate::filter::{DESCRIPTION_PREVIEW_LEN, truncate_text};
use crate::product::{Category, Product};

/// Catalog card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCardView {
    pub id: ProductId,
    pub name: String,
    pub code: String,
    pub category: Category,
    pub category_label: &'static str,
    pub image: String,
    /// Description cut to the preview length.
    pub description: String,
    pub price: String,
    pub stock_label: String,
    pub in_stock: bool,
    /// Add-to-cart is inert when nothing is left.
    pub add_enabled: bool,
}

impl ProductCardView {
    pub fn from_product(product: &Product) -> Self {
        let in_stock = product.in_stock();
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            code: product.code.clone(),
            category: product.category,
            category_label: product.category.label(),
            image: product.image_url().to_string(),
            description: truncate_text(&product.description, DESCRIPTION_PREVIEW_LEN),
            price: format_price(product.price),
            stock_label: if in_stock {
                format!("Available ({})", product.stock)
            } else {
                "Out of stock".to_string()
            },
            in_stock,
            add_enabled: in_stock,
        }
    }
}

/// Detail modal, built from a freshly fetched product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDetailView {
    pub id: ProductId,
    pub name: String,
    pub code: String,
    pub category_label: &'static str,
    pub image: String,
    pub description: String,
    pub price: String,
    pub stock_label: String,
    pub add_enabled: bool,
}

impl ProductDetailView {
    pub fn from_product(product: &Product) -> Self {
        let in_stock = product.in_stock();
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            code: product.code.clone(),
            category_label: product.category.label(),
            image: product.image_url().to_string(),
            description: product.description.clone(),
            price: format_price(product.price),
            stock_label: if in_stock {
                format!("{} available", product.stock)
            } else {
                "Out of stock".to_string()
            },
            add_enabled: in_stock,
        }
    }
}

/// Row of the admin product table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRowView {
    pub id: ProductId,
    pub code: String,
    pub name: String,
    pub category: Category,
    pub category_label: &'static str,
    pub price: String,
    pub stock: u32,
    pub in_stock: bool,
}

impl ProductRowView {
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            code: product.code.clone(),
            name: product.name.clone(),
            category: product.category,
            category_label: product.category.label(),
            price: format_price(product.price),
            stock: product.stock,
            in_stock: product.in_stock(),
        }
    }
}
