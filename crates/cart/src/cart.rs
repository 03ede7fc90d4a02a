use serde::{Deserialize, Serialize};

use storefront_core::{Money, ProductId};
use storefront_products::DEFAULT_IMAGE;

/// Stock below this many units is flagged as running low.
pub const LOW_STOCK_THRESHOLD: u32 = 5;

/// One line of the cart, denormalized by the server at fetch time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(rename = "_id")]
    pub product_id: ProductId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "codigo")]
    pub code: String,
    #[serde(rename = "precio")]
    pub price: Money,
    #[serde(rename = "imagen", default)]
    pub image: Option<String>,
    #[serde(rename = "stock_disponible")]
    pub available_stock: u32,
    #[serde(rename = "cantidad")]
    pub quantity: u32,
    /// Server-computed `price * quantity`.
    pub subtotal: Money,
}

impl CartItem {
    pub fn stock_level(&self) -> StockLevel {
        StockLevel::classify(self.available_stock)
    }

    pub fn image_url(&self) -> &str {
        match self.image.as_deref() {
            Some(url) if !url.trim().is_empty() => url,
            _ => DEFAULT_IMAGE,
        }
    }
}

/// Cart snapshot as reported by `GET /api/carrito`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Cart {
    #[serde(default)]
    pub items: Vec<CartItem>,
    /// Server-computed sum of subtotals.
    #[serde(default)]
    pub total: Money,
}

impl Cart {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item(&self, product_id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|i| &i.product_id == product_id)
    }
}

/// Body of `POST /api/carrito/agregar` and `PUT /api/carrito/actualizar`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineRequest {
    #[serde(rename = "producto_id")]
    pub product_id: ProductId,
    #[serde(rename = "cantidad")]
    pub quantity: u32,
}

/// Response of `GET /api/carrito/cantidad`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CartCount {
    #[serde(rename = "cantidad")]
    pub count: u32,
}

/// How much stock is left for a cart line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockLevel {
    Out,
    Low(u32),
    Available(u32),
}

impl StockLevel {
    pub fn classify(stock: u32) -> Self {
        match stock {
            0 => StockLevel::Out,
            n if n < LOW_STOCK_THRESHOLD => StockLevel::Low(n),
            n => StockLevel::Available(n),
        }
    }

    pub fn label(&self) -> String {
        match self {
            StockLevel::Out => "Out of stock".to_string(),
            StockLevel::Low(n) => format!("Only {n} left"),
            StockLevel::Available(n) => format!("Stock: {n}"),
        }
    }
}
