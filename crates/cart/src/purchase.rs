use serde::{Deserialize, Serialize};

use storefront_core::Money;

/// One line of a completed purchase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchasedItem {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "cantidad")]
    pub quantity: u32,
    #[serde(rename = "precio")]
    pub price: Money,
    pub subtotal: Money,
}

/// Response of `POST /api/carrito/comprar`.
///
/// A purchase can succeed partially: lines the server could not fulfil are
/// dropped and reported in `warnings` instead of failing the whole checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseResult {
    #[serde(rename = "mensaje", default)]
    pub message: Option<String>,
    #[serde(default)]
    pub items: Vec<PurchasedItem>,
    pub total: Money,
    #[serde(rename = "errores", default)]
    pub warnings: Option<Vec<String>>,
}

impl PurchaseResult {
    pub fn warnings(&self) -> &[String] {
        self.warnings.as_deref().unwrap_or(&[])
    }

    pub fn is_partial(&self) -> bool {
        !self.warnings().is_empty()
    }
}
