//! Presentation models derived from cart snapshots.
//!
//! Every view is rebuilt from scratch from the latest snapshot; there is no
//! incremental patching. Money labels come straight from server values.

use storefront_core::{ProductId, format_price};

use crate::cart::{Cart, CartItem, StockLevel};
use crate::purchase::PurchaseResult;

/// One rendered cart line with its control states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLineView {
    pub product_id: ProductId,
    pub name: String,
    pub code: String,
    pub image: String,
    pub unit_price: String,
    pub stock_level: StockLevel,
    pub quantity: u32,
    pub max_quantity: u32,
    pub subtotal: String,
    /// The whole quantity row is inert when nothing is left in stock.
    pub quantity_enabled: bool,
    pub decrement_enabled: bool,
    pub increment_enabled: bool,
}

impl CartLineView {
    pub fn from_item(item: &CartItem) -> Self {
        let quantity_enabled = item.available_stock > 0;
        Self {
            product_id: item.product_id.clone(),
            name: item.name.clone(),
            code: item.code.clone(),
            image: item.image_url().to_string(),
            unit_price: format!("{} each", format_price(item.price)),
            stock_level: item.stock_level(),
            quantity: item.quantity,
            max_quantity: item.available_stock,
            subtotal: format_price(item.subtotal),
            quantity_enabled,
            decrement_enabled: quantity_enabled && item.quantity > 1,
            increment_enabled: quantity_enabled && item.quantity < item.available_stock,
        }
    }

    pub fn decrement_target(&self) -> u32 {
        self.quantity.saturating_sub(1)
    }

    pub fn increment_target(&self) -> u32 {
        self.quantity.saturating_add(1)
    }
}

/// Summary panel. Both rows show the server-reported total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartSummaryView {
    pub subtotal: String,
    pub total: String,
}

/// Whole cart page body.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    /// `None` renders the empty state (no summary, no "clear" control).
    pub summary: Option<CartSummaryView>,
}

impl CartView {
    pub fn from_cart(cart: &Cart) -> Self {
        if cart.is_empty() {
            return Self::default();
        }

        let total = format_price(cart.total);
        Self {
            lines: cart.items.iter().map(CartLineView::from_item).collect(),
            summary: Some(CartSummaryView {
                subtotal: total.clone(),
                total,
            }),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptLineView {
    pub name: String,
    pub quantity: u32,
    pub price: String,
    pub subtotal: String,
}

/// Purchase receipt shown after a successful checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptView {
    pub message: Option<String>,
    pub lines: Vec<ReceiptLineView>,
    pub total: String,
    pub warnings: Vec<String>,
}

impl ReceiptView {
    pub fn from_result(result: &PurchaseResult) -> Self {
        Self {
            message: result.message.clone(),
            lines: result
                .items
                .iter()
                .map(|item| ReceiptLineView {
                    name: item.name.clone(),
                    quantity: item.quantity,
                    price: format_price(item.price),
                    subtotal: format_price(item.subtotal),
                })
                .collect(),
            total: format_price(result.total),
            warnings: result.warnings().to_vec(),
        }
    }
}
