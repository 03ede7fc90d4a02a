//! Cart domain module.
//!
//! The cart is **server-owned**: these types are snapshots of what the API
//! last reported, plus the pure presentation rules derived from them. Nothing
//! here computes an authoritative total.

pub mod cart;
pub mod purchase;
pub mod view;

pub use cart::{Cart, CartCount, CartItem, CartLineRequest, LOW_STOCK_THRESHOLD, StockLevel};
pub use purchase::{PurchaseResult, PurchasedItem};
pub use view::{CartLineView, CartSummaryView, CartView, ReceiptLineView, ReceiptView};
