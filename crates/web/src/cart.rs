//! Cart synchronizer: the cart page controller.
//!
//! The cart lives on the server. This controller keeps the last snapshot it
//! fetched, never patches it, and re-fetches after every mutation so that what
//! is rendered is always server-confirmed.

use std::cell::RefCell;

use storefront_cart::{Cart, CartLineRequest, CartView, ReceiptView};
use storefront_core::{ProductId, ValidationError, ValidationResult};

use crate::api::StoreApi;
use crate::notify::Notification;
use crate::page::{self, PageView};

const LOAD_FAILED: &str = "Could not load the cart";
const UPDATE_FAILED: &str = "Could not update the quantity";
const REMOVE_FAILED: &str = "Could not remove the product";
const CLEAR_FAILED: &str = "Could not empty the cart";
const CHECKOUT_FAILED: &str = "Could not complete the purchase";
const CART_EMPTY: &str = "Your cart is empty";

/// Rendered elements of the cart page.
pub trait CartRenderer: PageView {
    /// Replace the whole item list and summary.
    fn render_cart(&self, view: &CartView);

    fn set_clear_confirmation(&self, open: bool);

    /// Disable (or re-enable) the checkout trigger.
    fn set_checkout_busy(&self, busy: bool);

    fn show_receipt(&self, receipt: &ReceiptView);
}

#[derive(Debug, Default)]
struct CartState {
    snapshot: Option<Cart>,
    confirm_clear_open: bool,
    checkout_in_flight: bool,
}

pub struct CartSynchronizer<A, V> {
    api: A,
    view: V,
    state: RefCell<CartState>,
}

/// Parse the quantity typed into a line's input.
///
/// Only the leading integer counts, so `"2.5"` is 2 and `"3 units"` is 3.
/// Anything that does not start with a positive integer is rejected.
pub fn parse_quantity(text: &str) -> ValidationResult<u32> {
    let text = text.trim_start();
    let (negative, rest) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let quantity = rest[..end].bytes().fold(0u32, |acc, digit| {
        acc.saturating_mul(10).saturating_add(u32::from(digit - b'0'))
    });

    if end == 0 || negative || quantity < 1 {
        return Err(ValidationError::QuantityBelowOne);
    }
    Ok(quantity)
}

impl<A: StoreApi, V: CartRenderer> CartSynchronizer<A, V> {
    pub fn new(api: A, view: V) -> Self {
        Self {
            api,
            view,
            state: RefCell::new(CartState::default()),
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Last server-confirmed cart, if one was ever loaded.
    pub fn snapshot(&self) -> Option<Cart> {
        self.state.borrow().snapshot.clone()
    }

    /// Page bootstrap.
    pub async fn mount(&self) {
        self.load_cart().await;
        self.refresh_badge().await;
    }

    /// Fetch the cart and rebuild the view from it.
    ///
    /// On failure the previous snapshot and rendering are left untouched.
    pub async fn load_cart(&self) {
        self.view.set_loading(true);
        let result = self.api.get_cart().await;
        self.view.set_loading(false);

        match result {
            Ok(cart) => {
                let view = CartView::from_cart(&cart);
                self.state.borrow_mut().snapshot = Some(cart);
                self.view.render_cart(&view);
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to load cart");
                self.view.notify(Notification::error(LOAD_FAILED));
            }
        }
    }

    /// Ask the server to set a line's quantity.
    ///
    /// Quantities below one are dropped locally without a request.
    pub async fn set_quantity(&self, product_id: &ProductId, quantity: u32) {
        if quantity < 1 {
            tracing::debug!(%product_id, "ignoring quantity below one");
            return;
        }

        let line = CartLineRequest {
            product_id: product_id.clone(),
            quantity,
        };
        match self.api.update_cart_item(&line).await {
            Ok(()) => {
                self.load_cart().await;
                self.refresh_badge().await;
            }
            Err(err) => {
                tracing::warn!(error = %err, %product_id, quantity, "quantity update rejected");
                self.view.notify(Notification::error(err.user_message(UPDATE_FAILED)));
                self.load_cart().await;
            }
        }
    }

    /// Quantity typed into the input field; invalid input restores the server value.
    pub async fn set_quantity_from_input(&self, product_id: &ProductId, text: &str) {
        match parse_quantity(text) {
            Ok(quantity) => self.set_quantity(product_id, quantity).await,
            Err(err) => {
                tracing::debug!(%product_id, input = text, code = err.code(), "invalid quantity input");
                self.load_cart().await;
            }
        }
    }

    /// Remove a line. The view only changes once the server has answered.
    pub async fn remove_item(&self, product_id: &ProductId) {
        match self.api.remove_cart_item(product_id).await {
            Ok(()) => {
                self.view.notify(Notification::success("Product removed from cart"));
                self.load_cart().await;
                self.refresh_badge().await;
            }
            Err(err) => {
                tracing::warn!(error = %err, %product_id, "failed to remove cart item");
                self.view.notify(Notification::error(err.user_message(REMOVE_FAILED)));
                self.load_cart().await;
            }
        }
    }

    /// Open the "empty cart" confirmation.
    pub fn request_clear(&self) {
        self.state.borrow_mut().confirm_clear_open = true;
        self.view.set_clear_confirmation(true);
    }

    pub fn cancel_clear(&self) {
        self.state.borrow_mut().confirm_clear_open = false;
        self.view.set_clear_confirmation(false);
    }

    /// Empty the cart. Does nothing unless the confirmation is open.
    pub async fn confirm_clear(&self) {
        if !self.state.borrow().confirm_clear_open {
            tracing::debug!("clear requested without confirmation");
            return;
        }

        match self.api.clear_cart().await {
            Ok(()) => {
                self.cancel_clear();
                self.view.notify(Notification::success("Cart emptied"));
                self.load_cart().await;
                self.refresh_badge().await;
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to empty cart");
                self.view.notify(Notification::error(err.user_message(CLEAR_FAILED)));
            }
        }
    }

    /// Buy everything in the cart.
    ///
    /// Refused locally when the snapshot is empty; ignored while a previous
    /// checkout is still in flight.
    pub async fn checkout(&self) {
        {
            let mut state = self.state.borrow_mut();
            if state.checkout_in_flight {
                tracing::debug!("checkout already in flight");
                return;
            }
            if state.snapshot.as_ref().is_none_or(Cart::is_empty) {
                drop(state);
                self.view.notify(Notification::error(CART_EMPTY));
                return;
            }
            state.checkout_in_flight = true;
        }
        self.view.set_checkout_busy(true);

        match self.api.checkout().await {
            Ok(result) => {
                if result.is_partial() {
                    tracing::warn!(warnings = ?result.warnings(), "checkout completed partially");
                } else {
                    tracing::info!(items = result.items.len(), "checkout completed");
                }
                self.view.show_receipt(&ReceiptView::from_result(&result));
                self.load_cart().await;
                self.refresh_badge().await;
            }
            Err(err) => {
                tracing::warn!(error = %err, details = ?err.details(), "checkout failed");
                self.view.notify(Notification::error(err.user_message(CHECKOUT_FAILED)));
            }
        }

        self.state.borrow_mut().checkout_in_flight = false;
        self.view.set_checkout_busy(false);
    }

    pub async fn refresh_badge(&self) {
        page::refresh_badge(&self.api, &self.view).await;
    }
}
