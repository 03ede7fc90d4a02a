//! Cart page.

use std::rc::Rc;

use leptos::*;

use storefront_cart::{CartLineView, CartView, ReceiptView};

use crate::api::HttpStoreApi;
use crate::cart::{CartRenderer, CartSynchronizer};
use crate::frontend::app::use_api;
use crate::frontend::shell::{Shell, page_view_via_shell, use_shell};

#[derive(Clone, Copy)]
struct CartSignals {
    shell: Shell,
    loading: RwSignal<bool>,
    cart: RwSignal<Option<CartView>>,
    confirm_clear: RwSignal<bool>,
    checkout_busy: RwSignal<bool>,
    receipt: RwSignal<Option<ReceiptView>>,
}

page_view_via_shell!(CartSignals);

impl CartRenderer for CartSignals {
    fn render_cart(&self, view: &CartView) {
        self.cart.set(Some(view.clone()));
    }

    fn set_clear_confirmation(&self, open: bool) {
        self.confirm_clear.set(open);
    }

    fn set_checkout_busy(&self, busy: bool) {
        self.checkout_busy.set(busy);
    }

    fn show_receipt(&self, receipt: &ReceiptView) {
        self.receipt.set(Some(receipt.clone()));
    }
}

type Synchronizer = Rc<CartSynchronizer<HttpStoreApi, CartSignals>>;

fn spawn_with<F, Fut>(sync: &Synchronizer, f: F)
where
    F: FnOnce(Synchronizer) -> Fut,
    Fut: std::future::Future<Output = ()> + 'static,
{
    spawn_local(f(sync.clone()));
}

#[component]
pub fn CartPage() -> impl IntoView {
    let signals = CartSignals {
        shell: use_shell(),
        loading: create_rw_signal(false),
        cart: create_rw_signal(None),
        confirm_clear: create_rw_signal(false),
        checkout_busy: create_rw_signal(false),
        receipt: create_rw_signal(None),
    };
    let sync: Synchronizer = Rc::new(CartSynchronizer::new(use_api(), signals));
    spawn_with(&sync, |s| async move { s.mount().await });

    let body_sync = sync.clone();
    let modal_sync = sync.clone();

    view! {
        <div class="cart-page">
            <h1>"Shopping cart"</h1>

            <Show when=move || signals.loading.get()>
                <div class="loading">"Loading cart..."</div>
            </Show>

            {move || {
                let sync = body_sync.clone();
                signals.cart.get().map(|cart| cart_body(cart, &sync, signals))
            }}

            {move || {
                let confirm = modal_sync.clone();
                let cancel = modal_sync.clone();
                signals.confirm_clear.get().then(|| view! {
                    <div class="modal-confirm">
                        <p>"Remove every product from the cart?"</p>
                        <button on:click=move |_| {
                            spawn_with(&confirm, |s| async move { s.confirm_clear().await });
                        }>"Empty cart"</button>
                        <button on:click=move |_| cancel.cancel_clear()>"Cancel"</button>
                    </div>
                })
            }}

            {move || signals.receipt.get().map(|receipt| receipt_modal(receipt, signals))}
        </div>
    }
}

fn cart_body(cart: CartView, sync: &Synchronizer, signals: CartSignals) -> View {
    let Some(summary) = cart.summary.clone() else {
        return view! {
            <div class="empty-cart">
                <p>"Your cart is empty"</p>
                <a href="/tienda">"Continue shopping"</a>
            </div>
        }
        .into_view();
    };

    let clear_sync = sync.clone();
    let checkout_sync = sync.clone();

    view! {
        <div class="cart-items">
            {cart.lines.into_iter().map(|line| cart_line(line, sync)).collect_view()}
        </div>
        <aside class="cart-summary">
            <p>"Subtotal: " <span>{summary.subtotal}</span></p>
            <p class="total">"Total: " <span>{summary.total}</span></p>
            <button
                class="btn-checkout"
                disabled=move || signals.checkout_busy.get()
                on:click=move |_| {
                    spawn_with(&checkout_sync, |s| async move { s.checkout().await });
                }
            >
                {move || if signals.checkout_busy.get() { "Processing..." } else { "Checkout" }}
            </button>
            <button class="btn-clear" on:click=move |_| clear_sync.request_clear()>
                "Empty cart"
            </button>
        </aside>
    }
    .into_view()
}

fn cart_line(line: CartLineView, sync: &Synchronizer) -> impl IntoView {
    let dec_sync = sync.clone();
    let inc_sync = sync.clone();
    let input_sync = sync.clone();
    let remove_sync = sync.clone();
    let dec_id = line.product_id.clone();
    let inc_id = line.product_id.clone();
    let input_id = line.product_id.clone();
    let remove_id = line.product_id.clone();
    let dec_target = line.decrement_target();
    let inc_target = line.increment_target();
    let row_disabled = !line.quantity_enabled;
    let dec_disabled = !line.decrement_enabled;
    let inc_disabled = !line.increment_enabled;

    view! {
        <div class="cart-item">
            <img src=line.image.clone() alt=line.name.clone()/>
            <div class="item-info">
                <h3>{line.name.clone()}</h3>
                <p class="item-code">"Code: " {line.code.clone()}</p>
                <p class="item-price">{line.unit_price.clone()}</p>
                <p class="item-stock">{line.stock_level.label()}</p>
            </div>
            <div class="item-quantity">
                <button
                    disabled=dec_disabled
                    on:click=move |_| {
                        let id = dec_id.clone();
                        spawn_with(&dec_sync, move |s| async move { s.set_quantity(&id, dec_target).await });
                    }
                >"-"</button>
                <input
                    type="number"
                    min="1"
                    max=line.max_quantity
                    disabled=row_disabled
                    prop:value=line.quantity
                    on:change=move |ev| {
                        let id = input_id.clone();
                        let text = event_target_value(&ev);
                        spawn_with(&input_sync, move |s| async move {
                            s.set_quantity_from_input(&id, &text).await
                        });
                    }
                />
                <button
                    disabled=inc_disabled
                    on:click=move |_| {
                        let id = inc_id.clone();
                        spawn_with(&inc_sync, move |s| async move { s.set_quantity(&id, inc_target).await });
                    }
                >"+"</button>
            </div>
            <p class="item-subtotal">{line.subtotal.clone()}</p>
            <button
                class="btn-remove"
                on:click=move |_| {
                    let id = remove_id.clone();
                    spawn_with(&remove_sync, move |s| async move { s.remove_item(&id).await });
                }
            >"Remove"</button>
        </div>
    }
}

fn receipt_modal(receipt: ReceiptView, signals: CartSignals) -> impl IntoView {
    let has_warnings = !receipt.warnings.is_empty();

    view! {
        <div class="modal-receipt">
            <h2>{receipt.message.clone().unwrap_or_else(|| "Purchase completed".to_string())}</h2>
            <ul>
                {receipt.lines.into_iter().map(|line| view! {
                    <li>{line.name} " x" {line.quantity} " @ " {line.price} " = " {line.subtotal}</li>
                }).collect_view()}
            </ul>
            <p class="total">"Total: " {receipt.total}</p>
            <Show when=move || has_warnings>
                <p class="warning">"Some products could not be purchased:"</p>
            </Show>
            <ul class="warnings">
                {receipt.warnings.into_iter().map(|w| view! { <li>{w}</li> }).collect_view()}
            </ul>
            <button on:click=move |_| signals.receipt.set(None)>"Close"</button>
        </div>
    }
}
