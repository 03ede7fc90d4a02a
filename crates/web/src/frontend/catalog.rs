//! Storefront page.

use std::rc::Rc;

use leptos::*;

use storefront_core::ProductId;
use storefront_products::{Category, CategoryFilter, ProductCardView, ProductDetailView};

use crate::api::HttpStoreApi;
use crate::catalog::{CatalogBrowser, CatalogRenderer};
use crate::frontend::app::use_api;
use crate::frontend::shell::{Shell, page_view_via_shell, use_shell};

#[derive(Clone, Copy)]
struct CatalogSignals {
    shell: Shell,
    loading: RwSignal<bool>,
    cards: RwSignal<Option<Vec<ProductCardView>>>,
    title: RwSignal<String>,
    details: RwSignal<Option<ProductDetailView>>,
    search: RwSignal<String>,
}

page_view_via_shell!(CatalogSignals);

impl CatalogRenderer for CatalogSignals {
    fn render_products(&self, cards: &[ProductCardView]) {
        self.cards.set(Some(cards.to_vec()));
    }

    fn set_title(&self, title: &str) {
        self.title.set(title.to_string());
    }

    fn show_details(&self, details: Option<&ProductDetailView>) {
        self.details.set(details.cloned());
    }

    fn set_search_term(&self, term: &str) {
        self.search.set(term.to_string());
    }
}

type Browser = Rc<CatalogBrowser<HttpStoreApi, CatalogSignals>>;

fn spawn_with<F, Fut>(browser: &Browser, f: F)
where
    F: FnOnce(Browser) -> Fut,
    Fut: std::future::Future<Output = ()> + 'static,
{
    spawn_local(f(browser.clone()));
}

#[component]
pub fn CatalogPage() -> impl IntoView {
    let signals = CatalogSignals {
        shell: use_shell(),
        loading: create_rw_signal(false),
        cards: create_rw_signal(None),
        title: create_rw_signal(CategoryFilter::All.title().to_string()),
        details: create_rw_signal(None),
        search: create_rw_signal(String::new()),
    };
    let browser: Browser = Rc::new(CatalogBrowser::new(use_api(), signals));
    spawn_with(&browser, |b| async move { b.mount().await });

    let filters = std::iter::once(CategoryFilter::All)
        .chain(Category::ALL.into_iter().map(CategoryFilter::Only))
        .collect::<Vec<_>>();

    let search_browser = browser.clone();
    let run_search = move || {
        let term = signals.search.get_untracked();
        spawn_with(&search_browser, |b| async move { b.search(&term).await });
    };
    let run_search_key = run_search.clone();

    let grid_browser = browser.clone();
    let modal_browser = browser.clone();

    view! {
        <div class="catalog">
            <nav class="categories">
                {filters.into_iter().map(|filter| {
                    let browser = browser.clone();
                    view! {
                        <button
                            class="boton-categoria"
                            on:click=move |_| {
                                spawn_with(&browser, move |b| async move { b.select_category(filter).await });
                            }
                        >
                            {filter.title()}
                        </button>
                    }
                }).collect_view()}
            </nav>

            <div class="search">
                <input
                    type="text"
                    placeholder="Search products..."
                    prop:value=move || signals.search.get()
                    on:input=move |ev| signals.search.set(event_target_value(&ev))
                    on:keypress=move |ev| {
                        if ev.key() == "Enter" {
                            run_search_key();
                        }
                    }
                />
                <button on:click=move |_| run_search()>"Search"</button>
            </div>

            <h1>{move || signals.title.get()}</h1>

            <Show when=move || signals.loading.get()>
                <div class="loading">"Loading..."</div>
            </Show>

            {move || {
                let browser = grid_browser.clone();
                signals.cards.get().map(|cards| {
                    if cards.is_empty() {
                        view! { <p class="no-results">"No products found."</p> }.into_view()
                    } else {
                        view! {
                            <div class="product-grid">
                                {cards.into_iter().map(|card| product_card(card, &browser)).collect_view()}
                            </div>
                        }.into_view()
                    }
                })
            }}

            {move || {
                let browser = modal_browser.clone();
                signals.details.get().map(|details| product_modal(details, &browser))
            }}
        </div>
    }
}

fn product_card(card: ProductCardView, browser: &Browser) -> impl IntoView {
    let details_browser = browser.clone();
    let add_browser = browser.clone();
    let details_id = card.id.clone();
    let add_id: ProductId = card.id.clone();
    let sold_out = !card.add_enabled;
    let stock_class = if card.in_stock { "stock available" } else { "stock sold-out" };

    view! {
        <div class="product-card">
            <img src=card.image.clone() alt=card.name.clone() class="product-image"/>
            <span class="category-badge">{card.category_label}</span>
            <h3>{card.name.clone()}</h3>
            <p class="product-code">"Code: " {card.code.clone()}</p>
            <p class="product-description">{card.description.clone()}</p>
            <div class="product-footer">
                <span class="product-price">{card.price.clone()}</span>
                <span class=stock_class>
                    {card.stock_label.clone()}
                </span>
            </div>
            <div class="product-actions">
                <button on:click=move |_| {
                    let id = details_id.clone();
                    spawn_with(&details_browser, move |b| async move { b.open_details(&id).await });
                }>
                    "View details"
                </button>
                <button
                    disabled=sold_out
                    on:click=move |_| {
                        let id = add_id.clone();
                        spawn_with(&add_browser, move |b| async move { b.add_to_cart(&id).await });
                    }
                >
                    {if card.add_enabled { "Add" } else { "Out of stock" }}
                </button>
            </div>
        </div>
    }
}

fn product_modal(details: ProductDetailView, browser: &Browser) -> impl IntoView {
    let close_browser = browser.clone();
    let add_browser = browser.clone();
    let sold_out = !details.add_enabled;

    view! {
        <div class="modal-details">
            <div class="modal-content">
                <button class="modal-close" on:click=move |_| close_browser.close_details()>"×"</button>
                <img src=details.image.clone() alt=details.name.clone()/>
                <span class="modal-category">{details.category_label}</span>
                <h2>{details.name.clone()}</h2>
                <p class="modal-code">"Code: " <strong>{details.code.clone()}</strong></p>
                <p class="modal-description">{details.description.clone()}</p>
                <span class="modal-price">{details.price.clone()}</span>
                <span class="modal-stock">{details.stock_label.clone()}</span>
                <button
                    disabled=sold_out
                    on:click=move |_| {
                        spawn_with(&add_browser, |b| async move { b.add_from_details().await });
                    }
                >
                    {if details.add_enabled { "Add to cart" } else { "Out of stock" }}
                </button>
            </div>
        </div>
    }
}
