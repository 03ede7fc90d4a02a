//! Catalog browser: the storefront page controller.

use std::cell::RefCell;

use storefront_cart::CartLineRequest;
use storefront_core::ProductId;
use storefront_products::{CategoryFilter, Product, ProductCardView, ProductDetailView};

use crate::api::StoreApi;
use crate::notify::Notification;
use crate::page::{self, PageView};

const LOAD_FAILED: &str = "Could not load products. Please try again.";
const SEARCH_FAILED: &str = "Could not search products. Please try again.";
const DETAILS_FAILED: &str = "Could not load the product details";
const ADD_FAILED: &str = "Could not add the product to the cart";

/// Rendered elements of the catalog page.
pub trait CatalogRenderer: PageView {
    /// Replace the product grid. An empty slice shows the "no results" state.
    fn render_products(&self, cards: &[ProductCardView]);

    fn set_title(&self, title: &str);

    /// Open the detail modal with `details`, or close it on `None`.
    fn show_details(&self, details: Option<&ProductDetailView>);

    fn set_search_term(&self, term: &str);
}

#[derive(Debug, Default)]
struct CatalogState {
    filter: CategoryFilter,
    products: Vec<Product>,
    details: Option<Product>,
}

pub struct CatalogBrowser<A, V> {
    api: A,
    view: V,
    state: RefCell<CatalogState>,
}

/// Heading shown above search results.
pub fn search_title(term: &str) -> String {
    format!("Search results: \"{term}\"")
}

impl<A: StoreApi, V: CatalogRenderer> CatalogBrowser<A, V> {
    pub fn new(api: A, view: V) -> Self {
        Self {
            api,
            view,
            state: RefCell::new(CatalogState::default()),
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn filter(&self) -> CategoryFilter {
        self.state.borrow().filter
    }

    pub fn products(&self) -> Vec<Product> {
        self.state.borrow().products.clone()
    }

    pub async fn mount(&self) {
        let filter = self.filter();
        self.view.set_title(filter.title());
        self.load_products().await;
        self.refresh_badge().await;
    }

    /// Switch category. Clears any search term.
    pub async fn select_category(&self, filter: CategoryFilter) {
        self.state.borrow_mut().filter = filter;
        self.view.set_search_term("");
        self.view.set_title(filter.title());
        self.load_products().await;
    }

    /// Fetch the listing for the selected category.
    pub async fn load_products(&self) {
        let filter = self.filter();
        self.view.set_loading(true);
        let result = self.api.list_products(filter).await;
        self.view.set_loading(false);

        match result {
            Ok(products) => self.replace_listing(products),
            Err(err) => {
                tracing::error!(error = %err, category = ?filter.query_value(), "failed to load products");
                self.view.notify(Notification::error(LOAD_FAILED));
            }
        }
    }

    /// Server-side search. A blank term falls back to the category listing.
    pub async fn search(&self, term: &str) {
        let term = term.trim();
        if term.is_empty() {
            self.load_products().await;
            return;
        }

        self.view.set_loading(true);
        let result = self.api.search_products(term).await;
        self.view.set_loading(false);

        match result {
            Ok(products) => {
                tracing::debug!(term, hits = products.len(), "search completed");
                self.view.set_title(&search_title(term));
                self.replace_listing(products);
            }
            Err(err) => {
                tracing::error!(error = %err, term, "product search failed");
                self.view.notify(Notification::error(SEARCH_FAILED));
            }
        }
    }

    /// Fetch one product and open the detail modal.
    pub async fn open_details(&self, product_id: &ProductId) {
        match self.api.get_product(product_id).await {
            Ok(product) => {
                let details = ProductDetailView::from_product(&product);
                self.state.borrow_mut().details = Some(product);
                self.view.show_details(Some(&details));
            }
            Err(err) => {
                tracing::error!(error = %err, %product_id, "failed to load product details");
                self.view.notify(Notification::error(DETAILS_FAILED));
            }
        }
    }

    pub fn close_details(&self) {
        self.state.borrow_mut().details = None;
        self.view.show_details(None);
    }

    /// Add one unit to the cart.
    ///
    /// Ignored when the product is known to be sold out. Only the badge is
    /// refreshed afterwards; listed stock is not.
    pub async fn add_to_cart(&self, product_id: &ProductId) {
        if self.known_stock(product_id) == Some(0) {
            tracing::debug!(%product_id, "ignoring add for sold-out product");
            return;
        }

        let line = CartLineRequest {
            product_id: product_id.clone(),
            quantity: 1,
        };
        match self.api.add_to_cart(&line).await {
            Ok(()) => {
                tracing::info!(%product_id, "product added to cart");
                self.view.notify(Notification::success("Product added to cart!"));
                self.refresh_badge().await;
            }
            Err(err) => {
                tracing::warn!(error = %err, %product_id, "add to cart rejected");
                self.view.notify(Notification::error(err.user_message(ADD_FAILED)));
            }
        }
    }

    /// Add the product shown in the detail modal, then close the modal.
    pub async fn add_from_details(&self) {
        let product_id = match self.state.borrow().details.as_ref() {
            Some(product) => product.id.clone(),
            None => return,
        };
        self.add_to_cart(&product_id).await;
        self.close_details();
    }

    pub async fn refresh_badge(&self) {
        page::refresh_badge(&self.api, &self.view).await;
    }

    fn replace_listing(&self, products: Vec<Product>) {
        let cards: Vec<ProductCardView> =
            products.iter().map(ProductCardView::from_product).collect();
        self.state.borrow_mut().products = products;
        self.view.render_products(&cards);
    }

    fn known_stock(&self, product_id: &ProductId) -> Option<u32> {
        let state = self.state.borrow();
        state
            .details
            .iter()
            .chain(state.products.iter())
            .find(|p| &p.id == product_id)
            .map(|p| p.stock)
    }
}
