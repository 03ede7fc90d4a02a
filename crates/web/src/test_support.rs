//! In-memory doubles for controller tests.
//!
//! `FakeApi` models the storefront server closely enough to exercise every
//! controller path: it keeps a product table and a single session cart, logs
//! every request as `"METHOD /path"`, and can be told to fail the next call
//! of a given operation. `RecordingView` implements every renderer trait and
//! remembers what it was told.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use rust_decimal::Decimal;

use storefront_cart::{
    Cart, CartCount, CartItem, CartLineRequest, CartView, PurchaseResult, PurchasedItem,
    ReceiptView,
};
use storefront_core::ProductId;
use storefront_products::{
    Category, CategoryFilter, Product, ProductCardView, ProductDetailView, ProductDraft,
    ProductForm, ProductRowView,
};

use crate::admin::{AdminRenderer, DeleteTarget, FormMode};
use crate::api::{ApiError, ApiResult, StoreApi};
use crate::cart::CartRenderer;
use crate::catalog::CatalogRenderer;
use crate::notify::Notification;
use crate::page::PageView;

#[derive(Debug, Default)]
struct FakeServer {
    products: Vec<Product>,
    cart: Vec<(ProductId, u32)>,
    next_id: u32,
    requests: Vec<String>,
    sent_lines: Vec<CartLineRequest>,
    sent_drafts: Vec<ProductDraft>,
    failures: HashMap<&'static str, ApiError>,
}

impl FakeServer {
    fn record(&mut self, op: &'static str, request: String) -> ApiResult<()> {
        self.requests.push(request);
        match self.failures.remove(op) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn product(&self, id: &ProductId) -> ApiResult<&Product> {
        self.products
            .iter()
            .find(|p| &p.id == id)
            .ok_or_else(|| rejected(404, "Product not found"))
    }

    fn cart(&self) -> Cart {
        let items: Vec<CartItem> = self
            .cart
            .iter()
            .filter_map(|(id, quantity)| {
                let product = self.products.iter().find(|p| &p.id == id)?;
                Some(CartItem {
                    product_id: product.id.clone(),
                    name: product.name.clone(),
                    code: product.code.clone(),
                    price: product.price,
                    image: product.image.clone(),
                    available_stock: product.stock,
                    quantity: *quantity,
                    subtotal: product.price * Decimal::from(*quantity),
                })
            })
            .collect();
        let total = items.iter().map(|i| i.subtotal).sum();
        Cart { items, total }
    }
}

fn rejected(status: u16, message: &str) -> ApiError {
    ApiError::Rejected {
        status,
        message: Some(message.to_string()),
        details: Vec::new(),
    }
}

fn product(
    id: &str,
    code: &str,
    name: &str,
    category: Category,
    cents: i64,
    stock: u32,
    description: &str,
) -> Product {
    Product {
        id: ProductId::new(id),
        code: code.to_string(),
        name: name.to_string(),
        category,
        price: Decimal::new(cents, 2),
        stock,
        image: None,
        description: description.to_string(),
    }
}

#[derive(Debug, Default)]
pub struct FakeApi {
    server: RefCell<FakeServer>,
    suspend_checkout: Cell<bool>,
}

impl FakeApi {
    /// Three products: `p1` Alien (movie, $10.00, 10 left), `p2` Dune (book,
    /// $19.99, 4 left) and `p3` Dark (series, $7.50, sold out).
    pub fn with_catalog() -> Self {
        let api = Self::default();
        {
            let mut server = api.server.borrow_mut();
            server.products = vec![
                product(
                    "p1",
                    "MOV-001",
                    "Alien",
                    Category::Movies,
                    1000,
                    10,
                    "A commercial crew answers a distress call.",
                ),
                product(
                    "p2",
                    "BOOK-042",
                    "Dune",
                    Category::Books,
                    1999,
                    4,
                    "Politics and spice on a desert planet.",
                ),
                product(
                    "p3",
                    "SER-007",
                    "Dark",
                    Category::Series,
                    750,
                    0,
                    "A missing child exposes four families.",
                ),
            ];
            server.next_id = 4;
        }
        api
    }

    pub fn seed_cart_line(&self, id: &str, quantity: u32) {
        self.server
            .borrow_mut()
            .cart
            .push((ProductId::new(id), quantity));
    }

    pub fn set_stock(&self, id: &str, stock: u32) {
        let mut server = self.server.borrow_mut();
        if let Some(p) = server.products.iter_mut().find(|p| p.id.as_str() == id) {
            p.stock = stock;
        }
    }

    /// Make `checkout` yield to the executor once before answering.
    pub fn suspend_checkout(&self) {
        self.suspend_checkout.set(true);
    }

    /// Make the next call of `op` (a `StoreApi` method name) fail with `err`.
    pub fn fail_next(&self, op: &'static str, err: ApiError) {
        self.server.borrow_mut().failures.insert(op, err);
    }

    pub fn requests(&self) -> Vec<String> {
        self.server.borrow().requests.clone()
    }

    pub fn clear_requests(&self) {
        self.server.borrow_mut().requests.clear();
    }

    pub fn sent_lines(&self) -> Vec<CartLineRequest> {
        self.server.borrow().sent_lines.clone()
    }

    pub fn sent_drafts(&self) -> Vec<ProductDraft> {
        self.server.borrow().sent_drafts.clone()
    }

    pub fn product(&self, id: &str) -> Option<Product> {
        self.server
            .borrow()
            .products
            .iter()
            .find(|p| p.id.as_str() == id)
            .cloned()
    }

    pub fn cart_quantity(&self, id: &str) -> Option<u32> {
        self.server
            .borrow()
            .cart
            .iter()
            .find(|(pid, _)| pid.as_str() == id)
            .map(|(_, q)| *q)
    }
}

impl StoreApi for FakeApi {
    async fn list_products(&self, filter: CategoryFilter) -> ApiResult<Vec<Product>> {
        let mut server = self.server.borrow_mut();
        let request = match filter.query_value() {
            Some(category) => format!("GET /api/productos?categoria={category}"),
            None => "GET /api/productos".to_string(),
        };
        server.record("list_products", request)?;
        Ok(server
            .products
            .iter()
            .filter(|p| match filter {
                CategoryFilter::All => true,
                CategoryFilter::Only(category) => p.category == category,
            })
            .cloned()
            .collect())
    }

    async fn search_products(&self, term: &str) -> ApiResult<Vec<Product>> {
        let mut server = self.server.borrow_mut();
        server.record("search_products", format!("GET /api/productos/buscar?q={term}"))?;
        let needle = term.to_lowercase();
        Ok(server
            .products
            .iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&needle)
                    || p.code.to_lowercase().contains(&needle)
                    || p.description.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect())
    }

    async fn get_product(&self, id: &ProductId) -> ApiResult<Product> {
        let mut server = self.server.borrow_mut();
        server.record("get_product", format!("GET /api/productos/{id}"))?;
        server.product(id).cloned()
    }

    async fn create_product(&self, draft: &ProductDraft) -> ApiResult<Product> {
        let mut server = self.server.borrow_mut();
        server.record("create_product", "POST /api/productos".to_string())?;
        server.sent_drafts.push(draft.clone());
        if server.products.iter().any(|p| p.code == draft.code) {
            return Err(rejected(400, "A product with that code already exists"));
        }
        let id = ProductId::new(format!("p{}", server.next_id));
        server.next_id += 1;
        let created = Product {
            id,
            code: draft.code.clone(),
            name: draft.name.clone(),
            category: draft.category,
            price: draft.price,
            stock: draft.stock,
            image: Some(draft.image.clone()),
            description: draft.description.clone(),
        };
        server.products.push(created.clone());
        Ok(created)
    }

    async fn update_product(&self, id: &ProductId, draft: &ProductDraft) -> ApiResult<Product> {
        let mut server = self.server.borrow_mut();
        server.record("update_product", format!("PUT /api/productos/{id}"))?;
        server.sent_drafts.push(draft.clone());
        let existing = server
            .products
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| rejected(404, "Product not found"))?;
        existing.code = draft.code.clone();
        existing.name = draft.name.clone();
        existing.category = draft.category;
        existing.price = draft.price;
        existing.stock = draft.stock;
        existing.image = Some(draft.image.clone());
        existing.description = draft.description.clone();
        Ok(existing.clone())
    }

    async fn delete_product(&self, id: &ProductId) -> ApiResult<()> {
        let mut server = self.server.borrow_mut();
        server.record("delete_product", format!("DELETE /api/productos/{id}"))?;
        server.product(id)?;
        server.products.retain(|p| &p.id != id);
        Ok(())
    }

    async fn get_cart(&self) -> ApiResult<Cart> {
        let mut server = self.server.borrow_mut();
        server.record("get_cart", "GET /api/carrito".to_string())?;
        Ok(server.cart())
    }

    async fn add_to_cart(&self, line: &CartLineRequest) -> ApiResult<()> {
        let mut server = self.server.borrow_mut();
        server.record("add_to_cart", "POST /api/carrito/agregar".to_string())?;
        server.sent_lines.push(line.clone());
        let stock = server.product(&line.product_id)?.stock;
        let current = server
            .cart
            .iter()
            .find(|(id, _)| id == &line.product_id)
            .map_or(0, |(_, q)| *q);
        if current + line.quantity > stock {
            return Err(rejected(400, &format!("Only {stock} units available")));
        }
        match server.cart.iter_mut().find(|(id, _)| id == &line.product_id) {
            Some((_, quantity)) => *quantity += line.quantity,
            None => server.cart.push((line.product_id.clone(), line.quantity)),
        }
        Ok(())
    }

    async fn update_cart_item(&self, line: &CartLineRequest) -> ApiResult<()> {
        let mut server = self.server.borrow_mut();
        server.record("update_cart_item", "PUT /api/carrito/actualizar".to_string())?;
        server.sent_lines.push(line.clone());
        let stock = server.product(&line.product_id)?.stock;
        if line.quantity > stock {
            return Err(rejected(400, &format!("Only {stock} units available")));
        }
        let (_, quantity) = server
            .cart
            .iter_mut()
            .find(|(id, _)| id == &line.product_id)
            .ok_or_else(|| rejected(404, "Product is not in the cart"))?;
        *quantity = line.quantity;
        Ok(())
    }

    async fn remove_cart_item(&self, id: &ProductId) -> ApiResult<()> {
        let mut server = self.server.borrow_mut();
        server.record("remove_cart_item", format!("DELETE /api/carrito/eliminar/{id}"))?;
        if !server.cart.iter().any(|(pid, _)| pid == id) {
            return Err(rejected(404, "Product is not in the cart"));
        }
        server.cart.retain(|(pid, _)| pid != id);
        Ok(())
    }

    async fn clear_cart(&self) -> ApiResult<()> {
        let mut server = self.server.borrow_mut();
        server.record("clear_cart", "DELETE /api/carrito/vaciar".to_string())?;
        server.cart.clear();
        Ok(())
    }

    async fn checkout(&self) -> ApiResult<PurchaseResult> {
        if self.suspend_checkout.get() {
            tokio::task::yield_now().await;
        }
        let mut server = self.server.borrow_mut();
        server.record("checkout", "POST /api/carrito/comprar".to_string())?;
        if server.cart.is_empty() {
            return Err(rejected(400, "The cart is empty"));
        }

        let lines = std::mem::take(&mut server.cart);
        let mut items = Vec::new();
        let mut warnings = Vec::new();
        for (id, quantity) in lines {
            let Some(product) = server.products.iter_mut().find(|p| p.id == id) else {
                continue;
            };
            if product.stock == 0 {
                warnings.push(format!("{}: out of stock", product.name));
                continue;
            }
            if quantity > product.stock {
                warnings.push(format!("{}: only {} left", product.name, product.stock));
                continue;
            }
            product.stock -= quantity;
            items.push(PurchasedItem {
                name: product.name.clone(),
                quantity,
                price: product.price,
                subtotal: product.price * Decimal::from(quantity),
            });
        }

        if items.is_empty() {
            return Err(ApiError::Rejected {
                status: 400,
                message: Some("Nothing could be purchased".to_string()),
                details: warnings,
            });
        }

        let total = items.iter().map(|i| i.subtotal).sum();
        Ok(PurchaseResult {
            message: Some("Purchase completed".to_string()),
            items,
            total,
            warnings: if warnings.is_empty() { None } else { Some(warnings) },
        })
    }

    async fn cart_count(&self) -> ApiResult<CartCount> {
        let mut server = self.server.borrow_mut();
        server.record("cart_count", "GET /api/carrito/cantidad".to_string())?;
        Ok(CartCount {
            count: server.cart.iter().map(|(_, q)| *q).sum(),
        })
    }
}

#[derive(Debug, Default)]
struct Recorded {
    notifications: Vec<Notification>,
    badge: Option<u32>,
    loading: Vec<bool>,
    cart_views: Vec<CartView>,
    clear_confirmation: Option<bool>,
    checkout_busy: Vec<bool>,
    receipt: Option<ReceiptView>,
    card_renders: Vec<Vec<ProductCardView>>,
    title: Option<String>,
    details: Option<ProductDetailView>,
    search_term: Option<String>,
    row_renders: Vec<Vec<ProductRowView>>,
    form: Option<(ProductForm, FormMode)>,
    delete_confirmation: Option<DeleteTarget>,
}

#[derive(Debug, Default)]
pub struct RecordingView {
    recorded: RefCell<Recorded>,
}

impl RecordingView {
    pub fn notifications(&self) -> Vec<Notification> {
        self.recorded.borrow().notifications.clone()
    }

    pub fn last_notification(&self) -> Option<Notification> {
        self.recorded.borrow().notifications.last().cloned()
    }

    pub fn badge(&self) -> Option<u32> {
        self.recorded.borrow().badge
    }

    pub fn loading_transitions(&self) -> Vec<bool> {
        self.recorded.borrow().loading.clone()
    }

    pub fn cart_view(&self) -> Option<CartView> {
        self.recorded.borrow().cart_views.last().cloned()
    }

    pub fn render_count(&self) -> usize {
        self.recorded.borrow().cart_views.len()
    }

    pub fn clear_confirmation(&self) -> Option<bool> {
        self.recorded.borrow().clear_confirmation
    }

    pub fn busy_transitions(&self) -> Vec<bool> {
        self.recorded.borrow().checkout_busy.clone()
    }

    pub fn receipt(&self) -> Option<ReceiptView> {
        self.recorded.borrow().receipt.clone()
    }

    pub fn cards(&self) -> Option<Vec<ProductCardView>> {
        self.recorded.borrow().card_renders.last().cloned()
    }

    pub fn card_render_count(&self) -> usize {
        self.recorded.borrow().card_renders.len()
    }

    pub fn title(&self) -> Option<String> {
        self.recorded.borrow().title.clone()
    }

    pub fn details(&self) -> Option<ProductDetailView> {
        self.recorded.borrow().details.clone()
    }

    pub fn search_term(&self) -> Option<String> {
        self.recorded.borrow().search_term.clone()
    }

    pub fn rows(&self) -> Option<Vec<ProductRowView>> {
        self.recorded.borrow().row_renders.last().cloned()
    }

    pub fn form(&self) -> Option<(ProductForm, FormMode)> {
        self.recorded.borrow().form.clone()
    }

    pub fn delete_confirmation(&self) -> Option<DeleteTarget> {
        self.recorded.borrow().delete_confirmation.clone()
    }
}

impl PageView for RecordingView {
    fn notify(&self, notification: Notification) {
        self.recorded.borrow_mut().notifications.push(notification);
    }

    fn set_badge(&self, count: u32) {
        self.recorded.borrow_mut().badge = Some(count);
    }

    fn set_loading(&self, loading: bool) {
        self.recorded.borrow_mut().loading.push(loading);
    }
}

impl CartRenderer for RecordingView {
    fn render_cart(&self, view: &CartView) {
        self.recorded.borrow_mut().cart_views.push(view.clone());
    }

    fn set_clear_confirmation(&self, open: bool) {
        self.recorded.borrow_mut().clear_confirmation = Some(open);
    }

    fn set_checkout_busy(&self, busy: bool) {
        self.recorded.borrow_mut().checkout_busy.push(busy);
    }

    fn show_receipt(&self, receipt: &ReceiptView) {
        self.recorded.borrow_mut().receipt = Some(receipt.clone());
    }
}

impl CatalogRenderer for RecordingView {
    fn render_products(&self, cards: &[ProductCardView]) {
        self.recorded.borrow_mut().card_renders.push(cards.to_vec());
    }

    fn set_title(&self, title: &str) {
        self.recorded.borrow_mut().title = Some(title.to_string());
    }

    fn show_details(&self, details: Option<&ProductDetailView>) {
        self.recorded.borrow_mut().details = details.cloned();
    }

    fn set_search_term(&self, term: &str) {
        self.recorded.borrow_mut().search_term = Some(term.to_string());
    }
}

impl AdminRenderer for RecordingView {
    fn render_table(&self, rows: &[ProductRowView]) {
        self.recorded.borrow_mut().row_renders.push(rows.to_vec());
    }

    fn fill_form(&self, form: &ProductForm, mode: &FormMode) {
        self.recorded.borrow_mut().form = Some((form.clone(), mode.clone()));
    }

    fn set_delete_confirmation(&self, target: Option<&DeleteTarget>) {
        self.recorded.borrow_mut().delete_confirmation = target.cloned();
    }
}
