//! Admin product manager: the back-office page controller.
//!
//! One form serves both create and edit. Which one is decided by the id of
//! the product being edited; no id means create. Deletion has its own pending
//! target so that confirming a delete never touches the edit state.

use std::cell::RefCell;

use storefront_core::ProductId;
use storefront_products::{CategoryFilter, Product, ProductForm, ProductRowView, filter_products};

use crate::api::StoreApi;
use crate::notify::Notification;
use crate::page::{self, PageView};

const LOAD_FAILED: &str = "Could not load products";
const FETCH_FAILED: &str = "Could not load the product";
const CREATE_FAILED: &str = "Could not create the product";
const UPDATE_FAILED: &str = "Could not update the product";
const DELETE_FAILED: &str = "Could not delete the product";

/// Which submission the form performs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormMode {
    #[default]
    Create,
    Edit(ProductId),
}

impl FormMode {
    pub fn title(&self) -> &'static str {
        match self {
            FormMode::Create => "Create new product",
            FormMode::Edit(_) => "Edit product",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self {
            FormMode::Create => "Create product",
            FormMode::Edit(_) => "Update product",
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, FormMode::Edit(_))
    }
}

/// Product awaiting delete confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteTarget {
    pub id: ProductId,
    pub name: String,
}

/// Rendered elements of the admin page.
pub trait AdminRenderer: PageView {
    /// Replace the table body. An empty slice shows the "no products" state.
    fn render_table(&self, rows: &[ProductRowView]);

    /// Overwrite every form field and switch the form chrome to `mode`.
    fn fill_form(&self, form: &ProductForm, mode: &FormMode);

    /// Open the delete confirmation naming `target`, or close it on `None`.
    fn set_delete_confirmation(&self, target: Option<&DeleteTarget>);
}

#[derive(Debug, Default)]
struct AdminState {
    products: Vec<Product>,
    filter: String,
    mode: FormMode,
    pending_delete: Option<DeleteTarget>,
}

pub struct ProductManager<A, V> {
    api: A,
    view: V,
    state: RefCell<AdminState>,
}

impl<A: StoreApi, V: AdminRenderer> ProductManager<A, V> {
    pub fn new(api: A, view: V) -> Self {
        Self {
            api,
            view,
            state: RefCell::new(AdminState::default()),
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn mode(&self) -> FormMode {
        self.state.borrow().mode.clone()
    }

    pub fn pending_delete(&self) -> Option<DeleteTarget> {
        self.state.borrow().pending_delete.clone()
    }

    pub async fn mount(&self) {
        self.view.fill_form(&ProductForm::default(), &FormMode::Create);
        self.load_products().await;
        page::refresh_badge(&self.api, &self.view).await;
    }

    /// Fetch the full product list and re-apply the current table filter.
    pub async fn load_products(&self) {
        self.view.set_loading(true);
        let result = self.api.list_products(CategoryFilter::All).await;
        self.view.set_loading(false);

        match result {
            Ok(products) => {
                tracing::debug!(count = products.len(), "admin listing loaded");
                self.state.borrow_mut().products = products;
                self.render_table();
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to load admin listing");
                self.view.notify(Notification::error(LOAD_FAILED));
            }
        }
    }

    /// Local table filter; nothing is fetched.
    pub fn filter(&self, term: &str) {
        self.state.borrow_mut().filter = term.to_string();
        self.render_table();
    }

    /// Fetch a product and load it into the form for editing.
    pub async fn begin_edit(&self, product_id: &ProductId) {
        match self.api.get_product(product_id).await {
            Ok(product) => {
                let mode = FormMode::Edit(product.id.clone());
                self.state.borrow_mut().mode = mode.clone();
                self.view.fill_form(&ProductForm::from_product(&product), &mode);
            }
            Err(err) => {
                tracing::warn!(error = %err, %product_id, "failed to load product for editing");
                self.view.notify(Notification::error(err.user_message(FETCH_FAILED)));
            }
        }
    }

    /// Reset the form and return to create mode.
    pub fn cancel_edit(&self) {
        self.state.borrow_mut().mode = FormMode::Create;
        self.view.fill_form(&ProductForm::default(), &FormMode::Create);
    }

    /// Validate and send the form.
    ///
    /// A validation failure is shown and nothing is sent.
    pub async fn submit(&self, form: &ProductForm) {
        let draft = match form.submit() {
            Ok(draft) => draft,
            Err(err) => {
                tracing::debug!(code = err.code(), "product form rejected locally");
                self.view.notify(Notification::error(err.to_string()));
                return;
            }
        };

        let result = match self.mode() {
            FormMode::Create => self
                .api
                .create_product(&draft)
                .await
                .map(|p| (p, "Product created successfully"))
                .map_err(|e| (e, CREATE_FAILED)),
            FormMode::Edit(id) => self
                .api
                .update_product(&id, &draft)
                .await
                .map(|p| (p, "Product updated successfully"))
                .map_err(|e| (e, UPDATE_FAILED)),
        };

        match result {
            Ok((product, message)) => {
                tracing::info!(product_id = %product.id, code = %product.code, "product saved");
                self.view.notify(Notification::success(message));
                self.cancel_edit();
                self.load_products().await;
            }
            Err((err, fallback)) => {
                tracing::warn!(error = %err, "product save rejected");
                self.view.notify(Notification::error(err.user_message(fallback)));
            }
        }
    }

    /// Ask for confirmation before deleting a listed product.
    pub fn request_delete(&self, product_id: &ProductId) {
        let target = {
            let state = self.state.borrow();
            state
                .products
                .iter()
                .find(|p| &p.id == product_id)
                .map(|p| DeleteTarget {
                    id: p.id.clone(),
                    name: p.name.clone(),
                })
        };
        let Some(target) = target else {
            tracing::debug!(%product_id, "delete requested for unlisted product");
            return;
        };

        self.view.set_delete_confirmation(Some(&target));
        self.state.borrow_mut().pending_delete = Some(target);
    }

    pub fn cancel_delete(&self) {
        self.state.borrow_mut().pending_delete = None;
        self.view.set_delete_confirmation(None);
    }

    /// Delete the pending target. The confirmation closes either way.
    pub async fn confirm_delete(&self) {
        let Some(target) = self.pending_delete() else {
            tracing::debug!("delete confirmed without a pending target");
            return;
        };

        let result = self.api.delete_product(&target.id).await;
        self.cancel_delete();

        match result {
            Ok(()) => {
                tracing::info!(product_id = %target.id, "product deleted");
                self.view.notify(Notification::success("Product deleted successfully"));
                if self.mode() == FormMode::Edit(target.id.clone()) {
                    self.cancel_edit();
                }
                self.load_products().await;
            }
            Err(err) => {
                tracing::warn!(error = %err, product_id = %target.id, "product delete rejected");
                self.view.notify(Notification::error(err.user_message(DELETE_FAILED)));
            }
        }
    }

    fn render_table(&self) {
        let rows: Vec<ProductRowView> = {
            let state = self.state.borrow();
            filter_products(&state.products, &state.filter)
                .iter()
                .map(ProductRowView::from_product)
                .collect()
        };
        self.view.render_table(&rows);
    }
}
