//! `storefront-web`
//!
//! **Responsibility:** browser client for the storefront and its back office.
//!
//! This crate provides:
//! - A typed client for the product/cart REST API (`StoreApi`)
//! - One controller per page (catalog, cart, admin) holding that page's
//!   snapshot and all of its stateful logic
//! - The Leptos frontend that binds those controllers to the DOM (`wasm32` only)
//!
//! The client is a **thin shell** around the API: every snapshot is disposable
//! and re-fetched after each mutation.

pub mod admin;
pub mod api;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod notify;
pub mod page;

#[cfg(target_arch = "wasm32")]
pub mod frontend;

#[cfg(test)]
pub(crate) mod test_support;

pub use admin::{AdminRenderer, DeleteTarget, FormMode, ProductManager};
pub use api::{ApiError, ApiResult, HttpStoreApi, StoreApi};
pub use cart::{CartRenderer, CartSynchronizer};
pub use catalog::{CatalogBrowser, CatalogRenderer};
pub use config::ClientConfig;
pub use notify::{Notification, ToastKind};
pub use page::PageView;
