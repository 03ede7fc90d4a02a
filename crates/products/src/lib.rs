//! Products/catalog domain module.
//!
//! Wire shapes for products plus the rules the client enforces locally before
//! anything is sent (admin form validation, table filtering). No IO here.

pub mod draft;
pub mod filter;
pub mod product;
pub mod view;

pub use draft::{
    DEFAULT_IMAGE, MIN_CODE_LEN, MIN_DESCRIPTION_LEN, MIN_NAME_LEN, ProductDraft, ProductForm,
};
pub use filter::{DESCRIPTION_PREVIEW_LEN, filter_products, truncate_text};
pub use product::{Category, CategoryFilter, Product};
pub use view::{ProductCardView, ProductDetailView, ProductRowView};
