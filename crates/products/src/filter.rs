//! Local (client-side) product filtering and text helpers.

use crate::product::Product;

/// Number of description characters shown on a catalog card.
pub const DESCRIPTION_PREVIEW_LEN: usize = 100;

/// Case-insensitive substring filter over name, code and category.
///
/// A blank term returns the whole listing. Category matches either the wire
/// value or the display label.
pub fn filter_products(products: &[Product], term: &str) -> Vec<Product> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return products.to_vec();
    }

    products
        .iter()
        .filter(|p| {
            p.name.to_lowercase().contains(&term)
                || p.code.to_lowercase().contains(&term)
                || p.category.as_str().contains(&term)
                || p.category.label().to_lowercase().contains(&term)
        })
        .cloned()
        .collect()
}

/// Cut `text` to at most `max` characters, appending `...` when shortened.
pub fn truncate_text(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
