//! Behaviour shared by every page: toasts, the loading indicator and the cart badge.

use crate::api::StoreApi;
use crate::notify::Notification;

/// Rendered elements every page owns.
pub trait PageView {
    fn notify(&self, notification: Notification);

    /// Update every cart badge on the page; a count of zero hides them.
    fn set_badge(&self, count: u32);

    fn set_loading(&self, loading: bool);
}

/// Re-derive the cart badge from the count endpoint.
///
/// The badge is decoration: failures are logged and never shown to the user.
pub async fn refresh_badge<A: StoreApi, V: PageView>(api: &A, view: &V) {
    match api.cart_count().await {
        Ok(count) => view.set_badge(count.count),
        Err(err) => tracing::warn!(error = %err, "failed to refresh cart badge"),
    }
}
