//! Page chrome shared by every route: toast host and cart badge.

use std::time::Duration;

use leptos::*;

use crate::notify::Notification;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub notification: Notification,
}

/// Signals owned by the app root and handed to every page through context.
#[derive(Debug, Clone, Copy)]
pub struct Shell {
    pub toast: RwSignal<Option<Toast>>,
    pub badge: RwSignal<u32>,
    toast_seq: RwSignal<u64>,
    toast_duration: Duration,
}

impl Shell {
    pub fn new(toast_duration: Duration) -> Self {
        Self {
            toast: create_rw_signal(None),
            badge: create_rw_signal(0),
            toast_seq: create_rw_signal(0),
            toast_duration,
        }
    }

    /// Show `notification`, replacing any toast on screen.
    ///
    /// The timer only clears the toast it was started for.
    pub fn show_toast(&self, notification: Notification) {
        let id = self.toast_seq.get_untracked() + 1;
        self.toast_seq.set(id);
        self.toast.set(Some(Toast { id, notification }));

        let toast = self.toast;
        set_timeout(
            move || {
                let current = toast.with_untracked(|t| t.as_ref().map(|t| t.id));
                if current == Some(id) {
                    toast.set(None);
                }
            },
            self.toast_duration,
        );
    }
}

pub fn use_shell() -> Shell {
    use_context::<Shell>().unwrap_or_else(|| {
        tracing::warn!("shell context missing, using a detached one");
        Shell::new(crate::config::TOAST_DURATION)
    })
}

/// Implements `PageView` for a signal bundle that has `shell` and `loading` fields.
macro_rules! page_view_via_shell {
    ($ty:ty) => {
        impl $crate::page::PageView for $ty {
            fn notify(&self, notification: $crate::notify::Notification) {
                self.shell.show_toast(notification);
            }

            fn set_badge(&self, count: u32) {
                self.shell.badge.set(count);
            }

            fn set_loading(&self, loading: bool) {
                self.loading.set(loading);
            }
        }
    };
}

pub(crate) use page_view_via_shell;

#[component]
pub fn ToastHost() -> impl IntoView {
    let shell = use_shell();

    view! {
        {move || {
            shell.toast.get().map(|toast| {
                view! {
                    <div class=format!("{} show", toast.notification.kind.css_class())>
                        {toast.notification.message}
                    </div>
                }
            })
        }}
    }
}

/// Cart badge; hidden while the cart is empty.
#[component]
pub fn CartBadge() -> impl IntoView {
    let shell = use_shell();

    view! {
        <span
            class="cart-badge"
            style:display=move || if shell.badge.get() > 0 { "inline-block" } else { "none" }
        >
            {move || shell.badge.get()}
        </span>
    }
}
