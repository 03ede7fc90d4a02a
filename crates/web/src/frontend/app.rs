//! Leptos application with routing.

use leptos::*;
use leptos_router::*;

use crate::config::ClientConfig;
use crate::frontend::admin::AdminPage;
use crate::frontend::cart::CartPage;
use crate::frontend::catalog::CatalogPage;
use crate::frontend::shell::{CartBadge, Shell, ToastHost};

/// Main application component.
#[component]
pub fn App() -> impl IntoView {
    let config = ClientConfig::from_window().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "falling back to default client config");
        ClientConfig::default()
    });
    tracing::info!(api_url = %config.api_base_url, "storefront starting");

    provide_context(Shell::new(config.toast_duration));
    provide_context(config);

    view! {
        <Router>
            <header class="navbar">
                <A href="/tienda">"Store"</A>
                <A href="/carrito">"Cart " <CartBadge/></A>
                <A href="/admin/productos">"Admin"</A>
            </header>
            <main>
                <Routes>
                    <Route path="/" view=|| view! { <Redirect path="/tienda"/> }/>
                    <Route path="/tienda" view=CatalogPage/>
                    <Route path="/carrito" view=CartPage/>
                    <Route path="/admin/productos" view=AdminPage/>
                </Routes>
            </main>
            <ToastHost/>
        </Router>
    }
}

/// API client for the current page, built from the config in context.
pub fn use_api() -> crate::api::HttpStoreApi {
    let config = use_context::<ClientConfig>().unwrap_or_default();
    crate::api::HttpStoreApi::new(&config)
}
