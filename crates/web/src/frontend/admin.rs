//! Admin product management page.

use std::rc::Rc;
use std::str::FromStr;

use leptos::*;

use storefront_products::{Category, ProductForm, ProductRowView};

use crate::admin::{AdminRenderer, DeleteTarget, FormMode, ProductManager};
use crate::api::HttpStoreApi;
use crate::frontend::app::use_api;
use crate::frontend::shell::{Shell, page_view_via_shell, use_shell};

#[derive(Clone, Copy)]
struct AdminSignals {
    shell: Shell,
    loading: RwSignal<bool>,
    rows: RwSignal<Option<Vec<ProductRowView>>>,
    form: RwSignal<ProductForm>,
    mode: RwSignal<FormMode>,
    delete_target: RwSignal<Option<DeleteTarget>>,
}

page_view_via_shell!(AdminSignals);

impl AdminRenderer for AdminSignals {
    fn render_table(&self, rows: &[ProductRowView]) {
        self.rows.set(Some(rows.to_vec()));
    }

    fn fill_form(&self, form: &ProductForm, mode: &FormMode) {
        self.form.set(form.clone());
        self.mode.set(mode.clone());
    }

    fn set_delete_confirmation(&self, target: Option<&DeleteTarget>) {
        self.delete_target.set(target.cloned());
    }
}

type Manager = Rc<ProductManager<HttpStoreApi, AdminSignals>>;

fn spawn_with<F, Fut>(manager: &Manager, f: F)
where
    F: FnOnce(Manager) -> Fut,
    Fut: std::future::Future<Output = ()> + 'static,
{
    spawn_local(f(manager.clone()));
}

/// Text input bound to one field of the form signal.
fn text_field(
    form: RwSignal<ProductForm>,
    label: &'static str,
    input_type: &'static str,
    get: fn(&ProductForm) -> String,
    set: fn(&mut ProductForm, String),
) -> impl IntoView {
    view! {
        <label>
            {label}
            <input
                type=input_type
                prop:value=move || form.with(get)
                on:input=move |ev| form.update(|f| set(f, event_target_value(&ev)))
            />
        </label>
    }
}

#[component]
pub fn AdminPage() -> impl IntoView {
    let signals = AdminSignals {
        shell: use_shell(),
        loading: create_rw_signal(false),
        rows: create_rw_signal(None),
        form: create_rw_signal(ProductForm::default()),
        mode: create_rw_signal(FormMode::Create),
        delete_target: create_rw_signal(None),
    };
    let manager: Manager = Rc::new(ProductManager::new(use_api(), signals));
    spawn_with(&manager, |m| async move { m.mount().await });

    let form = signals.form;
    let submit_manager = manager.clone();
    let cancel_manager = manager.clone();
    let filter_manager = manager.clone();
    let table_manager = manager.clone();
    let modal_manager = manager.clone();

    view! {
        <div class="admin">
            <section class="admin-form">
                <h2>{move || signals.mode.with(FormMode::title)}</h2>
                <form on:submit=move |ev| {
                    ev.prevent_default();
                    let current = form.get_untracked();
                    spawn_with(&submit_manager, move |m| async move { m.submit(&current).await });
                }>
                    {text_field(form, "Name", "text", |f| f.name.clone(), |f, v| f.name = v)}
                    {text_field(form, "Code", "text", |f| f.code.clone(), |f, v| f.code = v)}
                    {text_field(form, "Price", "number", |f| f.price.clone(), |f, v| f.price = v)}
                    <label>
                        "Category"
                        <select
                            prop:value=move || form.with(|f| f.category.as_str())
                            on:change=move |ev| {
                                match Category::from_str(&event_target_value(&ev)) {
                                    Ok(category) => form.update(|f| f.category = category),
                                    Err(e) => tracing::warn!(error = %e, "unexpected category option"),
                                }
                            }
                        >
                            {Category::ALL.into_iter().map(|c| view! {
                                <option value=c.as_str()>{c.label()}</option>
                            }).collect_view()}
                        </select>
                    </label>
                    {text_field(form, "Stock", "number", |f| f.stock.clone(), |f, v| f.stock = v)}
                    {text_field(form, "Image URL", "text", |f| f.image.clone(), |f, v| f.image = v)}
                    <label>
                        "Description"
                        <textarea
                            prop:value=move || form.with(|f| f.description.clone())
                            on:input=move |ev| form.update(|f| f.description = event_target_value(&ev))
                        ></textarea>
                    </label>
                    <button type="submit">{move || signals.mode.with(FormMode::submit_label)}</button>
                    <Show when=move || signals.mode.with(FormMode::is_editing)>
                        {
                            let cancel_manager = cancel_manager.clone();
                            view! {
                                <button type="button" on:click=move |_| cancel_manager.cancel_edit()>
                                    "Cancel"
                                </button>
                            }
                        }
                    </Show>
                </form>
            </section>

            <section class="admin-table">
                <input
                    type="text"
                    placeholder="Filter by name, code or category"
                    on:input=move |ev| filter_manager.filter(&event_target_value(&ev))
                />
                <Show when=move || signals.loading.get()>
                    <div class="loading">"Loading products..."</div>
                </Show>
                {move || {
                    let manager = table_manager.clone();
                    signals.rows.get().map(|rows| product_table(rows, &manager))
                }}
            </section>

            {move || {
                let confirm = modal_manager.clone();
                let cancel = modal_manager.clone();
                signals.delete_target.get().map(|target| view! {
                    <div class="modal-confirm">
                        <p>"Delete " <strong>{target.name}</strong> "?"</p>
                        <button on:click=move |_| {
                            spawn_with(&confirm, |m| async move { m.confirm_delete().await });
                        }>"Delete"</button>
                        <button on:click=move |_| cancel.cancel_delete()>"Cancel"</button>
                    </div>
                })
            }}
        </div>
    }
}

fn product_table(rows: Vec<ProductRowView>, manager: &Manager) -> View {
    if rows.is_empty() {
        return view! { <p class="no-products">"No products yet."</p> }.into_view();
    }

    view! {
        <table>
            <thead>
                <tr>
                    <th>"Code"</th>
                    <th>"Name"</th>
                    <th>"Category"</th>
                    <th>"Price"</th>
                    <th>"Stock"</th>
                    <th>"Actions"</th>
                </tr>
            </thead>
            <tbody>
                {rows.into_iter().map(|row| {
                    let edit_manager = manager.clone();
                    let delete_manager = manager.clone();
                    let edit_id = row.id.clone();
                    let delete_id = row.id.clone();
                    let category_class = format!("category-badge category-{}", row.category.as_str());
                    let stock_class = if row.in_stock { "stock-badge available" } else { "stock-badge sold-out" };
                    view! {
                        <tr>
                            <td><strong>{row.code}</strong></td>
                            <td>{row.name}</td>
                            <td><span class=category_class>{row.category_label}</span></td>
                            <td>{row.price}</td>
                            <td><span class=stock_class>{row.stock}</span></td>
                            <td class="actions">
                                <button title="Edit" on:click=move |_| {
                                    let id = edit_id.clone();
                                    spawn_with(&edit_manager, move |m| async move { m.begin_edit(&id).await });
                                }>"Edit"</button>
                                <button title="Delete" on:click=move |_| delete_manager.request_delete(&delete_id)>
                                    "Delete"
                                </button>
                            </td>
                        </tr>
                    }
                }).collect_view()}
            </tbody>
        </table>
    }
    .into_view()
}
