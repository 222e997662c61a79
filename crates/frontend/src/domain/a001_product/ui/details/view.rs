use super::model::{fetch_brands, fetch_categories, fetch_product, save_product, CatalogRef};
use super::view_model::ProductDetailsVm;
use crate::shared::state::autosave::{autosave_tick, AutosaveController, AUTOSAVE_INTERVAL_MS};
use crate::shared::state::draft_store::{default_backend, DraftSlot, DraftStorage};
use contracts::domain::a001_product::{ProductFormData, ProductId};
use gloo_timers::future::TimeoutFuture;
use leptos::ev::Event;
use leptos::prelude::*;
use leptos::task::spawn_local;
use send_wrapper::SendWrapper;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;

fn event_target_value(ev: &Event) -> String {
    ev.target()
        .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        .map(|input: web_sys::HtmlInputElement| input.value())
        .unwrap_or_default()
}

fn event_target_textarea_value(ev: &Event) -> String {
    ev.target()
        .and_then(|t| t.dyn_into::<web_sys::HtmlTextAreaElement>().ok())
        .map(|textarea: web_sys::HtmlTextAreaElement| textarea.value())
        .unwrap_or_default()
}

fn event_target_select_value(ev: &Event) -> String {
    ev.target()
        .and_then(|t| t.dyn_into::<web_sys::HtmlSelectElement>().ok())
        .map(|select: web_sys::HtmlSelectElement| select.value())
        .unwrap_or_default()
}

type ProductDraftSlot = DraftSlot<ProductFormData, Box<dyn DraftStorage>>;

#[component]
pub fn ProductDetails(
    id: Option<ProductId>,
    #[prop(into)] on_saved: Callback<()>,
    #[prop(into)] on_cancel: Callback<()>,
) -> impl IntoView {
    let vm = ProductDetailsVm::new(id);

    // Draft slot scoped to this form session: edit forms get their own key,
    // so drafts of different products never collide.
    let draft_key = match id {
        Some(product_id) => format!("product-form-draft:{}", product_id.as_string()),
        None => "product-form-draft:new".to_string(),
    };
    let draft: Rc<RefCell<ProductDraftSlot>> = Rc::new(RefCell::new(DraftSlot::new(
        draft_key,
        default_backend(),
    )));

    // Restore a recent draft before the first render. A recovered draft wins
    // over the server copy, so the entity fetch below is skipped.
    let recovered = draft.borrow_mut().load();
    let has_recovered = recovered.is_some();
    if let Some(form) = recovered {
        vm.restore(form);
        vm.success
            .set(Some("Восстановлен несохранённый черновик".to_string()));
    }

    // Reference data for the dropdowns
    let categories = RwSignal::new(Vec::<CatalogRef>::new());
    let brands = RwSignal::new(Vec::<CatalogRef>::new());
    spawn_local(async move {
        match fetch_categories().await {
            Ok(list) => categories.set(list),
            Err(e) => log::warn!("категории не загружены: {}", e),
        }
    });
    spawn_local(async move {
        match fetch_brands().await {
            Ok(list) => brands.set(list),
            Err(e) => log::warn!("бренды не загружены: {}", e),
        }
    });

    // Load the entity in edit mode
    if let Some(product_id) = id {
        if !has_recovered {
            spawn_local(async move {
                match fetch_product(product_id).await {
                    Ok(form) => vm.restore(form),
                    Err(e) => vm.error.set(Some(e)),
                }
            });
        }
    }

    // Autosave: armed while the form is mounted, disarmed on unmount.
    let controller = {
        let draft = draft.clone();
        let mut warned = false;
        AutosaveController::start(AUTOSAVE_INTERVAL_MS, move || {
            autosave_tick(
                &mut *draft.borrow_mut(),
                &vm.snapshot(),
                vm.saving.get_untracked(),
                &mut warned,
            );
        })
    };
    // on_cleanup demands Send; the controller holds JS handles, so it rides
    // in a SendWrapper (CSR is single-threaded).
    let controller = SendWrapper::new(controller);
    on_cleanup(move || drop(controller));

    let draft_for_save = draft.clone();
    let handle_save = move |_| {
        if !vm.validate_all() {
            return;
        }
        vm.saving.set(true);
        vm.error.set(None);
        let draft = draft_for_save.clone();
        spawn_local(async move {
            match save_product(vm.id.get_untracked(), &vm.snapshot()).await {
                Ok(saved) => {
                    vm.id.set(Some(saved.id));
                    draft.borrow_mut().clear();
                    vm.saving.set(false);
                    vm.success.set(Some("Сохранено".to_string()));
                    on_saved.run(());
                    TimeoutFuture::new(2000).await;
                    vm.success.set(None);
                }
                Err(e) => {
                    vm.saving.set(false);
                    vm.error.set(Some(e));
                }
            }
        });
    };

    // The draft is kept on cancel: the user may come back to finish.
    let handle_cancel = move |_| on_cancel.run(());

    let name_error = vm.field_error("name");
    let article_error = vm.field_error("article");
    let description_error = vm.field_error("description");
    let price_error = vm.field_error("price");
    let weight_error = vm.field_error("weight");
    let category_error = vm.field_error("categoryId");
    let brand_error = vm.field_error("brandId");
    let save_disabled = vm.is_save_disabled();

    view! {
        <div class="product-details">
            <h2>{move || if vm.id.get().is_some() { "Товар" } else { "Новый товар" }}</h2>

            {move || vm.error.get().map(|e| view! { <div class="alert alert-danger">{e}</div> })}
            {move || {
                vm.success.get().map(|m| view! { <div class="alert alert-success">{m}</div> })
            }}

            <div class="form-group">
                <label>"Наименование"</label>
                <input
                    type="text"
                    class="form-control"
                    prop:value=move || vm.name.get()
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        vm.touch_field("name", &value);
                        vm.name.set(value);
                    }
                />
                {move || name_error.get().map(|msg| view! { <span class="field-error">{msg}</span> })}
            </div>

            <div class="form-group">
                <label>"Артикул"</label>
                <input
                    type="text"
                    class="form-control"
                    prop:value=move || vm.article.get()
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        vm.touch_field("article", &value);
                        vm.article.set(value);
                    }
                />
                {move || {
                    article_error.get().map(|msg| view! { <span class="field-error">{msg}</span> })
                }}
            </div>

            <div class="form-group">
                <label>"Описание"</label>
                <textarea
                    class="form-control"
                    prop:value=move || vm.description.get()
                    on:input=move |ev| {
                        let value = event_target_textarea_value(&ev);
                        vm.touch_field("description", &value);
                        vm.description.set(value);
                    }
                ></textarea>
                {move || {
                    description_error
                        .get()
                        .map(|msg| view! { <span class="field-error">{msg}</span> })
                }}
            </div>

            <div class="form-row">
                <div class="form-group">
                    <label>"Цена"</label>
                    <input
                        type="text"
                        class="form-control"
                        prop:value=move || vm.price.get()
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            vm.touch_field("price", &value);
                            vm.price.set(value);
                        }
                    />
                    {move || {
                        price_error.get().map(|msg| view! { <span class="field-error">{msg}</span> })
                    }}
                </div>

                <div class="form-group">
                    <label>"Вес, кг"</label>
                    <input
                        type="text"
                        class="form-control"
                        prop:value=move || vm.weight.get()
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            vm.touch_field("weight", &value);
                            vm.weight.set(value);
                        }
                    />
                    {move || {
                        weight_error.get().map(|msg| view! { <span class="field-error">{msg}</span> })
                    }}
                </div>
            </div>

            <div class="form-row">
                <div class="form-group">
                    <label>"Категория"</label>
                    <select
                        class="form-control"
                        on:change=move |ev| {
                            vm.category_id.set(event_target_select_value(&ev).parse::<i64>().ok());
                            vm.clear_field_error("categoryId");
                        }
                    >
                        <option value="" selected=move || vm.category_id.get().is_none()>
                            "— не выбрано —"
                        </option>
                        {move || {
                            categories
                                .get()
                                .iter()
                                .map(|category| {
                                    let category_id = category.id;
                                    view! {
                                        <option
                                            value=category_id.to_string()
                                            selected=move || vm.category_id.get() == Some(category_id)
                                        >
                                            {category.name.clone()}
                                        </option>
                                    }
                                })
                                .collect_view()
                        }}
                    </select>
                    {move || {
                        category_error
                            .get()
                            .map(|msg| view! { <span class="field-error">{msg}</span> })
                    }}
                </div>

                <div class="form-group">
                    <label>"Бренд"</label>
                    <select
                        class="form-control"
                        on:change=move |ev| {
                            vm.brand_id.set(event_target_select_value(&ev).parse::<i64>().ok());
                            vm.clear_field_error("brandId");
                        }
                    >
                        <option value="" selected=move || vm.brand_id.get().is_none()>
                            "— не выбрано —"
                        </option>
                        {move || {
                            brands
                                .get()
                                .iter()
                                .map(|brand| {
                                    let brand_id = brand.id;
                                    view! {
                                        <option
                                            value=brand_id.to_string()
                                            selected=move || vm.brand_id.get() == Some(brand_id)
                                        >
                                            {brand.name.clone()}
                                        </option>
                                    }
                                })
                                .collect_view()
                        }}
                    </select>
                    {move || {
                        brand_error.get().map(|msg| view! { <span class="field-error">{msg}</span> })
                    }}
                </div>
            </div>

            <div class="form-actions">
                <button
                    class="btn btn-primary"
                    disabled=move || save_disabled.get()
                    on:click=handle_save
                >
                    {move || if vm.saving.get() { "Сохранение..." } else { "Сохранить" }}
                </button>
                <button class="btn" on:click=handle_cancel>
                    "Отмена"
                </button>
            </div>
        </div>
    }
}
