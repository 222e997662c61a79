use crate::domain::a001_product::ui::ProductDetails;
use contracts::domain::a001_product::ProductId;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Standalone entry: open the product form in create mode.
    let id: Option<ProductId> = None;

    view! {
        <main class="app-main">
            <ProductDetails
                id=id
                on_saved=Callback::new(move |_| {})
                on_cancel=Callback::new(move |_| {})
            />
        </main>
    }
}
