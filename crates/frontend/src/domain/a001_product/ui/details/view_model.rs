//! ViewModel for the product details form (EditDetails MVVM Standard).
//!
//! All form fields are individual RwSignals for two-way binding; validation
//! state lives in a single `errors` map keyed by field name.

use crate::domain::a001_product::validation::{validate_field, validate_form};
use crate::shared::validation::FormErrors;
use contracts::domain::a001_product::{ProductFormData, ProductId};
use leptos::prelude::*;

#[derive(Clone, Copy)]
pub struct ProductDetailsVm {
    // === Form fields ===
    pub id: RwSignal<Option<ProductId>>,
    pub name: RwSignal<String>,
    pub article: RwSignal<String>,
    pub description: RwSignal<String>,
    pub price: RwSignal<String>,
    pub weight: RwSignal<String>,
    pub category_id: RwSignal<Option<i64>>,
    pub brand_id: RwSignal<Option<i64>>,

    // === UI state ===
    pub errors: RwSignal<FormErrors>,
    pub saving: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
    pub success: RwSignal<Option<String>>,
}

impl ProductDetailsVm {
    pub fn new(id: Option<ProductId>) -> Self {
        Self {
            id: RwSignal::new(id),
            name: RwSignal::new(String::new()),
            article: RwSignal::new(String::new()),
            description: RwSignal::new(String::new()),
            price: RwSignal::new(String::new()),
            weight: RwSignal::new(String::new()),
            category_id: RwSignal::new(None),
            brand_id: RwSignal::new(None),

            errors: RwSignal::new(FormErrors::new()),
            saving: RwSignal::new(false),
            error: RwSignal::new(None),
            success: RwSignal::new(None),
        }
    }

    /// Snapshot the current field signals into the serializable form shape.
    /// Untracked: used by autosave ticks and submit, not by the view.
    pub fn snapshot(&self) -> ProductFormData {
        ProductFormData {
            name: self.name.get_untracked(),
            article: self.article.get_untracked(),
            description: self.description.get_untracked(),
            price: self.price.get_untracked(),
            weight: self.weight.get_untracked(),
            category_id: self.category_id.get_untracked(),
            brand_id: self.brand_id.get_untracked(),
        }
    }

    /// Fill the field signals from loaded or recovered form data.
    pub fn restore(&self, form: ProductFormData) {
        self.name.set(form.name);
        self.article.set(form.article);
        self.description.set(form.description);
        self.price.set(form.price);
        self.weight.set(form.weight);
        self.category_id.set(form.category_id);
        self.brand_id.set(form.brand_id);
    }

    /// Re-validate one string field after an edit.
    pub fn touch_field(&self, field: &'static str, value: &str) {
        let result = validate_field(field, value);
        self.errors.update(|errors| match result {
            Some(message) => {
                errors.insert(field, message);
            }
            None => {
                errors.remove(field);
            }
        });
    }

    /// Drop the error for a reference field once the user picks a value.
    pub fn clear_field_error(&self, field: &'static str) {
        self.errors.update(|errors| {
            errors.remove(field);
        });
    }

    /// Submit-time validation of the whole form. True when it may be sent.
    pub fn validate_all(&self) -> bool {
        let errors = validate_form(&self.snapshot());
        let ok = errors.is_empty();
        self.errors.set(errors);
        ok
    }

    pub fn field_error(&self, field: &'static str) -> Signal<Option<&'static str>> {
        let errors = self.errors;
        Signal::derive(move || errors.get().get(field).copied())
    }

    pub fn is_save_disabled(&self) -> Signal<bool> {
        let saving = self.saving;
        let errors = self.errors;
        Signal::derive(move || saving.get() || !errors.get().is_empty())
    }
}
