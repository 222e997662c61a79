//! Product Details UI Module
//!
//! Simplified MVVM pattern implementation:
//! - model.rs: API functions (fetch, save, reference data)
//! - view_model.rs: ViewModel with form state and validation commands
//! - view.rs: Leptos component (pure UI) with draft autosave wiring

mod model;
mod view;
mod view_model;

pub use view::ProductDetails;
pub use view_model::ProductDetailsVm;
