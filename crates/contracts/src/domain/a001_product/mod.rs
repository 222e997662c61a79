pub mod aggregate;

pub use aggregate::{ProductFormData, ProductId};
