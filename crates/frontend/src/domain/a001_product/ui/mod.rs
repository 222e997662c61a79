pub mod details;

pub use details::ProductDetails;
