pub mod state;
pub mod validation;
