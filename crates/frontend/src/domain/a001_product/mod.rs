pub mod ui;
pub mod validation;
