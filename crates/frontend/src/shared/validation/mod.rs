//! Declarative field validation.
//!
//! A field is checked against an ordered list of rules; the first failing
//! rule determines the reported message. Rule order is part of the contract:
//! declaring `required` before `pattern` guarantees the empty-value message
//! wins over the format message.

pub mod engine;
pub mod rules;

pub use engine::{validate_value, FormErrors};
pub use rules::{Constraint, Rule};
