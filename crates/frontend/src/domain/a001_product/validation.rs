//! Validation rules for the product details form.
//!
//! The rule set is static and read-only; per-field rule order is the error
//! precedence shown to the user (the most fundamental problem first).

use crate::shared::validation::{validate_value, FormErrors, Rule};
use contracts::domain::a001_product::ProductFormData;
use once_cell::sync::Lazy;
use std::collections::HashMap;

pub const MSG_CATEGORY_REQUIRED: &str = "Выберите категорию";
pub const MSG_BRAND_REQUIRED: &str = "Выберите бренд";

static RULE_SET: Lazy<HashMap<&'static str, Vec<Rule>>> = Lazy::new(|| {
    HashMap::from([
        (
            "name",
            vec![
                Rule::required("Наименование обязательно для заполнения"),
                Rule::min_length(3, "Наименование: минимум 3 символа"),
                Rule::max_length(120, "Наименование: не более 120 символов"),
            ],
        ),
        (
            "article",
            vec![
                Rule::required("Артикул обязателен для заполнения"),
                Rule::pattern(
                    r"[A-Za-z0-9][A-Za-z0-9_-]*",
                    "Артикул: латинские буквы, цифры, «-» и «_»",
                ),
            ],
        ),
        (
            "description",
            vec![Rule::max_length(2000, "Описание: не более 2000 символов")],
        ),
        (
            "price",
            vec![
                Rule::required("Укажите цену"),
                Rule::pattern(
                    r"\d+(\.\d{1,2})?",
                    "Цена: число, не более двух знаков после точки",
                ),
            ],
        ),
        (
            "weight",
            vec![
                Rule::required("Укажите вес"),
                Rule::pattern(r"\d+(\.\d+)?", "Вес: число, например 12.5"),
            ],
        ),
    ])
});

/// Validate one field against its registered rules; returns the first
/// failing rule's message. Fields without registered rules are valid.
pub fn validate_field(field: &str, value: &str) -> Option<&'static str> {
    RULE_SET
        .get(field)
        .and_then(|rules| validate_value(rules, value))
}

/// Validate the whole form.
///
/// Runs the string rules for every registered field, then the reference
/// checks that per-field string rules cannot express: a product must point
/// at an existing category and brand. An empty map is the pass condition.
pub fn validate_form(form: &ProductFormData) -> FormErrors {
    let mut errors = FormErrors::new();
    for (field, rules) in RULE_SET.iter() {
        let value = form.string_field(field).unwrap_or_default();
        if let Some(message) = validate_value(rules, value) {
            errors.insert(*field, message);
        }
    }
    if form.category_id.is_none() {
        errors.insert("categoryId", MSG_CATEGORY_REQUIRED);
    }
    if form.brand_id.is_none() {
        errors.insert("brandId", MSG_BRAND_REQUIRED);
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> ProductFormData {
        ProductFormData {
            name: "Мойка Granula 5502".to_string(),
            article: "GR-5502".to_string(),
            description: String::new(),
            price: "12990.50".to_string(),
            weight: "12.5".to_string(),
            category_id: Some(4),
            brand_id: Some(7),
        }
    }

    #[test]
    fn test_required_fails_on_empty_and_whitespace() {
        assert_eq!(validate_field("weight", ""), Some("Укажите вес"));
        assert_eq!(validate_field("weight", "   "), Some("Укажите вес"));
    }

    #[test]
    fn test_required_beats_pattern_when_declared_first() {
        // weight declares [required, pattern]: the empty value reports the
        // required message, not the pattern mismatch.
        assert_eq!(validate_field("weight", ""), Some("Укажите вес"));
        assert_eq!(
            validate_field("weight", "abc"),
            Some("Вес: число, например 12.5")
        );
        assert_eq!(validate_field("weight", "12.5"), None);
    }

    #[test]
    fn test_non_empty_value_passes_required() {
        assert_eq!(
            validate_field("price", "x"),
            Some("Цена: число, не более двух знаков после точки")
        );
        assert_eq!(validate_field("price", "199"), None);
        assert_eq!(validate_field("price", "199.99"), None);
        assert_eq!(
            validate_field("price", "199.999"),
            Some("Цена: число, не более двух знаков после точки")
        );
    }

    #[test]
    fn test_name_min_length_boundary() {
        assert_eq!(
            validate_field("name", "ab"),
            Some("Наименование: минимум 3 символа")
        );
        assert_eq!(validate_field("name", "abc"), None);
    }

    #[test]
    fn test_name_max_length_boundary() {
        assert_eq!(validate_field("name", &"x".repeat(120)), None);
        assert_eq!(
            validate_field("name", &"x".repeat(121)),
            Some("Наименование: не более 120 символов")
        );
    }

    #[test]
    fn test_description_is_optional() {
        assert_eq!(validate_field("description", ""), None);
        assert_eq!(
            validate_field("description", &"x".repeat(2001)),
            Some("Описание: не более 2000 символов")
        );
    }

    #[test]
    fn test_unknown_fields_are_not_validated() {
        assert_eq!(validate_field("comment", ""), None);
        assert_eq!(validate_field("comment", "whatever"), None);
    }

    #[test]
    fn test_valid_form_has_no_errors() {
        assert!(validate_form(&valid_form()).is_empty());
    }

    #[test]
    fn test_form_errors_mirror_field_validation() {
        let mut form = valid_form();
        form.name = String::new();
        form.weight = "abc".to_string();
        let errors = validate_form(&form);
        assert_eq!(
            errors.get("name").copied(),
            validate_field("name", &form.name)
        );
        assert_eq!(
            errors.get("weight").copied(),
            validate_field("weight", &form.weight)
        );
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_missing_references_are_reported() {
        let mut form = valid_form();
        form.category_id = None;
        form.brand_id = None;
        let errors = validate_form(&form);
        assert_eq!(errors.get("categoryId").copied(), Some(MSG_CATEGORY_REQUIRED));
        assert_eq!(errors.get("brandId").copied(), Some(MSG_BRAND_REQUIRED));
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_empty_form_reports_one_error_per_field() {
        let errors = validate_form(&ProductFormData::default());
        // name, article, price, weight are required; description is not;
        // both references are unset
        assert_eq!(errors.len(), 6);
        assert!(!errors.contains_key("description"));
    }
}
