use super::rules::Rule;
use std::collections::HashMap;

/// Field name -> currently active error message. Absence of a key means the
/// field is valid (or untouched). A field never carries more than one message.
pub type FormErrors = HashMap<&'static str, &'static str>;

/// Evaluate ordered rules against a value.
///
/// Returns the message of the first failing rule, `None` when all pass.
/// Every rule is an independent check: `min_length` fires on an empty value
/// too, unless a `required` rule was declared before it.
pub fn validate_value(rules: &[Rule], value: &str) -> Option<&'static str> {
    rules
        .iter()
        .find(|rule| rule.is_violated(value))
        .map(|rule| rule.message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_failing_rule_wins() {
        let rules = vec![
            Rule::required("field is required"),
            Rule::pattern(r"\d+", "digits only"),
        ];
        assert_eq!(validate_value(&rules, ""), Some("field is required"));
        assert_eq!(validate_value(&rules, "abc"), Some("digits only"));
        assert_eq!(validate_value(&rules, "42"), None);
    }

    #[test]
    fn test_min_length_is_independent_of_required() {
        // No required rule declared: the empty value falls through to
        // min_length and reports its message.
        let rules = vec![Rule::min_length(5, "too short")];
        assert_eq!(validate_value(&rules, ""), Some("too short"));
        assert_eq!(validate_value(&rules, "abcd"), Some("too short"));
        assert_eq!(validate_value(&rules, "abcde"), None);
    }

    #[test]
    fn test_max_length_boundary() {
        let rules = vec![Rule::max_length(3, "too long")];
        assert_eq!(validate_value(&rules, "abc"), None);
        assert_eq!(validate_value(&rules, "abcd"), Some("too long"));
    }

    #[test]
    fn test_lengths_count_characters_not_bytes() {
        let rules = vec![Rule::min_length(5, "too short")];
        // 5 cyrillic characters, 10 bytes
        assert_eq!(validate_value(&rules, "Мойка"), None);
    }

    #[test]
    fn test_pattern_requires_full_match() {
        let rules = vec![Rule::pattern(r"\d+(\.\d+)?", "not a number")];
        assert_eq!(validate_value(&rules, "12.5"), None);
        assert_eq!(validate_value(&rules, "12.5kg"), Some("not a number"));
        assert_eq!(validate_value(&rules, "kg12"), Some("not a number"));
    }

    #[test]
    fn test_empty_rule_list_is_always_valid() {
        assert_eq!(validate_value(&[], "anything"), None);
    }
}
