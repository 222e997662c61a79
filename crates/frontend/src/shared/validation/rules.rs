use regex::Regex;

/// One constraint kind checked against a field value.
#[derive(Debug, Clone)]
pub enum Constraint {
    Required,
    MinLength(usize),
    MaxLength(usize),
    Pattern(Regex),
}

/// A constraint paired with the fixed message reported when it fails.
/// Messages are handed back to the UI verbatim.
#[derive(Debug, Clone)]
pub struct Rule {
    pub constraint: Constraint,
    pub message: &'static str,
}

impl Rule {
    pub fn required(message: &'static str) -> Self {
        Self {
            constraint: Constraint::Required,
            message,
        }
    }

    pub fn min_length(min: usize, message: &'static str) -> Self {
        Self {
            constraint: Constraint::MinLength(min),
            message,
        }
    }

    pub fn max_length(max: usize, message: &'static str) -> Self {
        Self {
            constraint: Constraint::MaxLength(max),
            message,
        }
    }

    /// Pattern rules are anchored: the whole value must match, a partial
    /// match counts as a violation. Called with literal patterns from the
    /// static rule tables, hence the `expect`.
    pub fn pattern(pattern: &str, message: &'static str) -> Self {
        let re = Regex::new(&format!("^(?:{})$", pattern)).expect("invalid validation pattern");
        Self {
            constraint: Constraint::Pattern(re),
            message,
        }
    }

    /// True when the value violates this rule. Lengths are counted in
    /// characters, not bytes.
    pub fn is_violated(&self, value: &str) -> bool {
        match &self.constraint {
            Constraint::Required => value.trim().is_empty(),
            Constraint::MinLength(min) => value.chars().count() < *min,
            Constraint::MaxLength(max) => value.chars().count() > *max,
            Constraint::Pattern(re) => !re.is_match(value),
        }
    }
}
