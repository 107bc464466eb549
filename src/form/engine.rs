use std::collections::BTreeMap;

use super::rules::{FieldKey, RuleSet};

/// Pure rule evaluator over a borrowed [`RuleSet`]. No I/O, no state.
pub struct ValidationEngine<'a> {
    rules: &'a RuleSet,
}

impl<'a> ValidationEngine<'a> {
    pub fn new(rules: &'a RuleSet) -> Self {
        Self { rules }
    }

    /// Checks run in a fixed order and the first failing one wins: required,
    /// then min/max length, then pattern, then the custom validator. Empty
    /// optional fields skip every check after the required test. The custom
    /// validator sees the raw untrimmed value and its message is passed
    /// through verbatim.
    pub fn validate_field(&self, key: FieldKey, value: &str) -> Option<String> {
        let rule = self.rules.rule(key)?;

        let trimmed_empty = value.trim().is_empty();
        if rule.required && trimmed_empty {
            return Some(format!("{} is required", key.capitalized()));
        }
        if trimmed_empty {
            return None;
        }

        let length = value.chars().count();
        if let Some(min) = rule.min_length {
            if length < min {
                return Some(format!(
                    "{} must be at least {min} characters",
                    key.capitalized()
                ));
            }
        }
        if let Some(max) = rule.max_length {
            if length > max {
                return Some(format!(
                    "{} must be no more than {max} characters",
                    key.capitalized()
                ));
            }
        }
        if let Some(pattern) = &rule.pattern {
            if !pattern.is_match(value) {
                return Some(format!("{} format is invalid", key.capitalized()));
            }
        }
        if let Some(custom) = &rule.custom {
            if let Some(message) = custom(value) {
                if !message.is_empty() {
                    return Some(message);
                }
            }
        }

        None
    }

    /// Validates every key present in `values` (not every key in the rule
    /// set) and reports overall validity as "no field produced an error".
    pub fn validate_all(
        &self,
        values: &BTreeMap<FieldKey, String>,
    ) -> (BTreeMap<FieldKey, String>, bool) {
        let mut errors = BTreeMap::new();
        for (key, value) in values {
            if let Some(message) = self.validate_field(*key, value) {
                errors.insert(*key, message);
            }
        }
        let all_valid = errors.is_empty();
        (errors, all_valid)
    }
}
