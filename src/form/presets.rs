use std::sync::LazyLock;

use regex::Regex;

use super::rules::{FieldKey, RuleSet, ValidationRule};

pub static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex must compile"));

/// Letters, numbers and underscores only.
pub static USERNAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_]+$").expect("username regex must compile"));

/// Login accepts a username, email or phone number in the email field, so
/// both fields only check presence.
pub fn login_rules() -> RuleSet {
    RuleSet::new()
        .with_rule(
            FieldKey::new("email"),
            ValidationRule::new().required().min_length(1).custom(|value| {
                value
                    .trim()
                    .is_empty()
                    .then(|| "Username, email or mobile number is required".to_string())
            }),
        )
        .with_rule(
            FieldKey::new("password"),
            ValidationRule::new().required().min_length(1).custom(|value| {
                value
                    .trim()
                    .is_empty()
                    .then(|| "Password is required".to_string())
            }),
        )
}

pub fn register_rules() -> RuleSet {
    RuleSet::new()
        .with_rule(
            FieldKey::new("email"),
            ValidationRule::new()
                .required()
                .pattern(EMAIL_REGEX.clone())
                .custom(|value| {
                    (!EMAIL_REGEX.is_match(value))
                        .then(|| "Please enter a valid email address".to_string())
                }),
        )
        .with_rule(
            FieldKey::new("username"),
            ValidationRule::new()
                .required()
                .min_length(3)
                .max_length(30)
                .pattern(USERNAME_REGEX.clone())
                .custom(|value| {
                    let length = value.chars().count();
                    if length < 3 {
                        Some("Username must be at least 3 characters long".to_string())
                    } else if length > 30 {
                        Some("Username must be no more than 30 characters long".to_string())
                    } else if !USERNAME_REGEX.is_match(value) {
                        Some(
                            "Username can only contain letters, numbers, and underscores"
                                .to_string(),
                        )
                    } else {
                        None
                    }
                }),
        )
        .with_rule(
            FieldKey::new("fullName"),
            ValidationRule::new()
                .required()
                .min_length(2)
                .max_length(50)
                .custom(|value| {
                    let length = value.trim().chars().count();
                    if length < 2 {
                        Some("Full name must be at least 2 characters long".to_string())
                    } else if length > 50 {
                        Some("Full name must be no more than 50 characters long".to_string())
                    } else {
                        None
                    }
                }),
        )
        .with_rule(
            FieldKey::new("password"),
            ValidationRule::new().required().min_length(6).custom(|value| {
                (value.chars().count() < 6)
                    .then(|| "Password must be at least 6 characters long".to_string())
            }),
        )
}

pub fn forgot_password_rules() -> RuleSet {
    let password_rule = || {
        ValidationRule::new().required().min_length(6).custom(|value| {
            (value.chars().count() < 6)
                .then(|| "Password must be at least 6 characters long".to_string())
        })
    };
    RuleSet::new()
        .with_rule(
            FieldKey::new("email"),
            ValidationRule::new()
                .required()
                .pattern(EMAIL_REGEX.clone())
                .custom(|value| {
                    (!EMAIL_REGEX.is_match(value))
                        .then(|| "Please enter a valid email address".to_string())
                }),
        )
        .with_rule(FieldKey::new("newPassword"), password_rule())
        .with_rule(FieldKey::new("confirmPassword"), password_rule())
}

pub fn validate_password_confirmation(password: &str, confirmation: &str) -> Option<String> {
    (password != confirmation).then(|| "Passwords do not match".to_string())
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

pub fn is_valid_username(username: &str) -> bool {
    let length = username.chars().count();
    (3..=30).contains(&length) && USERNAME_REGEX.is_match(username)
}

pub fn is_valid_password(password: &str) -> bool {
    password.chars().count() >= 6
}

pub fn is_valid_full_name(full_name: &str) -> bool {
    let length = full_name.trim().chars().count();
    (2..=50).contains(&length)
}
