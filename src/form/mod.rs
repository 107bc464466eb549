mod controller;
mod engine;
mod presets;
mod rules;


pub use controller::{FormController, FormError, FormResult};
pub use engine::ValidationEngine;
pub use presets::{
    EMAIL_REGEX, USERNAME_REGEX, forgot_password_rules, is_valid_email, is_valid_full_name,
    is_valid_password, is_valid_username, login_rules, register_rules,
    validate_password_confirmation,
};
pub use rules::{CustomValidatorFn, FieldKey, RuleSet, ValidationRule};
