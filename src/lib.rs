pub mod form;

pub use form::{
    FieldKey, FormController, FormError, FormResult, RuleSet, ValidationEngine, ValidationRule,
};
