use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::future::Future;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, error};

use super::engine::ValidationEngine;
use super::rules::{FieldKey, RuleSet};

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum FormError {
    StatePoisoned(&'static str),
}

impl Display for FormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FormError::StatePoisoned(context) => {
                write!(f, "form state lock poisoned while {context}")
            }
        }
    }
}

impl std::error::Error for FormError {}

pub type FormResult<T> = Result<T, FormError>;

pub(super) struct FormState {
    initial_values: BTreeMap<FieldKey, String>,
    values: BTreeMap<FieldKey, String>,
    errors: BTreeMap<FieldKey, String>,
    submitting: bool,
}

/// Owned form state plus submission gating around a caller-supplied async
/// action. Cloning shares the state, so UI event handlers can each hold a
/// handle to the same form.
#[derive(Clone)]
pub struct FormController {
    rules: Arc<RuleSet>,
    state: Arc<RwLock<FormState>>,
}

impl FormController {
    pub fn new(initial_values: BTreeMap<FieldKey, String>, rules: RuleSet) -> Self {
        Self {
            rules: Arc::new(rules),
            state: Arc::new(RwLock::new(FormState {
                values: initial_values.clone(),
                initial_values,
                errors: BTreeMap::new(),
                submitting: false,
            })),
        }
    }

    /// One user edit: store the new value and drop any stale error for that
    /// field. Validation does not re-run here; errors reappear only on the
    /// next full validation pass.
    pub fn on_change(&self, key: FieldKey, value: impl Into<String>) -> FormResult<()> {
        let mut state = write_lock(&self.state, "applying field change")?;
        state.values.insert(key, value.into());
        state.errors.remove(&key);
        Ok(())
    }

    pub fn set_field_value(&self, key: FieldKey, value: impl Into<String>) -> FormResult<()> {
        self.on_change(key, value)
    }

    /// Injects an error from outside the rule set, e.g. a server-side
    /// rejection reported by the submit action.
    pub fn set_field_error(&self, key: FieldKey, message: impl Into<String>) -> FormResult<()> {
        let mut state = write_lock(&self.state, "setting field error")?;
        state.errors.insert(key, message.into());
        Ok(())
    }

    pub fn clear_errors(&self) -> FormResult<()> {
        let mut state = write_lock(&self.state, "clearing errors")?;
        state.errors.clear();
        Ok(())
    }

    pub fn reset(&self) -> FormResult<()> {
        let mut state = write_lock(&self.state, "resetting form")?;
        state.values = state.initial_values.clone();
        state.errors.clear();
        state.submitting = false;
        Ok(())
    }

    pub fn set_submitting(&self, submitting: bool) -> FormResult<()> {
        let mut state = write_lock(&self.state, "setting submitting flag")?;
        state.submitting = submitting;
        Ok(())
    }

    /// Runs the full validation pass and replaces the error set with its
    /// result. Returns overall validity.
    pub fn validate(&self) -> FormResult<bool> {
        let mut state = write_lock(&self.state, "validating form")?;
        let (errors, all_valid) = ValidationEngine::new(&self.rules).validate_all(&state.values);
        state.errors = errors;
        Ok(all_valid)
    }

    /// Validation-gated submission. A call while another submission is in
    /// flight is a no-op. If validation fails the error set is updated and
    /// the action is never invoked. Otherwise the submitting flag is raised
    /// before the action future is first polled and cleared after it
    /// settles, on every exit path. A failure returned by the action is
    /// logged and swallowed; reporting it back into the form is the
    /// action's own job via [`set_field_error`](Self::set_field_error).
    pub async fn submit<F, Fut, E>(&self, action: F) -> FormResult<()>
    where
        F: FnOnce(BTreeMap<FieldKey, String>) -> Fut,
        Fut: Future<Output = Result<(), E>>,
        E: Display,
    {
        let values = {
            let mut state = write_lock(&self.state, "preparing submit")?;
            if state.submitting {
                debug!("submit ignored, another submission is in flight");
                return Ok(());
            }
            let (errors, all_valid) =
                ValidationEngine::new(&self.rules).validate_all(&state.values);
            state.errors = errors;
            if !all_valid {
                debug!(errors = state.errors.len(), "submit blocked by validation");
                return Ok(());
            }
            state.submitting = true;
            state.values.clone()
        };

        let outcome = action(values).await;

        {
            let mut state = write_lock(&self.state, "completing submit")?;
            state.submitting = false;
        }
        if let Err(failure) = outcome {
            error!(%failure, "form submission failed");
        }
        Ok(())
    }

    pub fn values(&self) -> FormResult<BTreeMap<FieldKey, String>> {
        Ok(read_lock(&self.state, "reading values")?.values.clone())
    }

    pub fn value(&self, key: FieldKey) -> FormResult<Option<String>> {
        Ok(read_lock(&self.state, "reading value")?
            .values
            .get(&key)
            .cloned())
    }

    pub fn errors(&self) -> FormResult<BTreeMap<FieldKey, String>> {
        Ok(read_lock(&self.state, "reading errors")?.errors.clone())
    }

    pub fn field_error(&self, key: FieldKey) -> FormResult<Option<String>> {
        Ok(read_lock(&self.state, "reading field error")?
            .errors
            .get(&key)
            .cloned())
    }

    pub fn is_submitting(&self) -> FormResult<bool> {
        Ok(read_lock(&self.state, "reading submitting flag")?.submitting)
    }

    /// Derived from the current error set only; does not re-run validation.
    pub fn is_valid(&self) -> FormResult<bool> {
        Ok(read_lock(&self.state, "reading validity")?
            .errors
            .values()
            .all(String::is_empty))
    }
}

pub(super) fn read_lock<'a, T>(
    lock: &'a RwLock<T>,
    context: &'static str,
) -> FormResult<RwLockReadGuard<'a, T>> {
    lock.read().map_err(|_| FormError::StatePoisoned(context))
}

pub(super) fn write_lock<'a, T>(
    lock: &'a RwLock<T>,
    context: &'static str,
) -> FormResult<RwLockWriteGuard<'a, T>> {
    lock.write().map_err(|_| FormError::StatePoisoned(context))
}
