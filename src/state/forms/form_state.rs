//! Form state store
//!
//! Single source of truth for field values, per-field validation results and
//! the dynamic phone number list. All mutations are synchronous and notify
//! listeners in the order they were applied.

use super::path::FieldPath;
use super::rules::{FormSchema, ValidationError};
use super::subscription::{Change, Listeners, Subscription};
use super::values::{EntryKey, FieldArrayEntry, FormValues, PhNumber};
use crate::config::{FormConfig, ValidationMode};
use crate::error::{FormError, PathError};
use std::collections::BTreeMap;
use std::fmt;

/// All field errors from a rejected submit
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{} field(s) failed validation", .0.len())]
pub struct ValidationErrors(pub Vec<ValidationError>);

impl ValidationErrors {
    pub fn get(&self, path: FieldPath) -> Option<&ValidationError> {
        self.0.iter().find(|e| e.path == path)
    }
}

/// Receives the values of a successful submit
#[cfg_attr(test, mockall::automock)]
pub trait SubmitHandler {
    fn on_submit(&mut self, values: &FormValues);
}

pub struct FormStateStore {
    defaults: FormValues,
    values: FormValues,
    /// Parallel to `values.ph_numbers`
    entry_keys: Vec<EntryKey>,
    schema: FormSchema,
    mode: ValidationMode,
    errors: BTreeMap<FieldPath, ValidationError>,
    submit_count: u32,
    listeners: Listeners,
}

impl FormStateStore {
    /// Create a store holding `defaults` as both the initial and current values
    pub fn new(defaults: FormValues, schema: FormSchema, mode: ValidationMode) -> Self {
        let entry_keys = fresh_keys(defaults.ph_numbers.len());
        Self {
            values: defaults.clone(),
            defaults,
            entry_keys,
            schema,
            mode,
            errors: BTreeMap::new(),
            submit_count: 0,
            listeners: Listeners::default(),
        }
    }

    /// Build the channel sign-up form from configuration
    pub fn from_config(config: &FormConfig) -> Result<Self, FormError> {
        let schema = FormSchema::from_config(config)?;
        let defaults = config.default_values.clone().unwrap_or_default();
        Ok(Self::new(defaults, schema, config.validation_mode))
    }

    /// Current value at `path`
    pub fn get_value(&self, path: FieldPath) -> Result<&str, PathError> {
        self.values.get(path)
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn default_values(&self) -> &FormValues {
        &self.defaults
    }

    /// Update the value at `path` and re-run its rules
    pub fn set_field_value(
        &mut self,
        path: FieldPath,
        value: impl Into<String>,
    ) -> Result<(), PathError> {
        let value = value.into();
        let slot = self.values.get_mut(path)?;
        if *slot == value {
            return Ok(());
        }
        *slot = value;
        tracing::debug!(%path, dirty = self.is_field_dirty(path), "field changed");

        if self.revalidates_on_change() {
            self.refresh_error(path);
        }
        self.listeners.notify(&self.values, &Change::Edit(path));
        Ok(())
    }

    /// Whether `path` carries a required rule
    pub fn is_required(&self, path: FieldPath) -> bool {
        self.schema
            .rules_for(path)
            .is_some_and(|rules| rules.is_required())
    }

    /// First failing rule for `path`, without touching the stored errors
    pub fn validate_field(&self, path: FieldPath) -> Result<Option<ValidationError>, PathError> {
        let value = self.values.get(path)?;
        Ok(self.schema.validate(path, value))
    }

    /// Current error for `path`, as last computed by an edit or submit
    pub fn error(&self, path: FieldPath) -> Option<&ValidationError> {
        self.errors.get(&path)
    }

    pub fn errors(&self) -> impl Iterator<Item = &ValidationError> {
        self.errors.values()
    }

    /// The field array with entry identities, in order
    pub fn fields(&self) -> Vec<FieldArrayEntry> {
        self.entry_keys
            .iter()
            .zip(&self.values.ph_numbers)
            .map(|(key, entry)| FieldArrayEntry {
                key: *key,
                number: entry.number.clone(),
            })
            .collect()
    }

    /// Append an entry with a new identity key
    pub fn append_entry(&mut self, initial: PhNumber) {
        let key = EntryKey::generate();
        self.values.ph_numbers.push(initial);
        self.entry_keys.push(key);
        let index = self.entry_keys.len() - 1;
        tracing::debug!(index, %key, "field array entry appended");
        self.listeners.notify(&self.values, &Change::Append { index });
    }

    /// Remove the entry at `index`. Returns `false` and changes nothing when
    /// the index is out of range.
    pub fn remove_entry(&mut self, index: usize) -> bool {
        if index >= self.entry_keys.len() {
            tracing::warn!(index, len = self.entry_keys.len(), "remove out of range");
            return false;
        }
        self.values.ph_numbers.remove(index);
        let key = self.entry_keys.remove(index);
        tracing::debug!(index, %key, "field array entry removed");

        // Errors are keyed by position, so entries past `index` shift down
        let shifted: BTreeMap<FieldPath, ValidationError> = std::mem::take(&mut self.errors)
            .into_iter()
            .filter_map(|(path, mut err)| match path {
                FieldPath::PhNumber(i) if i == index => None,
                FieldPath::PhNumber(i) if i > index => {
                    err.path = FieldPath::PhNumber(i - 1);
                    Some((err.path, err))
                }
                _ => Some((path, err)),
            })
            .collect();
        self.errors = shifted;

        self.listeners.notify(&self.values, &Change::Remove { index });
        true
    }

    /// Whether any value differs from the defaults
    pub fn is_dirty(&self) -> bool {
        self.values != self.defaults
    }

    /// Whether the value at `path` differs from its default. Entries that
    /// did not exist in the defaults are dirty.
    pub fn is_field_dirty(&self, path: FieldPath) -> bool {
        match (self.values.get(path), self.defaults.get(path)) {
            (Ok(current), Ok(initial)) => current != initial,
            (Ok(_), Err(_)) => true,
            (Err(_), _) => false,
        }
    }

    pub fn dirty_fields(&self) -> Vec<FieldPath> {
        self.values
            .paths()
            .into_iter()
            .filter(|path| self.is_field_dirty(*path))
            .collect()
    }

    /// Submitting is disabled while the form is pristine
    pub fn can_submit(&self) -> bool {
        self.is_dirty()
    }

    pub fn submit_count(&self) -> u32 {
        self.submit_count
    }

    /// Validate every registered field and return the values if all pass
    pub fn submit(&mut self) -> Result<FormValues, ValidationErrors> {
        self.submit_count += 1;
        self.errors.clear();
        for path in self.schema.registered().collect::<Vec<_>>() {
            self.refresh_error(path);
        }

        if self.errors.is_empty() {
            tracing::info!(submit_count = self.submit_count, "form submitted");
            Ok(self.values.clone())
        } else {
            let errors: Vec<ValidationError> = self.errors.values().cloned().collect();
            tracing::info!(
                submit_count = self.submit_count,
                errors = errors.len(),
                "submit rejected"
            );
            Err(ValidationErrors(errors))
        }
    }

    /// Submit and hand the values to `handler` only when every field is valid
    pub fn handle_submit(&mut self, handler: &mut dyn SubmitHandler) -> Result<(), ValidationErrors> {
        let values = self.submit()?;
        handler.on_submit(&values);
        Ok(())
    }

    /// Replace defaults and values, forgetting errors and submit attempts
    pub fn reset(&mut self, values: FormValues) {
        self.entry_keys = fresh_keys(values.ph_numbers.len());
        self.defaults = values.clone();
        self.values = values;
        self.errors.clear();
        self.submit_count = 0;
        tracing::debug!("form reset");
        self.listeners.notify(&self.values, &Change::Reset);
    }

    /// Register a listener called after every mutation
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: FnMut(&FormValues, &Change) + 'static,
    {
        self.listeners.subscribe(listener)
    }

    fn revalidates_on_change(&self) -> bool {
        match self.mode {
            ValidationMode::OnChange => true,
            ValidationMode::OnSubmit => self.submit_count > 0,
        }
    }

    fn refresh_error(&mut self, path: FieldPath) {
        let result = self
            .values
            .get(path)
            .ok()
            .and_then(|value| self.schema.validate(path, value));
        match result {
            Some(err) => {
                self.errors.insert(path, err);
            }
            None => {
                self.errors.remove(&path);
            }
        }
    }
}

impl fmt::Debug for FormStateStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormStateStore")
            .field("values", &self.values)
            .field("entry_keys", &self.entry_keys)
            .field("mode", &self.mode)
            .field("errors", &self.errors)
            .field("submit_count", &self.submit_count)
            .field("listeners", &self.listeners)
            .finish()
    }
}

fn fresh_keys(len: usize) -> Vec<EntryKey> {
    (0..len).map(|_| EntryKey::generate()).collect()
}
