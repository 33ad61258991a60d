//! Form field descriptors and keyboard editing

use super::form_state::FormStateStore;
use super::path::FieldPath;
use super::values::FormValues;
use crate::error::PathError;

/// A rendered input bound to one field path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub path: FieldPath,
    pub label: String,
}

impl FormField {
    /// Create the field descriptor for `path` with its display label
    pub fn for_path(path: FieldPath) -> Self {
        let label = match path {
            FieldPath::Username => "Username".to_string(),
            FieldPath::Email => "E-mail".to_string(),
            FieldPath::Channel => "Channel".to_string(),
            FieldPath::Twitter => "Twitter".to_string(),
            FieldPath::Facebook => "Facebook".to_string(),
            FieldPath::PhoneNumber(0) => "Primary phone number".to_string(),
            FieldPath::PhoneNumber(1) => "Secondary phone number".to_string(),
            FieldPath::PhoneNumber(i) => format!("Phone number {}", i + 1),
            FieldPath::PhNumber(i) => format!("Phone #{}", i + 1),
        };
        Self { path, label }
    }

    /// Append a character to the field value
    pub fn push_char(&self, store: &mut FormStateStore, c: char) -> Result<(), PathError> {
        let mut value = store.get_value(self.path)?.to_string();
        value.push(c);
        store.set_field_value(self.path, value)
    }

    /// Remove the last character from the field value
    pub fn pop_char(&self, store: &mut FormStateStore) -> Result<(), PathError> {
        let mut value = store.get_value(self.path)?.to_string();
        if value.pop().is_none() {
            return Ok(());
        }
        store.set_field_value(self.path, value)
    }

    /// Clear the field value
    pub fn clear(&self, store: &mut FormStateStore) -> Result<(), PathError> {
        store.set_field_value(self.path, String::new())
    }
}

/// Something on the form that can hold keyboard focus
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FocusTarget {
    Field(FormField),
    AddEntry,
    Submit,
}

impl FocusTarget {
    /// Focus order for the current shape of the form
    pub fn layout(values: &FormValues) -> Vec<FocusTarget> {
        values
            .paths()
            .into_iter()
            .map(|path| FocusTarget::Field(FormField::for_path(path)))
            .chain([FocusTarget::AddEntry, FocusTarget::Submit])
            .collect()
    }

    pub fn field(&self) -> Option<&FormField> {
        match self {
            FocusTarget::Field(field) => Some(field),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FormConfig;
    use crate::state::PhNumber;
    use pretty_assertions::assert_eq;

    fn store() -> FormStateStore {
        FormStateStore::from_config(&FormConfig::default()).unwrap()
    }

    #[test]
    fn test_labels() {
        assert_eq!(FormField::for_path(FieldPath::Email).label, "E-mail");
        assert_eq!(
            FormField::for_path(FieldPath::PhoneNumber(1)).label,
            "Secondary phone number"
        );
        assert_eq!(FormField::for_path(FieldPath::PhNumber(2)).label, "Phone #3");
    }

    #[test]
    fn test_push_and_pop_char() {
        let mut store = store();
        let field = FormField::for_path(FieldPath::Channel);
        field.push_char(&mut store, 'a').unwrap();
        field.push_char(&mut store, 'b').unwrap();
        assert_eq!(store.get_value(FieldPath::Channel).unwrap(), "ab");

        field.pop_char(&mut store).unwrap();
        assert_eq!(store.get_value(FieldPath::Channel).unwrap(), "a");
    }

    #[test]
    fn test_pop_on_empty_keeps_form_clean() {
        let mut store = store();
        FormField::for_path(FieldPath::Username)
            .pop_char(&mut store)
            .unwrap();
        assert!(!store.is_dirty());
    }

    #[test]
    fn test_clear() {
        let mut store = store();
        let field = FormField::for_path(FieldPath::Twitter);
        field.push_char(&mut store, 'x').unwrap();
        field.clear(&mut store).unwrap();
        assert!(!store.is_dirty());
    }

    #[test]
    fn test_edit_on_removed_entry_is_path_error() {
        let mut store = store();
        let field = FormField::for_path(FieldPath::PhNumber(0));
        store.remove_entry(0);
        assert!(field.push_char(&mut store, '1').is_err());
    }

    #[test]
    fn test_layout_tracks_field_array() {
        let mut store = store();
        assert_eq!(FocusTarget::layout(store.values()).len(), 10);

        store.append_entry(PhNumber::default());
        let layout = FocusTarget::layout(store.values());
        assert_eq!(layout.len(), 11);
        assert_eq!(
            layout[8].field().map(|f| f.path),
            Some(FieldPath::PhNumber(1))
        );
        assert_eq!(layout[9], FocusTarget::AddEntry);
        assert_eq!(layout[10], FocusTarget::Submit);
    }
}
