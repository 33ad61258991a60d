//! Application state and key handling

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use youtube_form::{
    FieldPath, FocusTarget, FormConfig, FormStateStore, FormValues, PhNumber, SubmitHandler,
    Subscription,
};

/// Logs submitted values, standing in for a real submission
#[derive(Debug, Default)]
pub struct LogSubmitHandler {
    pub last: Option<FormValues>,
}

impl SubmitHandler for LogSubmitHandler {
    fn on_submit(&mut self, values: &FormValues) {
        match serde_json::to_string(values) {
            Ok(json) => tracing::info!(values = %json, "form submitted"),
            Err(err) => tracing::warn!("could not serialize submitted values: {err}"),
        }
        self.last = Some(values.clone());
    }
}

/// Main application struct
pub struct App {
    pub store: FormStateStore,
    /// Index into the current focus layout
    pub focus: usize,
    pub status_message: Option<String>,
    pub submissions: LogSubmitHandler,
    pub render_count: u64,
    watch: Subscription,
    quit: bool,
}

impl App {
    pub fn new(config: &FormConfig) -> Result<Self> {
        let store = FormStateStore::from_config(config)?;
        let watch = store.subscribe(|values, change| {
            tracing::debug!(
                name = ?change.name(),
                kind = ?change.kind(),
                values = ?values,
                "form changed"
            );
        });

        Ok(Self {
            store,
            focus: 0,
            status_message: None,
            submissions: LogSubmitHandler::default(),
            render_count: 0,
            watch,
            quit: false,
        })
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Cancel the change watcher before the form goes away
    pub fn shutdown(&mut self) {
        self.watch.unsubscribe();
    }

    pub fn focus_targets(&self) -> Vec<FocusTarget> {
        FocusTarget::layout(self.store.values())
    }

    pub fn focused(&self) -> Option<FocusTarget> {
        self.focus_targets().into_iter().nth(self.focus)
    }

    pub fn is_focused(&self, target: &FocusTarget) -> bool {
        self.focused().as_ref() == Some(target)
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => self.quit = true,
            KeyCode::Char('c') if ctrl => self.quit = true,
            KeyCode::Char('d') if ctrl => self.remove_focused_entry(),
            KeyCode::Char('u') if ctrl => {
                if let Some(FocusTarget::Field(field)) = self.focused() {
                    field.clear(&mut self.store)?;
                }
            }
            KeyCode::Char('r') if ctrl => self.reset(),
            KeyCode::Delete => self.remove_focused_entry(),
            KeyCode::Tab | KeyCode::Down => self.next_focus(),
            KeyCode::BackTab | KeyCode::Up => self.prev_focus(),
            KeyCode::Enter => self.activate(),
            KeyCode::Backspace => {
                if let Some(FocusTarget::Field(field)) = self.focused() {
                    field.pop_char(&mut self.store)?;
                }
            }
            KeyCode::Char(c) if !ctrl => {
                if let Some(FocusTarget::Field(field)) = self.focused() {
                    field.push_char(&mut self.store, c)?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn next_focus(&mut self) {
        let count = self.focus_targets().len();
        self.focus = (self.focus + 1) % count;
    }

    fn prev_focus(&mut self) {
        let count = self.focus_targets().len();
        if self.focus == 0 {
            self.focus = count - 1;
        } else {
            self.focus -= 1;
        }
    }

    fn activate(&mut self) {
        match self.focused() {
            Some(FocusTarget::AddEntry) => {
                self.store.append_entry(PhNumber::default());
                // Keep the add button focused; it moved down by one slot
                self.focus += 1;
            }
            Some(FocusTarget::Submit) => self.submit(),
            Some(FocusTarget::Field(_)) => self.next_focus(),
            None => {}
        }
    }

    fn submit(&mut self) {
        if !self.store.can_submit() {
            self.status_message = Some("Nothing to submit yet".to_string());
            return;
        }
        self.status_message = match self.store.handle_submit(&mut self.submissions) {
            Ok(()) => Some("Form submitted".to_string()),
            Err(errors) => Some(format!("Fix errors before submitting ({errors})")),
        };
    }

    /// Restore the values the form started with
    fn reset(&mut self) {
        let defaults = self.store.default_values().clone();
        self.store.reset(defaults);
        self.focus = 0;
        self.status_message = Some("Form reset".to_string());
    }

    /// Only entries after the first can be removed
    fn remove_focused_entry(&mut self) {
        let Some(FocusTarget::Field(field)) = self.focused() else {
            return;
        };
        if !field.path.is_array_entry() {
            self.status_message = Some(format!("{} is not a list entry", field.label));
            return;
        }
        if let FieldPath::PhNumber(index) = field.path {
            if index > 0 && self.store.remove_entry(index) {
                let count = self.focus_targets().len();
                self.focus = self.focus.min(count - 1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn app() -> App {
        App::new(&FormConfig::default()).unwrap()
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE)).unwrap();
    }

    fn press_ctrl(app: &mut App, c: char) {
        app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
            .unwrap();
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn focus_on(app: &mut App, target: &FocusTarget) {
        app.focus = app
            .focus_targets()
            .iter()
            .position(|t| t == target)
            .unwrap();
    }

    #[test]
    fn test_typing_edits_focused_field() {
        let mut app = app();
        type_text(&mut app, "bruce");
        assert_eq!(app.store.get_value(FieldPath::Username).unwrap(), "bruce");

        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.store.get_value(FieldPath::Username).unwrap(), "bruc");
    }

    #[test]
    fn test_ctrl_u_clears_focused_field() {
        let mut app = app();
        type_text(&mut app, "bruce");
        press_ctrl(&mut app, 'u');
        assert_eq!(app.store.get_value(FieldPath::Username).unwrap(), "");
        assert!(!app.store.is_dirty());
    }

    #[test]
    fn test_ctrl_r_restores_defaults() {
        let mut app = app();
        type_text(&mut app, "bruce");
        app.store.append_entry(PhNumber::default());
        press(&mut app, KeyCode::Tab);

        press_ctrl(&mut app, 'r');

        assert_eq!(app.store.values(), app.store.default_values());
        assert_eq!(app.store.fields().len(), 1);
        assert_eq!(app.focus, 0);
        assert_eq!(app.status_message.as_deref(), Some("Form reset"));
    }

    #[test]
    fn test_focus_wraps() {
        let mut app = app();
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.focused(), Some(FocusTarget::Submit));
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, 0);
    }

    #[test]
    fn test_add_button_appends_entry_and_keeps_focus() {
        let mut app = app();
        focus_on(&mut app, &FocusTarget::AddEntry);
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.store.fields().len(), 2);
        assert_eq!(app.focused(), Some(FocusTarget::AddEntry));
    }

    #[test]
    fn test_first_entry_cannot_be_removed() {
        let mut app = app();
        focus_on(
            &mut app,
            &FocusTarget::Field(youtube_form::FormField::for_path(FieldPath::PhNumber(0))),
        );
        press(&mut app, KeyCode::Delete);
        assert_eq!(app.store.fields().len(), 1);
    }

    #[test]
    fn test_remove_on_profile_field_is_refused() {
        let mut app = app();
        press(&mut app, KeyCode::Delete);
        assert_eq!(
            app.status_message.as_deref(),
            Some("Username is not a list entry")
        );
        assert_eq!(app.store.fields().len(), 1);
    }

    #[test]
    fn test_later_entry_can_be_removed() {
        let mut app = app();
        app.store.append_entry(PhNumber::default());
        focus_on(
            &mut app,
            &FocusTarget::Field(youtube_form::FormField::for_path(FieldPath::PhNumber(1))),
        );
        press(&mut app, KeyCode::Delete);
        assert_eq!(app.store.fields().len(), 1);
    }

    #[test]
    fn test_submit_disabled_while_pristine() {
        let mut app = app();
        focus_on(&mut app, &FocusTarget::Submit);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.store.submit_count(), 0);
        assert!(app.submissions.last.is_none());
    }

    #[test]
    fn test_valid_submit_reaches_handler() {
        let mut app = app();
        app.store.set_field_value(FieldPath::Username, "bruce").unwrap();
        app.store.set_field_value(FieldPath::Channel, "news").unwrap();
        focus_on(&mut app, &FocusTarget::Submit);
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.submissions.last.as_ref(), Some(app.store.values()));
        assert_eq!(app.status_message.as_deref(), Some("Form submitted"));
    }

    #[test]
    fn test_invalid_submit_shows_errors() {
        let mut app = app();
        app.store.set_field_value(FieldPath::Twitter, "@x").unwrap();
        focus_on(&mut app, &FocusTarget::Submit);
        press(&mut app, KeyCode::Enter);

        assert!(app.submissions.last.is_none());
        assert!(app.store.error(FieldPath::Username).is_some());
    }

    #[test]
    fn test_escape_quits() {
        let mut app = app();
        press(&mut app, KeyCode::Esc);
        assert!(app.should_quit());
    }

    #[test]
    fn test_shutdown_cancels_watch() {
        let mut app = app();
        app.shutdown();
        app.shutdown();
        assert!(!app.watch.is_active());
    }
}
