//! Command handlers - business logic for processing UI events

use crate::app::AppState;
use crate::messages::ui_events::{Focus, InputMode};
use crate::messages::{NetworkCommand, NetworkResponse};

impl AppState {
    // ========================
    // Navigation
    // ========================

    pub fn next_field(&mut self) {
        self.move_focus(1);
    }

    pub fn prev_field(&mut self) {
        self.move_focus(-1);
    }

    fn move_focus(&mut self, step: isize) {
        let order = self.focus_order();
        let len = order.len() as isize;
        let current = order.iter().position(|f| *f == self.focus).unwrap_or(0) as isize;
        self.focus = order[(current + step).rem_euclid(len) as usize];

        if matches!(self.focus, Focus::Submit) {
            self.input_mode = InputMode::Normal;
        }
        self.cursor_position = self.current_input().len();
    }

    // ========================
    // Input editing
    // ========================

    pub fn start_editing(&mut self) {
        if let Focus::Field(_) = self.focus {
            self.input_mode = InputMode::Editing;
            self.cursor_position = self.current_input().len();
        }
    }

    pub fn stop_editing(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn move_cursor_left(&mut self) {
        let input = self.current_input();
        if self.cursor_position > 0 {
            let new_pos = input[..self.cursor_position]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.cursor_position = new_pos;
        }
    }

    pub fn move_cursor_right(&mut self) {
        let input = self.current_input();
        if self.cursor_position < input.len() {
            let new_pos = input[self.cursor_position..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor_position + i)
                .unwrap_or(input.len());
            self.cursor_position = new_pos;
        }
    }

    pub fn enter_char(&mut self, c: char) {
        let cursor_pos = self.cursor_position;
        let Some(input) = self.current_input_mut() else {
            return;
        };
        if cursor_pos <= input.len() {
            input.insert(cursor_pos, c);
            self.cursor_position = cursor_pos + c.len_utf8();
        }
        self.controller.reset();
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position == 0 {
            return;
        }
        let cursor_pos = self.cursor_position;
        let Some(input) = self.current_input_mut() else {
            return;
        };
        let prev_pos = input[..cursor_pos]
            .char_indices()
            .last()
            .map(|(i, _)| i)
            .unwrap_or(0);
        input.remove(prev_pos);
        self.cursor_position = prev_pos;
        self.controller.reset();
    }

    // ========================
    // Submission
    // ========================

    /// Run validation and, if it passes, build the one request to send
    pub fn submit(&mut self) -> Option<NetworkCommand> {
        if self.input_mode == InputMode::Editing {
            self.stop_editing();
        }
        self.controller
            .on_submit_triggered(&self.form)
            .map(NetworkCommand::SubmitForm)
    }

    pub fn handle_response(&mut self, response: NetworkResponse) {
        let NetworkResponse { attempt, outcome, time_ms } = response;
        match self.controller.resolve(attempt, outcome, &mut self.form) {
            Some(Ok(())) => {
                tracing::info!(attempt, time_ms, "Contact form delivered");
                self.cursor_position = 0;
            }
            Some(Err(e)) => {
                tracing::info!(attempt, time_ms, error = %e, "Contact form not delivered");
            }
            None => {}
        }
    }

    // ========================
    // Theme
    // ========================

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggle();
        if let Err(e) = self.preferences.set(self.theme) {
            tracing::warn!(error = %e, path = %self.preferences.path().display(), "Could not persist theme");
        }
    }

    // ========================
    // Help popup
    // ========================

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }
}

#[cfg(test)]
mod tests {
    use crate::app::AppState;
    use crate::config::AppConfig;
    use crate::messages::ui_events::{Focus, InputMode};
    use crate::messages::{NetworkCommand, NetworkResponse};
    use crate::models::FieldId;
    use crate::storage::ThemePreferenceStore;
    use crate::submission::{FailureReason, RelayOutcome, SubmissionState};

    fn state(dir: &tempfile::TempDir) -> AppState {
        let store = ThemePreferenceStore::at(dir.path().join("prefs.yaml"));
        AppState::new(&AppConfig::default(), store).unwrap()
    }

    fn type_into(state: &mut AppState, field: FieldId, text: &str) {
        state.focus = Focus::Field(field);
        state.start_editing();
        for c in text.chars() {
            state.enter_char(c);
        }
        state.stop_editing();
    }

    fn fill(state: &mut AppState) {
        type_into(state, FieldId::Name, "Ada");
        type_into(state, FieldId::Email, "a@b.com");
        type_into(state, FieldId::Message, "Hi");
    }

    #[test]
    fn test_focus_cycles_through_fields_and_submit() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = state(&dir);
        let mut seen = vec![s.focus];
        for _ in 0..4 {
            s.next_field();
            seen.push(s.focus);
        }
        assert_eq!(
            seen,
            vec![
                Focus::Field(FieldId::Name),
                Focus::Field(FieldId::Email),
                Focus::Field(FieldId::Extra(0)),
                Focus::Field(FieldId::Message),
                Focus::Submit,
            ]
        );
        s.next_field();
        assert_eq!(s.focus, Focus::Field(FieldId::Name));
        s.prev_field();
        assert_eq!(s.focus, Focus::Submit);
    }

    #[test]
    fn test_editing_handles_multibyte_chars() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = state(&dir);
        type_into(&mut s, FieldId::Name, "Zoë");
        s.start_editing();
        s.move_cursor_left();
        s.delete_char();
        assert_eq!(s.form.name, "Zë");
    }

    #[test]
    fn test_incomplete_submit_sends_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = state(&dir);
        type_into(&mut s, FieldId::Email, "a@b.com");
        type_into(&mut s, FieldId::Message, "Hi");
        assert!(s.submit().is_none());
        let render = s.to_render_state();
        assert_eq!(render.status, "Please complete all fields.");
        assert!(render.submit_enabled);
        assert_eq!(render.submission, SubmissionState::Failed(FailureReason::MissingFields));
    }

    #[test]
    fn test_editing_after_failure_returns_to_idle() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = state(&dir);
        s.submit();
        type_into(&mut s, FieldId::Name, "A");
        assert_eq!(s.controller.state(), SubmissionState::Idle);
    }

    #[test]
    fn test_submit_then_success_clears_form() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = state(&dir);
        fill(&mut s);
        type_into(&mut s, FieldId::Extra(0), "Hello");
        s.focus = Focus::Field(FieldId::Message);
        s.start_editing();

        let Some(NetworkCommand::SubmitForm(dispatch)) = s.submit() else {
            panic!("expected a dispatch");
        };
        assert_eq!(s.input_mode, InputMode::Normal);
        assert!(dispatch.fields.contains(&("subject".to_string(), "Hello".to_string())));
        assert!(!s.to_render_state().submit_enabled);

        s.handle_response(NetworkResponse {
            attempt: dispatch.attempt,
            outcome: RelayOutcome::Accepted { status: 200 },
            time_ms: 12,
        });
        let render = s.to_render_state();
        assert_eq!(render.status, "Thank you, your message has been sent.");
        assert!(render.submit_enabled);
        assert!(render.fields.iter().all(|f| f.value.is_empty()));
    }

    #[test]
    fn test_toggle_theme_persists() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = state(&dir);
        let before = s.theme;
        s.toggle_theme();
        assert_eq!(s.theme, before.toggle());
        let store = ThemePreferenceStore::at(dir.path().join("prefs.yaml"));
        assert_eq!(store.get(), Some(s.theme));
        assert_ne!(store.get(), Some(before));
    }
}
