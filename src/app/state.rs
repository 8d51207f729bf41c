//! App state - pure data structure with no network I/O

use chrono::Datelike;

use crate::config::AppConfig;
use crate::messages::ui_events::{Focus, InputMode};
use crate::messages::{FieldView, RenderState};
use crate::models::{FieldId, FormInput, StatusMessages, Theme};
use crate::storage::ThemePreferenceStore;
use crate::submission::SubmissionController;

/// Main application state
pub struct AppState {
    // Form contents
    pub form: FormInput,
    pub cursor_position: usize,

    // UI state
    pub focus: Focus,
    pub input_mode: InputMode,

    // Submission lifecycle
    pub controller: SubmissionController,

    // Appearance
    pub theme: Theme,
    pub preferences: ThemePreferenceStore,

    // Popups
    pub show_help: bool,
}

impl AppState {
    /// Build the state once at startup. Fails only on a bad endpoint URL.
    pub fn new(config: &AppConfig, preferences: ThemePreferenceStore) -> anyhow::Result<Self> {
        let controller = SubmissionController::new(
            config.endpoint_url()?,
            StatusMessages::for_locale(config.locale),
        );
        let theme = preferences.initial_theme();
        tracing::info!(theme = theme.as_str(), endpoint = %controller.endpoint(), "App state initialized");

        Ok(AppState {
            form: FormInput::with_extra_fields(&config.extra_fields),
            cursor_position: 0,
            focus: Focus::Field(FieldId::Name),
            input_mode: InputMode::Normal,
            controller,
            theme,
            preferences,
            show_help: false,
        })
    }

    /// Focusable elements in tab order
    pub fn focus_order(&self) -> Vec<Focus> {
        let mut order: Vec<Focus> = self.form.field_ids().into_iter().map(Focus::Field).collect();
        order.push(Focus::Submit);
        order
    }

    /// Get the current input field content
    pub fn current_input(&self) -> &str {
        match self.focus {
            Focus::Field(id) => self.form.value(id),
            Focus::Submit => "",
        }
    }

    /// Get mutable reference to current input field
    pub fn current_input_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            Focus::Field(id) => self.form.value_mut(id),
            Focus::Submit => None,
        }
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        let fields = self
            .form
            .field_ids()
            .into_iter()
            .map(|id| FieldView {
                id,
                label: self.form.label(id).to_string(),
                value: self.form.value(id).to_string(),
                required: FormInput::is_required(id),
            })
            .collect();

        RenderState {
            fields,
            focus: self.focus,
            input_mode: self.input_mode,
            cursor_position: self.cursor_position,
            submission: self.controller.state(),
            status: self.controller.status().to_string(),
            submit_enabled: self.controller.submit_enabled(),
            endpoint: self.controller.endpoint().to_string(),
            theme: self.theme,
            year: chrono::Local::now().year(),
            show_help: self.show_help,
        }
    }
}
