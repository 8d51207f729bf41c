//! Render state - data structure sent from App layer to UI for rendering

use crate::messages::ui_events::{Focus, InputMode};
use crate::models::{FieldId, Theme};
use crate::submission::SubmissionState;

/// One form field as the UI draws it
#[derive(Debug, Clone, PartialEq)]
pub struct FieldView {
    pub id: FieldId,
    pub label: String,
    pub value: String,
    pub required: bool,
}

/// Complete state needed by the UI to render
#[derive(Debug, Clone)]
pub struct RenderState {
    // Form
    pub fields: Vec<FieldView>,
    pub focus: Focus,
    pub input_mode: InputMode,
    pub cursor_position: usize,

    // Submission
    pub submission: SubmissionState,
    pub status: String,
    pub submit_enabled: bool,
    pub endpoint: String,

    // Appearance
    pub theme: Theme,
    pub year: i32,

    // Popups
    pub show_help: bool,
}

impl Default for RenderState {
    fn default() -> Self {
        use crate::constants::DEFAULT_ENDPOINT;
        use chrono::Datelike;
        RenderState {
            fields: Vec::new(),
            focus: Focus::Field(FieldId::Name),
            input_mode: InputMode::Normal,
            cursor_position: 0,
            submission: SubmissionState::Idle,
            status: String::new(),
            submit_enabled: true,
            endpoint: String::from(DEFAULT_ENDPOINT),
            theme: Theme::Dark,
            year: chrono::Local::now().year(),
            show_help: false,
        }
    }
}
