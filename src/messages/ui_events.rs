//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::models::FieldId;

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    // Focus navigation
    NextField,
    PrevField,

    // Input editing
    StartEditing,
    StopEditing,
    CharInput(char),
    Backspace,
    CursorLeft,
    CursorRight,

    // Form actions
    Submit,

    // Appearance
    ToggleTheme,

    // Popups
    ToggleHelp,
    CloseHelp,

    // System
    Quit,
}

/// Focused element of the form (needed for context-aware event mapping)
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Focus {
    Field(FieldId),
    Submit,
}

/// Input mode
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum InputMode {
    Normal,
    Editing,
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(
    key: KeyEvent,
    focus: Focus,
    input_mode: InputMode,
    show_help: bool,
) -> Option<UiEvent> {
    use crossterm::event::KeyEventKind;

    if key.kind != KeyEventKind::Press {
        return None;
    }

    // Global Ctrl shortcuts
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') => return Some(UiEvent::Quit),
            KeyCode::Char('s') => return Some(UiEvent::Submit),
            _ => {}
        }
    }

    if show_help {
        return Some(UiEvent::CloseHelp);
    }

    match input_mode {
        InputMode::Normal => match key.code {
            KeyCode::Char('q') => Some(UiEvent::Quit),
            KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
            KeyCode::Char('t') => Some(UiEvent::ToggleTheme),
            KeyCode::Char('s') => Some(UiEvent::Submit),
            KeyCode::Tab | KeyCode::Down => Some(UiEvent::NextField),
            KeyCode::BackTab | KeyCode::Up => Some(UiEvent::PrevField),
            KeyCode::Char('e') | KeyCode::Enter => match focus {
                Focus::Field(_) => Some(UiEvent::StartEditing),
                Focus::Submit => Some(UiEvent::Submit),
            },
            _ => None,
        },
        InputMode::Editing => match key.code {
            KeyCode::Esc => Some(UiEvent::StopEditing),
            KeyCode::Left => Some(UiEvent::CursorLeft),
            KeyCode::Right => Some(UiEvent::CursorRight),
            KeyCode::Backspace => Some(UiEvent::Backspace),
            KeyCode::Tab => Some(UiEvent::NextField),
            KeyCode::BackTab => Some(UiEvent::PrevField),
            KeyCode::Char(c) => Some(UiEvent::CharInput(c)),
            // Enter submits from single-line fields, like an HTML form
            KeyCode::Enter => match focus {
                Focus::Field(FieldId::Message) => Some(UiEvent::CharInput('\n')),
                _ => Some(UiEvent::Submit),
            },
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_ctrl_s_submits_while_editing() {
        let key = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        let event = key_to_ui_event(key, Focus::Field(FieldId::Name), InputMode::Editing, false);
        assert_eq!(event, Some(UiEvent::Submit));
    }

    #[test]
    fn test_plain_s_is_text_while_editing() {
        let event = key_to_ui_event(
            press(KeyCode::Char('s')),
            Focus::Field(FieldId::Email),
            InputMode::Editing,
            false,
        );
        assert_eq!(event, Some(UiEvent::CharInput('s')));
    }

    #[test]
    fn test_enter_in_message_inserts_newline() {
        let message = Focus::Field(FieldId::Message);
        let name = Focus::Field(FieldId::Name);
        assert_eq!(
            key_to_ui_event(press(KeyCode::Enter), message, InputMode::Editing, false),
            Some(UiEvent::CharInput('\n'))
        );
        assert_eq!(
            key_to_ui_event(press(KeyCode::Enter), name, InputMode::Editing, false),
            Some(UiEvent::Submit)
        );
    }

    #[test]
    fn test_enter_on_submit_button() {
        assert_eq!(
            key_to_ui_event(press(KeyCode::Enter), Focus::Submit, InputMode::Normal, false),
            Some(UiEvent::Submit)
        );
    }

    #[test]
    fn test_help_swallows_keys() {
        assert_eq!(
            key_to_ui_event(press(KeyCode::Char('q')), Focus::Submit, InputMode::Normal, true),
            Some(UiEvent::CloseHelp)
        );
    }
}
