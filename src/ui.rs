use ratatui::{prelude::*, widgets::*};

use crate::models::Theme;
use crate::submission::{FailureReason, SubmissionState};

/// Colors for one theme
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    pub bg: Color,
    pub fg: Color,
    pub muted: Color,
    pub accent: Color,
    pub focus: Color,
    pub editing: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Palette {
        match theme {
            Theme::Dark => Palette {
                bg: Color::Reset,
                fg: Color::White,
                muted: Color::DarkGray,
                accent: Color::Cyan,
                focus: Color::Cyan,
                editing: Color::Yellow,
            },
            Theme::Light => Palette {
                bg: Color::White,
                fg: Color::Black,
                muted: Color::Gray,
                accent: Color::Blue,
                focus: Color::Blue,
                editing: Color::Magenta,
            },
        }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }
}

/// Renders a labelled text input
pub fn render_input<'a>(
    content: &'a str,
    title: String,
    border: Style,
    palette: &Palette,
) -> Paragraph<'a> {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(title);

    Paragraph::new(content)
        .style(palette.base())
        .block(block)
        .wrap(Wrap { trim: false })
}

/// Border style for a field given focus and editing state
pub fn border_style(focused: bool, editing: bool, palette: &Palette) -> Style {
    if focused && editing {
        Style::default().fg(palette.editing)
    } else if focused {
        Style::default().fg(palette.focus)
    } else {
        Style::default().fg(palette.muted)
    }
}

/// Submission state color
pub fn state_color(state: SubmissionState, palette: &Palette) -> Color {
    match state {
        SubmissionState::Idle => palette.muted,
        SubmissionState::Validating | SubmissionState::Submitting => Color::Yellow,
        SubmissionState::Succeeded => Color::Green,
        SubmissionState::Failed(FailureReason::MissingFields) => Color::Yellow,
        SubmissionState::Failed(_) => Color::Red,
    }
}

/// Submit button label
pub fn submit_label(enabled: bool, state: SubmissionState) -> &'static str {
    match (enabled, state) {
        (false, _) | (_, SubmissionState::Submitting) => " Sending... ",
        _ => " Send ",
    }
}
