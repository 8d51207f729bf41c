//! formrelay - terminal contact form for form-relay endpoints
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - submission state machine processing events
//! - Network Layer (Tokio) - async relay submissions

use std::io;
use std::time::Duration;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::*,
};
use tokio::sync::mpsc;

use formrelay::constants::{APP_NAME, APP_VERSION, LOG_FILE_NAME};
use formrelay::messages::ui_events::{key_to_ui_event, Focus, InputMode};
use formrelay::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
use formrelay::models::FieldId;
use formrelay::network::client::create_client;
use formrelay::ui::{border_style, render_input, state_color, submit_label, Palette};
use formrelay::{AppActor, AppConfig, AppState, NetworkActor, ThemePreferenceStore};

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging to file
    let file_appender = tracing_appender::rolling::never(".", LOG_FILE_NAME);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    // Configuration is read once, before the terminal is taken over
    let config = AppConfig::load()?;
    tracing::info!(version = APP_VERSION, endpoint = %config.endpoint, locale = ?config.locale, "Starting");
    let state = AppState::new(&config, ThemePreferenceStore::new())?;

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel::<NetworkCommand>();
    let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel::<NetworkResponse>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn network actor
    let network_actor = NetworkActor::new(create_client(config.timeout()), net_resp_tx);
    tokio::spawn(network_actor.run(net_cmd_rx));

    // Spawn app actor
    let app_actor = AppActor::new(state, net_cmd_tx, render_tx);
    tokio::spawn(app_actor.run(ui_rx, net_resp_rx));

    // Run UI loop (synchronous with async polling)
    run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await?;

    Ok(())
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();

    loop {
        terminal.draw(|f| draw_ui(f, &current_state))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Some(event) = key_to_ui_event(
                    key,
                    current_state.focus,
                    current_state.input_mode,
                    current_state.show_help,
                ) {
                    let quit = matches!(event, UiEvent::Quit);
                    let _ = ui_tx.send(event);
                    if quit {
                        break;
                    }
                }
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState) {
    let area = f.area();
    let palette = Palette::for_theme(state.theme);

    f.render_widget(Block::default().style(palette.base()), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(6),    // Form
            Constraint::Length(3), // Submit + status
            Constraint::Length(1), // Footer
        ])
        .split(area);

    draw_header(f, state, &palette, chunks[0]);
    draw_form(f, state, &palette, chunks[1]);
    draw_submit_row(f, state, &palette, chunks[2]);
    draw_footer(f, state, &palette, chunks[3]);

    if state.show_help {
        draw_help_popup(f, &palette, area);
    }
}

fn draw_header(f: &mut Frame, state: &RenderState, palette: &Palette, area: Rect) {
    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", APP_NAME),
            Style::default().fg(palette.bg).bg(palette.accent).bold(),
        ),
        Span::raw(" "),
        Span::styled(format!("-> {}", state.endpoint), Style::default().fg(palette.muted)),
        Span::raw("  "),
        Span::styled(state.theme.icon().to_string(), Style::default().fg(palette.fg)),
    ]);
    f.render_widget(Paragraph::new(line).style(palette.base()), area);
}

fn draw_form(f: &mut Frame, state: &RenderState, palette: &Palette, area: Rect) {
    let constraints: Vec<Constraint> = state
        .fields
        .iter()
        .map(|field| match field.id {
            FieldId::Message => Constraint::Min(5),
            _ => Constraint::Length(3),
        })
        .collect();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (field, row) in state.fields.iter().zip(rows.iter()) {
        let focused = state.focus == Focus::Field(field.id);
        let editing = focused && state.input_mode == InputMode::Editing;
        let title = if field.required {
            format!(" {} * ", field.label)
        } else {
            format!(" {} ", field.label)
        };

        let input = render_input(&field.value, title, border_style(focused, editing, palette), palette);
        f.render_widget(input, *row);

        if editing {
            let (line, col) = cursor_line_col(&field.value, state.cursor_position);
            let max_x = row.x + row.width.saturating_sub(2);
            let cursor_x = (row.x + col as u16 + 1).min(max_x);
            let max_y = row.y + row.height.saturating_sub(2);
            let cursor_y = (row.y + line as u16 + 1).min(max_y);
            f.set_cursor_position(Position::new(cursor_x, cursor_y));
        }
    }
}

/// Line and column (in chars) of a byte cursor within possibly multi-line text
fn cursor_line_col(text: &str, cursor: usize) -> (usize, usize) {
    let before = &text[..cursor.min(text.len())];
    let line = before.matches('\n').count();
    let col = before.rsplit('\n').next().map(|s| s.chars().count()).unwrap_or(0);
    (line, col)
}

fn draw_submit_row(f: &mut Frame, state: &RenderState, palette: &Palette, area: Rect) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(16), Constraint::Min(10)])
        .split(area);

    let focused = state.focus == Focus::Submit;
    let button_style = if !state.submit_enabled {
        Style::default().fg(palette.muted)
    } else if focused {
        Style::default().fg(palette.bg).bg(palette.accent).bold()
    } else {
        Style::default().fg(palette.accent).bold()
    };

    let button = Paragraph::new(submit_label(state.submit_enabled, state.submission))
        .alignment(Alignment::Center)
        .style(button_style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style(focused, false, palette)),
        );
    f.render_widget(button, cols[0]);

    let status = Paragraph::new(state.status.as_str())
        .style(Style::default().fg(state_color(state.submission, palette)).bg(palette.bg))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.muted))
                .title(format!(" {} ", state.submission.label())),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(status, cols[1]);
}

fn draw_footer(f: &mut Frame, state: &RenderState, palette: &Palette, area: Rect) {
    let hints = if state.input_mode == InputMode::Editing {
        " ESC:stop editing | Tab:next field | Ctrl+S:send "
    } else {
        " Tab:field | e:edit | s:send | t:theme | ?:help | q:quit "
    };

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(10)])
        .split(area);

    f.render_widget(
        Paragraph::new(hints).style(Style::default().fg(palette.muted).bg(palette.bg)),
        cols[0],
    );
    f.render_widget(
        Paragraph::new(format!("© {} ", state.year))
            .alignment(Alignment::Right)
            .style(Style::default().fg(palette.muted).bg(palette.bg)),
        cols[1],
    );
}

fn draw_help_popup(f: &mut Frame, palette: &Palette, area: Rect) {
    let popup_area = centered_rect(60, 60, area);

    let help_text = r#"
 FORMRELAY - Keyboard Shortcuts

 NAVIGATION
   Tab / Shift+Tab    Next / previous field
   ↑ / ↓              Next / previous field

 EDITING
   e / Enter          Edit focused field
   Esc                Stop editing
   Enter              New line (message) / send (other fields)

 FORM
   s / Ctrl+S         Send
   t                  Toggle light/dark theme

 GENERAL
   ?                  Toggle this help
   q / Ctrl+C         Quit

 Press any key to close...
"#;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(palette.base());

    let help = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
