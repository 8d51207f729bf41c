//! App actor - message loop processing UI events and network replies

use tokio::sync::mpsc;

use crate::app::state::AppState;
use crate::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
use crate::submission::RelayOutcome;

/// App actor that processes UI events and network replies
pub struct AppActor {
    state: AppState,
    network_tx: mpsc::UnboundedSender<NetworkCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
}

impl AppActor {
    pub fn new(
        state: AppState,
        network_tx: mpsc::UnboundedSender<NetworkCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        AppActor {
            state,
            network_tx,
            render_tx,
        }
    }

    /// Run the actor message loop
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut net_rx: mpsc::UnboundedReceiver<NetworkResponse>,
    ) {
        // Send initial render state
        let _ = self.render_tx.send(self.state.to_render_state());

        loop {
            tokio::select! {
                Some(event) = ui_rx.recv() => {
                    if self.handle_ui_event(event) {
                        // Quit signal received
                        let _ = self.network_tx.send(NetworkCommand::Shutdown);
                        break;
                    }
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                Some(response) = net_rx.recv() => {
                    self.state.handle_response(response);
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                else => break,
            }
        }
    }

    /// Handle a UI event, returns true if quit was requested
    fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        match event {
            // Focus navigation
            UiEvent::NextField => self.state.next_field(),
            UiEvent::PrevField => self.state.prev_field(),

            // Input editing
            UiEvent::StartEditing => self.state.start_editing(),
            UiEvent::StopEditing => self.state.stop_editing(),
            UiEvent::CharInput(c) => self.state.enter_char(c),
            UiEvent::Backspace => self.state.delete_char(),
            UiEvent::CursorLeft => self.state.move_cursor_left(),
            UiEvent::CursorRight => self.state.move_cursor_right(),

            // Submit: the control is already disabled when the command leaves
            UiEvent::Submit => {
                if let Some(cmd) = self.state.submit() {
                    if let Err(mpsc::error::SendError(NetworkCommand::SubmitForm(dispatch))) =
                        self.network_tx.send(cmd)
                    {
                        // Settle the attempt so the control comes back
                        tracing::error!(attempt = dispatch.attempt, "Network actor is gone");
                        self.state.handle_response(NetworkResponse {
                            attempt: dispatch.attempt,
                            outcome: RelayOutcome::TransportFailed {
                                message: "network actor unavailable".to_string(),
                            },
                            time_ms: 0,
                        });
                    }
                }
            }

            UiEvent::ToggleTheme => self.state.toggle_theme(),

            // Popups
            UiEvent::ToggleHelp => self.state.toggle_help(),
            UiEvent::CloseHelp => self.state.close_help(),

            // System
            UiEvent::Quit => return true,
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::storage::ThemePreferenceStore;
    use crate::submission::{FailureReason, SubmissionState};

    fn fill_form(ui_tx: &mpsc::UnboundedSender<UiEvent>) {
        // name, email, subject, message
        for (i, text) in ["Ada", "a@b.com", "", "Hi"].iter().enumerate() {
            if i > 0 {
                ui_tx.send(UiEvent::NextField).unwrap();
            }
            ui_tx.send(UiEvent::StartEditing).unwrap();
            for c in text.chars() {
                ui_tx.send(UiEvent::CharInput(c)).unwrap();
            }
            ui_tx.send(UiEvent::StopEditing).unwrap();
        }
    }

    #[tokio::test]
    async fn test_actor_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = ThemePreferenceStore::at(dir.path().join("prefs.yaml"));
        let state = AppState::new(&AppConfig::default(), store).unwrap();

        let (ui_tx, ui_rx) = mpsc::unbounded_channel();
        let (net_cmd_tx, mut net_cmd_rx) = mpsc::unbounded_channel();
        let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel();
        let (render_tx, mut render_rx) = mpsc::unbounded_channel();

        let handle = tokio::spawn(AppActor::new(state, net_cmd_tx, render_tx).run(ui_rx, net_resp_rx));

        let initial = render_rx.recv().await.unwrap();
        assert!(initial.submit_enabled);

        fill_form(&ui_tx);
        ui_tx.send(UiEvent::Submit).unwrap();

        let Some(NetworkCommand::SubmitForm(dispatch)) = net_cmd_rx.recv().await else {
            panic!("expected a submit command");
        };
        assert_eq!(dispatch.fields[0], ("name".to_string(), "Ada".to_string()));

        net_resp_tx
            .send(NetworkResponse {
                attempt: dispatch.attempt,
                outcome: RelayOutcome::Accepted { status: 200 },
                time_ms: 5,
            })
            .unwrap();

        let settled = loop {
            let state = render_rx.recv().await.unwrap();
            if state.submission.is_settled() {
                break state;
            }
        };
        assert_eq!(settled.status, "Thank you, your message has been sent.");
        assert!(settled.submit_enabled);
        assert!(settled.fields.iter().all(|f| f.value.is_empty()));

        ui_tx.send(UiEvent::Quit).unwrap();
        assert!(matches!(net_cmd_rx.recv().await, Some(NetworkCommand::Shutdown)));
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_submit_without_network_actor_re_enables_control() {
        let dir = tempfile::tempdir().unwrap();
        let store = ThemePreferenceStore::at(dir.path().join("prefs.yaml"));
        let state = AppState::new(&AppConfig::default(), store).unwrap();

        let (ui_tx, ui_rx) = mpsc::unbounded_channel();
        let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel();
        let (_net_resp_tx, net_resp_rx) = mpsc::unbounded_channel();
        let (render_tx, mut render_rx) = mpsc::unbounded_channel();
        drop(net_cmd_rx);

        let handle = tokio::spawn(AppActor::new(state, net_cmd_tx, render_tx).run(ui_rx, net_resp_rx));

        fill_form(&ui_tx);
        ui_tx.send(UiEvent::Submit).unwrap();

        let settled = loop {
            let state = render_rx.recv().await.unwrap();
            if state.submission.is_settled() {
                break state;
            }
        };
        assert_eq!(settled.submission, SubmissionState::Failed(FailureReason::TransportError));
        assert_eq!(settled.status, "A network error occurred. Please try again later.");
        assert!(settled.submit_enabled);
        assert_eq!(settled.fields[0].value, "Ada");

        ui_tx.send(UiEvent::Quit).unwrap();
        handle.await.unwrap();
    }
}
