//! Submission controller - validation and lifecycle of one contact form attempt
//!
//! The controller is pure state: it decides whether an attempt may go out,
//! hands back a [`Dispatch`] describing the single request to make, and later
//! folds the [`RelayOutcome`] into a status line. The network round trip
//! between the two calls is the only suspension point.

use reqwest::Url;
use thiserror::Error;

use crate::models::{FormInput, StatusMessages};

/// Why an attempt ended in `Failed`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureReason {
    MissingFields,
    ServerRejected,
    TransportError,
}

/// Lifecycle of the current attempt
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Validating,
    Submitting,
    Succeeded,
    Failed(FailureReason),
}

impl SubmissionState {
    pub fn is_settled(&self) -> bool {
        matches!(self, SubmissionState::Succeeded | SubmissionState::Failed(_))
    }

    pub fn label(&self) -> &str {
        match self {
            SubmissionState::Idle => "idle",
            SubmissionState::Validating => "validating",
            SubmissionState::Submitting => "submitting",
            SubmissionState::Succeeded => "sent",
            SubmissionState::Failed(FailureReason::MissingFields) => "incomplete",
            SubmissionState::Failed(FailureReason::ServerRejected) => "rejected",
            SubmissionState::Failed(FailureReason::TransportError) => "network error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmissionError {
    #[error("required fields are missing")]
    Validation,
    #[error("relay rejected submission with status {status}")]
    ServerRejection { status: u16, message: Option<String> },
    #[error("transport failure: {0}")]
    Transport(String),
}

impl SubmissionError {
    pub fn reason(&self) -> FailureReason {
        match self {
            SubmissionError::Validation => FailureReason::MissingFields,
            SubmissionError::ServerRejection { .. } => FailureReason::ServerRejected,
            SubmissionError::Transport(_) => FailureReason::TransportError,
        }
    }
}

/// What came back from the relay endpoint
#[derive(Debug, Clone, PartialEq)]
pub enum RelayOutcome {
    /// 2xx response; the body is not inspected
    Accepted { status: u16 },
    /// Non-success response with its raw body (possibly empty)
    Rejected { status: u16, body: String },
    /// The request never completed
    TransportFailed { message: String },
}

/// The one request a validated attempt is allowed to make
#[derive(Debug, Clone, PartialEq)]
pub struct Dispatch {
    pub attempt: u64,
    pub endpoint: Url,
    pub fields: Vec<(String, String)>,
}

/// Pull a human-readable message out of a relay error body.
///
/// Recognizes `{"error": "..."}` and Formspree's
/// `{"errors": [{"message": "..."}]}`. Anything else, including bodies that
/// are not JSON at all, yields `None`.
pub fn rejection_message(body: &str) -> Option<String> {
    let json: serde_json::Value = serde_json::from_str(body).ok()?;

    if let Some(error) = json.get("error").and_then(|e| e.as_str()) {
        if !error.is_empty() {
            return Some(error.to_string());
        }
    }

    let messages: Vec<&str> = json
        .get("errors")?
        .as_array()?
        .iter()
        .filter_map(|e| e.get("message").and_then(|m| m.as_str()))
        .filter(|m| !m.is_empty())
        .collect();

    if messages.is_empty() {
        None
    } else {
        Some(messages.join(" "))
    }
}

/// Owns the status line and the submit control for the contact form
#[derive(Debug)]
pub struct SubmissionController {
    endpoint: Url,
    messages: StatusMessages,
    state: SubmissionState,
    status: String,
    submit_enabled: bool,
    next_attempt: u64,
    in_flight: Option<u64>,
}

impl SubmissionController {
    pub fn new(endpoint: Url, messages: StatusMessages) -> Self {
        SubmissionController {
            endpoint,
            messages,
            state: SubmissionState::Idle,
            status: String::new(),
            submit_enabled: true,
            next_attempt: 1,
            in_flight: None,
        }
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn submit_enabled(&self) -> bool {
        self.submit_enabled
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn messages(&self) -> &StatusMessages {
        &self.messages
    }

    pub fn in_flight(&self) -> Option<u64> {
        self.in_flight
    }

    /// Return a settled attempt to `Idle`. The status text stays visible.
    pub fn reset(&mut self) {
        if self.state.is_settled() {
            tracing::debug!(state = ?self.state, "Resetting settled submission");
            self.state = SubmissionState::Idle;
        }
    }

    /// Entry point for a user-initiated submit.
    ///
    /// Returns the request to issue, or `None` when validation failed or an
    /// attempt is already in flight.
    pub fn on_submit_triggered(&mut self, input: &FormInput) -> Option<Dispatch> {
        if self.state == SubmissionState::Submitting || !self.submit_enabled {
            tracing::debug!(attempt = ?self.in_flight, "Submit ignored, attempt already in flight");
            return None;
        }

        self.reset();
        self.state = SubmissionState::Validating;
        self.status.clear();

        if !input.is_complete() {
            tracing::info!("Submission rejected locally: missing fields");
            self.state = SubmissionState::Failed(FailureReason::MissingFields);
            self.status = self.messages.missing_fields.to_string();
            return None;
        }

        let attempt = self.next_attempt;
        self.next_attempt += 1;

        // Control is disabled before the dispatch leaves this function
        self.submit_enabled = false;
        self.state = SubmissionState::Submitting;
        self.status = self.messages.sending.to_string();
        self.in_flight = Some(attempt);

        tracing::info!(attempt, endpoint = %self.endpoint, "Submitting contact form");

        Some(Dispatch {
            attempt,
            endpoint: self.endpoint.clone(),
            fields: input.fields(),
        })
    }

    /// Fold the relay outcome into the status line.
    ///
    /// Returns `None` for a reply that does not belong to the attempt in
    /// flight. On success the form is cleared.
    pub fn resolve(
        &mut self,
        attempt: u64,
        outcome: RelayOutcome,
        form: &mut FormInput,
    ) -> Option<Result<(), SubmissionError>> {
        if self.in_flight != Some(attempt) {
            tracing::debug!(attempt, in_flight = ?self.in_flight, "Ignoring stale relay reply");
            return None;
        }

        let result = match outcome {
            RelayOutcome::Accepted { status } => {
                tracing::info!(attempt, status, "Submission accepted");
                self.status = self.messages.thank_you.to_string();
                form.clear();
                Ok(())
            }
            RelayOutcome::Rejected { status, body } => {
                let message = rejection_message(&body);
                tracing::warn!(attempt, status, message = ?message, "Submission rejected by relay");
                self.status = message
                    .clone()
                    .unwrap_or_else(|| self.messages.rejected.to_string());
                Err(SubmissionError::ServerRejection { status, message })
            }
            RelayOutcome::TransportFailed { message } => {
                tracing::error!(attempt, error = %message, "Submission transport failure");
                self.status = self.messages.network_error.to_string();
                Err(SubmissionError::Transport(message))
            }
        };

        self.state = match &result {
            Ok(()) => SubmissionState::Succeeded,
            Err(e) => SubmissionState::Failed(e.reason()),
        };

        // Every exit from Submitting passes through here
        self.in_flight = None;
        self.submit_enabled = true;

        Some(result)
    }
}
