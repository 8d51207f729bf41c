//! # formrelay
//!
//! A terminal contact form that submits to a form-relay service such as
//! Formspree, without any backend of its own.
//!
//! ## Features
//! - Required `name` / `email` / `message` plus configurable extra fields
//! - One POST per validated attempt, `Accept: application/json`
//! - Relay error messages surfaced verbatim, generic fallbacks otherwise
//! - Light/dark theme, persisted between runs
//! - English and Indonesian status messages
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (submission state machine)
//! - Network Layer (Tokio runtime)

pub mod config;
pub mod constants;
pub mod models;
pub mod storage;
pub mod submission;
pub mod ui;
pub mod messages;
pub mod app;
pub mod network;

// Re-export commonly used types
pub use config::AppConfig;
pub use models::{FieldId, FormInput, Locale, StatusMessages, Theme};
pub use storage::ThemePreferenceStore;
pub use submission::{
    Dispatch, FailureReason, RelayOutcome, SubmissionController, SubmissionError, SubmissionState,
};
pub use messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
pub use app::{AppActor, AppState};
pub use network::NetworkActor;
