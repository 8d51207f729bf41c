//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

/// Placeholder relay endpoint, replaced through config or `FORMRELAY_ENDPOINT`
pub const DEFAULT_ENDPOINT: &str = "https://formspree.io/f/your-form-id";

/// Extra (unvalidated) fields shown below the required ones
pub const DEFAULT_EXTRA_FIELDS: &[&str] = &["subject"];

/// Directory under `$HOME` holding config and preferences
pub const CONFIG_DIR_NAME: &str = ".formrelay";

pub const CONFIG_FILE_NAME: &str = "config.yaml";

pub const PREFERENCES_FILE_NAME: &str = "preferences.yaml";

/// Log file, written next to the working directory
pub const LOG_FILE_NAME: &str = "formrelay.log";

/// Application name
pub const APP_NAME: &str = "formrelay";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
