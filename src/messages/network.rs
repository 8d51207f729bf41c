//! Network messages - communication between App and Network layers

use crate::submission::{Dispatch, RelayOutcome};

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone)]
pub enum NetworkCommand {
    /// POST a validated form to the relay endpoint
    SubmitForm(Dispatch),
    /// Shutdown the network actor
    Shutdown,
}

/// Reply sent from Network layer to App layer once an attempt settles
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkResponse {
    pub attempt: u64,
    pub outcome: RelayOutcome,
    pub time_ms: u64,
}

impl NetworkResponse {
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, RelayOutcome::Accepted { .. })
    }
}
