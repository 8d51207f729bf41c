//! Network actor - runs relay submissions in the Tokio async runtime

use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::messages::{NetworkCommand, NetworkResponse};
use crate::network::client::execute_submission;

/// Network actor that processes submission commands
pub struct NetworkActor {
    client: reqwest::Client,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    active_requests: JoinSet<()>,
}

impl NetworkActor {
    pub fn new(client: reqwest::Client, response_tx: mpsc::UnboundedSender<NetworkResponse>) -> Self {
        NetworkActor {
            client,
            response_tx,
            active_requests: JoinSet::new(),
        }
    }

    /// Run the network actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::SubmitForm(dispatch)) => {
                            let response_tx = self.response_tx.clone();
                            let client = self.client.clone();

                            // No cancellation: an attempt runs until it settles
                            self.active_requests.spawn(async move {
                                let attempt = dispatch.attempt;
                                tracing::info!(attempt, url = %dispatch.endpoint, "Posting form to relay");
                                let result = execute_submission(&client, dispatch).await;
                                tracing::info!(attempt, time_ms = result.time_ms, success = result.is_success(), "Relay replied");
                                let _ = response_tx.send(result);
                            });
                        }

                        Some(NetworkCommand::Shutdown) | None => {
                            self.active_requests.abort_all();
                            break;
                        }
                    }
                }

                // Clean up completed tasks
                Some(_result) = self.active_requests.join_next() => {}
            }
        }
    }
}
