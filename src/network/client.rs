//! HTTP client wrapper - posts forms to the relay and classifies the reply

use std::time::{Duration, Instant};

use reqwest::header::ACCEPT;

use crate::messages::NetworkResponse;
use crate::submission::{Dispatch, RelayOutcome};

/// Build the single POST for a dispatch
fn build_request(client: &reqwest::Client, dispatch: &Dispatch) -> reqwest::RequestBuilder {
    client
        .post(dispatch.endpoint.clone())
        .header(ACCEPT, "application/json")
        .form(&dispatch.fields)
}

fn describe_error(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        format!("Request timed out: {}", e)
    } else if e.is_connect() {
        format!("Connection failed: {}", e)
    } else {
        format!("Request failed: {}", e)
    }
}

/// Send the form and turn whatever happens into a [`RelayOutcome`].
///
/// A non-success body that cannot be read is reported as an empty body so
/// the controller falls back to its generic message.
pub async fn submit_form(client: &reqwest::Client, dispatch: &Dispatch) -> RelayOutcome {
    match build_request(client, dispatch).send().await {
        Ok(resp) => {
            let status = resp.status();
            if status.is_success() {
                RelayOutcome::Accepted { status: status.as_u16() }
            } else {
                let body = match resp.text().await {
                    Ok(body) => body,
                    Err(e) => {
                        tracing::warn!(attempt = dispatch.attempt, error = %e, "Error reading relay body");
                        String::new()
                    }
                };
                RelayOutcome::Rejected { status: status.as_u16(), body }
            }
        }
        Err(e) => RelayOutcome::TransportFailed { message: describe_error(&e) },
    }
}

/// Submit and wrap the outcome for the App layer
pub async fn execute_submission(client: &reqwest::Client, dispatch: Dispatch) -> NetworkResponse {
    let start = Instant::now();
    let outcome = submit_form(client, &dispatch).await;
    NetworkResponse {
        attempt: dispatch.attempt,
        outcome,
        time_ms: start.elapsed().as_millis() as u64,
    }
}

/// Create an HTTP client. Without a timeout the transport defaults apply.
pub fn create_client(timeout: Option<Duration>) -> reqwest::Client {
    let mut builder = reqwest::Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")));
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().unwrap_or_else(|_| reqwest::Client::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Url;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one canned HTTP response and hand back the raw request
    async fn serve_once(status_line: &str, body: &str) -> (Url, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            request
        });
        let url = Url::parse(&format!("http://{}/f/test", addr)).unwrap();
        (url, handle)
    }

    async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            let text = String::from_utf8_lossy(&buf).to_string();
            if let Some(head_end) = text.find("\r\n\r\n") {
                let content_length = text[..head_end]
                    .lines()
                    .find_map(|l| {
                        let lower = l.to_ascii_lowercase();
                        lower
                            .strip_prefix("content-length:")
                            .map(|v| v.trim().parse::<usize>().unwrap_or(0))
                    })
                    .unwrap_or(0);
                if buf.len() >= head_end + 4 + content_length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buf).to_string()
    }

    fn local_client() -> reqwest::Client {
        reqwest::Client::builder().no_proxy().build().unwrap()
    }

    fn dispatch(endpoint: Url) -> Dispatch {
        Dispatch {
            attempt: 1,
            endpoint,
            fields: vec![
                ("name".to_string(), "Ada".to_string()),
                ("email".to_string(), "a@b.com".to_string()),
                ("message".to_string(), "Hi there".to_string()),
            ],
        }
    }

    #[tokio::test]
    async fn test_posts_form_with_accept_header() {
        let (url, server) = serve_once("200 OK", r#"{"ok":true}"#).await;
        let outcome = submit_form(&local_client(), &dispatch(url)).await;
        assert_eq!(outcome, RelayOutcome::Accepted { status: 200 });

        let request = server.await.unwrap();
        let lower = request.to_ascii_lowercase();
        assert!(request.starts_with("POST /f/test HTTP/1.1"));
        assert!(lower.contains("accept: application/json"));
        assert!(lower.contains("content-type: application/x-www-form-urlencoded"));
        assert!(request.ends_with("name=Ada&email=a%40b.com&message=Hi+there"));
    }

    #[tokio::test]
    async fn test_rejection_keeps_body() {
        let body = r#"{"error": "Duplicate submission"}"#;
        let (url, _server) = serve_once("422 Unprocessable Entity", body).await;
        let outcome = submit_form(&local_client(), &dispatch(url)).await;
        assert_eq!(
            outcome,
            RelayOutcome::Rejected { status: 422, body: body.to_string() }
        );
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_failure() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let url = Url::parse(&format!("http://{}/f/test", addr)).unwrap();
        let response = execute_submission(&local_client(), dispatch(url)).await;
        assert_eq!(response.attempt, 1);
        assert!(matches!(response.outcome, RelayOutcome::TransportFailed { .. }));
    }

    #[tokio::test]
    async fn test_timeout_is_a_transport_failure() {
        // Accept the connection but never answer
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let _server = tokio::spawn(async move {
            let (socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
            drop(socket);
        });

        let client = reqwest::Client::builder()
            .no_proxy()
            .timeout(Duration::from_millis(200))
            .build()
            .unwrap();
        let url = Url::parse(&format!("http://{}/f/test", addr)).unwrap();
        match submit_form(&client, &dispatch(url)).await {
            RelayOutcome::TransportFailed { message } => assert!(message.starts_with("Request timed out")),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }
}
