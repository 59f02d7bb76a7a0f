use anyhow::Result;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

#[derive(Serialize)]
struct CommandRequest<'a> {
    command: &'a str,
}

/// Outcome of a backend call, ready for display in the status area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub is_error: bool,
}

impl Reply {
    pub fn ok(text: impl Into<String>) -> Self {
        Self { text: text.into(), is_error: false }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { text: text.into(), is_error: true }
    }
}

/// HTTP client for the Vex assistant backend.
///
/// The backend owns all command interpretation; this client only speaks the
/// two-endpoint contract (`/api/command`, `/api/launch`) and maps responses
/// into displayable text.
#[derive(Clone)]
pub struct VexClient {
    client: Client,
    base_url: String,
}

impl VexClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// POST a command and map the response into display text.
    ///
    /// The body is read as text first so a malformed JSON payload cannot
    /// abort the flow; the parse result only feeds the fallback chain.
    /// Transport failures surface as `Err` and are prefixed by the caller.
    pub async fn send_command(&self, command: &str) -> Result<Reply> {
        let url = format!("{}/api/command", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&CommandRequest { command })
            .send()
            .await?;

        let status = response.status();
        let raw = response.text().await?;
        let reply_field = extract_field(&raw, "reply");

        if status.is_success() {
            debug!(%status, bytes = raw.len(), "command reply received");
            Ok(Reply::ok(success_text(reply_field, raw)))
        } else {
            warn!(%status, body = %raw, "command request failed");
            Ok(Reply::error(failure_text(status, reply_field, raw)))
        }
    }

    /// POST a no-body launch request. Best effort: one attempt, no retry.
    pub async fn launch(&self) -> Result<Reply> {
        let url = format!("{}/api/launch", self.base_url);

        let response = self.client.post(&url).send().await?;
        let status = response.status();
        let raw = response.text().await?;
        debug!(%status, "launch reply received");

        let text = extract_field(&raw, "status")
            .unwrap_or_else(|| "Launch issued".to_string());
        Ok(Reply::ok(text))
    }
}

/// Pull a non-empty string field out of a JSON object body, if the body
/// parses at all. An empty string falls through to the next fallback.
fn extract_field(raw: &str, field: &str) -> Option<String> {
    let parsed: Value = serde_json::from_str(raw).ok()?;
    parsed
        .get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Success chain: `reply` field, else raw body text, else a placeholder.
fn success_text(reply_field: Option<String>, raw: String) -> String {
    reply_field.unwrap_or(if raw.is_empty() {
        "(no reply)".to_string()
    } else {
        raw
    })
}

/// Failure chain: `reply` field, else raw body text, else the status
/// reason phrase. Deliberately not unified with the success chain.
fn failure_text(status: StatusCode, reply_field: Option<String>, raw: String) -> String {
    let detail = reply_field
        .or(if raw.is_empty() { None } else { Some(raw) })
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        });
    format!("Error {}: {}", status.as_u16(), detail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::SocketAddr;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn canned(status_line: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {status_line}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        )
    }

    /// Serve exactly one canned HTTP response, then hang up.
    async fn one_shot_server(response: String) -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 8192];
            let mut total = 0;

            // Read until headers plus the declared body length have arrived.
            loop {
                let n = stream.read(&mut buf[total..]).await.unwrap();
                total += n;
                let head = String::from_utf8_lossy(&buf[..total]).into_owned();
                if let Some(idx) = head.find("\r\n\r\n") {
                    let content_length = head
                        .lines()
                        .find_map(|line| {
                            line.to_ascii_lowercase()
                                .strip_prefix("content-length:")
                                .and_then(|v| v.trim().parse::<usize>().ok())
                        })
                        .unwrap_or(0);
                    if total >= idx + 4 + content_length {
                        break;
                    }
                }
                if n == 0 {
                    break;
                }
            }

            stream.write_all(response.as_bytes()).await.unwrap();
            let _ = stream.shutdown().await;
        });

        addr
    }

    async fn client_for(response: String) -> VexClient {
        let addr = one_shot_server(response).await;
        VexClient::new(&format!("http://{addr}"))
    }

    #[tokio::test]
    async fn success_uses_reply_field() {
        let client = client_for(canned("200 OK", r#"{"reply":"Hello"}"#)).await;
        let reply = client.send_command("hi").await.unwrap();
        assert_eq!(reply.text, "Hello");
        assert!(!reply.is_error);
    }

    #[tokio::test]
    async fn success_falls_back_to_raw_text() {
        let client = client_for(canned("200 OK", "ok")).await;
        let reply = client.send_command("hi").await.unwrap();
        assert_eq!(reply.text, "ok");
        assert!(!reply.is_error);
    }

    #[tokio::test]
    async fn success_empty_body_shows_placeholder() {
        let client = client_for(canned("200 OK", "")).await;
        let reply = client.send_command("hi").await.unwrap();
        assert_eq!(reply.text, "(no reply)");
    }

    #[tokio::test]
    async fn failure_combines_status_and_reply() {
        let client =
            client_for(canned("500 Internal Server Error", r#"{"reply":"boom"}"#)).await;
        let reply = client.send_command("hi").await.unwrap();
        assert!(reply.is_error);
        assert!(reply.text.contains("500"));
        assert!(reply.text.contains("boom"));
    }

    #[tokio::test]
    async fn failure_empty_body_uses_status_phrase() {
        let client = client_for(canned("404 Not Found", "")).await;
        let reply = client.send_command("hi").await.unwrap();
        assert!(reply.is_error);
        assert!(reply.text.contains("404"));
        assert!(reply.text.contains("Not Found"));
    }

    #[tokio::test]
    async fn transport_failure_is_an_err() {
        // Bind to grab a free port, then drop it so the connection refuses.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = VexClient::new(&format!("http://{addr}"));
        assert!(client.send_command("hi").await.is_err());
    }

    #[tokio::test]
    async fn launch_uses_status_field() {
        let client = client_for(canned("200 OK", r#"{"status":"Opening browser"}"#)).await;
        let reply = client.launch().await.unwrap();
        assert_eq!(reply.text, "Opening browser");
    }

    #[tokio::test]
    async fn launch_defaults_without_status_field() {
        let client = client_for(canned("200 OK", "{}")).await;
        let reply = client.launch().await.unwrap();
        assert_eq!(reply.text, "Launch issued");
    }

    #[test]
    fn empty_reply_field_falls_through() {
        let field = extract_field(r#"{"reply":""}"#, "reply");
        assert_eq!(field, None);
        assert_eq!(success_text(field, r#"{"reply":""}"#.to_string()), r#"{"reply":""}"#);
    }

    #[test]
    fn whitespace_body_is_kept_verbatim() {
        assert_eq!(success_text(None, " ".to_string()), " ");
    }
}
