//! One-shot HTTP server for testing the remote clients
//!
//! Answers a single request with a canned body and hands back the request line.

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

pub struct MockServer {
    pub url: String,
    request_line: oneshot::Receiver<String>,
}

impl MockServer {
    /// Serve `body` with `status` (e.g. "200 OK") to the first connection
    pub async fn start(status: &'static str, body: String) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock server");
        let addr = listener.local_addr().expect("Failed to get local addr");
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.expect("Failed to accept");

            // Read until the end of the request headers
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).await.expect("Failed to read request");
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }

            let line = String::from_utf8_lossy(&request)
                .lines()
                .next()
                .unwrap_or_default()
                .to_string();
            let _ = tx.send(line);

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            stream
                .write_all(response.as_bytes())
                .await
                .expect("Failed to write response");
            let _ = stream.shutdown().await;
        });

        Self {
            url: format!("http://{}", addr),
            request_line: rx,
        }
    }

    /// Request line of the served request, e.g. `GET /exec?action=getAll&_=1 HTTP/1.1`
    pub async fn request_line(self) -> String {
        self.request_line.await.expect("No request received")
    }
}
