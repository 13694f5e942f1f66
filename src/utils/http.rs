use log::debug;
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

pub const USER_AGENT: &str = concat!("miqat/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HttpError {
    #[error("HTTP status {0}")]
    Status(u16),
    #[error("network error: {0}")]
    Transport(String),
    #[error("invalid response body: {0}")]
    Decode(String),
}

/// GET `url` with `query` parameters and decode the JSON body.
pub fn get_json<T: DeserializeOwned>(
    url: &str,
    query: &[(&str, &str)],
    timeout: Duration,
) -> Result<T, HttpError> {
    let mut request = ureq::get(url)
        .set("User-Agent", USER_AGENT)
        .timeout(timeout);
    for (key, value) in query {
        request = request.query(key, value);
    }
    debug!("GET {} {:?}", url, query);

    let response = request.call().map_err(|e| match e {
        ureq::Error::Status(code, _) => HttpError::Status(code),
        ureq::Error::Transport(t) => HttpError::Transport(t.to_string()),
    })?;

    response
        .into_json()
        .map_err(|e| HttpError::Decode(e.to_string()))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};

    /// Answers a single request on a local port. The handle yields the request line.
    pub(crate) fn serve_once(status: &str, body: &str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut head = Vec::new();
            let mut buf = [0u8; 1024];
            while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                head.extend_from_slice(&buf[..n]);
            }
            stream.write_all(response.as_bytes()).unwrap();
            let head = String::from_utf8_lossy(&head).into_owned();
            head.lines().next().unwrap_or_default().to_string()
        });
        (base, handle)
    }

    /// A local address nothing listens on.
    pub(crate) fn closed_port() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{}", addr)
    }

    const TIMEOUT: Duration = Duration::from_secs(5);

    #[test]
    fn sends_query_and_decodes_body() {
        let (base, server) = serve_once("200 OK", r#"{"code":200}"#);
        let url = format!("{}/timings", base);
        let body: serde_json::Value =
            get_json(&url, &[("method", "4"), ("school", "0")], TIMEOUT).unwrap();
        assert_eq!(body["code"], 200);
        assert_eq!(
            server.join().unwrap(),
            "GET /timings?method=4&school=0 HTTP/1.1"
        );
    }

    #[test]
    fn error_status_keeps_code() {
        let (base, server) = serve_once("503 Service Unavailable", "{}");
        let result: Result<serde_json::Value, _> = get_json(&base, &[], TIMEOUT);
        assert_eq!(result, Err(HttpError::Status(503)));
        server.join().unwrap();
    }

    #[test]
    fn garbage_body_is_a_decode_error() {
        let (base, server) = serve_once("200 OK", "<html>");
        let result: Result<serde_json::Value, _> = get_json(&base, &[], TIMEOUT);
        assert!(matches!(result, Err(HttpError::Decode(_))), "{result:?}");
        server.join().unwrap();
    }

    #[test]
    fn refused_connection_is_a_transport_error() {
        let result: Result<serde_json::Value, _> = get_json(&closed_port(), &[], TIMEOUT);
        assert!(matches!(result, Err(HttpError::Transport(_))), "{result:?}");
    }
}
