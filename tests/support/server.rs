//! Loopback HTTP server with canned responses.
//!
//! Serves one response per connection, in order, then stops. Each request is
//! captured so tests can inspect method, path, headers and body.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread::{self, JoinHandle};

/// A request received by the server.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: String,
    pub path: String,
    /// Header names are lowercased.
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl Request {
    /// First value of header `name` (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        let name = name.to_ascii_lowercase();
        self.headers
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Body parsed as JSON.
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("request body is not JSON")
    }
}

/// Fake GitLab instance on 127.0.0.1.
pub struct Server {
    url: String,
    handle: JoinHandle<Vec<Request>>,
}

impl Server {
    /// Start serving `responses` as `(status, body)` pairs.
    pub fn start(responses: Vec<(u16, String)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("failed to bind loopback port");
        let addr = listener.local_addr().expect("no local address");

        let handle = thread::spawn(move || {
            let mut requests = Vec::new();
            for (status, body) in responses {
                let (mut stream, _) = match listener.accept() {
                    Ok(conn) => conn,
                    Err(_) => break,
                };
                match read_request(&stream) {
                    Some(request) => requests.push(request),
                    None => break,
                }
                respond(&mut stream, status, &body);
            }
            requests
        });

        Self {
            url: format!("http://{}", addr),
            handle,
        }
    }

    /// Base URL suitable for `GITLAB_HOST`.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Wait for all canned responses to be served and return the requests.
    pub fn finish(self) -> Vec<Request> {
        self.handle.join().expect("server thread panicked")
    }
}

/// JSON body GitLab returns for a created or fetched variable.
pub fn variable_json(key: &str, value: &str) -> String {
    serde_json::json!({
        "key": key,
        "value": value,
        "variable_type": "env_var",
        "protected": false,
        "masked": false,
        "environment_scope": "*",
    })
    .to_string()
}

fn read_request(stream: &TcpStream) -> Option<Request> {
    let mut reader = BufReader::new(stream);

    let mut line = String::new();
    reader.read_line(&mut line).ok()?;
    let mut parts = line.split_whitespace();
    let method = parts.next()?.to_string();
    let path = parts.next()?.to_string();

    let mut headers = Vec::new();
    loop {
        let mut header = String::new();
        reader.read_line(&mut header).ok()?;
        let header = header.trim_end();
        if header.is_empty() {
            break;
        }
        if let Some((name, value)) = header.split_once(':') {
            headers.push((name.trim().to_ascii_lowercase(), value.trim().to_string()));
        }
    }

    let length = headers
        .iter()
        .find(|(k, _)| k == "content-length")
        .and_then(|(_, v)| v.parse::<usize>().ok())
        .unwrap_or(0);
    let mut body = vec![0u8; length];
    reader.read_exact(&mut body).ok()?;

    Some(Request {
        method,
        path,
        headers,
        body: String::from_utf8_lossy(&body).to_string(),
    })
}

fn respond(stream: &mut TcpStream, status: u16, body: &str) {
    let response = format!(
        "HTTP/1.1 {} Canned\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}
