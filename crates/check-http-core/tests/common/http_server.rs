//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves a fixed table of routes keyed by request path. Each route can
//! answer with a plain status and body, a redirect, a delayed reply, a
//! body shorter than its advertised `Content-Length`, or a body that stops
//! partway and leaves the connection open.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
pub enum Reply {
    /// Respond with `status` and `body`.
    Fixed { status: u16, body: Vec<u8> },
    /// Respond with `status` and a `Location` header, empty body.
    Redirect { status: u16, location: String },
    /// Sleep for `delay` before responding 200 with `body`.
    Slow { delay: Duration, body: Vec<u8> },
    /// Advertise `advertised` bytes, send `body`, then close.
    Truncated { advertised: usize, body: Vec<u8> },
    /// Advertise `advertised` bytes, send `body`, then hold the connection open for `delay`.
    Stall {
        advertised: usize,
        body: Vec<u8>,
        delay: Duration,
    },
}

/// Starts a server in a background thread. Returns the base URL without a
/// trailing slash (e.g. "http://127.0.0.1:12345"). Runs until the process exits.
pub fn start(routes: Vec<(&str, Reply)>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let routes: Arc<HashMap<String, Reply>> = Arc::new(
        routes
            .into_iter()
            .map(|(path, reply)| (path.to_string(), reply))
            .collect(),
    );
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let routes = Arc::clone(&routes);
            thread::spawn(move || handle(stream, &routes));
        }
    });
    format!("http://127.0.0.1:{}", port)
}

/// A URL on a port nothing is listening on.
pub fn refused_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/", port)
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        204 => "No Content",
        301 => "Moved Permanently",
        302 => "Found",
        307 => "Temporary Redirect",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Status",
    }
}

fn handle(mut stream: TcpStream, routes: &HashMap<String, Reply>) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(n) => n,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let path = request
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/");

    let reply = match routes.get(path) {
        Some(reply) => reply.clone(),
        None => Reply::Fixed {
            status: 404,
            body: b"not found".to_vec(),
        },
    };

    match reply {
        Reply::Fixed { status, body } => write_response(&mut stream, status, &[], &body, body.len()),
        Reply::Redirect { status, location } => {
            let header = format!("Location: {}", location);
            write_response(&mut stream, status, &[header], &[], 0)
        }
        Reply::Slow { delay, body } => {
            thread::sleep(delay);
            write_response(&mut stream, 200, &[], &body, body.len())
        }
        Reply::Truncated { advertised, body } => {
            write_response(&mut stream, 200, &[], &body, advertised)
        }
        Reply::Stall {
            advertised,
            body,
            delay,
        } => {
            write_response(&mut stream, 200, &[], &body, advertised);
            thread::sleep(delay);
        }
    }
}

fn write_response(
    stream: &mut TcpStream,
    status: u16,
    headers: &[String],
    body: &[u8],
    content_length: usize,
) {
    let mut head = format!(
        "HTTP/1.1 {} {}\r\nContent-Length: {}\r\nConnection: close\r\n",
        status,
        reason(status),
        content_length
    );
    for h in headers {
        head.push_str(h);
        head.push_str("\r\n");
    }
    head.push_str("\r\n");
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(body);
    let _ = stream.flush();
}
