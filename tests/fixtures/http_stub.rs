//! Local HTTP listeners that misbehave in controlled ways.

#![allow(dead_code)]

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread;

/// How the stub answers every connection.
#[derive(Debug, Clone)]
pub enum StubReply {
    /// Accepts the connection and never answers.
    Silent,
    /// Answers with the given status and body.
    Respond {
        status: &'static str,
        body: String,
    },
}

impl StubReply {
    pub fn status(status: &'static str) -> Self {
        StubReply::Respond {
            status,
            body: String::new(),
        }
    }

    pub fn ok(body: impl Into<String>) -> Self {
        StubReply::Respond {
            status: "200 OK",
            body: body.into(),
        }
    }
}

/// Starts a listener on an ephemeral port and returns its base URL.
pub fn serve(reply: StubReply) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub listener");
    let addr = listener.local_addr().expect("stub address");

    thread::spawn(move || {
        // Silent connections are kept open until the test process exits.
        let mut held = Vec::new();
        for stream in listener.incoming() {
            let Ok(mut stream) = stream else { continue };
            match &reply {
                StubReply::Silent => held.push(stream),
                StubReply::Respond { status, body } => {
                    read_request(&mut stream);
                    let response = format!(
                        "HTTP/1.1 {status}\r\nContent-Type: application/json\r\n\
                         Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
                        body.len()
                    );
                    let _ = stream.write_all(response.as_bytes());
                    let _ = stream.flush();
                }
            }
        }
    });

    format!("http://{addr}")
}

/// Drains headers and any `Content-Length` body so the client sees a clean
/// response instead of a reset.
fn read_request(stream: &mut TcpStream) {
    let mut data = Vec::new();
    let mut buf = [0u8; 1024];

    let header_end = loop {
        if let Some(pos) = data.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
        match stream.read(&mut buf) {
            Ok(0) | Err(_) => return,
            Ok(n) => data.extend_from_slice(&buf[..n]),
        }
    };

    let headers = String::from_utf8_lossy(&data[..header_end]).to_ascii_lowercase();
    let content_length = headers
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|value| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while data.len() < header_end + content_length {
        match stream.read(&mut buf) {
            Ok(0) | Err(_) => return,
            Ok(n) => data.extend_from_slice(&buf[..n]),
        }
    }
}
