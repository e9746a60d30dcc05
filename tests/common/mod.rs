#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tempfile::TempDir;

pub const CONFIG_FILE: &str = "INDIAN_DATA_SHOP_CONFIG";

/// An isolated working directory holding the config file.
pub struct TestEnv {
    tmp: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            tmp: TempDir::new().expect("create temp dir"),
        }
    }

    pub fn dir(&self) -> &Path {
        self.tmp.path()
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir().join(CONFIG_FILE)
    }

    pub fn write_config(&self, contents: &str) {
        fs::write(self.config_path(), contents).expect("write config");
    }

    pub fn with_config(api_key: &str, display_type: &str) -> Self {
        let env = Self::new();
        env.write_config(
            &serde_json::json!({ "api_key": api_key, "display_type": display_type }).to_string(),
        );
        env
    }

    /// The binary, run inside the temp dir against `base_url`.
    pub fn cmd(&self, base_url: &str) -> Command {
        let mut cmd = Command::cargo_bin("datashop").expect("binary built");
        cmd.current_dir(self.dir())
            .env("DATASHOP_API_URL", base_url)
            .env_remove("DATASHOP_CONFIG")
            .env_remove("RUST_LOG");
        cmd
    }
}

/// A one-shot HTTP server that records the single request it receives and
/// answers with a canned status and body.
pub struct StubServer {
    pub url: String,
    hits: Arc<AtomicUsize>,
    handle: JoinHandle<Option<String>>,
}

impl StubServer {
    pub fn start(status: u16, body: &str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub server");
        let url = format!("http://{}", listener.local_addr().expect("local addr"));
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let body = body.to_string();

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().ok()?;
            counter.fetch_add(1, Ordering::SeqCst);
            let request = read_request(&mut stream)?;
            let response = format!(
                "HTTP/1.1 {status} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                reason(status),
                body.len()
            );
            stream.write_all(response.as_bytes()).ok()?;
            stream.flush().ok()?;
            Some(request)
        });

        Self { url, hits, handle }
    }

    pub fn ok(body: &str) -> Self {
        Self::start(200, body)
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    /// The raw request (head and body) the server received.
    pub fn request(self) -> String {
        self.handle
            .join()
            .expect("stub thread")
            .expect("stub received a request")
    }
}

/// A URL nothing is listening on.
pub fn closed_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{addr}")
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        401 => "Unauthorized",
        500 => "Internal Server Error",
        _ => "Status",
    }
}

fn read_request(stream: &mut TcpStream) -> Option<String> {
    let mut reader = BufReader::new(stream);
    let mut head = String::new();
    let mut content_length = 0usize;
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).ok()? == 0 {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.eq_ignore_ascii_case("content-length") {
                content_length = value.trim().parse().unwrap_or(0);
            }
        }
        let end = line == "\r\n";
        head.push_str(&line);
        if end {
            break;
        }
    }
    let mut body = vec![0u8; content_length];
    reader.read_exact(&mut body).ok()?;
    head.push_str(&String::from_utf8_lossy(&body));
    Some(head)
}

pub fn sample_body() -> &'static str {
    r#"{"status":"ok","data":[{"mobile":"9876543210","name":"A B","father_name":"C D","address":"X","alt_mobile":"","circle":"DL","id_number":"","email":"a@b.com"}]}"#
}
