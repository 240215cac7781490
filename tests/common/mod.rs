#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Mutex;

use docroot::config::ServerConfig;
use docroot::http::validate::Validator;
use docroot::log::{Event, EventLog};
use tempfile::TempDir;

pub const ADDRESS: &str = "127.0.0.1";
pub const PORT: u16 = 8080;

/// Keeps every recorded event in memory.
#[derive(Default)]
pub struct RecordingLog {
    events: Mutex<Vec<Event>>,
}

impl RecordingLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }
}

impl EventLog for RecordingLog {
    fn record(&self, event: &Event) {
        self.events.lock().unwrap().push(event.clone());
    }
}

/// A document root with one file per interesting case.
pub fn site() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    std::fs::write(root.join("index.html"), vec![b'a'; 1024]).unwrap();
    std::fs::write(root.join("notes.txt"), b"plain notes\n").unwrap();
    std::fs::write(root.join("photo.jpg"), b"\xFF\xD8\xFF\xE0\x00\x10").unwrap();
    std::fs::write(root.join("anim.gif"), b"GIF89a\x01\x00\x01\x00").unwrap();
    std::fs::write(root.join("data.exe"), b"MZ").unwrap();
    std::fs::write(root.join("shout.HTML"), b"<p>loud</p>").unwrap();
    std::fs::write(root.join("readme"), b"no extension").unwrap();
    std::fs::create_dir(root.join("my docs")).unwrap();
    std::fs::write(root.join("my docs").join("page.htm"), b"<h1>spaced</h1>").unwrap();
    std::fs::create_dir(root.join("folder.html")).unwrap();

    dir
}

pub fn server_config(root: &TempDir) -> ServerConfig {
    ServerConfig {
        address: ADDRESS.to_string(),
        port: PORT,
        web_root: PathBuf::from(root.path()),
    }
}

pub fn validator(root: &TempDir) -> Validator {
    Validator::new(&server_config(root))
}

pub fn raw_request(method: &str, target: &str, version: &str, host: &str) -> Vec<u8> {
    format!(
        "{} {} {}\r\nHost: {}\r\nUser-Agent: test-client\r\n\r\n",
        method, target, version, host
    )
    .into_bytes()
}

pub fn get(target: &str) -> Vec<u8> {
    raw_request("GET", target, "HTTP/1.1", "127.0.0.1:8080")
}

/// A response split back into status line, headers and body.
pub struct RawResponse {
    pub status_line: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn parse(bytes: &[u8]) -> Self {
        let split = bytes
            .windows(4)
            .position(|w| w == b"\r\n\r\n")
            .expect("no header terminator");
        let head = std::str::from_utf8(&bytes[..split]).unwrap();
        let mut lines = head.split("\r\n");
        let status_line = lines.next().unwrap().to_string();
        let headers = lines
            .map(|l| {
                let (k, v) = l.split_once(": ").unwrap();
                (k.to_string(), v.to_string())
            })
            .collect();

        Self {
            status_line,
            headers,
            body: bytes[split + 4..].to_vec(),
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn status_code(&self) -> u16 {
        self.status_line
            .split(' ')
            .nth(1)
            .unwrap()
            .parse()
            .unwrap()
    }
}
