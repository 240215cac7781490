//! Append-only event log.
//!
//! The server reports lifecycle, request and response events to an
//! [`EventLog`]. The sink owns timestamps; callers only describe what
//! happened.

use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::SystemTime;

use crate::http::mime::ContentType;
use crate::http::response::{SERVER_NAME, StatusCode};

/// Placeholder recorded for verb and resource when a request could not be
/// parsed far enough to know them.
pub const UNAVAILABLE: &str = "Unavailable";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    ApplicationStarted,
    ServerStarted {
        address: String,
    },
    Request {
        verb: String,
        resource: String,
    },
    ResponseError {
        status: StatusCode,
    },
    ResponseOk {
        content_type: ContentType,
        content_length: u64,
    },
    /// A connection failed outside the protocol, e.g. the socket broke.
    ConnectionFailed {
        reason: String,
    },
}

impl Event {
    pub fn unparsed_request() -> Self {
        Event::Request {
            verb: UNAVAILABLE.to_string(),
            resource: UNAVAILABLE.to_string(),
        }
    }

    fn tag(&self) -> &'static str {
        match self {
            Event::ApplicationStarted => "APPLICATION STARTED",
            Event::ServerStarted { .. } => "SERVER STARTED",
            Event::Request { .. } => "REQUEST",
            Event::ResponseError { .. } | Event::ResponseOk { .. } => "RESPONSE",
            Event::ConnectionFailed { .. } => "CONNECTION FAILED",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] ", self.tag())?;
        match self {
            Event::ApplicationStarted => f.write_str("application started"),
            Event::ServerStarted { address } => write!(f, "listening on {}", address),
            Event::Request { verb, resource } => {
                write!(f, "Verb: {} Resource: {}", verb, resource)
            }
            Event::ResponseError { status } => write!(f, "{}", status),
            Event::ResponseOk {
                content_type,
                content_length,
            } => write!(
                f,
                "Content-Type: {} Content-Length: {} Server: {}",
                content_type, content_length, SERVER_NAME
            ),
            Event::ConnectionFailed { reason } => f.write_str(reason),
        }
    }
}

/// Write-only sink for server events.
pub trait EventLog: Send + Sync {
    fn record(&self, event: &Event);
}

/// Writes one timestamped line per event to a file, and mirrors each event
/// to `tracing` under the `docroot::event` target.
///
/// Write failures are reported through `tracing` and otherwise ignored, so
/// a full disk never takes a request down with it.
pub struct FileLog {
    path: PathBuf,
    file: Mutex<File>,
}

impl FileLog {
    /// Creates the log, discarding the contents of any previous run.
    pub fn create(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path)?;
        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EventLog for FileLog {
    fn record(&self, event: &Event) {
        tracing::info!(target: "docroot::event", "{}", event);

        let line = format!("{} {}\n", httpdate::fmt_http_date(SystemTime::now()), event);

        let mut file = match self.file.lock() {
            Ok(file) => file,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Err(e) = file.write_all(line.as_bytes()) {
            tracing::warn!(path = %self.path.display(), error = %e, "Failed to append to event log");
        }
    }
}
