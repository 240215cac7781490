//! Fixed-order request validation.
//!
//! Checks run as method, resource, version, host. The first failing check
//! decides the status; later checks are not consulted.

use std::ffi::OsString;
use std::path::{Component, MAIN_SEPARATOR, Path, PathBuf};

use crate::config::ServerConfig;
use crate::http::mime::{extension_of, ContentType};
use crate::http::request::{HostHeader, Request};
use crate::http::response::StatusCode;

/// The only method the server serves.
pub const EXPECTED_METHOD: &str = "GET";
/// The only protocol version the server speaks.
pub const EXPECTED_VERSION: &str = "HTTP/1.1";

const LOCALHOST: &str = "localhost";

/// A resource that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceDescriptor {
    /// Normalized target, relative to the document root
    pub relative_path: String,
    pub content_type: ContentType,
    /// File size observed during validation
    pub size: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Ok(ResourceDescriptor),
    Failed(StatusCode),
}

impl ValidationOutcome {
    pub fn status(&self) -> StatusCode {
        match self {
            ValidationOutcome::Ok(_) => StatusCode::Ok,
            ValidationOutcome::Failed(status) => *status,
        }
    }
}

/// Validates parsed requests against one server's configuration.
#[derive(Debug, Clone)]
pub struct Validator {
    method: String,
    version: String,
    address: String,
    port: String,
    web_root: PathBuf,
}

impl Validator {
    pub fn new(server: &ServerConfig) -> Self {
        Self {
            method: EXPECTED_METHOD.to_string(),
            version: EXPECTED_VERSION.to_string(),
            address: server.address.clone(),
            port: server.port.to_string(),
            web_root: server.web_root.clone(),
        }
    }

    pub async fn validate(&self, req: &Request) -> ValidationOutcome {
        let checked = match self.check_method(req.method()) {
            Ok(()) => self.check_resource(req.target()).await,
            Err(status) => Err(status),
        }
        .and_then(|resource| {
            self.check_version(req.version())?;
            self.check_host(&req.host)?;
            Ok(resource)
        });

        match checked {
            Ok(resource) => ValidationOutcome::Ok(resource),
            Err(status) => ValidationOutcome::Failed(status),
        }
    }

    fn check_method(&self, method: &str) -> Result<(), StatusCode> {
        if method == self.method {
            Ok(())
        } else {
            Err(StatusCode::MethodNotAllowed)
        }
    }

    /// Existence is checked before the content-type table, so an existing
    /// file with an unknown extension is Forbidden rather than Not Found.
    async fn check_resource(&self, target: &str) -> Result<ResourceDescriptor, StatusCode> {
        let ext = extension_of(target).ok_or(StatusCode::BadRequest)?;

        if escapes_root(target) {
            return Err(StatusCode::NotFound);
        }

        let path = self.resolve(target);
        let size = match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => meta.len(),
            _ => return Err(StatusCode::NotFound),
        };

        let content_type = ContentType::from_extension(ext).ok_or(StatusCode::Forbidden)?;

        Ok(ResourceDescriptor {
            relative_path: target.to_string(),
            content_type,
            size,
        })
    }

    fn check_version(&self, version: &str) -> Result<(), StatusCode> {
        if version == self.version {
            Ok(())
        } else {
            Err(StatusCode::HttpVersionNotSupported)
        }
    }

    fn check_host(&self, host: &HostHeader) -> Result<(), StatusCode> {
        let port = host.port.as_deref().ok_or(StatusCode::BadGateway)?;

        let host_ok = host.host == self.address || host.host.eq_ignore_ascii_case(LOCALHOST);
        if !host_ok || port != self.port {
            return Err(StatusCode::BadGateway);
        }

        Ok(())
    }

    /// Joins the document root and a normalized target by plain
    /// concatenation; the target already starts with a separator.
    pub fn resolve(&self, target: &str) -> PathBuf {
        let mut joined = OsString::from(self.web_root.as_os_str());
        joined.push(target);
        PathBuf::from(joined)
    }
}

/// A target that does not start at the root separator would be glued onto
/// the root's last component and name a sibling of the document root.
fn escapes_root(target: &str) -> bool {
    !target.starts_with(MAIN_SEPARATOR)
        || Path::new(target)
            .components()
            .any(|c| matches!(c, Component::ParentDir))
}
