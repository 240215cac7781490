/// The first line of a request, split into its three tokens.
///
/// The target is already normalized: forward slashes are replaced by the
/// platform path separator and percent-escapes are decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    /// Method token, compared case-sensitively (e.g. "GET")
    pub method: String,
    /// Normalized resource path (e.g. "/my docs/index.html")
    pub target: String,
    /// Protocol version token (e.g. "HTTP/1.1")
    pub version: String,
}

/// The `Host` header value split on its first colon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostHeader {
    /// Everything before the first colon, or the whole value if there is none
    pub host: String,
    /// Everything after the first colon; `None` when the value has no colon
    pub port: Option<String>,
}

impl HostHeader {
    /// Splits a raw header value such as `127.0.0.1:8080`.
    ///
    /// # Example
    ///
    /// ```
    /// # use docroot::http::request::HostHeader;
    /// let h = HostHeader::from_value("localhost:8080");
    /// assert_eq!(h.host, "localhost");
    /// assert_eq!(h.port.as_deref(), Some("8080"));
    ///
    /// assert_eq!(HostHeader::from_value("localhost").port, None);
    /// ```
    pub fn from_value(value: &str) -> Self {
        match value.split_once(':') {
            Some((host, port)) => Self {
                host: host.to_string(),
                port: Some(port.to_string()),
            },
            None => Self {
                host: value.to_string(),
                port: None,
            },
        }
    }
}

/// A request that made it through syntax parsing.
///
/// Built once per connection and never mutated; validation reads it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub line: RequestLine,
    pub host: HostHeader,
}

impl Request {
    pub fn method(&self) -> &str {
        &self.line.method
    }

    pub fn target(&self) -> &str {
        &self.line.target
    }

    pub fn version(&self) -> &str {
        &self.line.version
    }
}
