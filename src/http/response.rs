use std::time::SystemTime;

use crate::http::mime::ContentType;

/// Identifier sent in the `Server` header of every response.
pub const SERVER_NAME: &str = "docroot";

/// HTTP status codes the server can answer with.
///
/// The set is closed: every validation failure maps to exactly one of these.
/// - `Ok` (200): Resource served
/// - `BadRequest` (400): Malformed request or resource without extension
/// - `Forbidden` (403): Resource exists but its type is not servable
/// - `NotFound` (404): Resource does not exist under the document root
/// - `MethodNotAllowed` (405): Method other than GET
/// - `UnsupportedMediaType` (415): Reserved, never produced by validation
/// - `BadGateway` (502): Host header does not address this server
/// - `HttpVersionNotSupported` (505): Version other than HTTP/1.1
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok = 200,
    /// 400 Bad Request
    BadRequest = 400,
    /// 403 Forbidden
    Forbidden = 403,
    /// 404 Not Found
    NotFound = 404,
    /// 405 Method Not Allowed
    MethodNotAllowed = 405,
    /// 415 Unsupported Media Type
    UnsupportedMediaType = 415,
    /// 502 Bad Gateway
    BadGateway = 502,
    /// 505 HTTP Version Not Supported
    HttpVersionNotSupported = 505,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use docroot::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::BadGateway.as_u16(), 502);
    /// ```
    pub fn as_u16(&self) -> u16 {
        *self as u16
    }

    /// Returns the reason phrase sent on the status line.
    ///
    /// # Example
    ///
    /// ```
    /// # use docroot::http::response::StatusCode;
    /// assert_eq!(StatusCode::NotFound.reason_phrase(), "Not Found");
    /// assert_eq!(
    ///     StatusCode::HttpVersionNotSupported.reason_phrase(),
    ///     "HTTP Version Not Supported"
    /// );
    /// ```
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::Forbidden => "Forbidden",
            StatusCode::NotFound => "Not Found",
            StatusCode::MethodNotAllowed => "Method Not Allowed",
            StatusCode::UnsupportedMediaType => "Unsupported Media Type",
            StatusCode::BadGateway => "Bad Gateway",
            StatusCode::HttpVersionNotSupported => "HTTP Version Not Supported",
        }
    }

    pub fn is_success(&self) -> bool {
        *self == StatusCode::Ok
    }
}

impl std::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.as_u16(), self.reason_phrase())
    }
}

/// A complete HTTP response ready to be serialized.
///
/// Headers keep their insertion order, which is the order they go out on
/// the wire.
#[derive(Debug)]
pub struct Response {
    /// The HTTP status code
    pub status: StatusCode,
    /// Header name/value pairs in emission order
    pub headers: Vec<(String, String)>,
    /// Response body as bytes
    pub body: Vec<u8>,
}

/// Builder for constructing HTTP responses in a fluent style.
///
/// # Example
///
/// ```ignore
/// let response = ResponseBuilder::new(StatusCode::Ok)
///     .header("Content-Type", "text/plain")
///     .body(b"hello".to_vec())
///     .build();
/// ```
pub struct ResponseBuilder {
    status: StatusCode,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

impl ResponseBuilder {
    /// Creates a new response builder with the specified status code.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Adds a header, or replaces the value of an existing one in place.
    ///
    /// Names compare case-insensitively.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();
        match self
            .headers
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(&key))
        {
            Some(entry) => entry.1 = value,
            None => self.headers.push((key, value)),
        }
        self
    }

    /// Sets the response body.
    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    /// Builds the final Response.
    ///
    /// Appends a Content-Length header from the body size if none was set.
    pub fn build(mut self) -> Response {
        if !self
            .headers
            .iter()
            .any(|(k, _)| k.eq_ignore_ascii_case("Content-Length"))
        {
            let len = self.body.len().to_string();
            self.headers.push(("Content-Length".to_string(), len));
        }

        Response {
            status: self.status,
            headers: self.headers,
            body: self.body,
        }
    }
}

impl Response {
    /// Builds the error page for a failed request.
    ///
    /// The body is the one-line text `"{code} {reason}"`, served as
    /// text/html.
    pub fn error(status: StatusCode) -> Self {
        Self::error_at(status, SystemTime::now())
    }

    /// Like [`Response::error`] with an explicit Date.
    pub fn error_at(status: StatusCode, now: SystemTime) -> Self {
        let body = status.to_string().into_bytes();
        Self::with_standard_headers(status, ContentType::Html, body, now)
    }

    /// Builds a 200 response carrying the resource's bytes.
    pub fn resource(content_type: ContentType, body: Vec<u8>) -> Self {
        Self::resource_at(content_type, body, SystemTime::now())
    }

    /// Like [`Response::resource`] with an explicit Date.
    pub fn resource_at(content_type: ContentType, body: Vec<u8>, now: SystemTime) -> Self {
        Self::with_standard_headers(StatusCode::Ok, content_type, body, now)
    }

    fn with_standard_headers(
        status: StatusCode,
        content_type: ContentType,
        body: Vec<u8>,
        now: SystemTime,
    ) -> Self {
        ResponseBuilder::new(status)
            .header("Content-Type", content_type.as_str())
            .header("Content-Length", body.len().to_string())
            .header("Server", SERVER_NAME)
            .header("Date", httpdate::fmt_http_date(now))
            .body(body)
            .build()
    }

    /// Retrieves a header value by name (case-insensitive).
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_page_body_is_code_and_reason() {
        let resp = Response::error(StatusCode::MethodNotAllowed);

        assert_eq!(resp.body, b"405 Method Not Allowed".to_vec());
        assert_eq!(resp.header("Content-Type"), Some("text/html"));
        assert_eq!(resp.header("Content-Length"), Some("22"));
    }

    #[test]
    fn headers_keep_emission_order() {
        let resp = Response::resource(ContentType::Gif, vec![0x47, 0x49, 0x46]);
        let names: Vec<&str> = resp.headers.iter().map(|(k, _)| k.as_str()).collect();

        assert_eq!(names, ["Content-Type", "Content-Length", "Server", "Date"]);
    }
}
