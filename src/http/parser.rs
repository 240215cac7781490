use crate::http::request::{HostHeader, Request, RequestLine};
use percent_encoding::percent_decode_str;

const HOST_PREFIX: &str = "host:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// No line starts with `Host:`
    MissingHost,
    /// The first line is not `method SP target SP version`
    InvalidRequestLine,
}

/// Parses the raw bytes of a single read into a [`Request`].
///
/// Lines are separated by CRLF and empty lines are dropped. The Host header
/// may appear on any line, even before a blank-line terminator that never
/// arrives. Bytes that are not valid UTF-8 are replaced, not rejected.
pub fn parse_http_request(buf: &[u8]) -> Result<Request, ParseError> {
    let text = String::from_utf8_lossy(buf);
    let lines: Vec<&str> = text.split("\r\n").filter(|l| !l.is_empty()).collect();

    let host = lines
        .iter()
        .find_map(|line| host_value(line))
        .ok_or(ParseError::MissingHost)?;

    let first = lines.first().ok_or(ParseError::InvalidRequestLine)?;
    let line = parse_request_line(first)?;

    Ok(Request {
        line,
        host: HostHeader::from_value(host),
    })
}

fn host_value(line: &str) -> Option<&str> {
    let prefix = line.get(..HOST_PREFIX.len())?;
    if prefix.eq_ignore_ascii_case(HOST_PREFIX) {
        Some(line[HOST_PREFIX.len()..].trim())
    } else {
        None
    }
}

fn parse_request_line(line: &str) -> Result<RequestLine, ParseError> {
    let parts: Vec<&str> = line.split(' ').collect();
    let [method, target, version] = parts[..] else {
        return Err(ParseError::InvalidRequestLine);
    };

    Ok(RequestLine {
        method: method.to_string(),
        target: normalize_target(target),
        version: version.to_string(),
    })
}

/// Maps a request target onto a relative file path.
///
/// Slashes become the platform separator first, then percent-escapes are
/// decoded, so an encoded `%2F` survives as a literal character.
pub fn normalize_target(target: &str) -> String {
    let separated = target.replace('/', std::path::MAIN_SEPARATOR_STR);
    percent_decode_str(&separated)
        .decode_utf8_lossy()
        .into_owned()
}
