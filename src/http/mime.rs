//! Content types the server is willing to serve.
//!
//! The type is chosen purely from the file extension, never by looking at
//! the file's contents.

const HTML_EXTENSIONS: &[&str] = &[".htm", ".html", ".htmls", ".htx", ".shtml", ".acgi"];
const JPEG_EXTENSIONS: &[&str] = &[".jfif", ".jfif-tbnl", ".jpeg", ".jpg"];
const GIF_EXTENSION: &str = ".gif";
const TEXT_EXTENSION: &str = ".txt";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Html,
    PlainText,
    Jpeg,
    Gif,
}

impl ContentType {
    /// Looks up an extension (including its leading dot) in the fixed table.
    ///
    /// Matching is case-sensitive, so `.HTML` is not servable.
    ///
    /// # Example
    ///
    /// ```
    /// # use docroot::http::mime::ContentType;
    /// assert_eq!(ContentType::from_extension(".jpg"), Some(ContentType::Jpeg));
    /// assert_eq!(ContentType::from_extension(".exe"), None);
    /// ```
    pub fn from_extension(ext: &str) -> Option<Self> {
        if HTML_EXTENSIONS.contains(&ext) {
            Some(ContentType::Html)
        } else if JPEG_EXTENSIONS.contains(&ext) {
            Some(ContentType::Jpeg)
        } else if ext == GIF_EXTENSION {
            Some(ContentType::Gif)
        } else if ext == TEXT_EXTENSION {
            Some(ContentType::PlainText)
        } else {
            None
        }
    }

    /// MIME type string for the Content-Type header.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Html => "text/html",
            ContentType::PlainText => "text/plain",
            ContentType::Jpeg => "image/jpeg",
            ContentType::Gif => "image/gif",
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns the extension of the last path component, dot included.
///
/// Both `/` and the platform separator delimit components. A name ending in
/// `.` has no extension.
pub fn extension_of(path: &str) -> Option<&str> {
    let name = path
        .rsplit(|c: char| c == '/' || c == std::path::MAIN_SEPARATOR)
        .next()
        .unwrap_or(path);
    let dot = name.rfind('.')?;
    let ext = &name[dot..];

    if ext.len() == 1 { None } else { Some(ext) }
}
