//! File download payloads.

use std::path::Path;

use bytes::Buf;
use bytes::buf::Reader;
use percent_encoding::percent_decode_str;

/// A downloaded file: the untouched response body plus its filename.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileDownload {
    /// Filename from `Content-Disposition`; empty when the server sent none.
    pub filename: String,
    pub content_type: Option<String>,
    pub content: bytes::Bytes,
}

impl FileDownload {
    /// Returns a reader over the raw body.
    pub fn reader(&self) -> Reader<bytes::Bytes> {
        self.content.clone().reader()
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Writes the body to `path`.
    pub fn write_to(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        std::fs::write(path, &self.content)
    }
}

/// Extracts the filename from a `Content-Disposition` header value.
///
/// The RFC 5987 `filename*=charset''percent-encoded` form wins over a plain
/// `filename=` parameter.
///
/// ## Examples
///
/// ```rust
/// use lark_lib::response::filename_from_content_disposition;
///
/// assert_eq!(
///     filename_from_content_disposition("attachment; filename=\"a.png\""),
///     Some("a.png".to_string())
/// );
/// assert_eq!(
///     filename_from_content_disposition(
///         "attachment; filename=\"fallback.png\"; filename*=UTF-8''%E7%94%BB%E6%9D%BF.png"
///     ),
///     Some("画板.png".to_string())
/// );
/// ```
pub fn filename_from_content_disposition(header: &str) -> Option<String> {
    let mut plain = None;

    for part in split_params(header) {
        let Some((key, value)) = part.split_once('=') else {
            continue;
        };
        let value = unquote(value.trim());

        match key.trim().to_ascii_lowercase().as_str() {
            "filename*" => {
                let encoded = value.splitn(3, '\'').nth(2).unwrap_or(value.as_str());
                let decoded = percent_decode_str(encoded).decode_utf8_lossy().into_owned();
                if !decoded.is_empty() {
                    return Some(decoded);
                }
            }
            "filename" if !value.is_empty() => plain = Some(value),
            _ => {}
        }
    }

    plain
}

/// Splits header parameters on `;`, ignoring separators inside quoted strings.
fn split_params(header: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut quoted = false;
    let mut escaped = false;

    for (i, ch) in header.char_indices() {
        match ch {
            _ if escaped => escaped = false,
            '\\' if quoted => escaped = true,
            '"' => quoted = !quoted,
            ';' if !quoted => {
                parts.push(header[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(header[start..].trim());
    parts
}

/// Strips surrounding quotes and resolves `\x` escapes of a quoted string.
fn unquote(value: &str) -> String {
    let Some(inner) = value.strip_prefix('"') else {
        return value.to_string();
    };
    let inner = inner.strip_suffix('"').unwrap_or(inner);

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => out.extend(chars.next()),
            _ => out.push(ch),
        }
    }
    out
}
