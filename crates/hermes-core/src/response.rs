//! Response type and the cascade convention.
//!
//! A [`Response`] is the status/headers/body triple every handler and
//! middleware unit produces. Header insertion order is preserved so the
//! transport adapter can emit headers in the order they were attached.
//!
//! The cascade convention is carried in-band: a response whose
//! [`CASCADE_HEADER`] equals [`CASCADE_PASS`] tells an enclosing
//! dispatcher "this handler declines; try the next candidate".

use bytes::Bytes;
use http::StatusCode;
use indexmap::IndexMap;

/// Header name signalling a declined response.
pub const CASCADE_HEADER: &str = "x-cascade";

/// Header value signalling a declined response.
pub const CASCADE_PASS: &str = "pass";

/// An HTTP-shaped response: status code, ordered headers, byte body.
///
/// # Example
///
/// ```
/// use hermes_core::Response;
/// use http::StatusCode;
///
/// let response = Response::ok("hello").header("content-type", "text/plain");
/// assert_eq!(response.status(), StatusCode::OK);
/// assert_eq!(response.header_value("Content-Type"), Some("text/plain"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status: StatusCode,
    headers: IndexMap<String, String>,
    body: Bytes,
}

impl Response {
    /// Creates an empty response with the given status.
    #[must_use]
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: IndexMap::new(),
            body: Bytes::new(),
        }
    }

    /// Creates a `200 OK` response with the given body.
    #[must_use]
    pub fn ok(body: impl Into<Bytes>) -> Self {
        Self::new(StatusCode::OK).body(body)
    }

    /// Creates a plain-text response with the given status and message.
    #[must_use]
    pub fn text(status: StatusCode, message: impl Into<String>) -> Self {
        Self::new(status)
            .header("content-type", "text/plain; charset=utf-8")
            .body(message.into())
    }

    /// Creates the 404 response the dispatcher emits on a routing miss:
    /// `404 Not Found` carrying `X-Cascade: pass` so an enclosing
    /// dispatcher may try its next candidate.
    #[must_use]
    pub fn not_found_pass() -> Self {
        Self::text(StatusCode::NOT_FOUND, "Not Found").pass()
    }

    /// Replaces the body.
    #[must_use]
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Attaches a header, replacing an existing one with the same
    /// (case-insensitive) name in place.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_header(name, value);
        self
    }

    /// Attaches a header on a borrowed response.
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some((existing, _)) = self
            .headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(&name))
        {
            let existing = existing.clone();
            self.headers.insert(existing, value);
        } else {
            self.headers.insert(name, value);
        }
    }

    /// Marks this response as declined (`X-Cascade: pass`).
    #[must_use]
    pub fn pass(self) -> Self {
        self.header(CASCADE_HEADER, CASCADE_PASS)
    }

    /// Returns true if this response declines and defers to the next
    /// candidate handler.
    #[must_use]
    pub fn is_cascade_pass(&self) -> bool {
        self.header_value(CASCADE_HEADER)
            .is_some_and(|v| v.eq_ignore_ascii_case(CASCADE_PASS))
    }

    /// Returns the status code.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns a header value by case-insensitive name.
    #[must_use]
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Iterates over headers in insertion order.
    pub fn headers(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the body bytes.
    #[must_use]
    pub fn body_bytes(&self) -> &Bytes {
        &self.body
    }

    /// Returns the body decoded as UTF-8, lossily.
    #[must_use]
    pub fn body_string(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_response() {
        let response = Response::ok("hello");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.body_string(), "hello");
    }

    #[test]
    fn test_text_response() {
        let response = Response::text(StatusCode::FORBIDDEN, "denied");
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            response.header_value("content-type"),
            Some("text/plain; charset=utf-8")
        );
        assert_eq!(response.body_string(), "denied");
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let response = Response::ok("").header("X-Runtime", "12");
        assert_eq!(response.header_value("x-runtime"), Some("12"));
        assert_eq!(response.header_value("X-RUNTIME"), Some("12"));
    }

    #[test]
    fn test_header_replaces_in_place() {
        let response = Response::ok("")
            .header("a", "1")
            .header("b", "2")
            .header("A", "3");

        let headers: Vec<(&str, &str)> = response.headers().collect();
        assert_eq!(headers, vec![("a", "3"), ("b", "2")]);
    }

    #[test]
    fn test_headers_preserve_insertion_order() {
        let response = Response::ok("")
            .header("x-first", "1")
            .header("x-second", "2")
            .header("x-third", "3");

        let names: Vec<&str> = response.headers().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["x-first", "x-second", "x-third"]);
    }

    #[test]
    fn test_cascade_pass() {
        let response = Response::not_found_pass();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.is_cascade_pass());

        let plain = Response::ok("hit");
        assert!(!plain.is_cascade_pass());
    }
}
