//! Request-side types: the request object handed to handlers, the two input
//! shapes [`Dispatcher::invoke`](crate::dispatcher::Dispatcher::invoke) accepts,
//! and the per-call [`RequestInit`] options.

use crate::helpers::FormData;
use http::header::{HeaderName, HeaderValue, CONTENT_TYPE};
use http::{HeaderMap, Method};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use url::Url;

/// A fully-formed request as seen by a handler.
#[derive(Debug, Clone, PartialEq)]
pub struct TestRequest {
    /// HTTP method (GET, POST, etc.)
    pub method: Method,
    /// Absolute URL, including any query string
    pub url: Url,
    /// Request headers
    pub headers: HeaderMap,
    /// Raw request body
    pub body: Option<Vec<u8>>,
}

impl TestRequest {
    /// Create a bodiless request with no headers.
    pub fn new(method: Method, url: &str) -> Result<Self, url::ParseError> {
        Ok(Self {
            method,
            url: Url::parse(url)?,
            headers: HeaderMap::new(),
            body: None,
        })
    }

    /// Request path without query string.
    #[must_use]
    pub fn path(&self) -> &str {
        self.url.path()
    }

    /// Get a header by name (case-insensitive)
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Parsed query string parameters; the last occurrence of a key wins.
    #[must_use]
    pub fn query_params(&self) -> HashMap<String, String> {
        self.url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    /// Body as UTF-8 text, if present and valid.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.body
            .as_deref()
            .and_then(|b| std::str::from_utf8(b).ok())
    }

    /// Deserialize the body as JSON. A missing body yields `Ok(None)`.
    pub fn json<T: DeserializeOwned>(&self) -> serde_json::Result<Option<T>> {
        self.body
            .as_deref()
            .map(serde_json::from_slice)
            .transpose()
    }
}

/// What a caller passes to `invoke`: a bare path or an already-built request.
///
/// Route params are taken from the path as written. A `Path` is matched verbatim,
/// so `/users/a b` yields `a b`; a `Request` is matched on its parsed URL path,
/// which is percent-encoded, so the same path yields `a%20b`.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestInput {
    /// A path such as `/api/users/42?expand=1`, resolved against the base URL
    Path(String),
    /// A request-like object; its own method takes precedence over `RequestInit`
    Request(TestRequest),
}

impl From<&str> for RequestInput {
    fn from(path: &str) -> Self {
        RequestInput::Path(path.to_string())
    }
}

impl From<String> for RequestInput {
    fn from(path: String) -> Self {
        RequestInput::Path(path)
    }
}

impl From<&String> for RequestInput {
    fn from(path: &String) -> Self {
        RequestInput::Path(path.clone())
    }
}

impl From<TestRequest> for RequestInput {
    fn from(request: TestRequest) -> Self {
        RequestInput::Request(request)
    }
}

/// Per-call options for `invoke`.
///
/// Headers are kept as raw name/value pairs and validated when the request is
/// built, so the builder methods never fail.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestInit {
    pub method: Option<Method>,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
    /// Explicit parameters; these override same-named path parameters
    pub params: HashMap<String, String>,
}

impl RequestInit {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// JSON body plus `Content-Type: application/json`.
    #[must_use]
    pub fn json(self, value: &Value) -> Self {
        self.header(CONTENT_TYPE.as_str(), "application/json")
            .body(value.to_string())
    }

    /// `multipart/form-data` body built from `form`.
    #[must_use]
    pub fn form(self, form: FormData) -> Self {
        let (content_type, body) = form.into_multipart();
        self.header(CONTENT_TYPE.as_str(), content_type).body(body)
    }

    #[must_use]
    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }
}

/// Build a [`HeaderMap`] from raw pairs, rejecting invalid names or values.
///
/// Repeated names are appended, not replaced.
pub(crate) fn header_map(pairs: &[(String, String)]) -> Result<HeaderMap, String> {
    let mut headers = HeaderMap::with_capacity(pairs.len());
    for (name, value) in pairs {
        let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| name.clone())?;
        let header_value = HeaderValue::from_str(value).map_err(|_| name.clone())?;
        headers.append(header_name, header_value);
    }
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_params_and_path() {
        let req =
            TestRequest::new(Method::GET, "http://localhost/users?limit=10&offset=20").unwrap();
        assert_eq!(req.path(), "/users");
        let q = req.query_params();
        assert_eq!(q.get("limit").map(String::as_str), Some("10"));
        assert_eq!(q.get("offset").map(String::as_str), Some("20"));
    }

    #[test]
    fn test_init_json_sets_content_type() {
        let init = RequestInit::new().json(&json!({"name": "Fluffy"}));
        assert_eq!(
            init.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        assert_eq!(init.body.as_deref(), Some(br#"{"name":"Fluffy"}"#.as_slice()));
    }

    #[test]
    fn test_header_map_appends_repeats() {
        let map = header_map(&[
            ("x-tag".into(), "a".into()),
            ("X-Tag".into(), "b".into()),
        ])
        .unwrap();
        assert_eq!(map.get_all("x-tag").iter().count(), 2);
    }

    #[test]
    fn test_header_map_rejects_bad_name() {
        let err = header_map(&[("bad header".into(), "v".into())]).unwrap_err();
        assert_eq!(err, "bad header");
    }

    #[test]
    fn test_json_body_roundtrip() {
        let mut req = TestRequest::new(Method::POST, "http://localhost/pets").unwrap();
        assert_eq!(req.json::<Value>().unwrap(), None);
        req.body = Some(br#"{"id":1}"#.to_vec());
        assert_eq!(req.json::<Value>().unwrap(), Some(json!({"id": 1})));
    }
}
