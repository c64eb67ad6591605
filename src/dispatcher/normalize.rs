//! Projection of handler return values onto [`Response`].
//!
//! Handlers may return a finished response, data wrapped with a response-init
//! descriptor, or a bare payload. Rules are applied in that order and the first
//! one that fits wins.

use super::error::DispatchError;
use crate::request::header_map;
use crate::response::{status_reason, Response, ResponseInit};
use http::header::{HeaderValue, CONTENT_TYPE};
use serde::Serialize;
use serde_json::Value;

/// What a handler hands back to the dispatcher.
#[derive(Debug, Clone, PartialEq)]
pub enum HandlerOutput {
    /// Passed through unchanged
    Response(Response),
    /// JSON-serialized `data` (omitted when `None`) shaped by `init`
    Data {
        data: Option<Value>,
        init: ResponseInit,
    },
    /// JSON-serialized payload (omitted when `None`), always 200 with a JSON content type
    Payload(Option<Value>),
}

impl HandlerOutput {
    #[must_use]
    pub fn payload(value: Value) -> Self {
        HandlerOutput::Payload(Some(value))
    }

    /// Payload with no body.
    #[must_use]
    pub fn empty() -> Self {
        HandlerOutput::Payload(None)
    }

    #[must_use]
    pub fn data(data: Value, init: ResponseInit) -> Self {
        HandlerOutput::Data {
            data: Some(data),
            init,
        }
    }

    /// Serialize any value into a payload.
    pub fn serialize<T: Serialize>(value: &T) -> serde_json::Result<Self> {
        Ok(HandlerOutput::Payload(Some(serde_json::to_value(value)?)))
    }

    /// Classify untyped JSON.
    ///
    /// An object with both a `data` and an `init` key, whose `init` is a valid
    /// [`ResponseInit`], becomes [`HandlerOutput::Data`]. Anything else is a payload.
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(mut obj) if obj.contains_key("data") && obj.contains_key("init") => {
                let init = obj
                    .get("init")
                    .cloned()
                    .and_then(|raw| serde_json::from_value::<ResponseInit>(raw).ok());
                match init {
                    Some(init) => HandlerOutput::Data {
                        data: obj.remove("data"),
                        init,
                    },
                    None => HandlerOutput::Payload(Some(Value::Object(obj))),
                }
            }
            other => HandlerOutput::Payload(Some(other)),
        }
    }
}

impl From<Response> for HandlerOutput {
    fn from(resp: Response) -> Self {
        HandlerOutput::Response(resp)
    }
}

impl From<Value> for HandlerOutput {
    fn from(value: Value) -> Self {
        HandlerOutput::from_value(value)
    }
}

fn serialize_body(value: Option<Value>) -> Result<Option<Vec<u8>>, DispatchError> {
    Ok(value.map(|v| serde_json::to_vec(&v)).transpose()?)
}

/// Convert a handler's output into the uniform response.
pub fn normalize(output: HandlerOutput) -> Result<Response, DispatchError> {
    match output {
        HandlerOutput::Response(resp) => Ok(resp),
        HandlerOutput::Data { data, init } => {
            let status = init.status.unwrap_or(200);
            let headers = header_map(&init.headers.0)
                .map_err(|name| DispatchError::InvalidHeader { name })?;
            Ok(Response {
                status,
                status_text: init
                    .status_text
                    .unwrap_or_else(|| status_reason(status).to_string()),
                headers,
                body: serialize_body(data)?,
            })
        }
        HandlerOutput::Payload(value) => {
            let mut resp = Response::new(200);
            resp.headers
                .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            resp.body = serialize_body(value)?;
            Ok(resp)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_raw_response_passes_through() {
        let raw = Response::new(204).with_status_text("Nothing");
        let resp = normalize(HandlerOutput::Response(raw.clone())).unwrap();
        assert_eq!(resp, raw);
        assert_eq!(resp.body, None);
    }

    #[test]
    fn test_data_with_init() {
        let out = HandlerOutput::data(json!({"ok": true}), ResponseInit::status(201));
        let resp = normalize(out).unwrap();
        assert_eq!(resp.status, 201);
        assert_eq!(resp.status_text, "Created");
        assert_eq!(resp.text(), Some(r#"{"ok":true}"#));
        assert!(resp.header("content-type").is_none());
    }

    #[test]
    fn test_data_defaults_to_200_and_omits_missing_data() {
        let out = HandlerOutput::Data {
            data: None,
            init: ResponseInit::default().with_header("x-trace", "abc"),
        };
        let resp = normalize(out).unwrap();
        assert_eq!(resp.status, 200);
        assert_eq!(resp.body, None);
        assert_eq!(resp.header("x-trace"), Some("abc"));
    }

    #[test]
    fn test_bare_string_payload() {
        let resp = normalize(HandlerOutput::payload(json!("OK"))).unwrap();
        assert_eq!(resp.status, 200);
        assert_eq!(resp.header("content-type"), Some("application/json"));
        assert_eq!(resp.text(), Some("\"OK\""));
    }

    #[test]
    fn test_empty_payload_has_no_body() {
        let resp = normalize(HandlerOutput::empty()).unwrap();
        assert_eq!(resp.body, None);
        assert_eq!(resp.header("content-type"), Some("application/json"));
    }

    #[test]
    fn test_from_value_detects_wrapper() {
        let out = HandlerOutput::from_value(json!({
            "data": {"id": 1},
            "init": {"status": 202, "statusText": "Queued", "headers": {"x-job": "7"}}
        }));
        let resp = normalize(out).unwrap();
        assert_eq!(resp.status, 202);
        assert_eq!(resp.status_text, "Queued");
        assert_eq!(resp.header("x-job"), Some("7"));
        assert_eq!(resp.json_body::<Value>().unwrap(), json!({"id": 1}));
    }

    #[test]
    fn test_from_value_without_init_is_payload() {
        let value = json!({"data": [1, 2]});
        assert_eq!(
            HandlerOutput::from_value(value.clone()),
            HandlerOutput::Payload(Some(value))
        );
    }

    #[test]
    fn test_from_value_with_invalid_init_is_payload() {
        let value = json!({"data": 1, "init": "nope"});
        assert_eq!(
            HandlerOutput::from_value(value.clone()),
            HandlerOutput::Payload(Some(value))
        );
    }

    #[test]
    fn test_invalid_init_header_is_rejected() {
        let out = HandlerOutput::data(
            json!(1),
            ResponseInit::default().with_header("bad name", "v"),
        );
        assert!(matches!(
            normalize(out),
            Err(DispatchError::InvalidHeader { name }) if name == "bad name"
        ));
    }

    #[test]
    fn test_from_value_wrapper_with_null_init_fields() {
        let out = HandlerOutput::from_value(json!({
            "data": {"ok": true},
            "init": {"status": 201, "statusText": null, "headers": null}
        }));
        assert!(matches!(out, HandlerOutput::Data { .. }));
        let resp = normalize(out).unwrap();
        assert_eq!(resp.status, 201);
        assert_eq!(resp.status_text, "Created");
        assert_eq!(resp.header("content-type"), None);
        assert_eq!(resp.json_body::<Value>().unwrap(), json!({"ok": true}));
    }

    #[test]
    fn test_from_value_wrapper_with_null_status() {
        let out = HandlerOutput::from_value(json!({"data": "x", "init": {"status": null}}));
        let resp = normalize(out).unwrap();
        assert_eq!(resp.status, 200);
        assert_eq!(resp.status_text, "OK");
    }
}
