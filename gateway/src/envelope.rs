//! The uniform result envelope and wire-shape normalization.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Uniform result of every gateway operation.
///
/// This is a sum type in spirit: `succeeded` tells the caller which half is
/// meaningful. It is deliberately not a `Result` - transport failures and
/// backend rejections both land here, and callers are expected to branch on
/// `succeeded` rather than propagate.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope<T> {
    pub succeeded: bool,
    pub message: String,
    pub payload: Option<T>,
    /// Backend-supplied error detail (e.g. server-side field errors), verbatim.
    pub errors: Option<Value>,
}

impl<T> Envelope<T> {
    #[must_use]
    pub fn success(message: impl Into<String>, payload: T) -> Self {
        Self {
            succeeded: true,
            message: message.into(),
            payload: Some(payload),
            errors: None,
        }
    }

    /// Success with no payload (delete).
    #[must_use]
    pub fn success_empty(message: impl Into<String>) -> Self {
        Self {
            succeeded: true,
            message: message.into(),
            payload: None,
            errors: None,
        }
    }

    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            succeeded: false,
            message: message.into(),
            payload: None,
            errors: None,
        }
    }

    #[must_use]
    pub fn failure_with_errors(message: impl Into<String>, errors: Option<Value>) -> Self {
        Self {
            succeeded: false,
            message: message.into(),
            payload: None,
            errors,
        }
    }
}

/// Response body as the backend sends it, before normalization.
#[derive(Debug, Deserialize)]
pub(crate) struct WireEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub errors: Option<Value>,
}

/// The two documented shapes of a list `data` payload.
///
/// Some backend builds return the sequence bare, others wrap it in an
/// object keyed by the collection name. Both are part of the wire contract;
/// [`ListPayload::into_items`] normalizes them to one `Vec`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ListPayload<T> {
    Items(Vec<T>),
    Keyed(BTreeMap<String, Vec<T>>),
}

impl<T> ListPayload<T> {
    /// Normalize to the bare sequence. A keyed payload must carry the
    /// resource's collection key, or be a single-entry object.
    pub(crate) fn into_items(self, collection: &str) -> Result<Vec<T>, String> {
        match self {
            ListPayload::Items(items) => Ok(items),
            ListPayload::Keyed(mut map) => {
                if let Some(items) = map.remove(collection) {
                    return Ok(items);
                }
                if map.len() == 1
                    && let Some((_, items)) = map.pop_first()
                {
                    return Ok(items);
                }
                Err(format!(
                    "list payload object has no {collection:?} key (keys: {:?})",
                    map.keys().collect::<Vec<_>>()
                ))
            }
        }
    }
}

/// Decode a wire envelope body into a typed payload envelope.
///
/// `decode_data` turns the raw `data` value into the payload; it only runs
/// when the backend reported success and `data` is present.
pub(crate) fn normalize<T, F>(wire: WireEnvelope, decode_data: F) -> Envelope<T>
where
    F: FnOnce(Value) -> Result<T, String>,
{
    if !wire.success {
        let message = if wire.message.is_empty() {
            "request rejected by backend".to_string()
        } else {
            wire.message
        };
        return Envelope::failure_with_errors(message, wire.errors);
    }

    match wire.data {
        Some(data) => match decode_data(data) {
            Ok(payload) => Envelope::success(wire.message, payload),
            Err(e) => Envelope::failure(format!("malformed response payload: {e}")),
        },
        None => Envelope::failure("response reported success but carried no data"),
    }
}

pub(crate) fn decode_value<T: DeserializeOwned>(data: Value) -> Result<T, String> {
    serde_json::from_value(data).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Row {
        n: i64,
    }

    fn wire(body: Value) -> WireEnvelope {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn bare_and_wrapped_lists_normalize_identically() {
        let bare: ListPayload<Row> = serde_json::from_value(serde_json::json!([{"n": 1}, {"n": 2}]))
            .unwrap();
        let wrapped: ListPayload<Row> =
            serde_json::from_value(serde_json::json!({"events": [{"n": 1}, {"n": 2}]})).unwrap();

        assert_eq!(
            bare.into_items("events").unwrap(),
            wrapped.into_items("events").unwrap()
        );
    }

    #[test]
    fn single_entry_object_under_another_key_is_accepted() {
        let wrapped: ListPayload<Row> =
            serde_json::from_value(serde_json::json!({"rows": [{"n": 7}]})).unwrap();
        assert_eq!(wrapped.into_items("events").unwrap(), vec![Row { n: 7 }]);
    }

    #[test]
    fn multi_key_object_without_the_collection_key_is_rejected() {
        let wrapped: ListPayload<Row> =
            serde_json::from_value(serde_json::json!({"a": [], "b": []})).unwrap();
        assert!(wrapped.into_items("events").is_err());
    }

    #[test]
    fn backend_failure_keeps_message_and_errors() {
        let envelope: Envelope<Row> = normalize(
            wire(serde_json::json!({
                "success": false,
                "message": "title taken",
                "errors": {"title": ["already exists"]}
            })),
            decode_value,
        );
        assert!(!envelope.succeeded);
        assert_eq!(envelope.message, "title taken");
        assert!(envelope.errors.is_some());
    }

    #[test]
    fn success_without_data_is_a_failure() {
        let envelope: Envelope<Row> = normalize(
            wire(serde_json::json!({"success": true, "message": "ok"})),
            decode_value,
        );
        assert!(!envelope.succeeded);
    }

    #[test]
    fn mismatched_payload_shape_is_a_failure_not_a_panic() {
        let envelope: Envelope<Row> = normalize(
            wire(serde_json::json!({"success": true, "message": "ok", "data": "oops"})),
            decode_value,
        );
        assert!(!envelope.succeeded);
        assert!(envelope.message.contains("malformed"));
    }
}
