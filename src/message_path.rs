//! Message-path parsing and nested value lookup.
//!
//! A message path names a stream and, optionally, a field inside each
//! message: `/veh.twist.angular.z` selects stream `/veh` and walks
//! `twist` → `angular` → `z` through the payload. An empty field path means
//! "read the message's designated scalar payload field" (`data`).

use serde_json::Value;

/// Payload field read when the message path carries no field segments.
pub const SCALAR_PAYLOAD_FIELD: &str = "data";

/// Parsed form of `series.message_path`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessagePath {
    /// Stream identifier: everything before the first `.`.
    pub stream: String,
    /// Dot-separated field segments after the stream; empty means "use the
    /// message's sole scalar payload".
    pub field_path: Vec<String>,
}

impl MessagePath {
    /// Split a raw path at the first `.`. No validation happens here; an
    /// unknown stream simply never matches a frame.
    pub fn parse(raw: &str) -> MessagePath {
        match raw.split_once('.') {
            Some((stream, rest)) if !rest.is_empty() => MessagePath {
                stream: stream.to_string(),
                field_path: rest.split('.').map(str::to_string).collect(),
            },
            Some((stream, _)) => MessagePath {
                stream: stream.to_string(),
                field_path: Vec::new(),
            },
            None => MessagePath {
                stream: raw.to_string(),
                field_path: Vec::new(),
            },
        }
    }

    /// `false` for the empty path, which can never subscribe to anything.
    pub fn has_stream(&self) -> bool {
        !self.stream.is_empty()
    }

    /// Extract the numeric value this path selects from a payload, if any.
    pub fn extract(&self, payload: &Value) -> Option<f64> {
        if self.field_path.is_empty() {
            payload.get(SCALAR_PAYLOAD_FIELD).and_then(Value::as_f64)
        } else {
            resolve_path(payload, &self.field_path)
        }
    }
}

/// Walk `path` through nested objects (and arrays, by index). Any missing
/// or wrong-typed intermediate, or a non-numeric leaf, yields `None` rather
/// than an error.
pub fn resolve_path(value: &Value, path: &[String]) -> Option<f64> {
    let mut current = value;
    for segment in path {
        current = match current {
            Value::Object(map) => map.get(segment.as_str())?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    current.as_f64()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn splits_stream_and_field_path() {
        let path = MessagePath::parse("/veh.twist.angular.z");
        assert_eq!(path.stream, "/veh");
        assert_eq!(path.field_path, vec!["twist", "angular", "z"]);
    }

    #[test]
    fn bare_stream_has_empty_field_path() {
        let path = MessagePath::parse("/veh");
        assert_eq!(path.stream, "/veh");
        assert!(path.field_path.is_empty());
        assert!(path.has_stream());
    }

    #[test]
    fn trailing_dot_means_scalar_payload() {
        let path = MessagePath::parse("/veh.");
        assert_eq!(path.stream, "/veh");
        assert!(path.field_path.is_empty());
    }

    #[test]
    fn empty_path_has_no_stream() {
        let path = MessagePath::parse("");
        assert!(!path.has_stream());
    }

    #[test]
    fn resolve_walks_nested_objects() {
        let payload = json!({ "twist": { "angular": { "z": -0.25 } } });
        let segments: Vec<String> = ["twist", "angular", "z"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(resolve_path(&payload, &segments), Some(-0.25));
    }

    #[test]
    fn resolve_indexes_arrays() {
        let payload = json!({ "wheels": [0.1, 0.2, 0.3] });
        let segments: Vec<String> = ["wheels", "1"].iter().map(|s| s.to_string()).collect();
        assert_eq!(resolve_path(&payload, &segments), Some(0.2));
    }

    #[test]
    fn missing_intermediate_is_absent_not_an_error() {
        let payload = json!({ "twist": { "linear": { "x": 1.0 } } });
        let segments: Vec<String> = ["twist", "angular", "z"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(resolve_path(&payload, &segments), None);
    }

    #[test]
    fn non_numeric_leaf_is_absent() {
        let payload = json!({ "status": { "mode": "auto" } });
        let segments: Vec<String> = ["status", "mode"].iter().map(|s| s.to_string()).collect();
        assert_eq!(resolve_path(&payload, &segments), None);
    }

    #[test]
    fn scalar_through_non_container_is_absent() {
        let payload = json!({ "angle": 5.0 });
        let segments: Vec<String> = ["angle", "deeper"].iter().map(|s| s.to_string()).collect();
        assert_eq!(resolve_path(&payload, &segments), None);
    }

    #[test]
    fn extract_reads_data_field_for_empty_path() {
        let path = MessagePath::parse("/veh");
        assert_eq!(path.extract(&json!({ "data": 30 })), Some(30.0));
        assert_eq!(path.extract(&json!({ "x": 5 })), None);
    }

    #[test]
    fn extract_follows_field_path() {
        let path = MessagePath::parse("/veh.twist.angular.z");
        let payload = json!({ "twist": { "angular": { "z": 12.5 } } });
        assert_eq!(path.extract(&payload), Some(12.5));
    }
}
