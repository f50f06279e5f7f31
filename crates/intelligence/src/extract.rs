//! Locate and decode the fenced JSON payload in free-form model output.
//!
//! Models are asked to wrap their answer in a single ```` ```json ```` fence.
//! The first such fence wins; surrounding whitespace or chatter is ignored.
//! The fence tag is matched case-insensitively, and an untagged or
//! differently-tagged fence does not count.

use serde::de::DeserializeOwned;

use crate::PipelineError;

const FENCE: &str = "```";
const TAG: &str = "json";

/// Return the trimmed payload between the first ```` ```json ```` fence and
/// its closing fence.
pub fn extract_payload(raw: &str) -> Result<&str, PipelineError> {
    // ASCII lowercasing keeps byte offsets aligned with `raw`.
    let lowered = raw.to_ascii_lowercase();
    let opener = format!("{FENCE}{TAG}");

    let mut search_from = 0;
    let body_start = loop {
        let Some(offset) = lowered[search_from..].find(&opener) else {
            return Err(PipelineError::malformed("no ```json fence found", raw));
        };
        let tag_end = search_from + offset + opener.len();
        // Reject longer tags such as `jsonc` or `json5`.
        match raw[tag_end..].chars().next() {
            Some(c) if c.is_ascii_alphanumeric() => search_from = tag_end,
            _ => break tag_end,
        }
    };

    let body = &raw[body_start..];
    let Some(close) = body.find(FENCE) else {
        return Err(PipelineError::malformed("missing closing fence", raw));
    };

    let payload = body[..close].trim();
    if payload.is_empty() {
        return Err(PipelineError::malformed("empty fenced payload", raw));
    }
    Ok(payload)
}

/// Extract the fenced payload and decode it as `T`.
pub fn extract_json<T: DeserializeOwned>(raw: &str) -> Result<T, PipelineError> {
    let payload = extract_payload(raw)?;
    serde_json::from_str(payload)
        .map_err(|e| PipelineError::malformed(format!("invalid JSON payload: {e}"), raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use busters_test_utils::fenced;
    use proptest::prelude::*;
    use serde_json::{json, Value};

    fn reason(err: PipelineError) -> String {
        match err {
            PipelineError::MalformedOutput { reason, .. } => reason,
            other => panic!("expected MalformedOutput, got {other:?}"),
        }
    }

    #[test]
    fn extracts_fenced_object() {
        let raw = "```json\n{\"mood\": \"tired\"}\n```";
        let value: Value = extract_json(raw).unwrap();
        assert_eq!(value, json!({"mood": "tired"}));
    }

    #[test]
    fn tolerates_whitespace_and_chatter() {
        let raw = "  Sure! Here you go:\n\n```JSON  \n\n  [1, 2, 3]  \n\n```\nHope that helps.  ";
        assert_eq!(extract_payload(raw).unwrap(), "[1, 2, 3]");
    }

    #[test]
    fn single_line_fence() {
        assert_eq!(extract_payload("```json{\"a\":1}```").unwrap(), "{\"a\":1}");
    }

    #[test]
    fn first_json_fence_wins() {
        let raw = "```text\nignore me\n```\n```json\n{\"a\": 1}\n```\n```json\n{\"a\": 2}\n```";
        let value: Value = extract_json(raw).unwrap();
        assert_eq!(value, json!({"a": 1}));
    }

    #[test]
    fn rejects_missing_fence() {
        assert_eq!(
            reason(extract_payload("{\"mood\": \"happy\"}").unwrap_err()),
            "no ```json fence found"
        );
    }

    #[test]
    fn rejects_untagged_fence() {
        assert!(extract_payload("```\n{\"mood\": \"happy\"}\n```").is_err());
    }

    #[test]
    fn rejects_longer_tag() {
        assert!(extract_payload("```jsonc\n{}\n```").is_err());
    }

    #[test]
    fn rejects_unterminated_fence() {
        assert_eq!(
            reason(extract_payload("```json\n{\"mood\": \"happy\"}").unwrap_err()),
            "missing closing fence"
        );
    }

    #[test]
    fn rejects_empty_payload() {
        assert_eq!(
            reason(extract_payload("```json\n   \n```").unwrap_err()),
            "empty fenced payload"
        );
    }

    #[test]
    fn rejects_invalid_json_and_keeps_raw() {
        let raw = "```json\n{mood: happy}\n```";
        match extract_json::<Value>(raw).unwrap_err() {
            PipelineError::MalformedOutput { reason, raw: kept } => {
                assert!(reason.starts_with("invalid JSON payload"));
                assert_eq!(kept, raw);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn non_ascii_text_around_fence() {
        let raw = "Voilà, résultat:\n```json\n{\"mood\": \"détendu\"}\n```";
        let value: Value = extract_json(raw).unwrap();
        assert_eq!(value["mood"], "détendu");
    }

    fn json_value() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(Value::from),
            "[a-zA-Z0-9 ]{0,12}".prop_map(Value::String),
        ];
        leaf.prop_recursive(3, 24, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
                prop::collection::btree_map("[a-z]{1,6}", inner, 0..4)
                    .prop_map(|m| Value::Object(m.into_iter().collect())),
            ]
        })
    }

    proptest! {
        #[test]
        fn fenced_values_round_trip(value in json_value(), pretty in any::<bool>()) {
            let payload = if pretty {
                serde_json::to_string_pretty(&value).unwrap()
            } else {
                serde_json::to_string(&value).unwrap()
            };
            let decoded: Value = extract_json(&fenced(&payload)).unwrap();
            prop_assert_eq!(decoded, value);
        }
    }
}
