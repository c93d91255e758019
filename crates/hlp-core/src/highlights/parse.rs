//! Reading fields out of a highlights document.

use crate::retry::StepError;
use serde_json::Value;

/// True for `null`, `{}`, `[]` and `""`: responses that carry no highlights at all.
pub fn is_empty_document(doc: &Value) -> bool {
    match doc {
        Value::Null => true,
        Value::Object(m) => m.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// URL of the first highlight: `data[0].url`.
pub fn first_video_url(doc: &Value) -> Result<&str, StepError> {
    let data = doc
        .get("data")
        .ok_or_else(|| StepError::Data("missing `data` field".to_string()))?
        .as_array()
        .ok_or_else(|| StepError::Data("`data` is not an array".to_string()))?;
    let first = data
        .first()
        .ok_or_else(|| StepError::Data("`data` is empty".to_string()))?;
    first
        .get("url")
        .and_then(Value::as_str)
        .filter(|u| !u.is_empty())
        .ok_or_else(|| StepError::Data("first highlight has no `url`".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn first_url_is_extracted() {
        let doc = json!({
            "data": [
                {"id": 1, "url": "https://cdn.example.com/a.mp4"},
                {"id": 2, "url": "https://cdn.example.com/b.mp4"}
            ],
            "pagination": {"limit": 10}
        });
        assert_eq!(first_video_url(&doc).unwrap(), "https://cdn.example.com/a.mp4");
    }

    #[test]
    fn shape_errors_are_data_errors() {
        for doc in [
            json!({}),
            json!({"data": {}}),
            json!({"data": []}),
            json!({"data": [{"id": 1}]}),
            json!({"data": [{"url": 7}]}),
            json!({"data": [{"url": ""}]}),
        ] {
            assert!(
                matches!(first_video_url(&doc), Err(StepError::Data(_))),
                "expected data error for {doc}"
            );
        }
    }

    #[test]
    fn empty_documents() {
        assert!(is_empty_document(&Value::Null));
        assert!(is_empty_document(&json!({})));
        assert!(is_empty_document(&json!([])));
        assert!(is_empty_document(&json!("")));
        assert!(!is_empty_document(&json!({"data": []})));
    }
}
