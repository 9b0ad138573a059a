use serde_json::Value;
use trakt_sync_core::{MediaType, SyncError, SyncOutcome, SyncResult};

/// Response body as handed over by a transport.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(Value),
    Text(String),
}

/// Reads how many history entries the provider added for `media_type`.
///
/// A body without `added` (or without the matching sub-field) counts as zero.
pub fn interpret_response(body: ResponseBody, media_type: MediaType) -> SyncResult<SyncOutcome> {
    let raw_response = match body {
        ResponseBody::Json(value) => value,
        ResponseBody::Text(text) => serde_json::from_str(&text).map_err(|err| {
            SyncError::MalformedResponse(format!("history response is not valid JSON: {err}"))
        })?,
    };

    let added_count = raw_response
        .get("added")
        .and_then(|added| added.get(media_type.payload_key()))
        .and_then(Value::as_u64)
        .unwrap_or(0);

    Ok(SyncOutcome {
        added_count,
        raw_response,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn reads_count_for_requested_kind() {
        let body = ResponseBody::Json(json!({ "added": { "movies": 0, "episodes": 3 } }));
        let outcome = interpret_response(body, MediaType::Episode).unwrap();
        assert_eq!(outcome.added_count, 3);
    }

    #[test]
    fn parses_text_bodies() {
        let body = ResponseBody::Text(r#"{"added":{"movies":1}}"#.to_string());
        let outcome = interpret_response(body, MediaType::Movie).unwrap();
        assert_eq!(outcome.added_count, 1);
        assert_eq!(outcome.raw_response, json!({ "added": { "movies": 1 } }));
    }

    #[test]
    fn missing_added_counts_as_zero() {
        let body = ResponseBody::Text(r#"{"error":"invalid_grant"}"#.to_string());
        let outcome = interpret_response(body, MediaType::Movie).unwrap();
        assert_eq!(outcome.added_count, 0);

        let body = ResponseBody::Json(json!({ "added": { "episodes": 2 } }));
        let outcome = interpret_response(body, MediaType::Movie).unwrap();
        assert_eq!(outcome.added_count, 0);
    }

    #[test]
    fn non_json_text_is_malformed() {
        let body = ResponseBody::Text("<html>Bad Gateway</html>".to_string());
        let result = interpret_response(body, MediaType::Movie);
        match result {
            Err(SyncError::MalformedResponse(msg)) => assert!(msg.contains("not valid JSON")),
            _ => panic!("Expected MalformedResponse error"),
        }
    }
}
