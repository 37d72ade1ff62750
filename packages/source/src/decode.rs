//! Decoding of sightings API payloads.

use serde_json::Value;
use ticksight_sighting_models::SightingRecord;

use crate::SourceError;

/// Maximum length of the response body preview included in logs.
pub const BODY_PREVIEW_LEN: usize = 500;

/// Decodes a response body into sighting records.
///
/// The body must be a JSON array. Elements that are not objects, or whose
/// known fields have the wrong type, are skipped.
///
/// # Errors
///
/// Returns [`SourceError::Json`] if the body is not valid JSON and
/// [`SourceError::NotAnArray`] if it is valid JSON of another type.
pub fn decode_sightings(body: &str) -> Result<Vec<SightingRecord>, SourceError> {
    let value: Value = serde_json::from_str(body)?;

    let Value::Array(items) = value else {
        return Err(SourceError::NotAnArray {
            kind: json_kind(&value),
        });
    };

    let total = items.len();
    let records: Vec<SightingRecord> = items
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(record) => Some(record),
            Err(e) => {
                log::debug!("Skipping malformed sighting: {e}");
                None
            }
        })
        .collect();

    if records.len() < total {
        log::debug!("Decoded {} of {total} sightings", records.len());
    }

    Ok(records)
}

/// Returns at most [`BODY_PREVIEW_LEN`] characters of `body`.
#[must_use]
pub fn body_preview(body: &str) -> String {
    if body.chars().count() > BODY_PREVIEW_LEN {
        let head: String = body.chars().take(BODY_PREVIEW_LEN).collect();
        format!("{head}...")
    } else {
        body.to_string()
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use ticksight_sighting_models::SightingOrigin;

    use super::*;

    #[test]
    fn decodes_array_of_objects() {
        let records = decode_sightings(
            r#"[
                {"id":"1","date":"2024-03-01T10:00:00","location":"Leeds","species":"Marsh tick","latinName":"Ixodes apronophorus"},
                {"id":"2","date":"2024-07-15","location":"London","species":"Tree-hole tick","latinName":"Dermacentor frontalis"}
            ]"#,
        )
        .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].location.as_deref(), Some("Leeds"));
        assert_eq!(records[1].species.as_deref(), Some("Tree-hole tick"));
        assert!(records.iter().all(|r| r.source == SightingOrigin::Api));
    }

    #[test]
    fn skips_non_object_and_mistyped_elements() {
        let records = decode_sightings(
            r#"[1, "x", null, {"date": 20240301}, {"location":"Leeds"}]"#,
        )
        .unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].location.as_deref(), Some("Leeds"));
        assert!(records[0].date.is_none());
    }

    #[test]
    fn rejects_object_payload() {
        let err = decode_sightings(r#"{"error":"not found"}"#).unwrap_err();
        assert!(matches!(err, SourceError::NotAnArray { kind: "object" }));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = decode_sightings("[{\"date\":").unwrap_err();
        assert!(matches!(err, SourceError::Json(_)));
    }

    #[test]
    fn empty_array_is_ok() {
        assert!(decode_sightings("[]").unwrap().is_empty());
    }

    #[test]
    fn preview_truncates_long_bodies() {
        let body = "a".repeat(BODY_PREVIEW_LEN + 10);
        let preview = body_preview(&body);
        assert_eq!(preview.len(), BODY_PREVIEW_LEN + 3);
        assert!(preview.ends_with("..."));
        assert_eq!(body_preview("short"), "short");
    }
}
