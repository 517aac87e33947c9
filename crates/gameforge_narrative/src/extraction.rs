//! Utilities for extracting a bounded list of records from noisy responses.
//!
//! Text services asked for "strict JSON" still wrap the array in prose,
//! markdown fences or apologies. The array is taken to span from the first
//! `[` to the last `]` of the response.

use gameforge_error::{GameforgeResult, GenerationError, GenerationErrorKind};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Most records kept from one list response.
pub const MAX_LIST_ITEMS: usize = 3;

/// Length of the response preview included in parse failure logs.
const PREVIEW_CHARS: usize = 100;

/// Locate and parse the array of mappings embedded in `response`.
///
/// Only the first `max_items` elements are returned, in their original
/// order.
///
/// Bracket characters in the surrounding prose defeat the heuristic; the
/// result is then a parse failure rather than a wrong list.
///
/// # Errors
///
/// Returns `MalformedList` if there is no `[` ... `]` span, or the span is
/// not a JSON array of objects.
///
/// # Examples
///
/// ```
/// use gameforge_narrative::extract_bounded_list;
///
/// let response = "Voici les lieux :\n```json\n[{\"name\": \"Port\"}, {\"name\": \"Phare\"}]\n```";
/// let items = extract_bounded_list(response, 1).unwrap();
///
/// assert_eq!(items.len(), 1);
/// assert_eq!(items[0]["name"], "Port");
/// ```
pub fn extract_bounded_list(
    response: &str,
    max_items: usize,
) -> GameforgeResult<Vec<Map<String, Value>>> {
    let (Some(start), Some(end)) = (response.find('['), response.rfind(']')) else {
        tracing::error!(
            response_length = response.len(),
            preview = %preview(response),
            "No list found in response"
        );
        return Err(malformed(format!(
            "no '[' ... ']' span in response (length: {})",
            response.len()
        )));
    };

    if end < start {
        tracing::error!(start, end, "List brackets out of order");
        return Err(malformed(format!(
            "last ']' at {} precedes first '[' at {}",
            end, start
        )));
    }

    let span = &response[start..=end];
    let mut items: Vec<Map<String, Value>> = serde_json::from_str(span).map_err(|e| {
        tracing::error!(
            error = %e,
            span_length = span.len(),
            preview = %preview(span),
            "List span is not an array of objects"
        );
        malformed(format!("invalid JSON array: {}", e))
    })?;

    let total = items.len();
    items.truncate(max_items);
    tracing::debug!(total, kept = items.len(), "Extracted bounded list");

    Ok(items)
}

/// Extract a bounded list and convert each mapping into `T`.
///
/// Conversion is all-or-nothing: one element with mistyped fields fails the
/// whole list.
///
/// # Errors
///
/// Returns `MalformedList` on any extraction or conversion failure.
///
/// # Examples
///
/// ```
/// use gameforge_core::LocationRecord;
/// use gameforge_narrative::extract_records;
///
/// let response = r#"Bien sûr ! [{"name": "Le Phare", "atmosphere": "Venteuse"}] Bon jeu !"#;
/// let locations: Vec<LocationRecord> = extract_records(response, 3).unwrap();
///
/// assert_eq!(locations[0].name, "Le Phare");
/// assert!(locations[0].description.is_empty());
/// ```
pub fn extract_records<T>(response: &str, max_items: usize) -> GameforgeResult<Vec<T>>
where
    T: DeserializeOwned,
{
    extract_bounded_list(response, max_items)?
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value(Value::Object(item)).map_err(|e| {
                tracing::error!(index, error = %e, "List element has unexpected shape");
                malformed(format!("element {}: {}", index, e))
            })
        })
        .collect()
}

fn malformed(detail: String) -> gameforge_error::GameforgeError {
    GenerationError::new(GenerationErrorKind::MalformedList(detail)).into()
}

fn preview(text: &str) -> String {
    text.chars().take(PREVIEW_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use gameforge_core::{CharacterRecord, CharacterRole};
    use gameforge_error::GameforgeErrorKind;

    fn is_malformed(err: &gameforge_error::GameforgeError) -> bool {
        matches!(
            err.kind(),
            GameforgeErrorKind::Generation(e) if matches!(e.kind, GenerationErrorKind::MalformedList(_))
        )
    }

    #[test]
    fn test_extract_surrounded_by_prose() {
        let response = "Voici 2 personnages:\n[{\"name\": \"A\"}, {\"name\": \"B\"}]\nAmusez-vous.";
        let items = extract_bounded_list(response, MAX_LIST_ITEMS).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1]["name"], "B");
    }

    #[test]
    fn test_truncates_preserving_order() {
        let response = r#"[{"n":1},{"n":2},{"n":3},{"n":4},{"n":5}]"#;
        let items = extract_bounded_list(response, MAX_LIST_ITEMS).unwrap();
        let order: Vec<_> = items.iter().map(|i| i["n"].as_i64().unwrap()).collect();
        assert_eq!(order, vec![1, 2, 3]);
    }

    #[test]
    fn test_missing_brackets_fail() {
        let err = extract_bounded_list("{\"name\": \"A\"}", MAX_LIST_ITEMS).unwrap_err();
        assert!(is_malformed(&err));
    }

    #[test]
    fn test_reversed_brackets_fail() {
        let err = extract_bounded_list("fin ] puis [ début", MAX_LIST_ITEMS).unwrap_err();
        assert!(is_malformed(&err));
    }

    #[test]
    fn test_invalid_json_fails() {
        let err = extract_bounded_list("[{name: 'A',}]", MAX_LIST_ITEMS).unwrap_err();
        assert!(is_malformed(&err));
    }

    #[test]
    fn test_array_of_scalars_fails() {
        let err = extract_bounded_list("[1, 2, 3]", MAX_LIST_ITEMS).unwrap_err();
        assert!(is_malformed(&err));
    }

    #[test]
    fn test_brackets_in_prose_break_heuristic() {
        let response = "[Note] Voici: [{\"name\": \"A\"}]";
        let err = extract_bounded_list(response, MAX_LIST_ITEMS).unwrap_err();
        assert!(is_malformed(&err));
    }

    #[test]
    fn test_empty_array_is_not_an_error() {
        let items = extract_bounded_list("Rien: []", MAX_LIST_ITEMS).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_records_convert_with_lenient_roles() {
        let response = r#"[
            {"name": "Aiden", "role": "PROTAGONIST ou ALLY", "character_class": "Guerrier"},
            {"name": "Mira", "role": "Mentor"}
        ]"#;
        let characters: Vec<CharacterRecord> = extract_records(response, MAX_LIST_ITEMS).unwrap();
        assert_eq!(characters[0].role, CharacterRole::Protagonist);
        assert_eq!(characters[1].role, CharacterRole::Mentor);
        assert!(characters[1].character_class.is_empty());
    }

    #[test]
    fn test_mistyped_field_fails_whole_list() {
        let response = r#"[{"name": "A"}, {"name": 42}]"#;
        let err = extract_records::<CharacterRecord>(response, MAX_LIST_ITEMS).unwrap_err();
        assert!(is_malformed(&err));
    }

    #[test]
    fn test_mistyped_field_beyond_bound_is_ignored() {
        let response = r#"[{"name": "A"}, {"name": "B"}, {"name": "C"}, {"name": 4}]"#;
        let characters: Vec<CharacterRecord> = extract_records(response, MAX_LIST_ITEMS).unwrap();
        assert_eq!(characters.len(), 3);
    }
}
