use crate::models::ExtractionResult;
use serde_json::Value;

/// Best-effort recovery of `{"routes": [...], "schemas": [...]}` from
/// freeform model prose. Scans for brace-balanced regions in order and
/// returns the first one that parses into the expected two-key shape; when
/// none does, the result is empty, never an error.
pub fn extract_entities(raw: &str) -> ExtractionResult {
    let bytes = raw.as_bytes();

    for (start, _) in raw.match_indices('{') {
        let Some(end) = matching_close(bytes, start) else {
            continue;
        };
        if let Some(result) = parse_candidate(&raw[start..=end]) {
            return result;
        }
    }

    ExtractionResult::default()
}

/// Byte index of the brace closing the object that opens at `start`,
/// ignoring braces inside JSON string literals.
fn matching_close(bytes: &[u8], start: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, &byte) in bytes[start..].iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if byte == b'\\' {
                escaped = true;
            } else if byte == b'"' {
                in_string = false;
            }
            continue;
        }

        match byte {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(start + offset);
                }
            }
            _ => {}
        }
    }

    None
}

fn parse_candidate(candidate: &str) -> Option<ExtractionResult> {
    let parsed: Value = serde_json::from_str(candidate).ok()?;
    let object = parsed.as_object()?;

    let routes = string_array(object.get("routes")?)?;
    let schemas = string_array(object.get("schemas")?)?;

    Some(ExtractionResult { routes, schemas })
}

fn string_array(value: &Value) -> Option<Vec<String>> {
    value
        .as_array()?
        .iter()
        .map(|item| item.as_str().map(str::to_string))
        .collect()
}
