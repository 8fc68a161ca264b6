//! Pulling a JSON object out of free-form model output.

use serde_json::{Map, Value};

/// Returns the first balanced `{...}` span in `text` that parses as a JSON object.
///
/// Braces inside JSON string literals are ignored while balancing. A span that balances
/// but does not parse is skipped; nothing is ever partially parsed.
#[must_use]
pub fn extract_json_object(text: &str) -> Option<Map<String, Value>> {
    let mut from = 0;
    while let Some(offset) = text[from..].find('{') {
        let start = from + offset;
        if let Some(len) = balanced_len(&text[start..])
            && let Ok(Value::Object(map)) = serde_json::from_str(&text[start..start + len])
        {
            return Some(map);
        }
        from = start + 1;
    }
    None
}

/// Byte length of the brace-balanced prefix of `text`, which must start with `{`.
fn balanced_len(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (idx, ch) in text.char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {},
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(idx + ch.len_utf8());
                }
            },
            _ => {},
        }
    }
    None
}
