use serde_json::Value;

/// Passthrough: the raw payload is already the statement to analyze.
pub fn text(payload: &str) -> String {
    payload.to_string()
}

/// Flattens a JSON payload into a space-separated token stream, used as
/// the statement when `DocRequest::mime == MimeType::Json`. Keys are
/// elided by default, matching the original's `NewJSONLoader(false)`
/// wiring.
pub fn json(payload: &str) -> crate::core::error::Result<String> {
    let value: Value = serde_json::from_str(payload)?;
    let mut out = String::new();
    compact(&value, false, &mut out);
    Ok(out.trim().to_string())
}

fn compact(value: &Value, with_keys: bool, out: &mut String) {
    match value {
        Value::Object(map) => {
            for (key, v) in map {
                if with_keys {
                    out.push_str(key);
                    out.push(' ');
                }
                compact(v, with_keys, out);
                out.push(' ');
            }
        }
        Value::Array(items) => {
            for v in items {
                compact(v, with_keys, out);
                out.push(' ');
            }
        }
        Value::Number(n) => {
            out.push_str(&n.to_string());
        }
        Value::String(s) => {
            out.push_str(s);
        }
        Value::Bool(_) | Value::Null => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flattens_nested_object_without_keys() {
        let flattened = json(r#"{"title": "hincar", "tags": ["verbo", "accion"]}"#).unwrap();
        assert!(flattened.contains("hincar"));
        assert!(flattened.contains("verbo"));
        assert!(flattened.contains("accion"));
        assert!(!flattened.contains("title"));
        assert!(!flattened.contains("tags"));
    }

    #[test]
    fn text_loader_is_a_passthrough() {
        assert_eq!(text("hinco"), "hinco");
    }
}
