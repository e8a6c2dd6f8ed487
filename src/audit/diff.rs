//! Field-level change summaries for audit entries

use serde_json::Value;

/// Fields that change on every update and say nothing on their own
const IGNORED_FIELDS: [&str; 1] = ["lastModified"];

/// Describe which top-level fields differ between two records
///
/// Returns `None` when nothing but ignored fields changed.
pub fn describe_changes(before: &Value, after: &Value) -> Option<String> {
    let (Value::Object(before_obj), Value::Object(after_obj)) = (before, after) else {
        return (before != after)
            .then(|| format!("{} -> {}", format_value(before), format_value(after)));
    };

    let changes: Vec<String> = before_obj
        .iter()
        .filter(|(key, _)| !IGNORED_FIELDS.contains(&key.as_str()))
        .filter_map(|(key, old)| {
            let new = after_obj.get(key).unwrap_or(&Value::Null);
            (old != new).then(|| format!("{}: {} -> {}", key, format_value(old), format_value(new)))
        })
        .collect();

    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) if s.chars().count() > 50 => {
            let kept: String = s.chars().take(47).collect();
            format!("\"{}...\"", kept)
        }
        Value::String(s) => format!("\"{}\"", s),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_changed_fields_listed() {
        let before = json!({"name": "Cash", "currency": "USD", "isDefault": false});
        let after = json!({"name": "Wallet", "currency": "EUR", "isDefault": false});

        let diff = describe_changes(&before, &after).unwrap();
        assert!(diff.contains("name: \"Cash\" -> \"Wallet\""));
        assert!(diff.contains("currency: \"USD\" -> \"EUR\""));
        assert!(!diff.contains("isDefault"));
    }

    #[test]
    fn test_last_modified_alone_is_no_change() {
        let before = json!({"name": "Cash", "lastModified": "2024-01-01T00:00:00Z"});
        let after = json!({"name": "Cash", "lastModified": "2024-02-01T00:00:00Z"});
        assert_eq!(describe_changes(&before, &after), None);
    }

    #[test]
    fn test_long_strings_truncated() {
        let before = json!({"note": "a".repeat(80)});
        let after = json!({"note": "b"});
        let diff = describe_changes(&before, &after).unwrap();
        assert!(diff.contains("...\" -> \"b\""));
    }

    #[test]
    fn test_scalar_values() {
        assert_eq!(describe_changes(&json!(1), &json!(2)).unwrap(), "1 -> 2");
        assert_eq!(describe_changes(&json!(1), &json!(1)), None);
    }
}
