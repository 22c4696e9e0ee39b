use serde_json::Value;

use super::scalar_text;

/// Key answer per command, looked up in order inside the result object.
const PRIORITY_PATHS: [&str; 4] = [
    // analyze
    "classification.risk_category",
    // analyze without a classification
    "status",
    // readiness
    "score",
    // config
    "version",
];

/// Print just the key answer value from the output.
///
/// Ratio summaries have no single answer and print one line per category
/// average instead. Anything else falls back to the first field.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    for path in PRIORITY_PATHS {
        if let Some(val) = lookup(result_obj, path) {
            if !val.is_null() {
                println!("{}", scalar_text(val, "null"));
                return;
            }
        }
    }

    if let Some(Value::Array(categories)) = result_obj.get("categories") {
        for c in categories {
            println!(
                "{}: {}",
                c.get("category").map(|v| scalar_text(v, "")).unwrap_or_default(),
                c.get("average_grade").map(|v| scalar_text(v, "null")).unwrap_or_default()
            );
        }
        return;
    }

    if let Value::Object(map) = result_obj {
        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, scalar_text(val, "null"));
            return;
        }
    }

    println!("{}", scalar_text(result_obj, "null"));
}

fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(value, |v, key| v.get(key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lookup_nested_path() {
        let value = json!({ "classification": { "risk_category": "Good" } });
        assert_eq!(
            lookup(&value, "classification.risk_category"),
            Some(&json!("Good"))
        );
        assert_eq!(lookup(&value, "classification.missing"), None);
        assert_eq!(lookup(&value, "score"), None);
    }

    #[test]
    fn test_unclassified_report_falls_back_to_status() {
        let value = json!({ "status": "insufficient_data", "classification": null });
        let answer = PRIORITY_PATHS
            .iter()
            .filter_map(|p| lookup(&value, p))
            .find(|v| !v.is_null());
        assert_eq!(answer, Some(&json!("insufficient_data")));
    }
}
