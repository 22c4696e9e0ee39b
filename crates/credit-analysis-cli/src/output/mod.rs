pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Flatten nested JSON into `(dotted.path, value)` rows.
///
/// Array elements keyed by a `name` or `category` field are addressed by
/// that key (`indicators.current_ratio.grade`), others by index. Arrays of
/// scalars are joined into one cell.
pub fn flatten(prefix: &str, value: &Value, rows: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                flatten(&join(prefix, key), val, rows);
            }
        }
        Value::Array(items) if items.iter().any(Value::is_object) => {
            for (idx, item) in items.iter().enumerate() {
                let segment = item
                    .get("name")
                    .or_else(|| item.get("category"))
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| idx.to_string());
                flatten(&join(prefix, &segment), item, rows);
            }
        }
        _ => rows.push((prefix.to_string(), scalar_text(value, ""))),
    }
}

/// Display text for a leaf value. `null_text` stands in for JSON null.
pub fn scalar_text(value: &Value, null_text: &str) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => null_text.to_string(),
        Value::Array(arr) => arr
            .iter()
            .map(|v| scalar_text(v, null_text))
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}

fn join(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_flatten_addresses_named_elements() {
        let value = json!({
            "indicators": [
                { "name": "current_ratio", "grade": "A" },
                { "name": "quick_ratio", "grade": null }
            ],
            "classification": { "risk_category": "Good", "missing_categories": ["Solvency"] }
        });
        let mut rows = Vec::new();
        flatten("", &value, &mut rows);
        assert_eq!(
            rows,
            vec![
                ("classification.missing_categories".to_string(), "Solvency".to_string()),
                ("classification.risk_category".to_string(), "Good".to_string()),
                ("indicators.current_ratio.grade".to_string(), "A".to_string()),
                ("indicators.current_ratio.name".to_string(), "current_ratio".to_string()),
                ("indicators.quick_ratio.grade".to_string(), String::new()),
                ("indicators.quick_ratio.name".to_string(), "quick_ratio".to_string()),
            ]
        );
    }

    #[test]
    fn test_flatten_falls_back_to_index() {
        let value = json!([{ "a": 1 }, { "a": 2 }]);
        let mut rows = Vec::new();
        flatten("rows", &value, &mut rows);
        assert_eq!(rows[1], ("rows.1.a".to_string(), "2".to_string()));
    }
}
