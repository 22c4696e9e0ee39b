use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{flatten, scalar_text};

/// Format output as tables using the tabled crate.
///
/// Scalar and nested-object fields of the result go into one Field/Value
/// table; each array of records (indicators, categories) gets its own table.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                print_result(result);
                print_envelope_notes(map);
            } else {
                print_result(value);
            }
        }
        Value::Array(arr) => {
            print_array_table(arr);
        }
        _ => {
            println!("{}", value);
        }
    }
}

fn print_result(result: &Value) {
    let Value::Object(map) = result else {
        println!("{}", scalar_text(result, "null"));
        return;
    };

    let mut rows = Vec::new();
    let mut sections = Vec::new();
    for (key, val) in map {
        match val {
            Value::Array(items) if items.iter().any(Value::is_object) => {
                sections.push((key.as_str(), items.as_slice()))
            }
            _ => flatten(key, val, &mut rows),
        }
    }

    if !rows.is_empty() {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (field, val) in &rows {
            builder.push_record([field.as_str(), display_cell(val)]);
        }
        println!("{}", Table::from(builder));
    }

    for (key, items) in sections {
        println!("\n{}:", section_title(key));
        print_array_table(items);
    }
}

fn print_envelope_notes(envelope: &Map<String, Value>) {
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_array_table(arr: &[Value]) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<String> = first.keys().cloned().collect();
        let mut builder = Builder::default();
        builder.push_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| {
                        map.get(h.as_str())
                            .map(|v| scalar_text(v, "-"))
                            .unwrap_or_default()
                    })
                    .collect();
                builder.push_record(row);
            }
        }

        println!("{}", Table::from(builder));
    } else {
        for item in arr {
            println!("{}", scalar_text(item, "-"));
        }
    }
}

fn display_cell(text: &str) -> &str {
    if text.is_empty() {
        "-"
    } else {
        text
    }
}

fn section_title(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect::<String>().replace('_', " "),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_section_title() {
        assert_eq!(section_title("indicators"), "Indicators");
        assert_eq!(section_title("scored_categories"), "Scored categories");
        assert_eq!(section_title(""), "");
    }
}
