use serde_json::Value;

use super::display_value;

/// Print just the headline answer from the output.
///
/// Looks for the most decision-relevant fields first, descending into the
/// metrics block when present, then falls back to the first field.
pub fn print_minimal(value: &Value) {
    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let priority_paths: [&[&str]; 8] = [
        &["metrics", "npv"],
        &["metrics", "irr_annual"],
        &["metrics", "roi"],
        &["npv"],
        &["irr_annual"],
        &["roi"],
        &["break_even_month"],
        &["peak_need"],
    ];

    for path in priority_paths {
        let mut cursor = result;
        let mut found = true;
        for key in path {
            match cursor.get(key) {
                Some(next) => cursor = next,
                None => {
                    found = false;
                    break;
                }
            }
        }
        if found && !cursor.is_null() {
            println!("{}", display_value(cursor));
            return;
        }
    }

    if let Value::Object(map) = result {
        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, display_value(val));
            return;
        }
    }

    println!("{}", display_value(result));
}
