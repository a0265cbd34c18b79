use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::display_value;

/// Render output as tables. Nested objects in the result (scenario set,
/// sensitivity table, findings) get their own section; scalar fields share a
/// flat field/value table.
pub fn print_table(value: &Value) {
    let (result, envelope) = match value.as_object().and_then(|m| m.get("result").map(|r| (r, m))) {
        Some((result, map)) => (result, Some(map)),
        None => (value, None),
    };

    match result {
        Value::Object(map) => {
            print_scalar_section(map);
            for (key, nested) in map {
                match nested {
                    Value::Object(_) => print_section(key, nested),
                    Value::Array(arr) if arr.first().map_or(false, Value::is_object) => {
                        print_section(key, nested)
                    }
                    _ => {}
                }
            }
        }
        Value::Array(arr) => print_rows(arr),
        other => println!("{}", display_value(other)),
    }

    if let Some(map) = envelope {
        if let Some(Value::Array(warnings)) = map.get("warnings") {
            if !warnings.is_empty() {
                println!("\nWarnings:");
                for w in warnings {
                    if let Value::String(s) = w {
                        println!("  - {}", s);
                    }
                }
            }
        }
        if let Some(Value::String(methodology)) = map.get("methodology") {
            println!("\nMethodology: {}", methodology);
        }
    }
}

/// Top-level scalar fields (and flat arrays like the cashflow series) in one
/// field/value table.
fn print_scalar_section(map: &serde_json::Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    let mut rows = 0;
    for (key, val) in map {
        let flat_array = matches!(val, Value::Array(arr) if !arr.first().map_or(false, Value::is_object));
        if val.is_object() || (val.is_array() && !flat_array) {
            continue;
        }
        builder.push_record([key.as_str(), &display_value(val)]);
        rows += 1;
    }
    if rows > 0 {
        println!("{}", Table::from(builder));
    }
}

fn print_section(title: &str, value: &Value) {
    println!("\n{title}:");
    match value {
        Value::Object(map) => {
            // A map of records (e.g. base/optimistic/pessimistic) becomes one
            // row per record; anything else is field/value.
            if map.values().all(Value::is_object) && !map.is_empty() {
                let rows: Vec<Value> = map
                    .iter()
                    .map(|(name, record)| {
                        let mut obj = serde_json::Map::new();
                        obj.insert("name".into(), Value::String(name.clone()));
                        if let Value::Object(fields) = record {
                            for (k, v) in fields {
                                obj.insert(k.clone(), v.clone());
                            }
                        }
                        Value::Object(obj)
                    })
                    .collect();
                print_rows(&rows);
            } else {
                let mut builder = Builder::default();
                builder.push_record(["Field", "Value"]);
                for (key, val) in map {
                    builder.push_record([key.as_str(), &display_value(val)]);
                }
                println!("{}", Table::from(builder));
            }
        }
        Value::Array(arr) => print_rows(arr),
        other => println!("{}", display_value(other)),
    }
}

/// An array of homogeneous objects as one table, headers from the first row.
fn print_rows(rows: &[Value]) {
    if rows.is_empty() {
        println!("(empty)");
        return;
    }
    let Some(Value::Object(first)) = rows.first() else {
        for row in rows {
            println!("{}", display_value(row));
        }
        return;
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(&headers);
    for row in rows {
        if let Value::Object(map) = row {
            let record: Vec<String> = headers
                .iter()
                .map(|h| map.get(h).map(display_value).unwrap_or_default())
                .collect();
            builder.push_record(record);
        }
    }
    println!("{}", Table::from(builder));
}
