use serde_json::Value;
use std::io;

use super::display_value;

/// Write output as CSV to stdout.
///
/// An analysis result becomes the month-by-month annex table (month, label,
/// flow, cumulative); other shapes fall back to row-per-object or
/// field/value CSV.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Some(rows) = monthly_annex(result) {
        let _ = wtr.write_record(["month", "label", "flow", "cumulative"]);
        for row in rows {
            let _ = wtr.write_record(&row);
        }
        let _ = wtr.flush();
        return;
    }

    match result {
        Value::Array(arr) => write_rows(&mut wtr, arr),
        Value::Object(map) => {
            let _ = wtr.write_record(["field", "value"]);
            for (key, val) in map {
                let _ = wtr.write_record([key.as_str(), &csv_value(val)]);
            }
        }
        other => {
            let _ = wtr.write_record([&csv_value(other)]);
        }
    }

    let _ = wtr.flush();
}

/// Month rows for an analysis (or cashflow) result carrying parallel
/// `flows`/`cumulative` series.
fn monthly_annex(result: &Value) -> Option<Vec<[String; 4]>> {
    let map = result.as_object()?;
    let flows = map
        .get("cashflow")
        .and_then(|c| c.get("flows"))
        .or_else(|| map.get("flows"))?
        .as_array()?;
    let cumulative = map.get("cumulative")?.as_array()?;
    let labels = map.get("month_labels").and_then(Value::as_array);

    let rows = flows
        .iter()
        .zip(cumulative.iter())
        .enumerate()
        .map(|(i, (flow, cum))| {
            let label = labels
                .and_then(|l| l.get(i))
                .map(display_value)
                .unwrap_or_default();
            [
                (i + 1).to_string(),
                label,
                display_value(flow),
                display_value(cum),
            ]
        })
        .collect();
    Some(rows)
}

fn write_rows(wtr: &mut csv::Writer<io::StdoutLock<'_>>, arr: &[Value]) {
    if arr.is_empty() {
        return;
    }
    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
        let _ = wtr.write_record(&headers);
        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(*h).map(csv_value).unwrap_or_default())
                    .collect();
                let _ = wtr.write_record(&row);
            }
        }
    } else {
        for item in arr {
            let _ = wtr.write_record([&csv_value(item)]);
        }
    }
}

fn csv_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        other => display_value(other),
    }
}
