use serde::de::DeserializeOwned;
use std::fs;

/// Read a JSON file and deserialise it into a typed struct.
pub fn read_json<T: DeserializeOwned>(path: &str) -> Result<T, Box<dyn std::error::Error>> {
    let contents =
        fs::read_to_string(path).map_err(|e| format!("failed to read '{path}': {e}"))?;
    let value: T =
        serde_json::from_str(&contents).map_err(|e| format!("failed to parse '{path}': {e}"))?;
    Ok(value)
}
