pub mod file;
pub mod stdin;

use optimclinic_core::{EngineConfig, FinancialSnapshot};

/// Load a financial snapshot from `--input <path>` or, failing that, from
/// piped stdin JSON. One of the two is required.
pub fn load_snapshot(
    path: &Option<String>,
) -> Result<FinancialSnapshot, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        return file::read_json(path);
    }
    if let Some(value) = stdin::read_stdin()? {
        return Ok(serde_json::from_value(value)?);
    }
    Err("a snapshot is required: pass --input <file.json> or pipe JSON via stdin".into())
}

/// Load engine assumptions from `--config <path>`, or fall back to defaults.
pub fn load_config(path: &Option<String>) -> Result<EngineConfig, Box<dyn std::error::Error>> {
    match path {
        Some(path) => file::read_json(path),
        None => Ok(EngineConfig::default()),
    }
}
