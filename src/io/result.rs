//! Read/write result JSON files.
//!
//! Result JSON is the "portable" representation of one calculation:
//! - tool name + generation timestamp
//! - the coerced/validated inputs
//! - every computed figure (and, for emissions, the breakdown)
//!
//! The schema is defined by `domain::ResultFile`.

use std::fs::File;
use std::path::Path;

use chrono::Local;

use crate::domain::{ResultFile, ResultPayload};
use crate::error::AppError;

pub const TOOL_NAME: &str = "rtk";

/// Wrap a payload with run metadata.
pub fn new_result_file(payload: ResultPayload) -> ResultFile {
    ResultFile {
        tool: TOOL_NAME.to_string(),
        generated_at: Local::now().to_rfc3339(),
        payload,
    }
}

/// Write a result JSON file.
pub fn write_result_json(path: &Path, result: &ResultFile) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create result JSON '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(file, result)
        .map_err(|e| AppError::new(2, format!("Failed to write result JSON: {e}")))?;
    Ok(())
}

/// Read a result JSON file.
pub fn read_result_json(path: &Path) -> Result<ResultFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open result JSON '{}': {e}", path.display())))?;
    let result: ResultFile =
        serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid result JSON: {e}")))?;
    Ok(result)
}
