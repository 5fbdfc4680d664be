//! Catalog CSV ingest.
//!
//! Turns a solutions CSV into `Solution` records:
//! - **Strict schema** for required columns (`name`, `category`; exit code 2)
//! - **Row-level validation** (skip bad rows, but report what happened)
//! - list columns (`other_benefits`, `example_vendors`) are `;`-separated

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;

use crate::domain::Solution;
use crate::error::AppError;

const LIST_SEPARATOR: char = ';';

/// A row-level error encountered during ingest.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub name: Option<String>,
    pub message: String,
}

/// Ingest output: parsed solutions + row errors.
#[derive(Debug, Clone)]
pub struct CatalogData {
    pub solutions: Vec<Solution>,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
}

/// Load a solutions CSV file.
pub fn load_solutions(path: &Path) -> Result<CatalogData, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to open solutions CSV '{}': {e}", path.display()),
        )
    })?;
    read_solutions(file)
}

/// Parse solutions CSV from any reader.
pub fn read_solutions<R: Read>(source: R) -> Result<CatalogData, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV headers: {e}")))?
        .clone();
    let header_map = build_header_map(&headers);

    for required in ["name", "category"] {
        if !header_map.contains_key(required) {
            return Err(AppError::new(2, format!("Missing required column: `{required}`")));
        }
    }

    let mut solutions = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // Header is line 1.
        let line = idx + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    name: None,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        match parse_row(&record, &header_map) {
            Ok(solution) => solutions.push(solution),
            Err(message) => row_errors.push(RowError {
                line,
                name: get_optional(&record, &header_map, "name").map(str::to_string),
                message,
            }),
        }
    }

    Ok(CatalogData {
        solutions,
        row_errors,
        rows_read,
    })
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports often prefix the first header with a UTF-8 BOM.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn parse_row(record: &StringRecord, header_map: &HashMap<String, usize>) -> Result<Solution, String> {
    let name = get_required(record, header_map, "name")?.to_string();
    let category = get_required(record, header_map, "category")?.to_string();

    let reduction_rate_low_pct = parse_opt_rate(record, header_map, "reduction_rate_low")?;
    let reduction_rate_high_pct = parse_opt_rate(record, header_map, "reduction_rate_high")?;
    if let (Some(low), Some(high)) = (reduction_rate_low_pct, reduction_rate_high_pct) {
        if low > high {
            return Err(format!("reduction_rate_low ({low}) exceeds reduction_rate_high ({high})."));
        }
    }

    let text = |col: &str| get_optional(record, header_map, col).map(str::to_string);

    Ok(Solution {
        name,
        category,
        description: text("description"),
        reduction_rate_low_pct,
        reduction_rate_high_pct,
        reduction_rate_basis: text("reduction_rate_basis"),
        other_benefits: parse_list(get_optional(record, header_map, "other_benefits")),
        integration_complexity: text("integration_complexity"),
        indicative_cost: text("indicative_cost"),
        privacy_concern_level: text("privacy_concern_level"),
        product_suitability_notes: text("product_suitability_notes"),
        example_vendors: parse_list(get_optional(record, header_map, "example_vendors")),
    })
}

fn get_required<'a>(
    record: &'a StringRecord,
    header_map: &HashMap<String, usize>,
    name: &str,
) -> Result<&'a str, String> {
    let idx = header_map
        .get(name)
        .ok_or_else(|| format!("Missing required column: `{name}`"))?;
    record
        .get(*idx)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("Missing required value: `{name}`"))
}

fn get_optional<'a>(record: &'a StringRecord, header_map: &HashMap<String, usize>, name: &str) -> Option<&'a str> {
    let idx = header_map.get(name)?;
    record.get(*idx).map(str::trim).filter(|s| !s.is_empty())
}

/// Optional percentage in `0..=100`; present-but-invalid is a row error.
fn parse_opt_rate(
    record: &StringRecord,
    header_map: &HashMap<String, usize>,
    name: &str,
) -> Result<Option<f64>, String> {
    let Some(raw) = get_optional(record, header_map, name) else {
        return Ok(None);
    };
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() && (0.0..=100.0).contains(&v) => Ok(Some(v)),
        _ => Err(format!("Invalid `{name}` value '{raw}' (expected a percentage 0-100).")),
    }
}

fn parse_list(s: Option<&str>) -> Vec<String> {
    s.map(|s| {
        s.split(LIST_SEPARATOR)
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\u{feff}Name,Category,reduction_rate_low,reduction_rate_high,other_benefits,integration_complexity,indicative_cost,privacy_concern_level,example_vendors
Faslet,Size Recommendation,25,45,Reduced cart abandonment; Higher customer confidence,Simple (Plug-and-Play),$$,Low,Faslet
,VTO/AR,30,50,,,,,
3DLook,VTO/AR,30,500,,,,,
Mopinion,Feedback Analysis,,,,,$$,Low,
";

    #[test]
    fn parses_rows_and_reports_bad_ones() {
        let data = read_solutions(SAMPLE.as_bytes()).unwrap();
        assert_eq!(data.rows_read, 4);
        assert_eq!(data.solutions.len(), 2);

        let faslet = &data.solutions[0];
        assert_eq!(faslet.name, "Faslet");
        assert_eq!(faslet.reduction_rate_low_pct, Some(25.0));
        assert_eq!(faslet.other_benefits, vec!["Reduced cart abandonment", "Higher customer confidence"]);
        assert_eq!(faslet.example_vendors, vec!["Faslet"]);
        assert_eq!(faslet.indicative_cost.as_deref(), Some("$$"));

        let mopinion = &data.solutions[1];
        assert_eq!(mopinion.reduction_rate_low_pct, None);
        assert!(mopinion.other_benefits.is_empty());

        assert_eq!(data.row_errors.len(), 2);
        assert_eq!(data.row_errors[0].line, 3);
        assert!(data.row_errors[0].message.contains("name"));
        assert_eq!(data.row_errors[1].line, 4);
        assert_eq!(data.row_errors[1].name.as_deref(), Some("3DLook"));
    }

    #[test]
    fn missing_required_column_is_fatal() {
        let err = read_solutions("name,description\nX,y\n".as_bytes()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("category"));
    }
}
