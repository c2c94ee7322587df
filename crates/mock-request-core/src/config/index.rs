//! Reading and writing the success (YAML/JSON) and error (CSV) index files.

use crate::config::error::ConfigError;
use crate::config::parser::{parse_config, parse_csv, read_file, render_config, write_file};
use crate::types::fixture::{ErrorFixtureRecord, SuccessFixtureRecord};
use std::path::Path;
use tracing::debug;

/// Column headers of the error index, in file order.
pub const ERROR_INDEX_COLUMNS: [&str; 2] = ["error_type", "pickle_path"];

/// Load success records from a YAML or JSON list of mappings.
///
/// An empty file is an empty index.
pub fn load_success_index(path: &Path) -> Result<Vec<SuccessFixtureRecord>, ConfigError> {
    let content = read_file(path)?;
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    let records: Vec<SuccessFixtureRecord> = parse_config(&content, path)?;
    debug!(path = %path.display(), records = records.len(), "loaded success index");
    Ok(records)
}

/// Load error records from a CSV file with an `error_type,pickle_path` header.
///
/// The file is read as comma-separated text whatever its extension.
pub fn load_error_index(path: &Path) -> Result<Vec<ErrorFixtureRecord>, ConfigError> {
    let content = read_file(path)?;
    check_error_columns(&content, path)?;

    let records: Vec<ErrorFixtureRecord> = parse_csv(&content)?;
    debug!(path = %path.display(), records = records.len(), "loaded error index");
    Ok(records)
}

fn check_error_columns(content: &str, path: &Path) -> Result<(), ConfigError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());
    let headers = reader.headers()?;

    let mut columns: Vec<&str> = headers.iter().collect();
    columns.sort_unstable();
    let mut expected = ERROR_INDEX_COLUMNS.to_vec();
    expected.sort_unstable();

    if columns != expected {
        return Err(ConfigError::InvalidIndex {
            path: path.to_path_buf(),
            reason: format!(
                "expected columns {:?}, found {:?}",
                ERROR_INDEX_COLUMNS,
                headers.iter().collect::<Vec<_>>()
            ),
        });
    }
    Ok(())
}

/// Write success records as a YAML or JSON list, chosen by extension.
pub fn write_success_index(
    path: &Path,
    records: &[SuccessFixtureRecord],
) -> Result<(), ConfigError> {
    let content = render_config(&records, path)?;
    write_file(path, content)?;
    debug!(path = %path.display(), records = records.len(), "wrote success index");
    Ok(())
}

/// Write error records as CSV. The header row is written even when empty.
pub fn write_error_index(path: &Path, records: &[ErrorFixtureRecord]) -> Result<(), ConfigError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(ERROR_INDEX_COLUMNS)?;
    for record in records {
        writer.serialize(record)?;
    }

    let bytes = writer.into_inner().map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e.into_error(),
    })?;
    write_file(path, bytes)?;
    debug!(path = %path.display(), records = records.len(), "wrote error index");
    Ok(())
}
