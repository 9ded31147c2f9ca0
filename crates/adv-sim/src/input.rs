//! Input table loading.
//!
//! The whole table is read and checked before any row is simulated, so a
//! structurally broken file never produces partial writes.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use adv_core::entities::CaseRecord;

use crate::error::SimulationError;

/// Read every case from the CSV file at `path`, in file order.
///
/// Header names are trimmed; extra columns are ignored.
///
/// # Errors
///
/// - [`SimulationError::Io`] if the file cannot be opened
/// - [`SimulationError::MissingColumn`] if a required header is absent
/// - [`SimulationError::Csv`] if a row is malformed
pub fn read_cases(path: &Path) -> Result<Vec<CaseRecord>, SimulationError> {
    let file = File::open(path).map_err(|source| SimulationError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_cases(file)
}

/// Parse cases from any reader. See [`read_cases`].
pub fn parse_cases<R: Read>(reader: R) -> Result<Vec<CaseRecord>, SimulationError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    if let Some(column) = CaseRecord::REQUIRED_COLUMNS
        .into_iter()
        .find(|column| !headers.iter().any(|header| header == *column))
    {
        return Err(SimulationError::MissingColumn { column });
    }

    reader
        .deserialize::<CaseRecord>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(SimulationError::from)
}
