use std::collections::HashSet;
use std::path::Path;

use serde::de::DeserializeOwned;

use ecomseed_core::Record;

use crate::errors::LoadError;

/// Read one interchange file into typed records.
///
/// The header row must match the table's catalog columns exactly. Empty
/// fields decode as `None` for optional columns.
pub fn read_table<R>(path: &Path) -> Result<Vec<R>, LoadError>
where
    R: Record + DeserializeOwned,
{
    let interchange = |source: csv::Error| LoadError::Interchange {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(interchange)?;

    let headers = reader
        .headers()
        .map_err(interchange)?
        .iter()
        .map(|header| header.trim().to_string())
        .collect::<Vec<_>>();
    let expected = R::TABLE.columns();
    if headers.iter().map(String::as_str).ne(expected.iter().copied()) {
        return Err(LoadError::HeaderMismatch {
            path: path.to_path_buf(),
            expected: expected.join(","),
            found: headers.join(","),
        });
    }

    reader
        .deserialize()
        .collect::<Result<Vec<R>, _>>()
        .map_err(interchange)
}

/// Drop rows whose primary key was already seen, keeping the first one.
///
/// Returns the surviving rows and the number removed.
pub fn dedupe_by_primary_key<R: Record>(rows: Vec<R>) -> (Vec<R>, u64) {
    let before = rows.len();
    let mut seen = HashSet::with_capacity(before);
    let kept = rows
        .into_iter()
        .filter(|row| seen.insert(row.primary_key()))
        .collect::<Vec<_>>();
    let removed = (before - kept.len()) as u64;
    (kept, removed)
}
