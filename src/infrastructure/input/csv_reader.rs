use crate::domain::phrase::{PhraseError, PhrasePair};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("{path} has no '{column}' column")]
    MissingColumn { path: PathBuf, column: String },
}

/// Header names of the source and target columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseColumns {
    pub source: String,
    pub target: String,
}

impl Default for PhraseColumns {
    fn default() -> Self {
        Self {
            source: "germanphrase".to_string(),
            target: "russiantranslation".to_string(),
        }
    }
}

/// One data row of a phrase file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseRow {
    /// 1-based data row number, header excluded
    pub row: usize,
    pub pair: Result<PhrasePair, PhraseError>,
}

/// All `*.csv` files directly inside `dir`, sorted by name
pub fn discover_phrase_files(dir: &Path) -> Result<Vec<PathBuf>, InputError> {
    let io_error = |source| InputError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("csv"))
            .unwrap_or(false);
        if is_csv && path.is_file() {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Parse a headered CSV file into phrase rows
///
/// Rows with a blank side are returned with a `PhraseError` so the caller
/// can report and skip them.
pub fn read_phrase_file(path: &Path, columns: &PhraseColumns) -> Result<Vec<PhraseRow>, InputError> {
    let csv_error = |source| InputError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_path(path)
        .map_err(csv_error)?;

    let headers = reader.headers().map_err(csv_error)?.clone();
    let column_index = |name: &str| {
        headers
            .iter()
            .position(|header| header.trim_start_matches('\u{feff}') == name)
            .ok_or_else(|| InputError::MissingColumn {
                path: path.to_path_buf(),
                column: name.to_string(),
            })
    };
    let source_index = column_index(&columns.source)?;
    let target_index = column_index(&columns.target)?;

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(csv_error)?;
        let source = record.get(source_index).unwrap_or_default();
        let target = record.get(target_index).unwrap_or_default();

        rows.push(PhraseRow {
            row: index + 1,
            pair: PhrasePair::new(source, target),
        });
    }

    Ok(rows)
}
