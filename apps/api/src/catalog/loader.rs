//! Catalog loader: reads the positional book CSV and keeps the first
//! `MAX_CATALOG_SIZE` complete rows.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord};
use thiserror::Error;
use tracing::{debug, info};

use crate::catalog::models::{
    BookSummary, Catalog, AUTHORS_COLUMN, CATALOG_COLUMNS, DESCRIPTION_COLUMN, MAX_CATALOG_SIZE,
    RATING_COLUMN, TITLE_COLUMN,
};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to open catalog file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Catalog is not valid delimited text: {0}")]
    Csv(#[from] csv::Error),

    #[error("Catalog row on line {line} has {found} columns, expected {expected}")]
    ColumnCount {
        line: u64,
        found: usize,
        expected: usize,
    },
}

/// Loads the catalog from a file on disk.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<Catalog, CatalogError> {
    let path = path.as_ref();
    info!("Loading book catalog from {}", path.display());

    let file = File::open(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let catalog = read_catalog(file)?;

    info!("Book catalog loaded: {} books retained", catalog.len());
    Ok(catalog)
}

/// Reads a headerless 13-column CSV and projects it onto `BookSummary`.
///
/// Every row is checked for the expected column count, including rows after
/// the cap has been reached. Rows whose title, author, rating or description
/// is blank or an NA marker, or whose rating is not a finite number, are
/// skipped. Retained cells are stored exactly as read.
pub fn read_catalog<R: Read>(source: R) -> Result<Catalog, CatalogError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(source);

    let mut books = Vec::with_capacity(MAX_CATALOG_SIZE);
    let mut dropped = 0usize;

    for result in reader.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();

        if record.len() != CATALOG_COLUMNS.len() {
            return Err(CatalogError::ColumnCount {
                line,
                found: record.len(),
                expected: CATALOG_COLUMNS.len(),
            });
        }

        if books.len() == MAX_CATALOG_SIZE {
            continue;
        }

        match project(&record) {
            Some(book) => books.push(book),
            None => {
                dropped += 1;
                debug!(line, "Dropping incomplete catalog row");
            }
        }
    }

    debug!(retained = books.len(), dropped, "Catalog rows filtered");
    Ok(Catalog::new(books))
}

/// Cell values read as missing data, matched against the whole cell.
/// Same set pandas treats as NA by default.
const NA_MARKERS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

fn project(record: &StringRecord) -> Option<BookSummary> {
    Some(BookSummary {
        title: field(record, TITLE_COLUMN)?.to_string(),
        authors: field(record, AUTHORS_COLUMN)?.to_string(),
        average_rating: field(record, RATING_COLUMN)?
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|rating| rating.is_finite())?,
        description: field(record, DESCRIPTION_COLUMN)?.to_string(),
    })
}

/// Returns the cell untouched, or `None` when it is blank or an NA marker.
fn field(record: &StringRecord, index: usize) -> Option<&str> {
    record
        .get(index)
        .filter(|value| !value.trim().is_empty() && !NA_MARKERS.contains(value))
}
