use serde::{Deserialize, Serialize};

/// Positional schema of the catalog file. The file carries no header row,
/// so these names are the only record of what each column holds.
pub const CATALOG_COLUMNS: [&str; 13] = [
    "isbn",
    "isbn13",
    "title",
    "authors",
    "categories",
    "unused1",
    "description",
    "published_year",
    "average_rating",
    "num_pages",
    "ratings_count",
    "title_full",
    "desc_with_isbn",
];

pub const TITLE_COLUMN: usize = 2;
pub const AUTHORS_COLUMN: usize = 3;
pub const DESCRIPTION_COLUMN: usize = 6;
pub const RATING_COLUMN: usize = 8;

/// Upper bound on retained records. Every record is rendered into every
/// prompt, so this also bounds prompt size.
pub const MAX_CATALOG_SIZE: usize = 100;

/// The four-field projection of one catalog row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookSummary {
    pub title: String,
    pub authors: String,
    pub average_rating: f64,
    pub description: String,
}

/// Ordered, immutable collection of at most `MAX_CATALOG_SIZE` books.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    books: Vec<BookSummary>,
}

impl Catalog {
    /// Keeps the first `MAX_CATALOG_SIZE` books in the given order.
    pub fn new(mut books: Vec<BookSummary>) -> Self {
        books.truncate(MAX_CATALOG_SIZE);
        Self { books }
    }

    pub fn books(&self) -> &[BookSummary] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}
