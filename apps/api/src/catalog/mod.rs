// Catalog: the load-once, read-only set of book summaries offered to the model.
// Built in main before the listener binds and shared through AppState.

pub mod loader;
pub mod models;

pub use loader::load_catalog;
pub use models::{BookSummary, Catalog};
