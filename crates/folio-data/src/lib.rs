//! Data suppliers for portfolio analysis.

mod csv_source;
mod json_source;
mod quote_book;

pub use csv_source::{CsvPortfolioSource, CsvQuoteSource};
pub use json_source::{read_order_input, JsonSignalSource};
pub use quote_book::QuoteBook;

use folio_core::error::DataError;
use std::fs::File;
use std::path::Path;

/// Open a supplier file, mapping a missing file to [`DataError::NoDataAvailable`].
pub(crate) fn open(path: impl AsRef<Path>) -> Result<File, DataError> {
    let path = path.as_ref();
    File::open(path).map_err(|e| DataError::NoDataAvailable(format!("{}: {}", path.display(), e)))
}
