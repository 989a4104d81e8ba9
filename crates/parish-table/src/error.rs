//! Error types for parish-table.

use thiserror::Error;

/// CSV export failures.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The browser was configured without columns, so there is nothing to export.
    #[error("no columns defined for CSV export")]
    NoColumns,

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A page size outside the offered set.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("page size {0} is not one of 10, 15, 20")]
pub struct InvalidPageSize(pub usize);

/// An unrecognized month filter label.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown month filter '{0}'")]
pub struct InvalidMonthFilter(pub String);
