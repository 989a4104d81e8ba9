//! parish-table - Generic record browser.
//!
//! Works on any list of JSON records: search, month filter, paging,
//! selection with bulk delete, and CSV export.

pub mod browser;
pub mod column;
pub mod debounce;
pub mod error;
pub mod export;
pub mod month;
pub mod page;

pub use browser::{Browser, DeleteHandler, View};
pub use column::{Align, Column, Layout};
pub use debounce::{Debouncer, SEARCH_DEBOUNCE};
pub use error::{ExportError, InvalidMonthFilter, InvalidPageSize};
pub use month::{MonthFilter, MonthMatch};
pub use page::PageSize;
