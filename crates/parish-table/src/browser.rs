//! The record browser.
//!
//! A [`Browser`] owns a list of JSON records and a set of [`Column`]s and
//! derives what a user sees from them: newest first, narrowed by a
//! debounced free-text search and an optional month filter, cut into
//! pages. It never changes the records it was given.
//!
//! ```
//! use parish_table::{Browser, Column, PageSize};
//! use serde_json::json;
//!
//! let records = (1..=25).map(|n| json!({"n": n})).collect();
//! let mut browser = Browser::new(records, vec![Column::field("n", "Number")]);
//! browser.set_page_size(PageSize::Twenty);
//! browser.set_page(2);
//!
//! let view = browser.view();
//! assert_eq!(view.rows.len(), 5);
//! assert_eq!(view.rows[0]["n"], 5);
//! ```

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use serde_json::Value;
use tracing::debug;

use crate::column::Column;
use crate::debounce::Debouncer;
use crate::error::ExportError;
use crate::export;
use crate::month::{MonthFilter, MonthMatch, month_options};
use crate::page::{PageSize, page_count};

/// Receives the records a user asked to delete.
pub type DeleteHandler = Box<dyn FnMut(Vec<Value>) + Send>;

/// One page of the derived display set.
#[derive(Debug, Clone, PartialEq)]
pub struct View<'a> {
    pub rows: Vec<&'a Value>,
    /// 1-based.
    pub page: usize,
    pub page_size: PageSize,
    pub page_count: usize,
    /// Records passing the search and month filters.
    pub matched: usize,
    /// All records, filtered or not.
    pub total: usize,
}

pub struct Browser {
    records: Vec<Value>,
    columns: Vec<Column>,
    title: Option<String>,
    action_label: Option<String>,
    on_delete: Option<DeleteHandler>,
    show_month_filter: bool,
    month_match: MonthMatch,
    today: fn() -> NaiveDate,

    pending_query: Debouncer<String>,
    query: String,
    month: MonthFilter,
    page: usize,
    page_size: PageSize,
    selection: BTreeSet<usize>,
}

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

impl Browser {
    pub fn new(records: Vec<Value>, columns: Vec<Column>) -> Self {
        Self {
            records,
            columns,
            title: None,
            action_label: None,
            on_delete: None,
            show_month_filter: true,
            month_match: MonthMatch::default(),
            today: local_today,
            pending_query: Debouncer::default(),
            query: String::new(),
            month: MonthFilter::All,
            page: 1,
            page_size: PageSize::default(),
            selection: BTreeSet::new(),
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Label of the caller's own action area, shown next to the filters.
    pub fn action_label(mut self, label: impl Into<String>) -> Self {
        self.action_label = Some(label.into());
        self
    }

    /// Enable row selection and bulk delete.
    pub fn on_delete_records<F>(mut self, handler: F) -> Self
    where
        F: FnMut(Vec<Value>) + Send + 'static,
    {
        self.on_delete = Some(Box::new(handler));
        self
    }

    pub fn show_month_filter(mut self, show: bool) -> Self {
        self.show_month_filter = show;
        self
    }

    pub fn month_match(mut self, mode: MonthMatch) -> Self {
        self.month_match = mode;
        self
    }

    /// Replace the source of today's date used by the month filter.
    pub fn with_today(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn records(&self) -> &[Value] {
        &self.records
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn get_title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn get_action_label(&self) -> Option<&str> {
        self.action_label.as_deref()
    }

    pub fn month_filter_shown(&self) -> bool {
        self.show_month_filter
    }

    /// Swap in a new record list. Any selection refers to the old list and
    /// is dropped.
    pub fn set_records(&mut self, records: Vec<Value>) {
        self.records = records;
        self.selection.clear();
    }

    // ========================================================================
    // Search
    // ========================================================================

    /// Record a keystroke. The query takes effect once typing pauses.
    pub fn type_query(&mut self, text: impl Into<String>) {
        self.pending_query.push(text.into());
    }

    /// Apply the typed query if its quiet period is over. Returns true if
    /// the applied query changed.
    pub fn poll_query(&mut self) -> bool {
        match self.pending_query.poll() {
            Some(query) => self.set_query(query),
            None => false,
        }
    }

    /// Wait out the quiet period and apply the typed query.
    pub async fn settle_query(&mut self) -> bool {
        match self.pending_query.settled().await {
            Some(query) => self.set_query(query),
            None => false,
        }
    }

    /// Apply `text` now, discarding anything still being typed.
    pub fn apply_query(&mut self, text: impl Into<String>) {
        self.pending_query.cancel();
        self.set_query(text.into());
    }

    fn set_query(&mut self, query: String) -> bool {
        let changed = self.query != query;
        if changed {
            debug!(query = %query, "Applied search");
        }
        self.query = query;
        changed
    }

    /// The query currently narrowing the view.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The query still waiting out its quiet period, if any.
    pub fn pending_query(&self) -> Option<&str> {
        self.pending_query.pending().map(String::as_str)
    }

    // ========================================================================
    // Month filter
    // ========================================================================

    pub fn select_month(&mut self, filter: MonthFilter) {
        self.month = filter;
    }

    pub fn month(&self) -> MonthFilter {
        self.month
    }

    pub fn month_options(&self) -> Vec<MonthFilter> {
        month_options()
    }

    // ========================================================================
    // Paging
    // ========================================================================

    /// Go to a 1-based page. Page 0 is treated as page 1.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// Change rows per page. Always returns to page 1.
    pub fn set_page_size(&mut self, size: PageSize) {
        self.page_size = size;
        self.page = 1;
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    pub fn page_sizes(&self) -> [PageSize; 3] {
        PageSize::ALL
    }

    // ========================================================================
    // Derived view
    // ========================================================================

    fn passes(&self, record: &Value, needle: &str, today: NaiveDate) -> bool {
        if !needle.is_empty() && !record.to_string().to_lowercase().contains(needle) {
            return false;
        }
        !self.show_month_filter || self.month.matches(record, self.month_match, today)
    }

    /// Every record passing the search and month filters, newest first.
    pub fn filtered(&self) -> Vec<&Value> {
        let needle = self.query.trim().to_lowercase();
        let today = (self.today)();
        self.records
            .iter()
            .rev()
            .filter(|record| self.passes(record, &needle, today))
            .collect()
    }

    /// The current page of the filtered records.
    pub fn view(&self) -> View<'_> {
        let filtered = self.filtered();
        let size = self.page_size.get();
        let from = (self.page - 1).saturating_mul(size);

        View {
            page: self.page,
            page_size: self.page_size,
            page_count: page_count(filtered.len(), self.page_size),
            matched: filtered.len(),
            total: self.records.len(),
            rows: filtered.into_iter().skip(from).take(size).collect(),
        }
    }

    /// Column titles, in order.
    pub fn headers(&self) -> Vec<&str> {
        self.columns.iter().map(Column::title).collect()
    }

    /// Display text of each column for `record`.
    pub fn render_row(&self, record: &Value) -> Vec<String> {
        self.columns.iter().map(|c| c.render(record)).collect()
    }

    // ========================================================================
    // Selection and delete
    // ========================================================================

    pub fn delete_enabled(&self) -> bool {
        self.on_delete.is_some()
    }

    /// Toggle selection of the record at `index` in [`records`](Self::records).
    /// Returns whether it is now selected. Without a delete handler nothing
    /// can be selected.
    pub fn toggle_selected(&mut self, index: usize) -> bool {
        if !self.delete_enabled() || index >= self.records.len() {
            return false;
        }
        if self.selection.remove(&index) {
            false
        } else {
            self.selection.insert(index);
            true
        }
    }

    /// Select the record at `index`. Returns false if it cannot be selected.
    pub fn select(&mut self, index: usize) -> bool {
        if !self.delete_enabled() || index >= self.records.len() {
            return false;
        }
        self.selection.insert(index);
        true
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Selected records, in list order.
    pub fn selected(&self) -> Vec<&Value> {
        self.selection.iter().map(|&i| &self.records[i]).collect()
    }

    pub fn selected_count(&self) -> usize {
        self.selection.len()
    }

    pub fn delete_label(&self) -> String {
        match self.selection.len() {
            0 => "Select records to delete".to_string(),
            1 => "Delete 1 record".to_string(),
            n => format!("Delete {} records", n),
        }
    }

    /// Hand the selected records to the delete handler and clear the
    /// selection. Returns how many records were handed over.
    pub fn request_delete(&mut self) -> usize {
        if self.selection.is_empty() {
            return 0;
        }
        let chosen: Vec<Value> = self.selected().into_iter().cloned().collect();
        let count = chosen.len();
        let Some(handler) = self.on_delete.as_mut() else {
            return 0;
        };
        handler(chosen);
        self.selection.clear();

        debug!(count, "Requested delete");
        count
    }

    // ========================================================================
    // Export
    // ========================================================================

    pub fn export_file_name(&self) -> String {
        export::export_file_name(self.title.as_deref())
    }

    /// Write every record, unfiltered and in original order, as CSV.
    pub fn write_csv<W: std::io::Write>(&self, writer: W) -> Result<(), ExportError> {
        export::write_csv(writer, &self.columns, &self.records)
    }

    /// Export every record to `{dir}/{title|data}.csv`.
    pub fn export_csv(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        export::export_csv(dir, self.title.as_deref(), &self.columns, &self.records)
    }
}
