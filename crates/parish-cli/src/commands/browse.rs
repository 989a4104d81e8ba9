//! Loading a collection into a browser.

use anyhow::{Context, Result};
use clap::Args;
use serde_json::Value;

use parish_core::display::{format_date, separate_pascal_case};
use parish_core::workflow::{priest_id_for, visible_to};
use parish_core::{Collection, CollectionHandle};
use parish_table::Column;

use crate::session::CliSession;

/// Fields shown as dates rather than raw stamps.
const DATE_FIELDS: [&str; 4] = ["dateTimeStamp", "updated", "created", "releasedDate"];

#[derive(Args, Debug)]
pub struct ColumnArgs {
    /// Comma-separated fields to show (default: every field, id first)
    #[arg(long, value_delimiter = ',')]
    pub columns: Vec<String>,
}

impl ColumnArgs {
    pub fn columns(&self, records: &[Value]) -> Vec<Column> {
        let fields = if self.columns.is_empty() {
            discover_fields(records)
        } else {
            self.columns.iter().map(|c| c.trim().to_string()).collect()
        };
        fields.into_iter().map(column_for).collect()
    }
}

/// Every record in `collection` the session's user may see, in key order.
pub async fn load_records(session: &CliSession, collection: Collection) -> Result<Vec<Value>> {
    let handle = CollectionHandle::new(session.store().clone(), collection);
    let records: Vec<Value> = handle
        .fetch_all()
        .await
        .context("Failed to list records")?
        .into_iter()
        .map(Value::from)
        .collect();

    if !collection.is_priest_assigned() {
        return Ok(records);
    }

    let priest_id = priest_id_for(session.store(), session.user())
        .await
        .context("Failed to look up priest record")?;
    Ok(visible_to(
        records,
        session.user(),
        priest_id.as_ref().map(|id| id.as_str()),
    ))
}

/// `id` first, then every other field seen, alphabetically.
fn discover_fields(records: &[Value]) -> Vec<String> {
    let mut fields: Vec<String> = records
        .iter()
        .filter_map(Value::as_object)
        .flat_map(|fields| fields.keys())
        .filter(|key| key.as_str() != "id")
        .cloned()
        .collect();
    fields.sort();
    fields.dedup();
    fields.insert(0, "id".to_string());
    fields
}

fn column_for(field: String) -> Column {
    let title = title_for(&field);
    if DATE_FIELDS.contains(&field.as_str()) {
        Column::formatted(field, title, |value| format_date(value.as_str(), false))
    } else {
        Column::field(field, title)
    }
}

/// `dateTimeStamp` becomes `Date Time Stamp`.
fn title_for(field: &str) -> String {
    let mut chars = field.chars();
    let capitalized: String = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };
    separate_pascal_case(&capitalized)
}
