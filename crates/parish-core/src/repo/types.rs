//! Typed record wrappers.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::types::RecordId;

/// Audit fields every record may carry.
///
/// `id` is injected from the storage key on read; the timestamps are
/// stamped by the accessor, never by callers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,

    /// Creation time, ISO-8601.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_time_stamp: Option<String>,

    /// Last patch time, ISO-8601.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
}

/// A stored record: audit fields plus the entity shape `T`, flattened
/// into one JSON object on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record<T> {
    #[serde(flatten)]
    pub meta: RecordMeta,

    #[serde(flatten)]
    pub fields: T,
}

impl<T> Record<T> {
    /// Returns the record key, if the record was read from the store.
    pub fn id(&self) -> Option<&RecordId> {
        self.meta.id.as_ref()
    }
}

/// Format a time the way records store it: `2024-05-01T09:30:00.000Z`.
pub fn format_timestamp(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    struct Note {
        text: String,
    }

    #[test]
    fn timestamp_uses_millisecond_utc_form() {
        let time = Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();
        assert_eq!(format_timestamp(time), "2024-05-01T09:30:00.000Z");
    }

    #[test]
    fn record_flattens_meta_and_fields() {
        let record: Record<Note> = serde_json::from_value(json!({
            "id": "k1",
            "dateTimeStamp": "2024-05-01T09:30:00.000Z",
            "text": "hello"
        }))
        .unwrap();

        assert_eq!(record.id().unwrap().as_str(), "k1");
        assert_eq!(record.meta.updated, None);
        assert_eq!(record.fields.text, "hello");

        let back = serde_json::to_value(&record).unwrap();
        assert_eq!(
            back,
            json!({"id": "k1", "dateTimeStamp": "2024-05-01T09:30:00.000Z", "text": "hello"})
        );
    }
}
