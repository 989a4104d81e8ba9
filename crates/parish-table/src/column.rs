//! Column descriptors.
//!
//! A column is either bound to a record field (rendered raw or through a
//! formatter) or computed from the whole record. Only field columns have an
//! accessor; computed columns are addressed by their title.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

/// Turns a field value into display text.
pub type Formatter = Arc<dyn Fn(&Value) -> String + Send + Sync>;

/// Turns a whole record into display text.
pub type Renderer = Arc<dyn Fn(&Value) -> String + Send + Sync>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// Presentation hints for a column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Layout {
    pub width: Option<usize>,
    pub align: Align,
}

#[derive(Clone)]
pub enum Column {
    /// Shows the raw value of `accessor`.
    Field {
        accessor: String,
        title: String,
        layout: Layout,
    },
    /// Shows the value of `accessor` through `format`.
    Formatted {
        accessor: String,
        title: String,
        layout: Layout,
        format: Formatter,
    },
    /// Shows text derived from the whole record.
    Computed {
        title: String,
        layout: Layout,
        render: Renderer,
    },
}

impl Column {
    pub fn field(accessor: impl Into<String>, title: impl Into<String>) -> Self {
        Column::Field {
            accessor: accessor.into(),
            title: title.into(),
            layout: Layout::default(),
        }
    }

    pub fn formatted<F>(accessor: impl Into<String>, title: impl Into<String>, format: F) -> Self
    where
        F: Fn(&Value) -> String + Send + Sync + 'static,
    {
        Column::Formatted {
            accessor: accessor.into(),
            title: title.into(),
            layout: Layout::default(),
            format: Arc::new(format),
        }
    }

    pub fn computed<F>(title: impl Into<String>, render: F) -> Self
    where
        F: Fn(&Value) -> String + Send + Sync + 'static,
    {
        Column::Computed {
            title: title.into(),
            layout: Layout::default(),
            render: Arc::new(render),
        }
    }

    pub fn width(mut self, width: usize) -> Self {
        self.layout_mut().width = Some(width);
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.layout_mut().align = align;
        self
    }

    fn layout_mut(&mut self) -> &mut Layout {
        match self {
            Column::Field { layout, .. }
            | Column::Formatted { layout, .. }
            | Column::Computed { layout, .. } => layout,
        }
    }

    pub fn layout(&self) -> Layout {
        match self {
            Column::Field { layout, .. }
            | Column::Formatted { layout, .. }
            | Column::Computed { layout, .. } => *layout,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Column::Field { title, .. }
            | Column::Formatted { title, .. }
            | Column::Computed { title, .. } => title,
        }
    }

    /// The record field this column reads, if it reads one.
    pub fn accessor(&self) -> Option<&str> {
        match self {
            Column::Field { accessor, .. } | Column::Formatted { accessor, .. } => Some(accessor),
            Column::Computed { .. } => None,
        }
    }

    /// The CSV header: the accessor, or the title for computed columns.
    pub fn header(&self) -> &str {
        self.accessor().unwrap_or_else(|| self.title())
    }

    /// True for the row-actions column, which never appears in exports.
    pub fn is_actions(&self) -> bool {
        self.header().eq_ignore_ascii_case("actions") || self.title().eq_ignore_ascii_case("actions")
    }

    /// Display text for this column of `record`.
    pub fn render(&self, record: &Value) -> String {
        match self {
            Column::Field { accessor, .. } => cell_text(record.get(accessor.as_str())),
            Column::Formatted {
                accessor, format, ..
            } => format(record.get(accessor.as_str()).unwrap_or(&Value::Null)),
            Column::Computed { render, .. } => render(record),
        }
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            Column::Field { .. } => "Field",
            Column::Formatted { .. } => "Formatted",
            Column::Computed { .. } => "Computed",
        };
        f.debug_struct(kind)
            .field("accessor", &self.accessor())
            .field("title", &self.title())
            .field("layout", &self.layout())
            .finish()
    }
}

/// Plain text for a field value: strings as-is, missing or null as empty,
/// anything else as compact JSON.
pub fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn field_renders_raw_text() {
        let record = json!({"name": "Ana", "age": 3, "tags": ["a"], "none": null});
        assert_eq!(Column::field("name", "Name").render(&record), "Ana");
        assert_eq!(Column::field("age", "Age").render(&record), "3");
        assert_eq!(Column::field("tags", "Tags").render(&record), r#"["a"]"#);
        assert_eq!(Column::field("none", "None").render(&record), "");
        assert_eq!(Column::field("missing", "Missing").render(&record), "");
    }

    #[test]
    fn formatted_and_computed() {
        let record = json!({"status": "pending", "first": "Ana", "last": "Reyes"});
        let upper = Column::formatted("status", "Status", |v| {
            v.as_str().unwrap_or_default().to_uppercase()
        });
        assert_eq!(upper.render(&record), "PENDING");
        assert_eq!(upper.header(), "status");

        let full = Column::computed("Full name", |r| {
            format!("{} {}", r["first"].as_str().unwrap_or(""), r["last"].as_str().unwrap_or(""))
        });
        assert_eq!(full.render(&record), "Ana Reyes");
        assert_eq!(full.accessor(), None);
        assert_eq!(full.header(), "Full name");
    }

    #[test]
    fn actions_detection_is_case_insensitive() {
        assert!(Column::computed("Actions", |_| String::new()).is_actions());
        assert!(Column::field("actions", "Manage").is_actions());
        assert!(!Column::field("status", "Status").is_actions());
    }

    #[test]
    fn layout_builders() {
        let column = Column::field("date", "Date").width(12).align(Align::Center);
        assert_eq!(
            column.layout(),
            Layout {
                width: Some(12),
                align: Align::Center
            }
        );
    }
}
