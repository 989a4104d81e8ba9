//! Record data from the command line.

use std::io::{self, Read};

use anyhow::{Context, Result, bail};
use clap::Args;
use serde_json::Value;

use parish_core::Document;

#[derive(Args, Debug)]
pub struct DataArgs {
    /// JSON file with record fields (use - for stdin)
    #[arg(long)]
    pub json: Option<String>,

    /// Set a field, as key=value. Values that parse as JSON are stored as
    /// JSON, anything else as a string. Applied after --json.
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub fields: Vec<String>,
}

impl DataArgs {
    /// Combine `--json` and `--set` into one document.
    pub fn document(&self) -> Result<Document> {
        let mut document = match &self.json {
            Some(path) => Document::new(read_json(path)?).context("Record data must be a JSON object")?,
            None => Document::empty(),
        };

        for field in &self.fields {
            let (key, value) = parse_field(field)?;
            document.insert(key, value);
        }

        Ok(document)
    }
}

fn read_json(path: &str) -> Result<Value> {
    if path == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read from stdin")?;
        serde_json::from_str(&buf).context("Invalid JSON from stdin")
    } else {
        let content = std::fs::read_to_string(path).context("Failed to read JSON file")?;
        serde_json::from_str(&content).context("Invalid JSON in file")
    }
}

/// Split `key=value`, reading the value as JSON when it is valid JSON.
pub fn parse_field(field: &str) -> Result<(String, Value)> {
    let Some((key, raw)) = field.split_once('=') else {
        bail!("Expected key=value, got '{}'", field);
    };
    let key = key.trim();
    if key.is_empty() {
        bail!("Empty field name in '{}'", field);
    }
    Ok((key.to_string(), parse_value(raw)))
}

/// A command-line value as JSON: `true`, `3` and `{"a":1}` keep their JSON
/// type, anything else is a string.
pub fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}
