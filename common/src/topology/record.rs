//! # Adjacency Records
//!
//! One row of fact data as produced by a fact source. A record is addressed by
//! column name; nested values (e.g. an interface `{hostname, interface}`) are
//! reached with dotted paths such as `Interface.hostname`.

use serde_json::{Map, Value};

/// One raw, immutable row of fact data.
#[derive(Debug, Clone, PartialEq)]
pub struct AdjacencyRecord {
    key: String,
    fields: Map<String, Value>,
}

impl AdjacencyRecord {
    pub fn new(key: impl Into<String>, fields: Map<String, Value>) -> Self {
        Self {
            key: key.into(),
            fields,
        }
    }

    /// The identifying key of the row in its source table.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Looks up a field by column name or dotted path.
    ///
    /// A `null` value is reported as absent.
    pub fn field(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut current: &Value = self.fields.get(first)?;

        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }

        match current {
            Value::Null => None,
            value => Some(value),
        }
    }

    /// Looks up a field and renders it for use in a label.
    pub fn render(&self, path: &str) -> Option<String> {
        self.field(path).map(render_value)
    }
}

/// Renders a field value the way it appears in edge labels.
///
/// Strings are written verbatim at the top level and quoted inside
/// collections, so an IP list reads `['10.0.0.1/30', '10.0.0.5/30']`.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => render_nested(other),
    }
}

fn render_nested(value: &Value) -> String {
    match value {
        Value::Null => "null".to_owned(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => format!("'{s}'"),
        Value::Array(items) => {
            let inner: Vec<String> = items.iter().map(render_nested).collect();
            format!("[{}]", inner.join(", "))
        }
        Value::Object(map) => {
            let inner: Vec<String> = map
                .iter()
                .map(|(key, value)| format!("'{key}': {}", render_nested(value)))
                .collect();
            format!("{{{}}}", inner.join(", "))
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
