//! JSON rendering of result cells.
//!
//! Result cells arrive as engine-formatted text, so rendering is a matter of deciding how to
//! wrap each token. Everything is emitted through `serde_json`, which owns string escaping.

use core_executor::{Column, Value};
use serde::ser::{Error as _, Serialize, Serializer};
use serde_json::value::RawValue;

/// `text` as a quoted, escaped JSON string literal.
#[must_use]
pub fn quote(text: &str) -> String {
    serde_json::Value::from(text).to_string()
}

/// Escapes `text` for use between the quotes of a JSON string literal.
#[must_use]
pub fn escape(text: &str) -> String {
    let quoted = quote(text);
    quoted[1..quoted.len() - 1].to_string()
}

/// How a non-null cell is turned into a JSON token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rendering {
    /// Numeric text, emitted as is.
    Bare,
    /// Text that already is JSON (pre-rendered geometry), emitted as is.
    Verbatim,
    /// Anything else, emitted as an escaped string.
    Quoted,
}

impl Rendering {
    #[must_use]
    pub fn for_column(column: &Column) -> Self {
        if column.is_numeric() {
            Self::Bare
        } else {
            Self::Quoted
        }
    }
}

/// A named output member and the rendering of its values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub rendering: Rendering,
}

impl Field {
    #[must_use]
    pub fn for_columns(columns: &[Column]) -> Vec<Self> {
        columns
            .iter()
            .map(|column| Self {
                name: column.name.clone(),
                rendering: Rendering::for_column(column),
            })
            .collect()
    }
}

/// A single cell ready for serialization. Nulls are always `null`.
#[derive(Debug, Clone, Copy)]
pub struct Cell<'a> {
    value: &'a Value,
    rendering: Rendering,
}

impl<'a> Cell<'a> {
    #[must_use]
    pub const fn new(value: &'a Value, rendering: Rendering) -> Self {
        Self { value, rendering }
    }
}

impl Serialize for Cell<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match (self.value, self.rendering) {
            (Value::Null, _) => serializer.serialize_unit(),
            (Value::Text(text), Rendering::Quoted) => serializer.serialize_str(text),
            (Value::Text(text), Rendering::Bare) => match serde_json::from_str::<&RawValue>(text) {
                Ok(raw) => raw.serialize(serializer),
                // NaN and infinities have no JSON number form.
                Err(_) => serializer.serialize_str(text),
            },
            (Value::Text(text), Rendering::Verbatim) => serde_json::from_str::<&RawValue>(text)
                .map_err(S::Error::custom)?
                .serialize(serializer),
        }
    }
}

/// One row as an object keyed by field name, in field order.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    fields: &'a [Field],
    values: &'a [Value],
}

impl<'a> Record<'a> {
    #[must_use]
    pub const fn new(fields: &'a [Field], values: &'a [Value]) -> Self {
        Self { fields, values }
    }
}

impl Serialize for Record<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(
            self.fields
                .iter()
                .zip(self.values)
                .map(|(field, value)| (field.name.as_str(), Cell::new(value, field.rendering))),
        )
    }
}

/// Renders a single cell as a JSON token.
pub fn render_value(value: &Value, rendering: Rendering) -> serde_json::Result<String> {
    serde_json::to_string(&Cell::new(value, rendering))
}
