use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt;

use crate::xml;

/// A single field value in the types Solr understands.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Date(DateTime<Utc>),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Str(s) => f.write_str(s),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::Float(x) => write!(f, "{}", x),
            FieldValue::Bool(b) => write!(f, "{}", b),
            // Solr wants ISO-8601 in UTC with a trailing Z
            FieldValue::Date(d) => f.write_str(&d.to_rfc3339_opts(SecondsFormat::Secs, true)),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Str(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Str(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Int(value as i64)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Int(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        FieldValue::Date(value)
    }
}

/// One named value on a document, with an optional index-time boost.
#[derive(Debug, Clone)]
pub struct Field {
    pub name: String,
    pub value: FieldValue,
    pub boost: Option<f32>,
}

impl Field {
    pub fn new(name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            boost: None,
        }
    }

    pub fn with_boost(mut self, boost: f32) -> Self {
        self.boost = Some(boost);
        self
    }

    /// Render as a `<field>` element of an update message.
    pub fn to_xml(&self) -> String {
        let mut attrs = format!(" name=\"{}\"", xml::escape(&self.name));
        if let Some(boost) = self.boost {
            attrs.push_str(&format!(" boost=\"{}\"", boost));
        }
        format!(
            "<field{}>{}</field>",
            attrs,
            xml::escape(&self.value.to_string())
        )
    }
}

/// Document represents a named bag of fields submitted for indexing.
///
/// Fields keep their insertion order, and repeating a name produces a
/// multi-valued field.
#[derive(Debug, Clone, Default)]
pub struct Document {
    fields: Vec<Field>,
    boost: Option<f32>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field, builder style.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.push(Field::new(name, value));
        self
    }

    /// Append an already constructed field (e.g. one carrying a boost).
    pub fn add_field(&mut self, field: Field) {
        self.fields.push(field);
    }

    /// Index-time boost for the whole document.
    pub fn with_boost(mut self, boost: f32) -> Self {
        self.boost = Some(boost);
        self
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Render as a `<doc>` element of an update message.
    pub fn to_xml(&self) -> String {
        let attrs = match self.boost {
            Some(boost) => format!(" boost=\"{}\"", boost),
            None => String::new(),
        };
        let fields: String = self.fields.iter().map(|f| f.to_xml()).collect();
        format!("<doc{}>{}</doc>", attrs, fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_document_to_xml() {
        let doc = Document::new().field("id", 999).field("text", "hi there!");
        assert_eq!(
            doc.to_xml(),
            "<doc><field name=\"id\">999</field><field name=\"text\">hi there!</field></doc>"
        );
    }

    #[test]
    fn test_field_values_escaped() {
        let doc = Document::new()
            .field("id", 47)
            .field("ruby_text", "puts \"ouch!\"");
        assert!(doc
            .to_xml()
            .contains("<field name=\"ruby_text\">puts &quot;ouch!&quot;</field>"));
    }

    #[test]
    fn test_boosts_rendered_as_attributes() {
        let mut doc = Document::new().with_boost(2.0);
        doc.add_field(Field::new("title", "Ficciones").with_boost(1.5));
        assert_eq!(
            doc.to_xml(),
            "<doc boost=\"2\"><field name=\"title\" boost=\"1.5\">Ficciones</field></doc>"
        );
    }

    #[test]
    fn test_multi_valued_field_repeats_name() {
        let doc = Document::new().field("tag", "a").field("tag", "b");
        assert_eq!(
            doc.to_xml(),
            "<doc><field name=\"tag\">a</field><field name=\"tag\">b</field></doc>"
        );
    }

    #[test]
    fn test_date_value_formatting() {
        let when = Utc.with_ymd_and_hms(2007, 3, 1, 12, 0, 0).unwrap();
        assert_eq!(
            FieldValue::from(when).to_string(),
            "2007-03-01T12:00:00Z"
        );
    }
}
