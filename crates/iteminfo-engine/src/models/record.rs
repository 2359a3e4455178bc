use std::collections::BTreeMap;

use serde::Serialize;

/// Value of a single field in an item record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum FieldValue {
    /// Literal token with its surrounding quotes, braces and trailing comma removed.
    Scalar(String),
    /// Elements of a multi-line block, each kept as the raw element token
    /// (quotes and any leading comment marker included).
    List(Vec<String>),
}

impl FieldValue {
    /// Scalar already in source form, such as a value read from a script.
    pub fn scalar(value: impl Into<String>) -> Self {
        Self::Scalar(value.into())
    }

    /// Scalar from plain text, with quotes and backslashes escaped.
    pub fn plain(text: &str) -> Self {
        Self::Scalar(escape(text))
    }

    /// Builds a list whose elements are the given texts wrapped in double quotes.
    pub fn quoted_list<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::List(lines.into_iter().map(|l| quote(l.as_ref())).collect())
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items),
            Self::Scalar(_) => None,
        }
    }

    /// Single-line rendering used by tabular exports.
    pub fn flatten(&self) -> String {
        match self {
            Self::Scalar(s) => s.clone(),
            Self::List(items) => items.join(" "),
        }
    }
}

/// Escapes embedded quotes and backslashes for use inside a quoted string.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Wraps `text` in double quotes, escaping embedded quotes and backslashes.
pub fn quote(text: &str) -> String {
    format!("\"{}\"", escape(text))
}

/// Fields of one item, iterated in ascending field-name order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ItemRecord {
    fields: BTreeMap<String, FieldValue>,
}

impl ItemRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field, replacing any earlier value.
    pub fn set(&mut self, key: impl Into<String>, value: FieldValue) {
        self.fields.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut FieldValue> {
        self.fields.get_mut(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

impl<K: Into<String>> FromIterator<(K, FieldValue)> for ItemRecord {
    fn from_iter<T: IntoIterator<Item = (K, FieldValue)>>(iter: T) -> Self {
        let mut record = Self::new();
        for (k, v) in iter {
            record.set(k, v);
        }
        record
    }
}
