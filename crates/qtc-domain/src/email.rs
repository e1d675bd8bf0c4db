//! Parsed email messages

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// A display name and address pair
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Mailbox {
    /// Display name (may be empty)
    pub name: String,

    /// Email address (may be empty)
    pub email: String,
}

/// Ordered string mapping recovered from the key/value table of an email body
///
/// Keys are unique. Writing an existing key replaces its value and moves the
/// key to the end, so iteration order is last-write order.
///
/// # Examples
///
/// ```
/// use qtc_domain::TableData;
///
/// let mut data = TableData::new();
/// data.insert("Origin", "Shanghai");
/// data.insert("Commodity", "Electronics");
/// data.insert("Origin", "Ningbo");
///
/// let keys: Vec<&str> = data.keys().collect();
/// assert_eq!(keys, vec!["Commodity", "Origin"]);
/// assert_eq!(data.get("Origin"), Some("Ningbo"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableData {
    entries: Vec<(String, String)>,
}

impl TableData {
    /// Create an empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a key
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        if let Some(pos) = self.entries.iter().position(|(k, _)| *k == key) {
            self.entries.remove(pos);
        }
        self.entries.push((key, value.into()));
    }

    /// Look up a value by exact key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate over keys in order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Iterate over entries in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the mapping is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TableData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut data = TableData::new();
        for (k, v) in iter {
            data.insert(k, v);
        }
        data
    }
}

impl Serialize for TableData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// One decomposed inbound email
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedEmail {
    /// Sender (empty when absent)
    pub sender: Mailbox,

    /// To recipients
    pub recipients: Vec<Mailbox>,

    /// Cc recipients
    pub cc_recipients: Vec<Mailbox>,

    /// Subject line (empty when absent)
    pub subject: String,

    /// Key/value table recovered from the HTML body
    pub table_data: TableData,
}
