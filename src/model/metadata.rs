//! Document metadata with a closed key set.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Known metadata fields.
///
/// Serialized names are snake_case; map iteration follows declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetadataKey {
    Title,
    Author,
    Subject,
    Keywords,
    Comments,
    Creator,
    Producer,
    CreationDate,
    ModificationDate,
    LastModifiedBy,
    Created,
    Modified,
    Revision,
}

impl MetadataKey {
    /// Serialized key name.
    pub fn as_str(&self) -> &'static str {
        match self {
            MetadataKey::Title => "title",
            MetadataKey::Author => "author",
            MetadataKey::Subject => "subject",
            MetadataKey::Keywords => "keywords",
            MetadataKey::Comments => "comments",
            MetadataKey::Creator => "creator",
            MetadataKey::Producer => "producer",
            MetadataKey::CreationDate => "creation_date",
            MetadataKey::ModificationDate => "modification_date",
            MetadataKey::LastModifiedBy => "last_modified_by",
            MetadataKey::Created => "created",
            MetadataKey::Modified => "modified",
            MetadataKey::Revision => "revision",
        }
    }
}

impl fmt::Display for MetadataKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A metadata value: free text or a structured date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    /// Date with its original UTC offset
    Date(DateTime<FixedOffset>),
    /// Plain text
    Text(String),
}

impl MetadataValue {
    /// Create a text value.
    pub fn text(s: impl Into<String>) -> Self {
        MetadataValue::Text(s.into())
    }

    /// Whether the value carries no information.
    pub fn is_blank(&self) -> bool {
        match self {
            MetadataValue::Text(s) => s.trim().is_empty(),
            MetadataValue::Date(_) => false,
        }
    }

    /// Get the text, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            MetadataValue::Text(s) => Some(s),
            MetadataValue::Date(_) => None,
        }
    }
}

impl fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataValue::Text(s) => f.write_str(s),
            MetadataValue::Date(d) => f.write_str(&d.to_rfc3339()),
        }
    }
}

impl From<&str> for MetadataValue {
    fn from(s: &str) -> Self {
        MetadataValue::Text(s.to_string())
    }
}

impl From<String> for MetadataValue {
    fn from(s: String) -> Self {
        MetadataValue::Text(s)
    }
}

impl From<DateTime<FixedOffset>> for MetadataValue {
    fn from(d: DateTime<FixedOffset>) -> Self {
        MetadataValue::Date(d)
    }
}

/// Metadata as produced by a decoder, before normalization.
///
/// `None` marks a field the backend knows about but the document left unset.
pub type RawMetadata = BTreeMap<MetadataKey, Option<MetadataValue>>;

/// Normalized document metadata: only present, non-blank fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata {
    fields: BTreeMap<MetadataKey, MetadataValue>,
}

impl Metadata {
    /// Create empty metadata.
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize raw decoder output, dropping unset and blank entries.
    pub fn from_raw(raw: RawMetadata) -> Self {
        let fields = raw
            .into_iter()
            .filter_map(|(key, value)| match value {
                Some(MetadataValue::Text(s)) if s.trim().is_empty() => None,
                Some(value) => Some((key, value)),
                None => None,
            })
            .collect();
        Self { fields }
    }

    /// Get a field.
    pub fn get(&self, key: MetadataKey) -> Option<&MetadataValue> {
        self.fields.get(&key)
    }

    /// Check if a field is present.
    pub fn contains(&self, key: MetadataKey) -> bool {
        self.fields.contains_key(&key)
    }

    /// Iterate over present fields in key order.
    pub fn iter(&self) -> impl Iterator<Item = (MetadataKey, &MetadataValue)> {
        self.fields.iter().map(|(k, v)| (*k, v))
    }

    /// Number of present fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if no field is present.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
