//! Output record types.
//!
//! Records are sparse by construction: optional scalars skip serialization
//! when `None`, sequences skip when empty. A field that was absent in the
//! source graph never appears in the stored document, not even as null.

use serde::{Deserialize, Serialize};

/// An integer field with a string fallback.
///
/// The corpus occasionally carries non-numeric text where an integer is
/// expected (download counts, file extents, agent dates). A present value is
/// never dropped: if it does not coerce, the raw lexical form is stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IntOrString {
    Int(i64),
    Str(String),
}

impl IntOrString {
    /// Coerce a lexical form, keeping the original text on failure.
    pub fn coerce(lexical: &str) -> Self {
        match lexical.trim().parse::<i64>() {
            Ok(n) => IntOrString::Int(n),
            Err(_) => IntOrString::Str(lexical.to_string()),
        }
    }
}

/// One creator (agent) of a catalog entry. All fields are optional; an agent
/// node with nothing extractable still projects as an empty sub-record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Creator {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthdate: Option<IntOrString>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deathdate: Option<IntOrString>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webpage: Option<String>,
}

/// One downloadable file of a catalog entry. The URL is the file node's own
/// identifier and is always present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileFormat {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extent: Option<IntOrString>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub format: Vec<String>,
}

impl FileFormat {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            extent: None,
            modified: None,
            format: Vec::new(),
        }
    }
}

/// The projected metadata record for one catalog entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issued: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rights: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternative_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// MARC 508: creation/production credits note.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marc508: Option<String>,
    /// MARC 520: summary note.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marc520: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub downloads: Option<IntOrString>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub creators: Vec<Creator>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub languages: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subjects: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bookshelves: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub formats: Vec<FileFormat>,
}

impl BookRecord {
    /// Number of populated top-level fields (observability counter).
    pub fn populated_fields(&self) -> usize {
        let scalars = [
            self.publisher.is_some(),
            self.issued.is_some(),
            self.rights.is_some(),
            self.title.is_some(),
            self.alternative_title.is_some(),
            self.description.is_some(),
            self.marc508.is_some(),
            self.marc520.is_some(),
            self.downloads.is_some(),
        ];
        let sequences = [
            !self.creators.is_empty(),
            !self.languages.is_empty(),
            !self.subjects.is_empty(),
            !self.types.is_empty(),
            !self.bookshelves.is_empty(),
            !self.formats.is_empty(),
        ];
        scalars.iter().filter(|b| **b).count() + sequences.iter().filter(|b| **b).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coerce_parses_integers_and_keeps_text() {
        assert_eq!(IntOrString::coerce("500000"), IntOrString::Int(500000));
        assert_eq!(IntOrString::coerce(" 42 "), IntOrString::Int(42));
        assert_eq!(
            IntOrString::coerce("lots"),
            IntOrString::Str("lots".to_string())
        );
    }

    #[test]
    fn empty_record_serializes_to_empty_object() {
        let json = serde_json::to_value(BookRecord::default()).unwrap();
        assert_eq!(json, serde_json::json!({}));
    }

    #[test]
    fn absent_fields_are_omitted_not_null() {
        let record = BookRecord {
            title: Some("Moby-Dick".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json, serde_json::json!({"title": "Moby-Dick"}));
        assert!(json.get("publisher").is_none());
        assert!(json.get("languages").is_none());
    }

    #[test]
    fn int_or_string_serializes_untagged() {
        let record = BookRecord {
            downloads: Some(IntOrString::Int(500000)),
            ..Default::default()
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json, serde_json::json!({"downloads": 500000}));

        let record = BookRecord {
            downloads: Some(IntOrString::Str("many".to_string())),
            ..Default::default()
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json, serde_json::json!({"downloads": "many"}));
    }

    #[test]
    fn populated_fields_counts_top_level_keys() {
        let mut record = BookRecord::default();
        assert_eq!(record.populated_fields(), 0);
        record.title = Some("t".into());
        record.languages.push("en".into());
        record.formats.push(FileFormat::new("http://x/f.txt"));
        assert_eq!(record.populated_fields(), 3);
    }
}
