//! Document-level types and assembly.

use super::{Metadata, Page, Paragraph, RawMetadata};
use crate::detect::FileType;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::path::{Path, PathBuf};

/// Separator placed between unit texts in [`Document::full_text`].
pub const UNIT_SEPARATOR: &str = "\n\n";

/// Structural units of a document, in reading order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Units {
    /// Pages of a PDF
    Pages(Vec<Page>),
    /// Body paragraphs of a DOCX
    Paragraphs(Vec<Paragraph>),
}

impl Units {
    /// Number of units.
    pub fn len(&self) -> usize {
        match self {
            Units::Pages(pages) => pages.len(),
            Units::Paragraphs(paragraphs) => paragraphs.len(),
        }
    }

    /// Check if there are no units.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over unit texts in order.
    pub fn texts(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        match self {
            Units::Pages(pages) => Box::new(pages.iter().map(Page::text)),
            Units::Paragraphs(paragraphs) => Box::new(paragraphs.iter().map(Paragraph::text)),
        }
    }

    /// Total characters across all units.
    pub fn total_chars(&self) -> usize {
        match self {
            Units::Pages(pages) => pages.iter().map(Page::char_count).sum(),
            Units::Paragraphs(paragraphs) => paragraphs.iter().map(Paragraph::char_count).sum(),
        }
    }

    fn matches(&self, file_type: FileType) -> bool {
        matches!(
            (self, file_type),
            (Units::Pages(_), FileType::Pdf) | (Units::Paragraphs(_), FileType::Docx)
        )
    }
}

/// An extracted document.
///
/// Built once by [`Document::assemble`] and read-only afterwards; derived
/// fields (`full_text`, unit count) always agree with the units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    source_path: PathBuf,
    file_type: FileType,
    units: Units,
    full_text: String,
    metadata: Metadata,
}

impl Document {
    /// Assemble a document from decoded units and raw metadata.
    ///
    /// Joins unit texts with a blank line (empty units included), drops
    /// unset or blank metadata and stamps the source path and type.
    pub fn assemble(
        file_type: FileType,
        units: Units,
        metadata: RawMetadata,
        path: impl Into<PathBuf>,
    ) -> Self {
        debug_assert!(
            units.matches(file_type),
            "{} document assembled with mismatched units",
            file_type
        );

        let full_text = units.texts().collect::<Vec<_>>().join(UNIT_SEPARATOR);

        Self {
            source_path: path.into(),
            file_type,
            units,
            full_text,
            metadata: Metadata::from_raw(metadata),
        }
    }

    /// Absolute path of the source file.
    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    /// Source file type.
    pub fn file_type(&self) -> FileType {
        self.file_type
    }

    /// Structural units.
    pub fn units(&self) -> &Units {
        &self.units
    }

    /// Pages, for PDF documents.
    pub fn pages(&self) -> Option<&[Page]> {
        match &self.units {
            Units::Pages(pages) => Some(pages),
            Units::Paragraphs(_) => None,
        }
    }

    /// Paragraphs, for DOCX documents.
    pub fn paragraphs(&self) -> Option<&[Paragraph]> {
        match &self.units {
            Units::Paragraphs(paragraphs) => Some(paragraphs),
            Units::Pages(_) => None,
        }
    }

    /// Concatenated text of all units.
    pub fn full_text(&self) -> &str {
        &self.full_text
    }

    /// Normalized metadata.
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Number of structural units.
    pub fn unit_count(&self) -> usize {
        self.units.len()
    }

    /// Check if no text was extracted at all (e.g. a scanned PDF).
    pub fn has_no_text(&self) -> bool {
        self.units.total_chars() == 0
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(6))?;
        map.serialize_entry("file_path", &self.source_path.display().to_string())?;
        map.serialize_entry("file_type", &self.file_type)?;
        match &self.units {
            Units::Pages(pages) => map.serialize_entry("pages", pages)?,
            Units::Paragraphs(paragraphs) => map.serialize_entry("paragraphs", paragraphs)?,
        }
        map.serialize_entry("full_text", &self.full_text)?;
        map.serialize_entry("metadata", &self.metadata)?;
        match &self.units {
            Units::Pages(pages) => map.serialize_entry("page_count", &pages.len())?,
            Units::Paragraphs(paragraphs) => {
                map.serialize_entry("paragraph_count", &paragraphs.len())?
            }
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MetadataKey, MetadataValue};

    fn sample_pages() -> Units {
        Units::Pages(vec![
            Page::new(1, "First"),
            Page::blank(2),
            Page::new(3, "Third"),
        ])
    }

    #[test]
    fn test_full_text_keeps_empty_units() {
        let doc = Document::assemble(FileType::Pdf, sample_pages(), RawMetadata::new(), "/a.pdf");
        assert_eq!(doc.full_text(), "First\n\n\n\nThird");
        assert_eq!(doc.unit_count(), 3);
        assert!(!doc.has_no_text());
    }

    #[test]
    fn test_full_text_single_unit() {
        let units = Units::Pages(vec![Page::new(1, "Hello World")]);
        let doc = Document::assemble(FileType::Pdf, units, RawMetadata::new(), "/h.pdf");
        assert_eq!(doc.full_text(), "Hello World");
    }

    #[test]
    fn test_empty_document() {
        let doc = Document::assemble(
            FileType::Docx,
            Units::Paragraphs(Vec::new()),
            RawMetadata::new(),
            "/e.docx",
        );
        assert_eq!(doc.full_text(), "");
        assert_eq!(doc.unit_count(), 0);
        assert!(doc.has_no_text());
        assert!(doc.pages().is_none());
    }

    #[test]
    fn test_assemble_filters_metadata() {
        let mut raw = RawMetadata::new();
        raw.insert(MetadataKey::Title, Some(MetadataValue::text("")));
        raw.insert(MetadataKey::Author, Some(MetadataValue::text("Jane")));

        let doc = Document::assemble(FileType::Pdf, sample_pages(), raw, "/m.pdf");
        assert_eq!(doc.metadata().len(), 1);
        assert!(doc.metadata().contains(MetadataKey::Author));
    }

    #[test]
    fn test_pdf_json_shape() {
        let doc = Document::assemble(FileType::Pdf, sample_pages(), RawMetadata::new(), "/a.pdf");
        let value = serde_json::to_value(&doc).unwrap();

        assert_eq!(value["file_path"], "/a.pdf");
        assert_eq!(value["file_type"], "PDF");
        assert_eq!(value["page_count"], 3);
        assert_eq!(value["pages"][1]["page_number"], 2);
        assert_eq!(value["pages"][1]["char_count"], 0);
        assert!(value.get("paragraphs").is_none());
        assert!(value["metadata"].as_object().unwrap().is_empty());
    }

    #[test]
    fn test_docx_json_key_order() {
        let units = Units::Paragraphs(vec![Paragraph::new(1, "Title", "Heading 1")]);
        let doc = Document::assemble(FileType::Docx, units, RawMetadata::new(), "/d.docx");
        let json = serde_json::to_string(&doc).unwrap();

        let order = [
            "\"file_path\"",
            "\"file_type\"",
            "\"paragraphs\"",
            "\"full_text\"",
            "\"metadata\"",
            "\"paragraph_count\"",
        ];
        let positions: Vec<usize> = order.iter().map(|k| json.find(k).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(json.contains("\"style\":\"Heading 1\""));
    }
}
