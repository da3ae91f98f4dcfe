//! Plain text rendering for extracted documents.

use std::fmt::Write;

use crate::detect::FileType;
use crate::model::Document;

/// Convert a document to a human-readable text report.
///
/// A header with the path, type and unit count, then the metadata block
/// (present fields only, possibly none), then the full text.
pub fn to_text(doc: &Document) -> String {
    let mut output = String::with_capacity(doc.full_text().len() + 256);
    let file_type = doc.file_type();

    // Writing to a String cannot fail
    let _ = writeln!(output, "File: {}", doc.source_path().display());
    let _ = writeln!(output, "Type: {}", file_type);
    let _ = writeln!(output, "{}: {}", unit_heading(file_type), doc.unit_count());

    output.push_str("\nMetadata:\n");
    for (key, value) in doc.metadata().iter() {
        let _ = writeln!(output, "  {}: {}", key, value);
    }

    output.push_str("\nContent:\n");
    output.push_str(doc.full_text());
    output
}

fn unit_heading(file_type: FileType) -> &'static str {
    match file_type {
        FileType::Pdf => "Pages",
        FileType::Docx => "Paragraphs",
    }
}
