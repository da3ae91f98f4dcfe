//! Tests for the undoc command-line interface.

use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

fn undoc(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_undoc"))
        .args(args)
        .env_remove("UNDOC_OUTPUT_FORMAT")
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn write_docx(dir: &Path, name: &str, paragraphs: &[&str]) -> PathBuf {
    let body: String = paragraphs
        .iter()
        .map(|p| format!("<w:p><w:r><w:t>{}</w:t></w:r></w:p>", p))
        .collect();
    let document = format!(
        r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}</w:body></w:document>"#,
        body
    );

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    writer
        .start_file("word/document.xml", SimpleFileOptions::default())
        .unwrap();
    writer.write_all(document.as_bytes()).unwrap();
    let bytes = writer.finish().unwrap().into_inner();

    let path = dir.join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_json_output_by_default() {
    let dir = TempDir::new().unwrap();
    let path = write_docx(dir.path(), "a.docx", &["Alpha", "Beta"]);

    let output = undoc(&[path.to_str().unwrap()]);
    assert!(output.status.success(), "{}", stderr(&output));

    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["file_type"], "DOCX");
    assert_eq!(value["paragraph_count"], 2);
    assert_eq!(value["full_text"], "Alpha\n\nBeta");
    assert_eq!(value["paragraphs"][1]["style"], "Normal");
}

#[test]
fn test_compact_json() {
    let dir = TempDir::new().unwrap();
    let path = write_docx(dir.path(), "a.docx", &["Alpha"]);

    let output = undoc(&[path.to_str().unwrap(), "--compact"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output).trim_end().lines().count(), 1);
}

#[test]
fn test_text_output() {
    let dir = TempDir::new().unwrap();
    let path = write_docx(dir.path(), "a.docx", &["Alpha", "Beta"]);

    let output = undoc(&[path.to_str().unwrap(), "--output-format", "text"]);
    assert!(output.status.success());

    let text = stdout(&output);
    assert!(text.starts_with("File: "));
    assert!(text.contains("Type: DOCX\nParagraphs: 2\n\nMetadata:\n"));
    assert!(text.contains("Content:\nAlpha\n\nBeta"));
}

#[test]
fn test_output_format_from_env() {
    let dir = TempDir::new().unwrap();
    let path = write_docx(dir.path(), "a.docx", &["Alpha"]);

    let output = Command::new(env!("CARGO_BIN_EXE_undoc"))
        .arg(&path)
        .env("UNDOC_OUTPUT_FORMAT", "text")
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(stdout(&output).contains("Content:\nAlpha"));
}

#[test]
fn test_missing_file_reports_json_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nope.pdf");

    let output = undoc(&[path.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());

    let value: serde_json::Value = serde_json::from_str(&stderr(&output)).unwrap();
    assert_eq!(value["error_kind"], "FileNotFound");
}

#[test]
fn test_unsupported_file_in_text_mode() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, "hello").unwrap();

    let output = undoc(&[path.to_str().unwrap(), "--output-format", "text"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("[UnsupportedFormat]"));
}

#[test]
fn test_corrupt_pdf_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.pdf");
    std::fs::write(&path, b"not really a pdf").unwrap();

    let output = undoc(&[path.to_str().unwrap(), "--no-fallback", "--strict"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("ExtractionError"));
}

#[test]
fn test_invalid_output_format_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_docx(dir.path(), "a.docx", &["Alpha"]);

    let output = undoc(&[path.to_str().unwrap(), "--output-format", "xml"]);
    assert!(!output.status.success());
}

#[test]
fn test_version() {
    let output = undoc(&["--version"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains(env!("CARGO_PKG_VERSION")));
}
