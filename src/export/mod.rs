//! Result export
//!
//! Serializes one response text into a downloadable artifact. Every format
//! is a best-effort text splitter: content is never validated against the
//! per-quarter layout and never rejected.

mod excel;
mod pdf;
mod xml;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::consts::{BASE_NAME_STAMP_FORMAT, OCTET_STREAM};
use crate::error::ExportError;
use crate::utils::Timezone;

/// Requested output encoding. Unrecognized names are kept as `Other` and
/// exported as plain text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ExportFormat {
    Txt,
    Xml,
    Pdf,
    Excel,
    Other(String),
}

impl From<&str> for ExportFormat {
    fn from(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "txt" | "text" => ExportFormat::Txt,
            "xml" => ExportFormat::Xml,
            "pdf" => ExportFormat::Pdf,
            "excel" | "xlsx" => ExportFormat::Excel,
            _ => ExportFormat::Other(s.trim().to_string()),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Txt => f.write_str("TXT"),
            ExportFormat::Xml => f.write_str("XML"),
            ExportFormat::Pdf => f.write_str("PDF"),
            ExportFormat::Excel => f.write_str("Excel"),
            ExportFormat::Other(name) => f.write_str(name),
        }
    }
}

/// Encoded payload plus the name it should be saved under
#[derive(Debug, Clone)]
pub(crate) struct ExportArtifact {
    pub(crate) bytes: Vec<u8>,
    pub(crate) file_name: String,
}

impl ExportArtifact {
    pub(crate) fn mime_type(&self) -> &'static str {
        OCTET_STREAM
    }
}

pub(crate) fn export(
    content: &str,
    format: &ExportFormat,
    base_name: &str,
) -> Result<ExportArtifact, ExportError> {
    let (bytes, extension) = match format {
        ExportFormat::Txt | ExportFormat::Other(_) => (content.as_bytes().to_vec(), "txt"),
        ExportFormat::Xml => (xml::render(content).into_bytes(), "xml"),
        ExportFormat::Pdf => (pdf::render(content)?, "pdf"),
        ExportFormat::Excel => (excel::render(content)?, "xlsx"),
    };
    if let ExportFormat::Other(name) = format {
        tracing::debug!("unknown export format {name:?}, writing plain text");
    }
    tracing::debug!(format = %format, size = bytes.len(), "encoded export");
    Ok(ExportArtifact {
        bytes,
        file_name: format!("{base_name}.{extension}"),
    })
}

/// `briefing_<AIRPORT>_<YYYYMMDD_HHMM>`
pub(crate) fn default_base_name(airport: &str, at: DateTime<Utc>, timezone: Timezone) -> String {
    let stamp = timezone.to_fixed_offset(at).format(BASE_NAME_STAMP_FORMAT);
    let airport: String = airport
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("briefing_{airport}_{stamp}")
}

/// Write the artifact into `dir`, creating it if needed
pub(crate) fn deliver(artifact: &ExportArtifact, dir: &Path) -> std::io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(&artifact.file_name);
    fs::write(&path, &artifact.bytes)?;
    tracing::debug!(path = %path.display(), mime = artifact.mime_type(), "delivered export");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Q1\nW/C M015     ISA DEV P04\n\nQ3\nW/C P008     ISA DEV M02\n";

    #[test]
    fn format_parse_is_case_insensitive() {
        assert_eq!(ExportFormat::from("TXT"), ExportFormat::Txt);
        assert_eq!(ExportFormat::from("xml"), ExportFormat::Xml);
        assert_eq!(ExportFormat::from("Pdf"), ExportFormat::Pdf);
        assert_eq!(ExportFormat::from("Excel"), ExportFormat::Excel);
        assert_eq!(ExportFormat::from("xlsx"), ExportFormat::Excel);
        assert_eq!(
            ExportFormat::from("YAML"),
            ExportFormat::Other("YAML".to_string())
        );
    }

    #[test]
    fn txt_round_trips() {
        for content in ["", "single line", SAMPLE, "acentuação ✈ 机场\r\nline"] {
            let a = export(content, &ExportFormat::Txt, "x").unwrap();
            assert_eq!(String::from_utf8(a.bytes).unwrap(), content);
            assert_eq!(a.file_name, "x.txt");
        }
    }

    #[test]
    fn unknown_format_falls_back_to_txt() {
        let a = export(SAMPLE, &ExportFormat::from("YAML"), "x").unwrap();
        assert_eq!(a.bytes, SAMPLE.as_bytes());
        assert_eq!(a.file_name, "x.txt");
    }

    #[test]
    fn file_names_per_format() {
        let name = |f: ExportFormat| export(SAMPLE, &f, "briefing").unwrap().file_name;
        assert_eq!(name(ExportFormat::Xml), "briefing.xml");
        assert_eq!(name(ExportFormat::Pdf), "briefing.pdf");
        assert_eq!(name(ExportFormat::Excel), "briefing.xlsx");
    }

    #[test]
    fn xml_payload_wraps_content() {
        let a = export("a < b & c", &ExportFormat::Xml, "x").unwrap();
        let doc = String::from_utf8(a.bytes).unwrap();
        assert!(doc.starts_with("<?xml version='1.0'?>"));
        assert!(doc.contains("<![CDATA[a < b & c]]>"));
    }

    #[test]
    fn pdf_payload_has_magic() {
        let a = export(SAMPLE, &ExportFormat::Pdf, "x").unwrap();
        assert!(a.bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn excel_payload_is_zip() {
        let a = export(SAMPLE, &ExportFormat::Excel, "x").unwrap();
        assert!(a.bytes.starts_with(b"PK"));
    }

    #[test]
    fn empty_content_exports_in_every_format() {
        for f in [
            ExportFormat::Txt,
            ExportFormat::Xml,
            ExportFormat::Pdf,
            ExportFormat::Excel,
        ] {
            assert!(export("", &f, "empty").is_ok(), "{f}");
        }
    }

    #[test]
    fn every_artifact_is_octet_stream() {
        let a = export(SAMPLE, &ExportFormat::Xml, "x").unwrap();
        assert_eq!(a.mime_type(), "application/octet-stream");
    }

    #[test]
    fn default_base_name_layout() {
        let at = "2026-05-09T13:04:00Z".parse::<DateTime<Utc>>().unwrap();
        let name = default_base_name("SKBO", at, Timezone::Named(chrono_tz::UTC));
        assert_eq!(name, "briefing_SKBO_20260509_1304");
    }

    #[test]
    fn default_base_name_sanitizes_airport() {
        let at = "2026-05-09T13:04:00Z".parse::<DateTime<Utc>>().unwrap();
        let name = default_base_name(" SK/BO ", at, Timezone::Named(chrono_tz::UTC));
        assert_eq!(name, "briefing_SK_BO_20260509_1304");
    }

    #[test]
    fn deliver_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let a = export(SAMPLE, &ExportFormat::Txt, "out").unwrap();
        let path = deliver(&a, &dir.path().join("nested")).unwrap();
        assert_eq!(path.file_name().unwrap(), "out.txt");
        assert_eq!(fs::read_to_string(path).unwrap(), SAMPLE);
    }
}
