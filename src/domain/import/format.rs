//! Format classification for imported files

use serde::{Deserialize, Serialize};
use std::fmt;

/// File suffixes offered by the import file picker
pub const ACCEPTED_EXTENSIONS: &[&str] = &[
    ".md", ".txt", ".json", ".pdf", ".docx", ".doc", ".png", ".jpg", ".jpeg", ".webp", ".gif",
];

/// Handling strategy selected for a single source file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatKind {
    /// Raster image, handed to the upload collaborator
    Image,
    /// Portable Document Format
    Pdf,
    /// Pre-2007 binary Word document (never parsed)
    LegacyDoc,
    /// Office Open XML Word document
    Docx,
    /// JSON text
    Json,
    /// Anything else, imported as UTF-8 text
    PlainTextOrOther,
}

impl FormatKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Pdf => "pdf",
            Self::LegacyDoc => "legacy_doc",
            Self::Docx => "docx",
            Self::Json => "json",
            Self::PlainTextOrOther => "plain_text",
        }
    }

    /// Every kind, in classification order
    pub fn all() -> [FormatKind; 6] {
        [
            Self::Image,
            Self::Pdf,
            Self::LegacyDoc,
            Self::Docx,
            Self::Json,
            Self::PlainTextOrOther,
        ]
    }
}

impl fmt::Display for FormatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a file from its declared media type and name.
///
/// Rules are evaluated in order and the first match wins. Name checks ignore
/// case; media types are compared without their `;` parameters.
pub fn classify(media_type: &str, name: &str) -> FormatKind {
    let mime = essence(media_type);
    let name = name.to_lowercase();

    if is_image_media_type(&mime) {
        return FormatKind::Image;
    }

    if mime == "application/pdf" {
        return FormatKind::Pdf;
    }

    if is_legacy_doc_name(&name) {
        return FormatKind::LegacyDoc;
    }

    if name.ends_with(".docx") || mime.contains("word") {
        return FormatKind::Docx;
    }

    if mime == "application/json" || name.ends_with(".json") {
        return FormatKind::Json;
    }

    FormatKind::PlainTextOrOther
}

/// Whether the declared media type routes a file to the image upload phase
pub fn is_image_media_type(media_type: &str) -> bool {
    essence(media_type).starts_with("image/")
}

/// Whether the name ends with one of the `ACCEPTED_EXTENSIONS`
pub fn is_accepted_name(name: &str) -> bool {
    let name = name.to_lowercase();
    ACCEPTED_EXTENSIONS.iter().any(|ext| name.ends_with(ext))
}

/// Whether the name carries the legacy binary Word suffix
pub fn is_legacy_doc_name(name: &str) -> bool {
    let name = name.to_lowercase();
    name.ends_with(".doc") && !name.ends_with(".docx")
}

fn essence(media_type: &str) -> String {
    media_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepted_names() {
        assert!(is_accepted_name("Report.PDF"));
        assert!(is_accepted_name("notes.md"));
        assert!(is_accepted_name("old.doc"));
        assert!(!is_accepted_name("archive.zip"));
        assert!(!is_accepted_name("README"));
    }

    #[test]
    fn test_image_media_type_wins() {
        assert_eq!(classify("image/png", "photo.png"), FormatKind::Image);
        assert_eq!(classify("image/webp", "notes.json"), FormatKind::Image);
        assert_eq!(classify("IMAGE/JPEG", "a.jpg"), FormatKind::Image);
    }

    #[test]
    fn test_image_requires_media_type() {
        assert_eq!(classify("", "photo.png"), FormatKind::PlainTextOrOther);
    }

    #[test]
    fn test_pdf_by_media_type_only() {
        assert_eq!(classify("application/pdf", "report"), FormatKind::Pdf);
        assert_eq!(classify("", "report.pdf"), FormatKind::PlainTextOrOther);
    }

    #[test]
    fn test_legacy_doc() {
        assert_eq!(classify("", "notes.doc"), FormatKind::LegacyDoc);
        assert_eq!(classify("application/msword", "NOTES.DOC"), FormatKind::LegacyDoc);
    }

    #[test]
    fn test_docx_case_insensitive() {
        assert_eq!(classify("", "report.DOCX"), FormatKind::Docx);
        assert_eq!(
            classify(
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
                "report"
            ),
            FormatKind::Docx
        );
    }

    #[test]
    fn test_pdf_beats_docx_name() {
        assert_eq!(classify("application/pdf", "weird.docx"), FormatKind::Pdf);
    }

    #[test]
    fn test_json() {
        assert_eq!(classify("application/json", "data"), FormatKind::Json);
        assert_eq!(classify("", "data.JSON"), FormatKind::Json);
        assert_eq!(
            classify("application/json; charset=utf-8", "data"),
            FormatKind::Json
        );
    }

    #[test]
    fn test_fallback() {
        assert_eq!(classify("text/markdown", "post.md"), FormatKind::PlainTextOrOther);
        assert_eq!(classify("", "noextension"), FormatKind::PlainTextOrOther);
        assert_eq!(classify("", ""), FormatKind::PlainTextOrOther);
    }

    #[test]
    fn test_classification_is_stable() {
        let inputs = [
            ("", "a.doc"),
            ("application/pdf", "b.pdf"),
            ("text/plain", "c.txt"),
            ("image/gif", "d.gif"),
        ];

        for (mime, name) in inputs {
            assert_eq!(classify(mime, name), classify(mime, name));
        }
    }

    #[test]
    fn test_is_legacy_doc_name() {
        assert!(is_legacy_doc_name("old.doc"));
        assert!(is_legacy_doc_name("OLD.Doc"));
        assert!(!is_legacy_doc_name("new.docx"));
        assert!(!is_legacy_doc_name("doc"));
    }

    #[test]
    fn test_format_kind_serialization() {
        let json = serde_json::to_string(&FormatKind::LegacyDoc).unwrap();
        assert_eq!(json, "\"legacy_doc\"");
        assert_eq!(FormatKind::PlainTextOrOther.to_string(), "plain_text");
        assert_eq!(FormatKind::all().len(), 6);
    }
}
