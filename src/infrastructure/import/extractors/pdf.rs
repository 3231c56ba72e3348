//! PDF text extractor

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use bytes::Bytes;
use lopdf::content::Content;
use lopdf::{Document as PdfDocument, Object, ObjectId};

use crate::domain::import::{FormatKind, ImportError, SourceFile, TextExtractor};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Extracts page-ordered plain text from PDF files
#[derive(Debug, Clone)]
pub struct PdfExtractor {
    timeout: Duration,
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfExtractor {
    /// Create a new PDF extractor with the default timeout
    pub fn new() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the maximum time spent decoding a single file.
    ///
    /// The decoder checks the deadline between pages and gives up on its own,
    /// so a timed-out file stops holding its buffer shortly after the caller
    /// has moved on.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// One line per page, pages separated by a blank line.
    ///
    /// Decoding stops with an error once `deadline` has passed.
    fn extract_pages(data: &[u8], deadline: Instant) -> Result<String, String> {
        let document =
            PdfDocument::load_mem(data).map_err(|e| format!("failed to parse PDF: {}", e))?;

        // BTreeMap keyed by 1-based page number, so iteration is page order
        let pages = document.get_pages();
        let mut lines = Vec::with_capacity(pages.len());

        for (page_number, page_id) in &pages {
            if Instant::now() >= deadline {
                return Err(format!("timed out before page {}", page_number));
            }

            let items = page_items(&document, *page_id)
                .map_err(|e| format!("failed to decode page {}: {}", page_number, e))?;

            lines.push(join_items(&items));
        }

        Ok(lines.join("\n\n"))
    }
}

/// Text items of one page in content-stream order, one per `Tj`/`TJ` operation
fn page_items(document: &PdfDocument, page_id: ObjectId) -> Result<Vec<String>, lopdf::Error> {
    let encodings: BTreeMap<Vec<u8>, &str> = document
        .get_page_fonts(page_id)
        .into_iter()
        .map(|(name, font)| (name, font.get_font_encoding()))
        .collect();

    let content = Content::decode(&document.get_page_content(page_id)?)?;
    let mut encoding = None;
    let mut items = Vec::new();

    for operation in &content.operations {
        match operation.operator.as_str() {
            "Tf" => {
                encoding = match operation.operands.first() {
                    Some(font) => encodings.get(font.as_name()?).copied(),
                    None => None,
                };
            }
            "Tj" | "TJ" | "'" | "\"" => {
                let mut item = String::new();
                collect_item(&mut item, encoding, &operation.operands);
                items.push(item);
            }
            _ => {}
        }
    }

    Ok(items)
}

fn collect_item(item: &mut String, encoding: Option<&str>, operands: &[Object]) {
    for operand in operands {
        match operand {
            Object::String(bytes, _) => item.push_str(&PdfDocument::decode_text(encoding, bytes)),
            Object::Array(parts) => collect_item(item, encoding, parts),
            // Large negative kerning inside TJ marks a word gap
            Object::Integer(offset) if *offset < -100 => item.push(' '),
            Object::Real(offset) if *offset < -100.0 => item.push(' '),
            _ => {}
        }
    }
}

fn join_items<S: AsRef<str>>(items: &[S]) -> String {
    items
        .iter()
        .map(|item| item.as_ref().trim())
        .filter(|item| !item.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[async_trait]
impl TextExtractor for PdfExtractor {
    fn kind(&self) -> FormatKind {
        FormatKind::Pdf
    }

    #[tracing::instrument(skip(self, file), fields(filename = %file.name(), size = file.len()))]
    async fn extract(&self, file: &SourceFile) -> Result<String, ImportError> {
        let data: Bytes = file.bytes().clone();
        let deadline = Instant::now() + self.timeout;

        let joined = tokio::time::timeout(
            self.timeout,
            tokio::task::spawn_blocking(move || Self::extract_pages(&data, deadline)),
        )
        .await
        .map_err(|_| {
            ImportError::extraction(FormatKind::Pdf, file.name(), "PDF extraction timed out")
        })?
        .map_err(|e| ImportError::unknown(format!("PDF decoder task failed: {}", e)))?;

        let text = joined.map_err(|e| ImportError::extraction(FormatKind::Pdf, file.name(), e))?;

        tracing::debug!(chars = text.len(), "PDF text extraction complete");

        Ok(text)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Object, Stream};

    use super::PdfDocument;

    /// Build a PDF with one page per entry, each text run in its own text block
    pub fn pdf_with_pages(pages: &[&[&str]]) -> Vec<u8> {
        let pages: Vec<Vec<Operation>> = pages
            .iter()
            .map(|runs| {
                let mut operations = Vec::new();
                let mut y: i64 = 700;

                for run in runs.iter() {
                    operations.push(Operation::new("BT", vec![]));
                    operations.push(Operation::new("Tf", vec!["F1".into(), 12.into()]));
                    operations.push(Operation::new("Td", vec![72.into(), y.into()]));
                    operations.push(Operation::new("Tj", vec![Object::string_literal(*run)]));
                    operations.push(Operation::new("ET", vec![]));
                    y -= 20;
                }

                operations
            })
            .collect();

        pdf_with_contents(pages)
    }

    /// Build a one-page PDF whose lines all sit in a single text block
    pub fn pdf_with_text_block(lines: &[&str]) -> Vec<u8> {
        let mut operations = vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 12.into()]),
            Operation::new("Td", vec![72.into(), 700.into()]),
        ];

        for line in lines {
            operations.push(Operation::new("Tj", vec![Object::string_literal(*line)]));
            operations.push(Operation::new("Td", vec![0.into(), (-20).into()]));
        }
        operations.push(Operation::new("ET", vec![]));

        pdf_with_contents(vec![operations])
    }

    /// Build a PDF with one page per operation list
    pub fn pdf_with_contents(pages: Vec<Vec<Operation>>) -> Vec<u8> {
        let mut doc = PdfDocument::with_version("1.5");
        let pages_id = doc.new_object_id();

        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => font_id,
            },
        });

        let mut kids = Vec::new();

        for operations in pages {
            let content = Content { operations };
            let content_id =
                doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(Object::from(page_id));
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer).unwrap();
        buffer
    }
}
