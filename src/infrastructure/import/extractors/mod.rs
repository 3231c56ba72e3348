//! Text extractor implementations

mod json;
mod pdf;
mod plain_text;
mod word;

pub use json::{normalize_json, JsonExtractor};
pub use pdf::PdfExtractor;
pub use plain_text::PlainTextExtractor;
pub use word::WordExtractor;

#[cfg(test)]
pub(crate) use pdf::fixtures::pdf_with_pages;
#[cfg(test)]
pub(crate) use word::fixtures::docx_with_paragraphs;
