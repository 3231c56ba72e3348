//! Import pipeline implementations
//!
//! Extractors for each document format, the image uploader, document
//! buffers and the orchestrator that ties them together.

pub mod buffer;
pub mod extractors;
pub mod factory;
pub mod images;
pub mod notifier;
pub mod orchestrator;

pub use buffer::{InMemoryDocumentBuffer, MarkdownFileBuffer};
pub use extractors::{
    normalize_json, JsonExtractor, PdfExtractor, PlainTextExtractor, WordExtractor,
};
pub use factory::{ExtractorFactory, ExtractorRegistry};
pub use images::{render_image_fragments, LocalAssetUploader};
pub use notifier::TracingNotifier;
pub use orchestrator::{assemble, frame_fragment, ImportOrchestrator};
