//! Image upload collaborator contract

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::error::ImportError;
use super::source::SourceFile;

#[cfg(test)]
use mockall::automock;

/// Result of uploading one image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ImageUploadItem {
    /// A file stored by the upload subsystem, captioned by its original name
    #[serde(rename = "file")]
    HostedFile {
        filename: String,
        #[serde(rename = "previewUrl")]
        preview_url: String,
    },
    /// An externally hosted image referenced by URL only
    #[serde(rename = "link")]
    HostedLink { url: String },
}

impl ImageUploadItem {
    pub fn file(filename: impl Into<String>, preview_url: impl Into<String>) -> Self {
        Self::HostedFile {
            filename: filename.into(),
            preview_url: preview_url.into(),
        }
    }

    pub fn link(url: impl Into<String>) -> Self {
        Self::HostedLink { url: url.into() }
    }

    /// Render as a markdown image reference
    pub fn to_markdown(&self) -> String {
        match self {
            Self::HostedFile {
                filename,
                preview_url,
            } => format!("![{}]({})", filename, preview_url),
            Self::HostedLink { url } => format!("![]({})", url),
        }
    }
}

/// Uploads every image of a batch in one call.
///
/// Implementations must return one item per input image, in input order.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ImageUploader: Send + Sync {
    async fn upload(&self, images: Vec<SourceFile>) -> Result<Vec<ImageUploadItem>, ImportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hosted_file_markdown() {
        let item = ImageUploadItem::file("cat.png", "/assets/cat.png");
        assert_eq!(item.to_markdown(), "![cat.png](/assets/cat.png)");
    }

    #[test]
    fn test_hosted_link_markdown() {
        let item = ImageUploadItem::link("https://example.com/a.gif");
        assert_eq!(item.to_markdown(), "![](https://example.com/a.gif)");
    }

    #[test]
    fn test_item_wire_format() {
        let item: ImageUploadItem = serde_json::from_str(
            r#"{"type":"file","filename":"a.png","previewUrl":"blob:1"}"#,
        )
        .unwrap();
        assert_eq!(item, ImageUploadItem::file("a.png", "blob:1"));

        let link: ImageUploadItem =
            serde_json::from_str(r#"{"type":"link","url":"https://x/y.png"}"#).unwrap();
        assert_eq!(link, ImageUploadItem::link("https://x/y.png"));
    }
}
