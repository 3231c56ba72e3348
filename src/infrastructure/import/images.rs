//! Image batch handling: markdown rendering and a local asset uploader

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::domain::import::{ImageUploadItem, ImageUploader, ImportError, SourceFile};

/// Render each uploaded image as a markdown image reference
pub fn render_image_fragments(items: &[ImageUploadItem]) -> Vec<String> {
    items.iter().map(ImageUploadItem::to_markdown).collect()
}

/// Stores images in a local assets directory and links them by URL prefix
#[derive(Debug, Clone)]
pub struct LocalAssetUploader {
    assets_dir: PathBuf,
    url_prefix: String,
}

impl LocalAssetUploader {
    pub fn new(assets_dir: impl Into<PathBuf>, url_prefix: impl Into<String>) -> Self {
        Self {
            assets_dir: assets_dir.into(),
            url_prefix: url_prefix.into(),
        }
    }

    pub fn assets_dir(&self) -> &Path {
        &self.assets_dir
    }

    fn stored_name(image: &SourceFile) -> String {
        let id = uuid::Uuid::new_v4().simple();

        match extension_for(image) {
            Some(ext) => format!("{}.{}", id, ext),
            None => id.to_string(),
        }
    }

    fn preview_url(&self, stored_name: &str) -> String {
        let prefix = self.url_prefix.trim_end_matches('/');

        if prefix.is_empty() {
            stored_name.to_string()
        } else {
            format!("{}/{}", prefix, stored_name)
        }
    }

    async fn remove_all(paths: &[PathBuf]) {
        for path in paths {
            if let Err(e) = tokio::fs::remove_file(path).await {
                tracing::warn!(path = %path.display(), error = %e, "Failed to remove partial upload");
            }
        }
    }
}

fn extension_for(image: &SourceFile) -> Option<String> {
    let from_name = Path::new(image.name())
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .filter(|ext| !ext.is_empty());

    from_name.or_else(|| {
        mime_guess::get_mime_extensions_str(image.media_type())
            .and_then(|exts| exts.first())
            .map(|ext| ext.to_string())
    })
}

#[async_trait]
impl ImageUploader for LocalAssetUploader {
    #[tracing::instrument(skip(self, images), fields(count = images.len(), assets_dir = %self.assets_dir.display()))]
    async fn upload(&self, images: Vec<SourceFile>) -> Result<Vec<ImageUploadItem>, ImportError> {
        tokio::fs::create_dir_all(&self.assets_dir)
            .await
            .map_err(|e| ImportError::upload(format!("cannot create assets directory: {}", e)))?;

        let mut written = Vec::with_capacity(images.len());
        let mut items = Vec::with_capacity(images.len());

        for image in &images {
            let stored_name = Self::stored_name(image);
            let path = self.assets_dir.join(&stored_name);

            if let Err(e) = tokio::fs::write(&path, image.bytes()).await {
                Self::remove_all(&written).await;
                return Err(ImportError::upload(format!(
                    "failed to store '{}': {}",
                    image.name(),
                    e
                )));
            }

            tracing::debug!(filename = %image.name(), stored = %stored_name, "Stored image");
            written.push(path);
            items.push(ImageUploadItem::file(image.name(), self.preview_url(&stored_name)));
        }

        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_fragments_in_order() {
        let items = vec![
            ImageUploadItem::file("a.png", "/img/1.png"),
            ImageUploadItem::link("https://cdn/2.gif"),
        ];

        assert_eq!(
            render_image_fragments(&items),
            vec!["![a.png](/img/1.png)", "![](https://cdn/2.gif)"]
        );
    }

    #[test]
    fn test_extension_from_name_then_mime() {
        let named = SourceFile::new("Photo.JPG", "image/jpeg", Vec::new());
        assert_eq!(extension_for(&named).as_deref(), Some("jpg"));

        let unnamed = SourceFile::new("clipboard", "image/png", Vec::new());
        assert_eq!(extension_for(&unnamed).as_deref(), Some("png"));

        let unknown = SourceFile::new("blob", "", Vec::new());
        assert_eq!(extension_for(&unknown), None);
    }

    #[test]
    fn test_preview_url_prefix() {
        let uploader = LocalAssetUploader::new("/tmp/x", "/assets/");
        assert_eq!(uploader.preview_url("a.png"), "/assets/a.png");

        let bare = LocalAssetUploader::new("/tmp/x", "");
        assert_eq!(bare.preview_url("a.png"), "a.png");
    }

    #[tokio::test]
    async fn test_upload_writes_files_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let uploader = LocalAssetUploader::new(dir.path().join("assets"), "assets");
        let images = vec![
            SourceFile::new("one.png", "image/png", b"PNG1".to_vec()),
            SourceFile::new("two.gif", "image/gif", b"GIF2".to_vec()),
        ];

        let items = uploader.upload(images).await.unwrap();

        assert_eq!(items.len(), 2);
        for (item, (expected_name, expected_bytes)) in items
            .iter()
            .zip([("one.png", b"PNG1"), ("two.gif", b"GIF2")])
        {
            match item {
                ImageUploadItem::HostedFile {
                    filename,
                    preview_url,
                } => {
                    assert_eq!(filename, expected_name);
                    let stored = preview_url.strip_prefix("assets/").unwrap();
                    let data = std::fs::read(dir.path().join("assets").join(stored)).unwrap();
                    assert_eq!(&data, expected_bytes);
                }
                other => panic!("unexpected item: {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_upload_failure_is_batch_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, b"file").unwrap();
        let uploader = LocalAssetUploader::new(&blocker, "");

        let result = uploader
            .upload(vec![SourceFile::new("a.png", "image/png", b"x".to_vec())])
            .await;

        assert!(matches!(result, Err(ImportError::UploadBatch { .. })));
    }

    #[tokio::test]
    async fn test_failed_batch_removes_stored_images() {
        let dir = tempfile::tempdir().unwrap();
        let assets = dir.path().join("assets");
        let uploader = LocalAssetUploader::new(&assets, "assets");
        let images = vec![
            SourceFile::new("stored.png", "image/png", b"PNG1".to_vec()),
            // NUL in the extension makes the second write fail
            SourceFile::new("broken.p\0g", "image/png", b"PNG2".to_vec()),
        ];

        let result = uploader.upload(images).await;

        assert!(matches!(result, Err(ImportError::UploadBatch { .. })));
        assert_eq!(std::fs::read_dir(&assets).unwrap().count(), 0);
    }
}
