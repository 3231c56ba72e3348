//! Classify command - shows which pipeline each file would take

use std::path::{Path, PathBuf};

use clap::Args;

use crate::domain::import::{classify, FormatKind};

/// Arguments for the classify command
#[derive(Args, Clone, Debug)]
pub struct ClassifyArgs {
    /// Files to classify
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

/// Classify a path by its guessed media type and file name
pub fn classify_path(path: &Path) -> FormatKind {
    let media_type = mime_guess::from_path(path).first_raw().unwrap_or_default();
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    classify(media_type, &name)
}

/// Run the classify command
pub async fn run(args: ClassifyArgs) -> anyhow::Result<()> {
    for path in &args.files {
        println!("{}\t{}", path.display(), classify_path(path));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_path() {
        assert_eq!(classify_path(Path::new("a/report.pdf")), FormatKind::Pdf);
        assert_eq!(classify_path(Path::new("photo.PNG")), FormatKind::Image);
        assert_eq!(classify_path(Path::new("old.doc")), FormatKind::LegacyDoc);
        assert_eq!(classify_path(Path::new("new.docx")), FormatKind::Docx);
        assert_eq!(classify_path(Path::new("data.json")), FormatKind::Json);
        assert_eq!(classify_path(Path::new("notes.md")), FormatKind::PlainTextOrOther);
        assert_eq!(classify_path(Path::new("noext")), FormatKind::PlainTextOrOther);
    }
}
