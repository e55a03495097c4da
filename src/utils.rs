// src/utils.rs
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Derive the download filename from the subject's name.
///
/// Whitespace runs collapse to `_`; an empty name falls back to `Resume`,
/// so the default download is `Resume_Resume.pdf`.
pub fn derive_pdf_filename(subject_name: &str) -> String {
    let stem = subject_name.split_whitespace().collect::<Vec<_>>().join("_");
    if stem.is_empty() {
        "Resume_Resume.pdf".to_string()
    } else {
        format!("{}_Resume.pdf", stem)
    }
}

/// Ensure directory exists
pub async fn ensure_directory(path: &Path) -> Result<()> {
    if !path.exists() {
        tokio::fs::create_dir_all(path)
            .await
            .with_context(|| format!("Failed to create directory: {}", path.display()))?;
    }
    Ok(())
}

/// Build the on-disk path for an export artifact
pub fn artifact_path(output_dir: &Path, filename: &str) -> PathBuf {
    output_dir.join(filename)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_pdf_filename() {
        assert_eq!(derive_pdf_filename("Jane Q. Doe"), "Jane_Q._Doe_Resume.pdf");
        assert_eq!(derive_pdf_filename("Ada"), "Ada_Resume.pdf");
        assert_eq!(
            derive_pdf_filename("  spaced   out  "),
            "spaced_out_Resume.pdf"
        );
    }

    #[test]
    fn test_derive_pdf_filename_empty_name() {
        assert_eq!(derive_pdf_filename(""), "Resume_Resume.pdf");
        assert_eq!(derive_pdf_filename("   "), "Resume_Resume.pdf");
    }

    #[test]
    fn test_artifact_path_joins_under_output_dir() {
        let path = artifact_path(Path::new("/tmp/out"), "Ada_Resume.pdf");
        assert_eq!(path, PathBuf::from("/tmp/out/Ada_Resume.pdf"));
    }
}
