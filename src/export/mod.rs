// src/export/mod.rs
//! Capture-and-paginate PDF export.
//!
//! The exporter does not re-render from the document model. It captures the
//! mounted preview node exactly as the stage holds it, forces the print
//! width for the capture, validates the captured PNG, cuts the bitmap into
//! A4 windows and assembles the pages. The node's inline style is restored
//! on every exit path.

pub mod pagination;
pub mod pdf;

use tracing::{debug, info};

use crate::error::{BuilderError, Result};
use crate::preview::{raster, Stage, StyleGuard, PAGE_WIDTH_PX};
use crate::utils::derive_pdf_filename;

pub use pagination::{page_window_height, paginate, PageWindow};

/// Capture density multiplier. Doubles the pixel count in both axes.
pub const CAPTURE_SCALE: f32 = 2.0;

const PNG_SIGNATURE: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// Inputs the exporter needs beyond the stage itself.
#[derive(Debug, Clone)]
pub struct ExportMeta {
    /// Subject's name, used to derive the download filename.
    pub subject_name: String,
}

/// A finished export ready to hand to the caller.
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub page_count: usize,
}

/// Export the mounted preview node as a paginated A4 PDF.
pub fn export_pdf(stage: &mut Stage, node_id: &str, meta: &ExportMeta) -> Result<ExportArtifact> {
    let node = stage
        .node_mut(node_id)
        .ok_or_else(|| BuilderError::ExportTargetMissing(node_id.to_string()))?;

    // Visibility check happens before any capture work.
    let (w, h) = (node.measured_width(), node.measured_height());
    if w <= 0.0 || h <= 0.0 {
        return Err(BuilderError::ExportTargetHidden {
            width: w as u32,
            height: h as u32,
        });
    }

    let guard = StyleGuard::force(node, PAGE_WIDTH_PX);
    let capture = raster::rasterize(&guard.node().tree, PAGE_WIDTH_PX, CAPTURE_SCALE)?;
    drop(guard);

    let png = capture
        .encode_png()
        .map_err(|e| BuilderError::InvalidCapture(e.to_string()))?;
    if !png.starts_with(PNG_SIGNATURE) {
        return Err(BuilderError::InvalidCapture(
            "capture did not produce a PNG image".to_string(),
        ));
    }
    debug!(
        width = capture.width(),
        height = capture.height(),
        png_bytes = png.len(),
        "captured preview node"
    );

    let windows = paginate(capture.height(), page_window_height(capture.width()));
    let filename = derive_pdf_filename(&meta.subject_name);
    let bytes = pdf::assemble(&capture, &windows, &filename)?;

    info!(
        filename = %filename,
        pages = windows.len(),
        bytes = bytes.len(),
        "assembled resume PDF"
    );

    Ok(ExportArtifact {
        filename,
        bytes,
        page_count: windows.len(),
    })
}

/// Write the artifact under `output_dir`, creating it if needed.
pub async fn save_artifact(artifact: &ExportArtifact, output_dir: &std::path::Path) -> Result<std::path::PathBuf> {
    crate::utils::ensure_directory(output_dir)
        .await
        .map_err(|e| BuilderError::PdfAssembly(e.to_string()))?;
    let path = crate::utils::artifact_path(output_dir, &artifact.filename);
    tokio::fs::write(&path, &artifact.bytes).await?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preview::{render, Display, PreviewTheme, PreviewTree, PREVIEW_NODE_ID};
    use crate::types::ResumeData;

    fn mounted_stage() -> Stage {
        let mut data = ResumeData::default();
        data.personal_details.name = "Jane Doe".into();
        data.objective = "Build things well.".into();
        let mut stage = Stage::new();
        stage.mount(PREVIEW_NODE_ID, render(&data, &PreviewTheme::default()));
        stage
    }

    fn meta() -> ExportMeta {
        ExportMeta {
            subject_name: "Jane Doe".into(),
        }
    }

    #[test]
    fn test_export_missing_node_fails() {
        let mut stage = Stage::new();
        let err = export_pdf(&mut stage, PREVIEW_NODE_ID, &meta()).unwrap_err();
        assert!(matches!(err, BuilderError::ExportTargetMissing(_)));
    }

    #[test]
    fn test_export_hidden_node_fails_before_capture() {
        let mut stage = mounted_stage();
        stage.node_mut(PREVIEW_NODE_ID).unwrap().style.display = Display::None;
        let err = export_pdf(&mut stage, PREVIEW_NODE_ID, &meta()).unwrap_err();
        assert!(matches!(err, BuilderError::ExportTargetHidden { .. }));
    }

    #[test]
    fn test_export_empty_tree_fails() {
        let mut stage = Stage::new();
        stage.mount(
            PREVIEW_NODE_ID,
            PreviewTree {
                width: 794.0,
                height: 1123.0,
                primitives: Vec::new(),
            },
        );
        let err = export_pdf(&mut stage, PREVIEW_NODE_ID, &meta()).unwrap_err();
        assert!(matches!(err, BuilderError::ExportTargetHidden { .. }));
    }

    #[test]
    fn test_export_produces_pdf_and_restores_style() {
        let mut stage = mounted_stage();
        stage.node_mut(PREVIEW_NODE_ID).unwrap().style.width = Some(480.0);

        let artifact = export_pdf(&mut stage, PREVIEW_NODE_ID, &meta()).unwrap();
        assert_eq!(artifact.filename, "Jane_Doe_Resume.pdf");
        assert!(artifact.bytes.starts_with(b"%PDF"));
        assert!(artifact.page_count >= 1);

        // On-screen width forced for capture comes back afterwards.
        let style = stage.node(PREVIEW_NODE_ID).unwrap().style;
        assert_eq!(style.width, Some(480.0));
    }

    #[test]
    fn test_export_page_count_matches_capture_height() {
        let mut data = ResumeData::default();
        data.personal_details.name = "Jane Doe".into();
        for i in 0..25 {
            let mut exp = crate::types::ExperienceEntry::empty();
            exp.role = format!("Role {}", i);
            exp.company = "Acme".into();
            exp.duration = "2020".into();
            exp.responsibilities = vec!["Did a lot of careful, detailed work every day.".into(); 4];
            data.professional_details.experience.push(exp);
        }
        let mut stage = Stage::new();
        stage.mount(PREVIEW_NODE_ID, render(&data, &PreviewTheme::default()));

        let artifact = export_pdf(&mut stage, PREVIEW_NODE_ID, &meta()).unwrap();
        assert!(artifact.page_count > 1);
    }

    #[tokio::test]
    async fn test_save_artifact_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let artifact = ExportArtifact {
            filename: "Jane_Doe_Resume.pdf".into(),
            bytes: b"%PDF-1.3 test".to_vec(),
            page_count: 1,
        };
        let path = save_artifact(&artifact, dir.path()).await.unwrap();
        assert_eq!(tokio::fs::read(&path).await.unwrap(), artifact.bytes);
    }
}
