// src/export/pdf.rs
//! Assembles the captured bitmap slices into a multi-page A4 PDF.
//!
//! Each page window becomes a full-width image on its own page. The dpi is
//! chosen so the capture width maps exactly to 210 mm, and the image sits
//! flush with the top edge. The last window is usually shorter than a full
//! page; the rest of that page stays white, which is the padding.

use std::io::BufWriter;

use printpdf::{
    ColorBits, ColorSpace, Image, ImageTransform, ImageXObject, Mm, PdfDocument, Px,
};
use tiny_skia::Pixmap;

use super::pagination::{PageWindow, PAGE_HEIGHT_MM, PAGE_WIDTH_MM};
use crate::error::{BuilderError, Result};

const MM_PER_INCH: f64 = 25.4;

/// Build the PDF bytes from the capture and its page windows.
pub fn assemble(capture: &Pixmap, windows: &[PageWindow], title: &str) -> Result<Vec<u8>> {
    if windows.is_empty() {
        return Err(BuilderError::PdfAssembly("no pages to assemble".to_string()));
    }

    let width = capture.width();
    // Pixels per inch that makes `width` pixels span exactly 210 mm.
    let dpi = width as f64 / PAGE_WIDTH_MM * MM_PER_INCH;

    let (doc, first_page, first_layer) =
        PdfDocument::new(title, Mm(PAGE_WIDTH_MM as f32), Mm(PAGE_HEIGHT_MM as f32), "Layer 1");

    for (index, window) in windows.iter().enumerate() {
        let (page, layer) = if index == 0 {
            (first_page, first_layer)
        } else {
            doc.add_page(Mm(PAGE_WIDTH_MM as f32), Mm(PAGE_HEIGHT_MM as f32), "Layer 1")
        };

        let rgb = slice_rgb(capture, window)?;
        let xobject = ImageXObject {
            width: Px(width as usize),
            height: Px(window.height as usize),
            color_space: ColorSpace::Rgb,
            bits_per_component: ColorBits::Bit8,
            interpolate: true,
            image_data: rgb,
            image_filter: None,
            smask: None,
            clipping_bbox: None,
        };

        let slice_mm = window.height as f64 * PAGE_WIDTH_MM / width as f64;
        let layer_ref = doc.get_page(page).get_layer(layer);
        Image { image: xobject }.add_to_layer(
            layer_ref,
            ImageTransform {
                translate_x: Some(Mm(0.0)),
                translate_y: Some(Mm((PAGE_HEIGHT_MM - slice_mm) as f32)),
                dpi: Some(dpi as f32),
                ..Default::default()
            },
        );
    }

    let mut writer = BufWriter::new(Vec::new());
    doc.save(&mut writer)
        .map_err(|e| BuilderError::PdfAssembly(e.to_string()))?;
    writer
        .into_inner()
        .map_err(|e| BuilderError::PdfAssembly(e.to_string()))
}

/// Copy one window out of the premultiplied RGBA capture as packed RGB.
/// The capture is fully opaque, so premultiplied equals straight color.
fn slice_rgb(capture: &Pixmap, window: &PageWindow) -> Result<Vec<u8>> {
    let width = capture.width() as usize;
    let data = capture.data();
    let start = window.top as usize * width * 4;
    let end = start + window.height as usize * width * 4;
    if end > data.len() {
        return Err(BuilderError::PdfAssembly(format!(
            "page window {}..{} exceeds capture of {} rows",
            window.top,
            window.top + window.height,
            capture.height()
        )));
    }

    let mut rgb = Vec::with_capacity(window.height as usize * width * 3);
    for pixel in data[start..end].chunks_exact(4) {
        rgb.extend_from_slice(&pixel[..3]);
    }
    Ok(rgb)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::pagination::paginate;

    fn capture(width: u32, height: u32) -> Pixmap {
        let mut pixmap = Pixmap::new(width, height).unwrap();
        pixmap.fill(tiny_skia::Color::WHITE);
        pixmap
    }

    #[test]
    fn test_assemble_produces_pdf_bytes() {
        let pixmap = capture(100, 250);
        let windows = paginate(pixmap.height(), 100);
        let bytes = assemble(&pixmap, &windows, "Test Resume").unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_assemble_rejects_empty_windows() {
        let pixmap = capture(100, 100);
        assert!(assemble(&pixmap, &[], "Test").is_err());
    }

    #[test]
    fn test_slice_rgb_extracts_window() {
        let pixmap = capture(4, 4);
        let rgb = slice_rgb(&pixmap, &PageWindow { top: 1, height: 2 }).unwrap();
        assert_eq!(rgb.len(), 4 * 2 * 3);
        assert!(rgb.iter().all(|&b| b == 255));
    }

    #[test]
    fn test_slice_rgb_rejects_out_of_range() {
        let pixmap = capture(4, 4);
        assert!(slice_rgb(&pixmap, &PageWindow { top: 3, height: 2 }).is_err());
    }
}
