// src/preview/raster.rs
//! Paints a [`PreviewTree`](super::PreviewTree) into a tiny-skia pixmap.
//!
//! Text is rendered as simplified glyph boxes rather than real font
//! outlines: each character becomes a filled rectangle whose height depends
//! on its class (cap-height, x-height) and whose advance is a fixed
//! fraction of the font size. The result is a faithful grey-box impression
//! of the page that is fully deterministic and needs no font assets.

use tiny_skia::{Paint, PathBuilder, Pixmap, Rect, Transform};

use super::layout::{FontWeight, Primitive, PreviewTree, TextRun};
use super::Rgba;
use crate::error::{BuilderError, Result};

const CHAR_ADVANCE: f32 = 0.6;
// Glyph box heights as a fraction of font size, by character class.
const CAP_HEIGHT: f32 = 0.8;
const X_HEIGHT: f32 = 0.6;
const OTHER_HEIGHT: f32 = 0.7;
// Gap between glyph boxes inside the advance.
const GLYPH_GAP: f32 = 0.12;

fn paint_for(color: Rgba) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, color.a);
    paint.anti_alias = true;
    paint
}

fn fill_rect(pixmap: &mut Pixmap, x: f32, y: f32, w: f32, h: f32, color: Rgba) {
    if let Some(rect) = Rect::from_xywh(x, y, w, h) {
        pixmap.fill_rect(rect, &paint_for(color), Transform::identity(), None);
    }
}

fn fill_circle(pixmap: &mut Pixmap, cx: f32, cy: f32, r: f32, color: Rgba) {
    let mut pb = PathBuilder::new();
    pb.push_circle(cx, cy, r);
    if let Some(path) = pb.finish() {
        pixmap.fill_path(
            &path,
            &paint_for(color),
            tiny_skia::FillRule::Winding,
            Transform::identity(),
            None,
        );
    }
}

/// Rasterize the tree at `target_width` logical pixels times `scale`.
///
/// The page is first fit to `target_width`, then the whole raster is
/// multiplied by `scale`, so a capture at scale 2.0 doubles the pixel
/// density without changing the layout.
pub fn rasterize(tree: &PreviewTree, target_width: f32, scale: f32) -> Result<Pixmap> {
    if tree.width <= 0.0 || tree.height <= 0.0 {
        return Err(BuilderError::InvalidCapture(
            "preview tree has zero extent".to_string(),
        ));
    }

    let total_scale = (target_width / tree.width) * scale;
    let px_w = (tree.width * total_scale).round() as u32;
    let px_h = (tree.height * total_scale).round() as u32;
    let mut pixmap = Pixmap::new(px_w.max(1), px_h.max(1)).ok_or_else(|| {
        BuilderError::InvalidCapture(format!("cannot allocate {}x{} pixmap", px_w, px_h))
    })?;
    pixmap.fill(tiny_skia::Color::WHITE);

    let s = total_scale;
    for primitive in &tree.primitives {
        match primitive {
            Primitive::Rect { x, y, w, h, color } => {
                fill_rect(&mut pixmap, x * s, y * s, w * s, h * s, *color);
            }
            Primitive::Line {
                x,
                y,
                w,
                thickness,
                color,
            } => {
                fill_rect(&mut pixmap, x * s, y * s, w * s, (thickness * s).max(1.0), *color);
            }
            Primitive::Circle { cx, cy, r, color } => {
                fill_circle(&mut pixmap, cx * s, cy * s, r * s, *color);
            }
            Primitive::Photo { x, y, size, image } => {
                blit_photo_circle(&mut pixmap, x * s, y * s, size * s, image);
            }
            Primitive::Text(run) => {
                draw_text_run(&mut pixmap, run, s);
            }
        }
    }

    Ok(pixmap)
}

/// Draw one line of text as glyph boxes. Bold widens each box slightly.
fn draw_text_run(pixmap: &mut Pixmap, run: &TextRun, s: f32) {
    let size = run.size * s;
    let advance = size * CHAR_ADVANCE;
    let baseline = (run.y * s) + size;
    let gap = advance * GLYPH_GAP;
    let box_w = if run.weight == FontWeight::Bold {
        advance - gap * 0.5
    } else {
        advance - gap
    };

    let mut pen_x = run.x * s;
    for ch in run.content.chars() {
        if ch == ' ' {
            pen_x += advance;
            continue;
        }
        let height = if ch.is_ascii_uppercase() || ch.is_ascii_digit() {
            size * CAP_HEIGHT
        } else if ch.is_ascii_lowercase() {
            size * X_HEIGHT
        } else {
            size * OTHER_HEIGHT
        };
        fill_rect(pixmap, pen_x, baseline - height, box_w, height, run.color);
        pen_x += advance;
    }
}

/// Nearest-neighbour blit of the photo, clipped to an inscribed circle.
fn blit_photo_circle(pixmap: &mut Pixmap, x: f32, y: f32, size: f32, image: &image::RgbaImage) {
    let (img_w, img_h) = image.dimensions();
    if img_w == 0 || img_h == 0 || size <= 0.0 {
        return;
    }

    let dest_size = size.round() as i32;
    let radius = size / 2.0;
    let pm_w = pixmap.width() as i32;
    let pm_h = pixmap.height() as i32;
    let data = pixmap.data_mut();

    for dy in 0..dest_size {
        for dx in 0..dest_size {
            let fx = dx as f32 + 0.5 - radius;
            let fy = dy as f32 + 0.5 - radius;
            if fx * fx + fy * fy > radius * radius {
                continue;
            }
            let px = x.round() as i32 + dx;
            let py = y.round() as i32 + dy;
            if px < 0 || py < 0 || px >= pm_w || py >= pm_h {
                continue;
            }
            let sx = ((dx as f32 / size) * img_w as f32) as u32;
            let sy = ((dy as f32 / size) * img_h as f32) as u32;
            let pixel = image.get_pixel(sx.min(img_w - 1), sy.min(img_h - 1));
            // Source photos are opaque, write straight RGBA.
            let offset = ((py * pm_w + px) * 4) as usize;
            data[offset] = pixel[0];
            data[offset + 1] = pixel[1];
            data[offset + 2] = pixel[2];
            data[offset + 3] = 255;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preview::{PreviewTheme, PRIMARY};
    use crate::types::ResumeData;

    fn small_tree() -> PreviewTree {
        PreviewTree {
            width: 100.0,
            height: 50.0,
            primitives: vec![Primitive::Rect {
                x: 10.0,
                y: 10.0,
                w: 20.0,
                h: 20.0,
                color: PRIMARY,
            }],
        }
    }

    #[test]
    fn test_rasterize_dimensions_follow_scale() {
        let tree = small_tree();
        let one = rasterize(&tree, tree.width, 1.0).unwrap();
        assert_eq!((one.width(), one.height()), (100, 50));

        let two = rasterize(&tree, tree.width, 2.0).unwrap();
        assert_eq!((two.width(), two.height()), (200, 100));
    }

    #[test]
    fn test_rasterize_paints_over_white() {
        let tree = small_tree();
        let pixmap = rasterize(&tree, tree.width, 1.0).unwrap();
        // Corner stays white, rect interior takes the fill color.
        let corner = pixmap.pixel(0, 0).unwrap();
        assert_eq!((corner.red(), corner.green(), corner.blue()), (255, 255, 255));
        let inside = pixmap.pixel(20, 20).unwrap();
        assert_eq!(
            (inside.red(), inside.green(), inside.blue()),
            (PRIMARY.r, PRIMARY.g, PRIMARY.b)
        );
    }

    #[test]
    fn test_rasterize_full_page_is_opaque() {
        let mut data = ResumeData::default();
        data.personal_details.name = "Jane Doe".into();
        let tree = crate::preview::render(&data, &PreviewTheme::default());
        let pixmap = rasterize(&tree, tree.width, 1.0).unwrap();
        assert!(pixmap.data().chunks_exact(4).all(|px| px[3] == 255));
    }

    #[test]
    fn test_text_run_marks_pixels() {
        let tree = PreviewTree {
            width: 200.0,
            height: 40.0,
            primitives: vec![Primitive::Text(TextRun {
                x: 5.0,
                y: 5.0,
                size: 20.0,
                color: PRIMARY,
                weight: FontWeight::Regular,
                style: super::super::layout::FontStyle::Normal,
                content: "ABC".into(),
            })],
        };
        let pixmap = rasterize(&tree, tree.width, 1.0).unwrap();
        let non_white = pixmap
            .data()
            .chunks_exact(4)
            .filter(|px| px[0] != 255 || px[1] != 255 || px[2] != 255)
            .count();
        assert!(non_white > 0);
    }
}
