// src/preview/layout.rs
//! Layout pass of the preview renderer.
//!
//! Builds the two-region page (sidebar + main column) as a flat list of
//! absolutely positioned primitives in logical pixels at 96 dpi. The page
//! is always 794 px wide (210 mm); height starts at one A4 page (1123 px)
//! and grows with content.

use image::RgbaImage;

use super::{PreviewTheme, Rgba, ACCENT, BODY_TEXT, HEADER_BG, MUTED_TEXT, PRIMARY};
use crate::types::ResumeData;

/// 210 mm at 96 dpi.
pub const PAGE_WIDTH_PX: f32 = 794.0;
/// 297 mm at 96 dpi.
pub const MIN_PAGE_HEIGHT_PX: f32 = 1123.0;

const SIDEBAR_RATIO: f32 = 0.35;
const SIDEBAR_PAD: f32 = 20.0;
const MAIN_PAD: f32 = 25.0;
const HEADER_BAND_H: f32 = 90.0;
const PHOTO_SIZE: f32 = 100.0;
const TAG_HEIGHT: f32 = 22.0;
/// Estimated glyph advance as a fraction of font size.
const CHAR_ADVANCE: f32 = 0.6;
const LINE_SPACING: f32 = 1.45;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Regular,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStyle {
    Normal,
    Italic,
}

#[derive(Debug, Clone)]
pub struct TextRun {
    pub x: f32,
    /// Top of the line box.
    pub y: f32,
    pub size: f32,
    pub color: Rgba,
    pub weight: FontWeight,
    pub style: FontStyle,
    pub content: String,
}

#[derive(Debug, Clone)]
pub enum Primitive {
    Rect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        color: Rgba,
    },
    /// Horizontal rule (section underlines).
    Line {
        x: f32,
        y: f32,
        w: f32,
        thickness: f32,
        color: Rgba,
    },
    Circle {
        cx: f32,
        cy: f32,
        r: f32,
        color: Rgba,
    },
    /// Decoded profile photo, clipped to a circle of diameter `size`.
    Photo {
        x: f32,
        y: f32,
        size: f32,
        image: RgbaImage,
    },
    Text(TextRun),
}

#[derive(Debug, Clone)]
pub struct PreviewTree {
    pub width: f32,
    pub height: f32,
    pub primitives: Vec<Primitive>,
}

impl PreviewTree {
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }
}

/// Greedy word wrap using the estimated glyph advance. Words longer than a
/// line are placed on their own line rather than split.
pub fn wrap_text(text: &str, size: f32, max_width: f32) -> Vec<String> {
    let max_chars = (max_width / (size * CHAR_ADVANCE)).floor().max(1.0) as usize;
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.chars().count() + 1 + word.chars().count() <= max_chars {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn line_height(size: f32) -> f32 {
    size * LINE_SPACING
}

/// Cursor-based emitter for one column of the page.
struct Column {
    x: f32,
    y: f32,
    width: f32,
    out: Vec<Primitive>,
}

impl Column {
    fn new(x: f32, y: f32, width: f32) -> Self {
        Self {
            x,
            y,
            width,
            out: Vec::new(),
        }
    }

    fn text_line(&mut self, content: &str, size: f32, color: Rgba, weight: FontWeight, style: FontStyle) {
        self.out.push(Primitive::Text(TextRun {
            x: self.x,
            y: self.y,
            size,
            color,
            weight,
            style,
            content: content.to_string(),
        }));
        self.y += line_height(size);
    }

    /// Wrapped paragraph at the column width, optionally indented.
    fn paragraph(&mut self, content: &str, size: f32, color: Rgba, indent: f32) {
        for line in wrap_text(content, size, self.width - indent) {
            self.out.push(Primitive::Text(TextRun {
                x: self.x + indent,
                y: self.y,
                size,
                color,
                weight: FontWeight::Regular,
                style: FontStyle::Normal,
                content: line,
            }));
            self.y += line_height(size);
        }
    }

    fn gap(&mut self, px: f32) {
        self.y += px;
    }
}

/// Build the preview tree. Pure function of its inputs.
pub fn build_tree(data: &ResumeData, theme: &PreviewTheme) -> PreviewTree {
    let sidebar_w = PAGE_WIDTH_PX * SIDEBAR_RATIO;
    let main_x = sidebar_w + MAIN_PAD;
    let main_w = PAGE_WIDTH_PX - sidebar_w - 2.0 * MAIN_PAD;

    let sidebar = build_sidebar(data, theme, sidebar_w);
    let main = build_main(data, main_x, main_w);

    let content_height = sidebar.y.max(main.y) + SIDEBAR_PAD;
    let height = content_height.max(MIN_PAGE_HEIGHT_PX);

    // Background regions first so text paints over them.
    let mut primitives = vec![
        Primitive::Rect {
            x: 0.0,
            y: 0.0,
            w: sidebar_w,
            h: height,
            color: theme.sidebar_bg,
        },
        Primitive::Rect {
            x: sidebar_w,
            y: 0.0,
            w: PAGE_WIDTH_PX - sidebar_w,
            h: HEADER_BAND_H,
            color: HEADER_BG,
        },
    ];
    primitives.extend(sidebar.out);
    primitives.extend(main.out);

    PreviewTree {
        width: PAGE_WIDTH_PX,
        height,
        primitives,
    }
}

fn build_sidebar(data: &ResumeData, theme: &PreviewTheme, sidebar_w: f32) -> Column {
    let mut col = Column::new(SIDEBAR_PAD, MAIN_PAD, sidebar_w - 2.0 * SIDEBAR_PAD);
    let personal = &data.personal_details;
    let professional = &data.professional_details;

    if let Some(photo_bytes) = &personal.photo {
        // An undecodable photo is skipped; the resume renders without it.
        if let Ok(decoded) = image::load_from_memory(photo_bytes) {
            let cx = sidebar_w / 2.0;
            let r = PHOTO_SIZE / 2.0;
            col.out.push(Primitive::Circle {
                cx,
                cy: col.y + r,
                r: r + 3.0,
                color: theme.sidebar_text,
            });
            col.out.push(Primitive::Photo {
                x: cx - r,
                y: col.y,
                size: PHOTO_SIZE,
                image: decoded.to_rgba8(),
            });
            col.gap(PHOTO_SIZE + 25.0);
        }
    }

    sidebar_heading(&mut col, "PERSONAL INFO", theme);
    col.paragraph(&personal.email, 11.0, theme.sidebar_text, 0.0);
    col.paragraph(&personal.phone, 11.0, theme.sidebar_text, 0.0);
    col.paragraph(&personal.address, 11.0, theme.sidebar_text, 0.0);
    if !personal.linkedin.is_empty() {
        col.gap(6.0);
        col.paragraph(
            &format!("LinkedIn: {}", personal.linkedin),
            11.0,
            theme.sidebar_text,
            0.0,
        );
    }
    col.gap(15.0);

    if !professional.education.is_empty() {
        sidebar_heading(&mut col, "EDUCATION", theme);
        for edu in &professional.education {
            col.paragraph(&edu.degree, 11.0, theme.sidebar_text, 0.0);
            col.paragraph(&edu.institution, 11.0, theme.sidebar_text, 0.0);
            col.text_line(
                &edu.graduation_year,
                11.0,
                theme.sidebar_text,
                FontWeight::Regular,
                FontStyle::Italic,
            );
            if let Some(details) = &edu.details {
                if !details.is_empty() {
                    col.paragraph(details, 10.0, theme.sidebar_text, 0.0);
                }
            }
            col.gap(10.0);
        }
        col.gap(5.0);
    }

    for (title, items) in [
        ("SKILLS", &professional.skills),
        ("STRENGTHS", &professional.strengths),
        ("WEAKNESSES", &professional.weaknesses),
    ] {
        if items.is_empty() {
            continue;
        }
        sidebar_heading(&mut col, title, theme);
        for item in items {
            col.out.push(Primitive::Rect {
                x: col.x,
                y: col.y,
                w: col.width,
                h: TAG_HEIGHT,
                color: theme.tag_bg,
            });
            col.out.push(Primitive::Text(TextRun {
                x: col.x + 8.0,
                y: col.y + 5.0,
                size: 11.0,
                color: theme.tag_text,
                weight: FontWeight::Regular,
                style: FontStyle::Normal,
                content: item.clone(),
            }));
            col.gap(TAG_HEIGHT + 6.0);
        }
        col.gap(9.0);
    }

    col
}

fn sidebar_heading(col: &mut Column, title: &str, theme: &PreviewTheme) {
    col.text_line(title, 13.0, theme.sidebar_text, FontWeight::Bold, FontStyle::Normal);
    col.gap(4.0);
}

fn build_main(data: &ResumeData, main_x: f32, main_w: f32) -> Column {
    let mut col = Column::new(main_x, 30.0, main_w);
    let professional = &data.professional_details;

    let display_name = if data.personal_details.name.is_empty() {
        "Your Name"
    } else {
        &data.personal_details.name
    };
    col.text_line(display_name, 30.0, PRIMARY, FontWeight::Bold, FontStyle::Normal);
    col.y = col.y.max(HEADER_BAND_H) + 20.0;

    if !data.objective.is_empty() {
        section_heading(&mut col, "SUMMARY");
        col.paragraph(&data.objective, 12.0, BODY_TEXT, 0.0);
        col.gap(20.0);
    }

    if !professional.experience.is_empty() {
        section_heading(&mut col, "WORK EXPERIENCE");
        for exp in &professional.experience {
            col.text_line(&exp.role, 14.0, PRIMARY, FontWeight::Bold, FontStyle::Normal);
            col.text_line(&exp.company, 12.0, BODY_TEXT, FontWeight::Regular, FontStyle::Normal);
            col.text_line(&exp.duration, 11.0, MUTED_TEXT, FontWeight::Regular, FontStyle::Italic);
            col.gap(2.0);
            for resp in &exp.responsibilities {
                bullet_item(&mut col, resp);
            }
            col.gap(15.0);
        }
        col.gap(5.0);
    }

    if !professional.achievements.is_empty() {
        section_heading(&mut col, "ACHIEVEMENTS");
        for achievement in &professional.achievements {
            bullet_item(&mut col, achievement);
        }
        col.gap(20.0);
    }

    section_heading(&mut col, "REFERENCES");
    col.text_line(
        "References available upon request.",
        12.0,
        BODY_TEXT,
        FontWeight::Regular,
        FontStyle::Italic,
    );

    col
}

fn section_heading(col: &mut Column, title: &str) {
    col.text_line(title, 14.0, PRIMARY, FontWeight::Bold, FontStyle::Normal);
    col.out.push(Primitive::Line {
        x: col.x,
        y: col.y - 4.0,
        w: col.width,
        thickness: 2.0,
        color: ACCENT,
    });
    col.gap(10.0);
}

fn bullet_item(col: &mut Column, text: &str) {
    col.out.push(Primitive::Circle {
        cx: col.x + 4.0,
        cy: col.y + 7.0,
        r: 2.0,
        color: BODY_TEXT,
    });
    col.paragraph(text, 12.0, BODY_TEXT, 14.0);
    col.gap(4.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ExperienceEntry;

    #[test]
    fn test_wrap_text_respects_width() {
        // 12px font, 0.6 advance -> 7.2px per char; 72px fits 10 chars.
        let lines = wrap_text("one two three four", 12.0, 72.0);
        assert!(lines.iter().all(|l| l.chars().count() <= 10));
        assert_eq!(lines.join(" "), "one two three four");
    }

    #[test]
    fn test_wrap_text_long_word_kept_whole() {
        let lines = wrap_text("supercalifragilistic", 12.0, 36.0);
        assert_eq!(lines, vec!["supercalifragilistic".to_string()]);
    }

    #[test]
    fn test_empty_resume_fills_one_page() {
        let tree = build_tree(&ResumeData::default(), &PreviewTheme::default());
        assert_eq!(tree.width, PAGE_WIDTH_PX);
        assert_eq!(tree.height, MIN_PAGE_HEIGHT_PX);
        assert!(!tree.is_empty());
    }

    #[test]
    fn test_tall_resume_grows_past_one_page() {
        let mut data = ResumeData::default();
        for i in 0..30 {
            let mut exp = ExperienceEntry::empty();
            exp.company = format!("Company {}", i);
            exp.role = "Engineer".into();
            exp.duration = "2020 - 2024".into();
            exp.responsibilities =
                vec!["Designed and delivered a long-running data pipeline.".into(); 3];
            data.professional_details.experience.push(exp);
        }
        let tree = build_tree(&data, &PreviewTheme::default());
        assert!(tree.height > MIN_PAGE_HEIGHT_PX);
    }

    #[test]
    fn test_sidebar_rect_spans_full_height() {
        let tree = build_tree(&ResumeData::default(), &PreviewTheme::default());
        match &tree.primitives[0] {
            Primitive::Rect { x, y, h, .. } => {
                assert_eq!(*x, 0.0);
                assert_eq!(*y, 0.0);
                assert_eq!(*h, tree.height);
            }
            other => panic!("expected sidebar rect first, got {:?}", other),
        }
    }
}
