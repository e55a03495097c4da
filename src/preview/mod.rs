// src/preview/mod.rs
//! Preview renderer: a pure mapping from the resume document and a color
//! theme to a fixed-page-width tree of positioned primitives, plus the
//! rasterizer that paints that tree and the stage it is mounted on.
//!
//! Rendering reads nothing but its inputs, so the same document and theme
//! always produce the same tree and the same raster. The exporter depends
//! on that: what it captures is exactly what the preview shows.

pub mod layout;
pub mod raster;
pub mod stage;

pub use layout::{PreviewTree, Primitive, TextRun, PAGE_WIDTH_PX};
pub use stage::{Display, InlineStyle, MountedNode, Stage, StyleGuard, PREVIEW_NODE_ID};

use crate::error::{BuilderError, Result};
use crate::types::ResumeData;

/// Solid RGBA color. Preview colors are fully opaque.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse a `#RRGGBB` hex string.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(BuilderError::InvalidColor(hex.to_string()));
        }
        let parse = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| BuilderError::InvalidColor(hex.to_string()))
        };
        Ok(Self {
            r: parse(0..2)?,
            g: parse(2..4)?,
            b: parse(4..6)?,
            a: 255,
        })
    }
}

// Fixed palette; only the four theme slots below are configurable.
pub const HEADER_BG: Rgba = Rgba::rgb(0xEF, 0xF6, 0xFF);
pub const ACCENT: Rgba = Rgba::rgb(0x39, 0xA2, 0xDB);
pub const PRIMARY: Rgba = Rgba::rgb(0x30, 0x47, 0x5E);
pub const BODY_TEXT: Rgba = Rgba::rgb(0x33, 0x33, 0x33);
pub const MUTED_TEXT: Rgba = Rgba::rgb(0x55, 0x55, 0x55);
pub const WHITE: Rgba = Rgba::rgb(0xFF, 0xFF, 0xFF);

/// The configurable colors of the rendered preview: sidebar background and
/// text, and the skill/strength/weakness tag boxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewTheme {
    pub sidebar_bg: Rgba,
    pub sidebar_text: Rgba,
    pub tag_bg: Rgba,
    pub tag_text: Rgba,
}

impl Default for PreviewTheme {
    fn default() -> Self {
        Self {
            sidebar_bg: PRIMARY,
            sidebar_text: WHITE,
            tag_bg: HEADER_BG,
            tag_text: PRIMARY,
        }
    }
}

impl PreviewTheme {
    pub fn from_hex(
        sidebar_bg: &str,
        sidebar_text: &str,
        tag_bg: &str,
        tag_text: &str,
    ) -> Result<Self> {
        Ok(Self {
            sidebar_bg: Rgba::from_hex(sidebar_bg)?,
            sidebar_text: Rgba::from_hex(sidebar_text)?,
            tag_bg: Rgba::from_hex(tag_bg)?,
            tag_text: Rgba::from_hex(tag_text)?,
        })
    }
}

/// Render the document into a preview tree. Pure; does not touch the stage.
pub fn render(data: &ResumeData, theme: &PreviewTheme) -> PreviewTree {
    layout::build_tree(data, theme)
}
