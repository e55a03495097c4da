// src/export/pagination.rs
//! Splits the captured bitmap into A4 page windows.
//!
//! The capture is one tall bitmap whose width maps to 210 mm. One page of
//! that bitmap therefore covers `width * 297 / 210` rows. Windows abut
//! exactly; the last one is shorter and gets white-padded at assembly.

pub const PAGE_WIDTH_MM: f64 = 210.0;
pub const PAGE_HEIGHT_MM: f64 = 297.0;

/// One page's slice of the capture, in bitmap rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub top: u32,
    pub height: u32,
}

/// Rows of capture covered by one A4 page at the capture's width.
pub fn page_window_height(bitmap_width: u32) -> u32 {
    let h = (bitmap_width as f64 * PAGE_HEIGHT_MM / PAGE_WIDTH_MM).round() as u32;
    h.max(1)
}

/// Cut `total_height` rows into abutting windows of at most `page_height`.
pub fn paginate(total_height: u32, page_height: u32) -> Vec<PageWindow> {
    assert!(page_height > 0);
    let mut windows = Vec::new();
    let mut top = 0;
    while top < total_height {
        let height = page_height.min(total_height - top);
        windows.push(PageWindow { top, height });
        top += height;
    }
    windows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_window_height_is_a4_ratio() {
        // 1588 px wide capture (794 * 2): 1588 * 297 / 210 = 2246.05...
        assert_eq!(page_window_height(1588), 2246);
        assert_eq!(page_window_height(794), 1123);
    }

    #[test]
    fn test_paginate_count_is_ceiling() {
        assert_eq!(paginate(1000, 1000).len(), 1);
        assert_eq!(paginate(1001, 1000).len(), 2);
        assert_eq!(paginate(3000, 1000).len(), 3);
        assert_eq!(paginate(1, 1000).len(), 1);
    }

    #[test]
    fn test_paginate_windows_abut_and_cover() {
        let windows = paginate(2500, 1000);
        assert_eq!(windows[0], PageWindow { top: 0, height: 1000 });
        assert_eq!(windows[1], PageWindow { top: 1000, height: 1000 });
        assert_eq!(windows[2], PageWindow { top: 2000, height: 500 });

        let covered: u32 = windows.iter().map(|w| w.height).sum();
        assert_eq!(covered, 2500);
        for pair in windows.windows(2) {
            assert_eq!(pair[0].top + pair[0].height, pair[1].top);
        }
    }

    #[test]
    fn test_paginate_empty_capture_yields_no_pages() {
        assert!(paginate(0, 1000).is_empty());
    }
}
