//! Strip layout calculations
//!
//! All values are PDF points. Rectangles use a top-left origin (y grows
//! downwards); the PDF writer flips them into user space when it emits content.

use crate::ratio::PageRule;

/// Page dimensions in points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageDimensions {
    pub width: f64,
    pub height: f64,
}

impl PageDimensions {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// US Letter size (8.5" × 11")
    pub fn letter() -> Self {
        Self::new(612.0, 792.0)
    }
}

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self { left, top, right, bottom }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

/// Where one strip comes from on the source page and where it lands on its new page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StripPlacement {
    /// Crop rectangle on the source page
    pub source: Rect,
    /// Target rectangle on the output page; always fills the page
    pub dest: Rect,
}

impl StripPlacement {
    /// Size of the output page holding this strip
    pub fn page_dimensions(&self) -> PageDimensions {
        PageDimensions::new(self.dest.width(), self.dest.height())
    }
}

/// Calculate one placement per ratio, left to right
///
/// The crop of each strip starts where the previous one ended. Destination
/// width equals crop width, so strips are placed without scaling.
pub fn plan_strips(page: &PageDimensions, rule: &PageRule) -> Vec<StripPlacement> {
    let mut offset = 0.0;

    rule.ratios()
        .iter()
        .map(|ratio| {
            let split_width = page.width * ratio;
            let placement = StripPlacement {
                source: Rect::new(offset, 0.0, offset + split_width, page.height),
                dest: Rect::new(0.0, 0.0, split_width, page.height),
            };
            offset += split_width;
            placement
        })
        .collect()
}
