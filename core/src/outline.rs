use crate::geom::{Point, Rect};

pub const OUTLINE_PADDING: f64 = 8.0;
pub const PILL_RADIUS_MAX: f64 = 28.0;
pub const BRAND_EXTRA_RIGHT: f64 = 20.0;
pub const NAV_OUTLINE_RADIUS: f64 = 10.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutlineKind {
    Standard,
    /// Logo link: left edge flush, extra room on the right only.
    Brand,
    /// Links inside `<nav>`: tight rectangle, no padding.
    Nav,
}

/// Geometry the cursor morphs into while an interactive element is hovered.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OutlineBox {
    pub center_x: f64,
    pub center_y: f64,
    pub width: f64,
    pub height: f64,
    pub border_radius: f64,
}

impl OutlineBox {
    fn from_edges(left: f64, top: f64, right: f64, bottom: f64, border_radius: f64) -> Self {
        let width = (right - left).max(0.0);
        let height = (bottom - top).max(0.0);
        Self {
            center_x: left + width * 0.5,
            center_y: top + height * 0.5,
            width,
            height,
            border_radius: border_radius.min(width.min(height) * 0.5).max(0.0),
        }
    }

    pub fn left(&self) -> f64 {
        self.center_x - self.width * 0.5
    }

    pub fn top(&self) -> f64 {
        self.center_y - self.height * 0.5
    }

    pub fn center(&self) -> Point {
        Point::new(self.center_x, self.center_y)
    }

    /// Translation that moves a shape centered on `pointer` onto this box.
    pub fn offset_from(&self, pointer: Point) -> Point {
        self.center() - pointer
    }
}

pub fn pill_radius(height: f64) -> f64 {
    (height * 0.5).min(PILL_RADIUS_MAX).max(0.0)
}

pub fn outline_box(rect: Rect, own_radius: f64, kind: OutlineKind) -> OutlineBox {
    match kind {
        OutlineKind::Nav => OutlineBox::from_edges(
            rect.left,
            rect.top,
            rect.right(),
            rect.bottom(),
            NAV_OUTLINE_RADIUS,
        ),
        OutlineKind::Standard => {
            let height = rect.height + OUTLINE_PADDING * 2.0;
            OutlineBox::from_edges(
                rect.left - OUTLINE_PADDING,
                rect.top - OUTLINE_PADDING,
                rect.right() + OUTLINE_PADDING,
                rect.bottom() + OUTLINE_PADDING,
                own_radius.max(pill_radius(height)),
            )
        }
        OutlineKind::Brand => {
            let height = rect.height + OUTLINE_PADDING * 2.0;
            OutlineBox::from_edges(
                rect.left,
                rect.top - OUTLINE_PADDING,
                rect.right() + OUTLINE_PADDING + BRAND_EXTRA_RIGHT,
                rect.bottom() + OUTLINE_PADDING,
                own_radius.max(pill_radius(height)),
            )
        }
    }
}

/// Reads the leading length of a computed CSS value such as `"12px"` or
/// `"8px 8px 0px 0px"`. Percentages and keywords read as zero.
pub fn parse_css_px(value: &str) -> f64 {
    let first = value.split_whitespace().next().unwrap_or("");
    first
        .strip_suffix("px")
        .and_then(|number| number.parse::<f64>().ok())
        .filter(|number| number.is_finite())
        .unwrap_or(0.0)
        .max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_outline_pads_symmetrically() {
        let rect = Rect::new(100.0, 50.0, 80.0, 24.0);
        let outline = outline_box(rect, 0.0, OutlineKind::Standard);
        assert_eq!(outline.left(), 92.0);
        assert_eq!(outline.top(), 42.0);
        assert_eq!(outline.width, 96.0);
        assert_eq!(outline.height, 40.0);
        assert_eq!(outline.center(), Point::new(140.0, 62.0));
        assert_eq!(outline.border_radius, 20.0);
    }

    #[test]
    fn own_radius_wins_when_larger_but_never_exceeds_half_side() {
        let rect = Rect::new(0.0, 0.0, 200.0, 100.0);
        let outline = outline_box(rect, 40.0, OutlineKind::Standard);
        assert_eq!(outline.border_radius, 40.0);

        let outline = outline_box(rect, 500.0, OutlineKind::Standard);
        assert_eq!(outline.border_radius, 58.0);
    }

    #[test]
    fn brand_outline_keeps_left_edge_flush() {
        let rect = Rect::new(10.0, 10.0, 120.0, 30.0);
        let outline = outline_box(rect, 0.0, OutlineKind::Brand);
        assert_eq!(outline.left(), 10.0);
        assert_eq!(outline.width, 120.0 + OUTLINE_PADDING + BRAND_EXTRA_RIGHT);
        assert_eq!(outline.top(), 2.0);
    }

    #[test]
    fn nav_outline_is_tight() {
        let rect = Rect::new(300.0, 20.0, 64.0, 36.0);
        let outline = outline_box(rect, 0.0, OutlineKind::Nav);
        assert_eq!(outline.left(), 300.0);
        assert_eq!(outline.width, 64.0);
        assert_eq!(outline.height, 36.0);
        assert_eq!(outline.border_radius, NAV_OUTLINE_RADIUS);
    }

    #[test]
    fn parse_css_px_reads_leading_length() {
        assert_eq!(parse_css_px("12px"), 12.0);
        assert_eq!(parse_css_px("8.5px 8px 0px 0px"), 8.5);
        assert_eq!(parse_css_px("50%"), 0.0);
        assert_eq!(parse_css_px(""), 0.0);
    }
}
