//! Coordinate transformation between canvas and PDF coordinate systems
//!
//! The canvas has a top-left pixel origin; PDF point space has a bottom-left
//! origin. A page's [`Viewport`] fixes the mapping for the whole session, so
//! the same box position always produces the same PDF coordinates.

use serde::{Deserialize, Serialize};

/// Rendered size of one page's canvas
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width_px: f64,
    pub height_px: f64,
    pub scale: f64,
}

impl Viewport {
    pub fn new(width_px: f64, height_px: f64, scale: f64) -> Self {
        Self {
            width_px,
            height_px,
            scale,
        }
    }

    /// Canvas pixels (top-left origin) to PDF points (bottom-left origin)
    pub fn canvas_to_pdf(&self, x: f64, y: f64) -> (f64, f64) {
        (x / self.scale, (self.height_px - y) / self.scale)
    }

    /// PDF points to canvas pixels, the exact inverse of [`canvas_to_pdf`]
    ///
    /// [`canvas_to_pdf`]: Viewport::canvas_to_pdf
    pub fn pdf_to_canvas(&self, x: f64, y: f64) -> (f64, f64) {
        (x * self.scale, self.height_px - y * self.scale)
    }

    /// Convert a pixel length to points
    pub fn to_points(&self, len_px: f64) -> f64 {
        len_px / self.scale
    }

    /// First-line baseline for a box whose top edge sits at `top_y_px`.
    ///
    /// The box top is transformed to PDF space and the baseline sits one
    /// font-size unit below it. This one convention is used everywhere;
    /// the preview and the server output agree because both derive from it.
    pub fn baseline_for_box_top(&self, top_y_px: f64, font_size_pt: f64) -> f64 {
        (self.height_px - top_y_px) / self.scale - font_size_pt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canvas_origin_maps_to_page_top() {
        // Letter page at 1.5x: 918x1188 canvas
        let vp = Viewport::new(918.0, 1188.0, 1.5);
        let (x, y) = vp.canvas_to_pdf(0.0, 0.0);
        assert_eq!(x, 0.0);
        assert_eq!(y, 792.0);
    }

    #[test]
    fn canvas_bottom_maps_to_pdf_origin() {
        let vp = Viewport::new(918.0, 1188.0, 1.5);
        let (x, y) = vp.canvas_to_pdf(0.0, 1188.0);
        assert_eq!(x, 0.0);
        assert_eq!(y, 0.0);
    }

    #[test]
    fn x_divides_by_scale() {
        let vp = Viewport::new(918.0, 1188.0, 1.5);
        let (x, _) = vp.canvas_to_pdf(150.0, 0.0);
        assert_eq!(x, 100.0);
    }

    #[test]
    fn lengths_divide_by_scale() {
        let vp = Viewport::new(918.0, 1188.0, 1.5);
        assert_eq!(vp.to_points(90.0), 60.0);
    }

    #[test]
    fn baseline_sits_one_font_size_below_box_top() {
        let vp = Viewport::new(612.0, 792.0, 1.0);
        // Box top at canvas y=92 on a 1.0-scale page: top edge is at
        // 700pt, so a 16pt font baseline lands at 684pt.
        let baseline = vp.baseline_for_box_top(92.0, 16.0);
        assert_eq!(baseline, 684.0);
    }

    #[test]
    fn baseline_accounts_for_scale() {
        let vp = Viewport::new(918.0, 1188.0, 1.5);
        let baseline = vp.baseline_for_box_top(138.0, 12.0);
        // (1188 - 138) / 1.5 = 700, minus the font size
        assert_eq!(baseline, 688.0);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn dimension() -> impl Strategy<Value = f64> {
        1.0f64..4000.0
    }

    fn scale() -> impl Strategy<Value = f64> {
        0.25f64..4.0
    }

    proptest! {
        /// Canvas to PDF and back returns the original point
        #[test]
        fn roundtrip_canvas_pdf_canvas(
            w in dimension(),
            h in dimension(),
            s in scale(),
            fx in 0.0f64..1.0,
            fy in 0.0f64..1.0,
        ) {
            let vp = Viewport::new(w, h, s);
            let (x, y) = (w * fx, h * fy);

            let (px, py) = vp.canvas_to_pdf(x, y);
            let (bx, by) = vp.pdf_to_canvas(px, py);

            prop_assert!((bx - x).abs() < 1e-9, "X: {} vs {}", bx, x);
            prop_assert!((by - y).abs() < 1e-9, "Y: {} vs {}", by, y);
        }

        /// PDF to canvas and back returns the original point
        #[test]
        fn roundtrip_pdf_canvas_pdf(
            w in dimension(),
            h in dimension(),
            s in scale(),
            fx in 0.0f64..1.0,
            fy in 0.0f64..1.0,
        ) {
            let vp = Viewport::new(w, h, s);
            let (px, py) = (w / s * fx, h / s * fy);

            let (cx, cy) = vp.pdf_to_canvas(px, py);
            let (bx, by) = vp.canvas_to_pdf(cx, cy);

            prop_assert!((bx - px).abs() < 1e-9);
            prop_assert!((by - py).abs() < 1e-9);
        }

        /// The x axis scales linearly
        #[test]
        fn x_axis_is_linear(w in dimension(), h in dimension(), s in scale()) {
            let vp = Viewport::new(w, h, s);
            let (x1, _) = vp.canvas_to_pdf(w * 0.25, 0.0);
            let (x2, _) = vp.canvas_to_pdf(w * 0.50, 0.0);
            prop_assert!((x2 - 2.0 * x1).abs() < 1e-6);
        }

        /// Width in points is width in pixels over scale, independent of
        /// page size
        #[test]
        fn length_conversion_ignores_page_size(
            w in dimension(),
            h in dimension(),
            s in scale(),
            len in 0.0f64..500.0,
        ) {
            let vp = Viewport::new(w, h, s);
            prop_assert!((vp.to_points(len) - len / s).abs() < 1e-9);
        }
    }
}
