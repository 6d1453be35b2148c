//! Public types and constants for the plotters renderer.

/// Outer margin around the canvas, in pixels.
pub const MARGIN_PX: i32 = 16;

/// Font size for group, bar and legend labels.
pub const FONT_PX: u32 = 13;

/// Height reserved below the plot for the value axis.
pub const AXIS_BAND_PX: i32 = 28;

/// Distance between hatch lines.
pub const HATCH_SPACING_PX: i32 = 6;

/// Gap between a label and what it annotates.
pub const LABEL_PAD_PX: i32 = 4;

/// Legend swatch size.
pub const SWATCH_W_PX: i32 = 36;
pub const SWATCH_H_PX: i32 = 16;

/// Steps drawn per style strip in a legend swatch.
pub const LEGEND_HATCH_STEPS: usize = 5;
pub const LEGEND_GRADIENT_STEPS: usize = 32;

/// Renderer switches that have no effect on layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Overlay diagonal lines on segments that carry a hatch marker.
    pub hatch_overlay: bool,
    /// Draw the value axis with tick marks.
    pub axis: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            hatch_overlay: true,
            axis: true,
        }
    }
}

/// Maps chart units onto the plot rectangle in pixels.
///
/// x grows right from `0.0` to `x_max`; y grows downward from `y_min` to
/// `y_max` (first group on top).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Frame {
    pub fn px_x(&self, x: f64) -> i32 {
        self.left + (x / self.x_max * self.width as f64).round() as i32
    }

    pub fn px_y(&self, y: f64) -> i32 {
        let t = (y - self.y_min) / (self.y_max - self.y_min);
        self.top + (t * self.height as f64).round() as i32
    }

    pub fn px(&self, x: f64, y: f64) -> (i32, i32) {
        (self.px_x(x), self.px_y(y))
    }

    pub fn bottom(&self) -> i32 {
        self.top + self.height
    }

    pub fn right(&self) -> i32 {
        self.left + self.width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_maps_corners() {
        let f = Frame {
            left: 10,
            top: 20,
            width: 100,
            height: 50,
            x_max: 10.0,
            y_min: -0.5,
            y_max: 1.5,
        };
        assert_eq!(f.px(0.0, -0.5), (10, 20));
        assert_eq!(f.px(10.0, 1.5), (110, 70));
        assert_eq!(f.px(5.0, 0.5), (60, 45));
    }
}
