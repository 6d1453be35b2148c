//! Utility functions for rendering: color conversion, axis ticks, hatch geometry.

use plotters::prelude::*;

use crate::color::Rgb;
use crate::shade::HatchPattern;

#[inline]
pub fn rgb_color(c: Rgb) -> RGBColor {
    RGBColor(c.r, c.g, c.b)
}

/// Hatch line color readable on top of `fill`.
pub fn hatch_ink(fill: Rgb) -> RGBAColor {
    if fill.luma() > 0.5 {
        BLACK.mix(0.35)
    } else {
        WHITE.mix(0.45)
    }
}

/// Round `x` up to 1, 2 or 5 times a power of ten.
pub fn nice_step(x: f64) -> f64 {
    if x <= 0.0 || !x.is_finite() {
        return 1.0;
    }
    let mag = 10f64.powf(x.log10().floor());
    let f = x / mag;
    let nice = if f <= 1.0 {
        1.0
    } else if f <= 2.0 {
        2.0
    } else if f <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * mag
}

/// Tick positions from 0 up to `max` inclusive, roughly `target` of them.
pub fn nice_ticks(max: f64, target: usize) -> Vec<f64> {
    let step = nice_step(max / target.max(1) as f64);
    let n = (max / step + 1e-9).floor() as usize;
    (0..=n).map(|i| i as f64 * step).collect()
}

/// Format a tick value: whole numbers without decimals, otherwise up to 2.
pub fn fmt_tick(v: f64) -> String {
    if (v - v.round()).abs() < 1e-9 {
        format!("{}", v.round() as i64)
    } else {
        let s = format!("{:.2}", v);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// Diagonal line segments covering the pixel rectangle `(x0, y0)..(x1, y1)`.
///
/// `Forward` draws `/` lines, `Backward` draws `\` lines, `spacing` pixels apart.
pub fn hatch_lines(
    (x0, y0): (i32, i32),
    (x1, y1): (i32, i32),
    spacing: i32,
    pattern: HatchPattern,
) -> Vec<[(i32, i32); 2]> {
    let (x0, x1) = (x0.min(x1), x0.max(x1));
    let (y0, y1) = (y0.min(y1), y0.max(y1));
    let (w, h) = (x1 - x0, y1 - y0);
    let spacing = spacing.max(1);
    let mut out = Vec::new();
    if w == 0 || h == 0 {
        return out;
    }
    match pattern {
        // u + v = k, with y pointing down this rises to the right.
        HatchPattern::Forward => {
            let mut k = spacing;
            while k < w + h {
                let ua = (k - h).max(0);
                let ub = k.min(w);
                if ua < ub {
                    out.push([(x0 + ua, y0 + k - ua), (x0 + ub, y0 + k - ub)]);
                }
                k += spacing;
            }
        }
        // u - v = k
        HatchPattern::Backward => {
            let mut k = -h + spacing;
            while k < w {
                let ua = k.max(0);
                let ub = (h + k).min(w);
                if ua < ub {
                    out.push([(x0 + ua, y0 + ua - k), (x0 + ub, y0 + ub - k)]);
                }
                k += spacing;
            }
        }
    }
    out
}
