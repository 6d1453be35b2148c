//! Category legend: one row per category, with a swatch stacking one strip
//! per style in use so readers see both shadings of the pair.

use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontFamily;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::text::{estimate_text_width_px, truncate_to_width};
use super::types::{
    FONT_PX, LABEL_PAD_PX, LEGEND_GRADIENT_STEPS, LEGEND_HATCH_STEPS, SWATCH_H_PX, SWATCH_W_PX,
};
use super::util::rgb_color;
use crate::color::ColorPair;
use crate::error::{ChartError, Result};
use crate::mixing::ColorMixer;
use crate::models::Dataset;
use crate::registry::ColorRegistry;
use crate::shade::{Style, sequence};

const ROW_GAP_PX: i32 = 6;

/// One legend row.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendItem {
    pub label: String,
    pub pair: ColorPair,
}

/// One row per category of `dataset`, in first-seen order.
///
/// Bindings for names the dataset never mentions are left out.
pub fn legend_items(dataset: &Dataset, colors: &ColorRegistry) -> Vec<LegendItem> {
    dataset
        .all_categories()
        .into_iter()
        .filter_map(|name| {
            colors.get(name).map(|pair| LegendItem {
                label: name.to_string(),
                pair,
            })
        })
        .collect()
}

/// Pixel width the legend panel wants for these labels.
pub fn legend_width_px(items: &[LegendItem], max_px: i32) -> i32 {
    let text_w = items
        .iter()
        .map(|i| estimate_text_width_px(&i.label, FONT_PX) as i32)
        .max()
        .unwrap_or(0);
    (SWATCH_W_PX + 2 * LABEL_PAD_PX + text_w + LABEL_PAD_PX).min(max_px)
}

fn steps_for(style: Style) -> usize {
    match style {
        Style::Hatch => LEGEND_HATCH_STEPS,
        Style::Gradient => LEGEND_GRADIENT_STEPS,
    }
}

/// Draw the legend with its top-left corner at `origin`.
///
/// At most two styles are shown per swatch.
pub fn draw_legend_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    items: &[LegendItem],
    styles: &[Style],
    mixer: &dyn ColorMixer,
    origin: (i32, i32),
    width: i32,
    with_text: bool,
) -> Result<()> {
    let styles = &styles[..styles.len().min(2)];
    let strips = styles.len().max(1) as i32;
    let text_cap = (width - SWATCH_W_PX - 2 * LABEL_PAD_PX).max(0) as u32;
    let (x0, mut y) = origin;

    for item in items {
        for (si, style) in styles.iter().enumerate() {
            let top = y + SWATCH_H_PX * si as i32 / strips;
            let bottom = y + SWATCH_H_PX * (si as i32 + 1) / strips;
            let colors = sequence(item.pair, *style, steps_for(*style), mixer);
            let n = colors.len() as i32;
            for (ci, c) in colors.iter().enumerate() {
                let left = x0 + SWATCH_W_PX * ci as i32 / n;
                let right = x0 + SWATCH_W_PX * (ci as i32 + 1) / n;
                area.draw(&Rectangle::new(
                    [(left, top), (right, bottom)],
                    rgb_color(*c).filled(),
                ))
                .map_err(|e| ChartError::Backend(format!("{e:?}")))?;
            }
        }
        if styles.is_empty() {
            area.draw(&Rectangle::new(
                [(x0, y), (x0 + SWATCH_W_PX, y + SWATCH_H_PX)],
                rgb_color(item.pair.primary).filled(),
            ))
            .map_err(|e| ChartError::Backend(format!("{e:?}")))?;
        }
        if with_text {
            let label = truncate_to_width(&item.label, FONT_PX, text_cap);
            let style = TextStyle::from((FontFamily::SansSerif, FONT_PX).into_font())
                .pos(Pos::new(HPos::Left, VPos::Center));
            area.draw(&Text::new(
                label,
                (x0 + SWATCH_W_PX + LABEL_PAD_PX * 2, y + SWATCH_H_PX / 2),
                style,
            ))
            .map_err(|e| ChartError::Backend(format!("{e:?}")))?;
        }
        y += SWATCH_H_PX + ROW_GAP_PX;
    }
    Ok(())
}
