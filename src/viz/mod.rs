//! Visualization: render a chart to **SVG** or **PNG** through plotters.
//!
//! - Segments as filled rectangles, hatch markers as diagonal overlays
//! - Group names on the left, bar names past each bar's end
//! - Value axis with "nice" ticks
//! - Category legend on the right, showing every style in use
//!
//! Text needs a font (see [`text::ensure_fonts_registered`]); without one the
//! chart is still drawn, just unlabelled.

pub mod legend;
pub mod text;
pub mod types;
pub mod util;

pub use types::{Frame, RenderOptions};

use anyhow::{Result, anyhow};
use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontFamily;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;
use std::path::Path;

use crate::assemble::{ChartAssembler, LabelAnchor, Rect, RenderBackend};
use crate::chart::{ChartOptions, Plan, plan};
use crate::color::Rgb;
use crate::error::ChartError;
use crate::layout::ChartLayout;
use crate::models::Dataset;
use crate::shade::HatchPattern;

use legend::{LegendItem, draw_legend_panel, legend_items, legend_width_px};
use text::{ensure_fonts_registered, estimate_text_width_px, truncate_to_width};
use types::{AXIS_BAND_PX, FONT_PX, HATCH_SPACING_PX, LABEL_PAD_PX, MARGIN_PX};
use util::{fmt_tick, hatch_ink, hatch_lines, nice_ticks, rgb_color};

fn backend_err<E: std::fmt::Debug>(e: E) -> ChartError {
    ChartError::Backend(format!("{e:?}"))
}

/// [`RenderBackend`] drawing onto a plotters drawing area.
pub struct PlottersBackend<'a, DB: DrawingBackend> {
    area: &'a DrawingArea<DB, Shift>,
    frame: Frame,
    hatch_overlay: bool,
    with_text: bool,
}

impl<'a, DB: DrawingBackend> PlottersBackend<'a, DB> {
    pub fn new(area: &'a DrawingArea<DB, Shift>, frame: Frame, opts: RenderOptions) -> Self {
        Self {
            area,
            frame,
            hatch_overlay: opts.hatch_overlay,
            with_text: ensure_fonts_registered(),
        }
    }
}

impl<DB: DrawingBackend> std::fmt::Debug for PlottersBackend<'_, DB> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlottersBackend")
            .field("frame", &self.frame)
            .field("hatch_overlay", &self.hatch_overlay)
            .field("with_text", &self.with_text)
            .finish()
    }
}

impl<DB: DrawingBackend> RenderBackend for PlottersBackend<'_, DB> {
    fn draw_rectangle(
        &mut self,
        rect: Rect,
        fill: Rgb,
        hatch: Option<HatchPattern>,
    ) -> crate::error::Result<()> {
        let tl = self.frame.px(rect.x, rect.y);
        let br = self.frame.px(rect.x + rect.width, rect.y + rect.height);
        if tl.0 == br.0 {
            return Ok(());
        }
        self.area
            .draw(&Rectangle::new([tl, br], rgb_color(fill).filled()))
            .map_err(backend_err)?;
        if let (true, Some(pattern)) = (self.hatch_overlay, hatch) {
            let ink = hatch_ink(fill).stroke_width(1);
            for [a, b] in hatch_lines(tl, br, HATCH_SPACING_PX, pattern) {
                self.area
                    .draw(&PathElement::new(vec![a, b], ink))
                    .map_err(backend_err)?;
            }
        }
        Ok(())
    }

    fn draw_label(
        &mut self,
        x: f64,
        y: f64,
        text: &str,
        anchor: LabelAnchor,
    ) -> crate::error::Result<()> {
        if !self.with_text {
            return Ok(());
        }
        let (px, py) = self.frame.px(x, y);
        let (pos, at, label) = match anchor {
            LabelAnchor::GroupAxis => {
                let cap = (self.frame.left - MARGIN_PX - 2 * LABEL_PAD_PX).max(0) as u32;
                (
                    Pos::new(HPos::Right, VPos::Center),
                    (px - 2 * LABEL_PAD_PX, py),
                    truncate_to_width(text, FONT_PX, cap),
                )
            }
            LabelAnchor::BarEnd => (
                Pos::new(HPos::Left, VPos::Center),
                (px + LABEL_PAD_PX, py),
                text.to_string(),
            ),
        };
        let style = TextStyle::from((FontFamily::SansSerif, FONT_PX).into_font()).pos(pos);
        self.area
            .draw(&Text::new(label, at, style))
            .map_err(backend_err)?;
        Ok(())
    }
}

/// Pixel widths reserved around the plot.
struct Gutters {
    left: i32,
    right_labels: i32,
    legend: i32,
}

fn gutters(
    dataset: &Dataset,
    items: &[LegendItem],
    opts: &ChartOptions,
    canvas_w: i32,
) -> Gutters {
    let widest = |names: Vec<&str>| {
        names
            .iter()
            .map(|n| estimate_text_width_px(n, FONT_PX) as i32)
            .max()
            .unwrap_or(0)
    };
    let left = if opts.placement.group_names {
        (widest(dataset.group_names()) + 3 * LABEL_PAD_PX).min(canvas_w / 4)
    } else {
        LABEL_PAD_PX
    };
    let right_labels = if opts.placement.bar_names {
        (widest(dataset.all_bars()) + 2 * LABEL_PAD_PX).min(canvas_w / 4)
    } else {
        LABEL_PAD_PX
    };
    let legend = if opts.legend && !items.is_empty() {
        legend_width_px(items, canvas_w / 4) + MARGIN_PX
    } else {
        0
    };
    Gutters {
        left,
        right_labels,
        legend,
    }
}

/// Frame covering the plot rectangle for `layout`.
pub fn frame_for(
    layout: &ChartLayout,
    asm: &ChartAssembler,
    left: i32,
    top: i32,
    width: i32,
    height: i32,
) -> Frame {
    let thickness = asm.thickness(layout);
    let pad = thickness / 2.0 + 0.1;
    let last_center = match layout.groups.len() {
        0 => 0.0,
        n => asm.bar_center(layout, n - 1, layout.bar_names.len().saturating_sub(1)),
    };
    let x_max = layout.max_total();
    Frame {
        left,
        top,
        width: width.max(1),
        height: height.max(1),
        x_max: if x_max > 0.0 { x_max * 1.02 } else { 1.0 },
        y_min: -pad,
        y_max: last_center + pad,
    }
}

fn draw_axis<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    frame: &Frame,
    with_text: bool,
) -> Result<()> {
    let y = frame.bottom();
    area.draw(&PathElement::new(
        vec![(frame.left, y), (frame.right(), y)],
        BLACK.stroke_width(1),
    ))
    .map_err(|e| anyhow!("{:?}", e))?;
    let target = ((frame.width / 80).max(2)) as usize;
    for t in nice_ticks(frame.x_max, target) {
        let x = frame.px_x(t);
        area.draw(&PathElement::new(vec![(x, y), (x, y + 4)], BLACK.stroke_width(1)))
            .map_err(|e| anyhow!("{:?}", e))?;
        if with_text {
            let style = TextStyle::from((FontFamily::SansSerif, FONT_PX - 2).into_font())
                .pos(Pos::new(HPos::Center, VPos::Top));
            area.draw(&Text::new(fmt_tick(t), (x, y + 6), style))
                .map_err(|e| anyhow!("{:?}", e))?;
        }
    }
    Ok(())
}

/// Draw a planned chart onto any plotters drawing area.
pub fn draw_plan<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    dataset: &Dataset,
    plan: &Plan,
    opts: &ChartOptions,
    render: RenderOptions,
) -> Result<()> {
    root.fill(&WHITE).map_err(|e| anyhow!("{:?}", e))?;
    let (w, h) = root.dim_in_pixel();
    let (w, h) = (w as i32, h as i32);
    let with_text = ensure_fonts_registered();

    let items = legend_items(dataset, &plan.colors);
    let g = gutters(dataset, &items, opts, w);
    let axis_band = if render.axis { AXIS_BAND_PX } else { 0 };

    let asm = ChartAssembler::new(opts.placement);
    let left = MARGIN_PX + g.left;
    let frame = frame_for(
        &plan.layout,
        &asm,
        left,
        MARGIN_PX,
        w - left - g.right_labels - g.legend - MARGIN_PX,
        h - 2 * MARGIN_PX - axis_band,
    );
    log::debug!("plot frame {frame:?}");

    let mut backend = PlottersBackend::new(root, frame, render);
    asm.assemble(&plan.layout, &mut backend)?;

    if render.axis {
        draw_axis(root, &frame, with_text)?;
    }
    if opts.legend && !items.is_empty() {
        let mixer = opts.mix_space.mixer();
        let x0 = w - g.legend;
        draw_legend_panel(
            root,
            &items,
            &plan.layout.styles_drawn(),
            mixer.as_ref(),
            (x0, MARGIN_PX),
            g.legend - MARGIN_PX,
            with_text,
        )?;
    }
    root.present().map_err(|e| anyhow!("{:?}", e))?;
    Ok(())
}

/// Plan `dataset` and write it to `out_path`: SVG for `.svg`, PNG otherwise.
pub fn render_chart<P: AsRef<Path>>(
    dataset: &Dataset,
    out_path: P,
    width: u32,
    height: u32,
    opts: &ChartOptions,
) -> Result<Plan> {
    render_chart_with(dataset, out_path, width, height, opts, RenderOptions::default())
}

/// [`render_chart`] with renderer switches.
pub fn render_chart_with<P: AsRef<Path>>(
    dataset: &Dataset,
    out_path: P,
    width: u32,
    height: u32,
    opts: &ChartOptions,
    render: RenderOptions,
) -> Result<Plan> {
    let plan = plan(dataset, opts)?;
    let out_path = out_path.as_ref();
    let path_string = out_path.to_string_lossy().into_owned();

    if out_path.extension().and_then(|s| s.to_str()) == Some("svg") {
        let root = SVGBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_plan(&root, dataset, &plan, opts, render)?;
    } else {
        let root = BitMapBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_plan(&root, dataset, &plan, opts, render)?;
    }
    log::info!(
        "wrote {} ({} segments, {} categories)",
        out_path.display(),
        plan.layout.segment_count(),
        plan.colors.len()
    );
    Ok(plan)
}
