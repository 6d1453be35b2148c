//! Replay a [`ChartLayout`] as drawing instructions against a backend.
//!
//! Chart units: x runs along the value axis, y counts group slots from the
//! top (group `g` occupies `[g, g + band)`). Backends map these to pixels.

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::error::Result;
use crate::layout::ChartLayout;
use crate::shade::HatchPattern;

/// Axis-aligned rectangle in chart units; `y` is the top edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// What a label is attached to, so a backend can pad and align it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelAnchor {
    /// Group name on the category axis, right-aligned left of `x`.
    GroupAxis,
    /// Bar name just past the end of the bar, left-aligned.
    BarEnd,
}

/// The drawing surface the assembler talks to.
pub trait RenderBackend {
    fn draw_rectangle(&mut self, rect: Rect, fill: Rgb, hatch: Option<HatchPattern>) -> Result<()>;

    fn draw_label(&mut self, x: f64, y: f64, text: &str, anchor: LabelAnchor) -> Result<()>;
}

/// One recorded instruction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawCommand {
    Rect {
        #[serde(flatten)]
        rect: Rect,
        fill: Rgb,
        #[serde(skip_serializing_if = "Option::is_none")]
        hatch: Option<HatchPattern>,
    },
    Label {
        x: f64,
        y: f64,
        text: String,
        anchor: LabelAnchor,
    },
}

/// Backend that only records what it is asked to draw.
#[derive(Debug, Default, Clone)]
pub struct RecordingBackend {
    pub commands: Vec<DrawCommand>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rects(&self) -> impl Iterator<Item = (&Rect, Rgb, Option<HatchPattern>)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Rect { rect, fill, hatch } => Some((rect, *fill, *hatch)),
            DrawCommand::Label { .. } => None,
        })
    }

    pub fn labels(&self) -> impl Iterator<Item = (f64, f64, &str, LabelAnchor)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Label { x, y, text, anchor } => Some((*x, *y, text.as_str(), *anchor)),
            DrawCommand::Rect { .. } => None,
        })
    }
}

impl RenderBackend for RecordingBackend {
    fn draw_rectangle(&mut self, rect: Rect, fill: Rgb, hatch: Option<HatchPattern>) -> Result<()> {
        self.commands.push(DrawCommand::Rect { rect, fill, hatch });
        Ok(())
    }

    fn draw_label(&mut self, x: f64, y: f64, text: &str, anchor: LabelAnchor) -> Result<()> {
        self.commands.push(DrawCommand::Label {
            x,
            y,
            text: text.to_string(),
            anchor,
        });
        Ok(())
    }
}

/// Placement knobs for the assembler.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssembleOptions {
    /// Fraction of a group slot filled by its bars.
    pub band: f64,
    pub group_names: bool,
    pub bar_names: bool,
}

impl Default for AssembleOptions {
    fn default() -> Self {
        Self {
            band: 0.8,
            group_names: true,
            bar_names: true,
        }
    }
}

/// Turns layouts into ordered drawing calls. Holds no color or order logic.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChartAssembler {
    opts: AssembleOptions,
}

impl ChartAssembler {
    pub fn new(opts: AssembleOptions) -> Self {
        Self { opts }
    }

    /// Height of one bar: the band shared by every distinct bar name.
    pub fn thickness(&self, layout: &ChartLayout) -> f64 {
        self.opts.band / layout.bar_names.len().max(1) as f64
    }

    /// Vertical centre of bar `slot` in group `group`.
    pub fn bar_center(&self, layout: &ChartLayout, group: usize, slot: usize) -> f64 {
        group as f64 + self.thickness(layout) * slot as f64
    }

    /// Vertical anchor of a group's label: the middle of its bars.
    pub fn group_center(&self, layout: &ChartLayout, group: usize) -> f64 {
        let n = layout.bar_names.len().max(1);
        group as f64 + (n - 1) as f64 / 2.0 * self.thickness(layout)
    }

    /// Emit every segment, then bar labels, then the group label, group by group.
    pub fn assemble<B: RenderBackend + ?Sized>(
        &self,
        layout: &ChartLayout,
        backend: &mut B,
    ) -> Result<()> {
        let thickness = self.thickness(layout);
        for group in &layout.groups {
            for bar in &group.bars {
                let center = self.bar_center(layout, group.slot, bar.id.slot);
                for seg in &bar.segments {
                    let rect = Rect {
                        x: seg.offset,
                        y: center - thickness / 2.0,
                        width: seg.width,
                        height: thickness,
                    };
                    backend.draw_rectangle(rect, seg.color, seg.hatch)?;
                }
                if self.opts.bar_names {
                    backend.draw_label(bar.total, center, &bar.name, LabelAnchor::BarEnd)?;
                }
            }
            if self.opts.bar_names {
                // Bars absent from this group still get their name at zero length.
                for (slot, name) in layout.bar_names.iter().enumerate() {
                    if group.bar(name).is_none() {
                        let center = self.bar_center(layout, group.slot, slot);
                        backend.draw_label(0.0, center, name, LabelAnchor::BarEnd)?;
                    }
                }
            }
            if self.opts.group_names {
                let y = self.group_center(layout, group.slot);
                backend.draw_label(0.0, y, &group.name, LabelAnchor::GroupAxis)?;
            }
        }
        Ok(())
    }

    /// Convenience: assemble into a fresh [`RecordingBackend`].
    pub fn record(&self, layout: &ChartLayout) -> Result<Vec<DrawCommand>> {
        let mut rec = RecordingBackend::new();
        self.assemble(layout, &mut rec)?;
        Ok(rec.commands)
    }
}
