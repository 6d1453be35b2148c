//! Stacked-segment layout: per bar, the ordered segments with offsets and
//! colors; per group and bar, the ordinal vertical slot.
//!
//! Traversal order is groups, bars, categories, values, each in insertion
//! order. The registries are populated during that same walk, so bindings
//! depend only on first occurrence.

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::error::{ChartError, Result};
use crate::mixing::ColorMixer;
use crate::models::Dataset;
use crate::registry::{ColorRegistry, StyleRegistry};
use crate::shade::{HatchPattern, Style, shades};

/// How negative values are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NegativeValues {
    /// Abort the render with a validation error.
    #[default]
    Reject,
    /// Use `|v|` as the width and keep the sign on [`Segment::value`].
    Magnitude,
}

/// Position of a bar: group index and the bar's global slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct BarId {
    pub group: usize,
    pub slot: usize,
}

/// One value's rectangle along the bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    pub bar: BarId,
    pub category: String,
    /// The value as given, sign included.
    pub value: f64,
    pub width: f64,
    pub offset: f64,
    pub color: Rgb,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hatch: Option<HatchPattern>,
}

impl Segment {
    pub fn end(&self) -> f64 {
        self.offset + self.width
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarLayout {
    pub id: BarId,
    pub name: String,
    pub style: Style,
    pub segments: Vec<Segment>,
    /// Sum of all segment widths; where the bar label is anchored.
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupLayout {
    pub name: String,
    pub slot: usize,
    /// Bars present in this group, in insertion order.
    pub bars: Vec<BarLayout>,
}

impl GroupLayout {
    pub fn bar(&self, name: &str) -> Option<&BarLayout> {
        self.bars.iter().find(|b| b.name == name)
    }
}

/// Full layout of one chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartLayout {
    pub groups: Vec<GroupLayout>,
    /// Every distinct bar name; the index is the bar's slot in every group.
    pub bar_names: Vec<String>,
}

impl ChartLayout {
    pub fn group(&self, name: &str) -> Option<&GroupLayout> {
        self.groups.iter().find(|g| g.name == name)
    }

    /// Longest bar, `0.0` for an empty chart.
    pub fn max_total(&self) -> f64 {
        self.groups
            .iter()
            .flat_map(|g| g.bars.iter())
            .map(|b| b.total)
            .fold(0.0, f64::max)
    }

    /// Distinct styles of the drawn bars, in traversal order.
    pub fn styles_drawn(&self) -> Vec<Style> {
        let mut out = Vec::new();
        for bar in self.groups.iter().flat_map(|g| g.bars.iter()) {
            if !out.contains(&bar.style) {
                out.push(bar.style);
            }
        }
        out
    }

    pub fn segment_count(&self) -> usize {
        self.groups
            .iter()
            .flat_map(|g| g.bars.iter())
            .map(|b| b.segments.len())
            .sum()
    }
}

/// Computes a [`ChartLayout`] from a dataset and the two registries.
#[derive(Debug)]
pub struct StackLayout<'m> {
    mixer: &'m dyn ColorMixer,
    negatives: NegativeValues,
}

impl<'m> StackLayout<'m> {
    pub fn new(mixer: &'m dyn ColorMixer) -> Self {
        Self {
            mixer,
            negatives: NegativeValues::default(),
        }
    }

    pub fn negative_values(mut self, policy: NegativeValues) -> Self {
        self.negatives = policy;
        self
    }

    fn check_values(&self, dataset: &Dataset) -> Result<()> {
        dataset.validate_finite()?;
        if self.negatives == NegativeValues::Reject
            && let Some((g, b, c, v)) = dataset.iter_values().find(|(_, _, _, v)| *v < 0.0)
        {
            return Err(ChartError::validation(format!(
                "$[{g:?}][{b:?}][{c:?}]: negative value {v} (negative values are rejected)"
            )));
        }
        Ok(())
    }

    /// Validate the whole dataset, then walk it once, binding names as they
    /// are first seen.
    pub fn compute(
        &self,
        dataset: &Dataset,
        colors: &mut ColorRegistry,
        styles: &mut StyleRegistry,
    ) -> Result<ChartLayout> {
        self.check_values(dataset)?;
        // Fail before the walk so a rejected render leaves both registries untouched.
        colors.reserve(dataset.all_categories())?;

        let bar_names: Vec<String> = dataset.all_bars().into_iter().map(String::from).collect();
        let slot_of = |name: &str| bar_names.iter().position(|b| b == name).unwrap_or(0);

        let mut groups = Vec::with_capacity(dataset.groups().len());
        for (gi, (group_name, group)) in dataset.groups().iter().enumerate() {
            let mut bars = Vec::with_capacity(group.len());
            for (bar_name, bar) in group {
                let id = BarId {
                    group: gi,
                    slot: slot_of(bar_name),
                };
                let style = styles.resolve(bar_name);
                let mut segments = Vec::new();
                let mut offset = 0.0;
                for (category, values) in bar {
                    let pair = colors.resolve(category)?;
                    let shading = shades(pair, style, values.len(), self.mixer);
                    for (&value, shade) in values.iter().zip(shading) {
                        let width = value.abs();
                        segments.push(Segment {
                            bar: id,
                            category: category.clone(),
                            value,
                            width,
                            offset,
                            color: shade.color,
                            hatch: shade.hatch,
                        });
                        offset += width;
                    }
                }
                bars.push(BarLayout {
                    id,
                    name: bar_name.clone(),
                    style,
                    segments,
                    total: offset,
                });
            }
            groups.push(GroupLayout {
                name: group_name.clone(),
                slot: gi,
                bars,
            });
        }

        log::debug!(
            "laid out {} groups, {} distinct bars, {} categories",
            groups.len(),
            bar_names.len(),
            colors.len()
        );
        Ok(ChartLayout { groups, bar_names })
    }
}
