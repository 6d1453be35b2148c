//! One-call pipeline: options → registries → layout → drawing instructions.

use serde::{Deserialize, Serialize};

use crate::assemble::{AssembleOptions, ChartAssembler, DrawCommand, RenderBackend};
use crate::color::{ColorPair, Rgb, Target};
use crate::error::Result;
use crate::layout::{ChartLayout, NegativeValues, StackLayout};
use crate::mixing::MixSpace;
use crate::models::Dataset;
use crate::registry::{ColorRegistry, ColorSource, PoolPolicy, StyleRegistry};
use crate::shade::Style;

/// Explicit color pair for one category name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorOverride {
    pub name: String,
    #[serde(flatten)]
    pub pair: ColorPair,
}

/// Explicit style for one bar name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleOverride {
    pub name: String,
    pub style: Style,
}

/// Everything a caller can configure about one chart.
///
/// Pool precedence: `pairs`, then `colors`, then `colormap` (default `tab20`).
/// `target` applies to `colors`/`colormap` only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartOptions {
    pub colormap: Option<String>,
    pub colors: Option<Vec<Rgb>>,
    pub pairs: Option<Vec<ColorPair>>,
    pub target: Option<Target>,
    pub pair_indices: Option<Vec<usize>>,
    pub pool_policy: PoolPolicy,
    pub styles: Option<Vec<Style>>,
    pub style_overrides: Vec<StyleOverride>,
    pub color_overrides: Vec<ColorOverride>,
    pub mix_space: MixSpace,
    pub negative_values: NegativeValues,
    pub legend: bool,
    #[serde(flatten)]
    pub placement: AssembleOptions,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            colormap: None,
            colors: None,
            pairs: None,
            target: None,
            pair_indices: None,
            pool_policy: PoolPolicy::default(),
            styles: None,
            style_overrides: Vec::new(),
            color_overrides: Vec::new(),
            mix_space: MixSpace::default(),
            negative_values: NegativeValues::default(),
            legend: true,
            placement: AssembleOptions::default(),
        }
    }
}

impl ChartOptions {
    pub fn color_source(&self) -> Result<ColorSource> {
        if let Some(pairs) = &self.pairs {
            return Ok(ColorSource::Pairs(pairs.clone()));
        }
        if let Some(colors) = &self.colors {
            return Ok(ColorSource::Colormap {
                colors: colors.clone(),
                target: self.target,
            });
        }
        match &self.colormap {
            Some(name) => ColorSource::named(name, self.target),
            None => match ColorSource::default() {
                ColorSource::Colormap { colors, .. } => Ok(ColorSource::Colormap {
                    colors,
                    target: self.target,
                }),
                other => Ok(other),
            },
        }
    }

    /// Fresh registries with this render's overrides already bound.
    pub fn registries(&self) -> Result<(ColorRegistry, StyleRegistry)> {
        let mixer = self.mix_space.mixer();
        let mut colors =
            ColorRegistry::from_source(&self.color_source()?, mixer.as_ref(), self.pool_policy)?;
        if let Some(indices) = &self.pair_indices {
            colors = colors.select(indices)?;
        }
        for o in &self.color_overrides {
            colors.bind(&o.name, o.pair)?;
        }

        let mut styles = match &self.styles {
            Some(cycle) => StyleRegistry::with_cycle(cycle.clone())?,
            None => StyleRegistry::new(),
        };
        for o in &self.style_overrides {
            styles.bind(&o.name, o.style)?;
        }
        Ok((colors, styles))
    }
}

/// Outcome of planning a chart: the layout and the bindings that produced it.
#[derive(Debug, Clone)]
pub struct Plan {
    pub layout: ChartLayout,
    pub colors: ColorRegistry,
    pub styles: StyleRegistry,
}

/// Lay out `dataset` with fresh registries built from `opts`.
pub fn plan(dataset: &Dataset, opts: &ChartOptions) -> Result<Plan> {
    let (mut colors, mut styles) = opts.registries()?;
    let layout = plan_with(dataset, opts, &mut colors, &mut styles)?;
    Ok(Plan {
        layout,
        colors,
        styles,
    })
}

/// Lay out `dataset` with caller-owned registries, e.g. seeded from an earlier
/// render so names keep their colors across charts.
pub fn plan_with(
    dataset: &Dataset,
    opts: &ChartOptions,
    colors: &mut ColorRegistry,
    styles: &mut StyleRegistry,
) -> Result<ChartLayout> {
    let mixer = opts.mix_space.mixer();
    StackLayout::new(mixer.as_ref())
        .negative_values(opts.negative_values)
        .compute(dataset, colors, styles)
}

/// Plan and replay into `backend`.
pub fn draw<B: RenderBackend + ?Sized>(
    dataset: &Dataset,
    opts: &ChartOptions,
    backend: &mut B,
) -> Result<Plan> {
    let plan = plan(dataset, opts)?;
    ChartAssembler::new(opts.placement).assemble(&plan.layout, backend)?;
    Ok(plan)
}

/// Plan and return the ordered drawing instructions.
pub fn instructions(dataset: &Dataset, opts: &ChartOptions) -> Result<Vec<DrawCommand>> {
    let plan = plan(dataset, opts)?;
    ChartAssembler::new(opts.placement).record(&plan.layout)
}
