//! Render-scoped name → color pair and name → style bindings.
//!
//! Both registries bind a name the first time it is resolved and return the
//! same answer for the rest of the render. Bindings are append-only. Explicit
//! overrides go through `bind`, which refuses to rebind a name to something
//! else.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::color::{ColorPair, Rgb, Target};
use crate::error::{ChartError, Result};
use crate::mixing::ColorMixer;
use crate::palettes;
use crate::shade::Style;

/// What happens when more category names show up than the pool has pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PoolPolicy {
    /// Raise [`ChartError::ColorPoolExhausted`].
    #[default]
    Fail,
    /// Start over at the first pair; names then share colors.
    Wrap,
}

/// Where the color pairs come from.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorSource {
    /// Ready-made pairs, consumed in order.
    Pairs(Vec<ColorPair>),
    /// Base colors. Without a target, entries `2k` and `2k + 1` form a pair;
    /// with one, each entry becomes a primary and its blend with the target
    /// the secondary.
    Colormap {
        colors: Vec<Rgb>,
        target: Option<Target>,
    },
}

impl Default for ColorSource {
    fn default() -> Self {
        let colors = palettes::colormap(palettes::DEFAULT_COLORMAP)
            .map(|m| m.colors.to_vec())
            .unwrap_or_default();
        ColorSource::Colormap {
            colors,
            target: None,
        }
    }
}

impl ColorSource {
    /// A built-in colormap by name.
    pub fn named(name: &str, target: Option<Target>) -> Result<Self> {
        let map = palettes::colormap(name)
            .ok_or_else(|| ChartError::validation(format!("unknown colormap '{name}'")))?;
        Ok(ColorSource::Colormap {
            colors: map.colors.to_vec(),
            target,
        })
    }

    /// Expand into the ordered pool of pairs.
    pub fn build_pool(&self, mixer: &dyn ColorMixer) -> Result<Vec<ColorPair>> {
        match self {
            ColorSource::Pairs(pairs) => Ok(pairs.clone()),
            ColorSource::Colormap {
                colors,
                target: None,
            } => {
                if colors.len() % 2 == 1 {
                    log::warn!(
                        "colormap has an odd number of colors ({}), ignoring the last one",
                        colors.len()
                    );
                }
                Ok(colors
                    .chunks_exact(2)
                    .map(|c| ColorPair::new(c[0], c[1]))
                    .collect())
            }
            ColorSource::Colormap {
                colors,
                target: Some(target),
            } => {
                target.validate()?;
                log::debug!(
                    "pairing {} colors with {} at opacity {} in {}",
                    colors.len(),
                    target.color,
                    target.opacity,
                    mixer.space()
                );
                Ok(colors
                    .iter()
                    .map(|&base| {
                        ColorPair::new(base, mixer.mix(base, target.color, target.opacity))
                    })
                    .collect())
            }
        }
    }
}

/// Category name → color pair, bound on first encounter.
#[derive(Debug, Clone)]
pub struct ColorRegistry {
    pool: Vec<ColorPair>,
    next: usize,
    policy: PoolPolicy,
    bound: IndexMap<String, ColorPair>,
}

impl ColorRegistry {
    pub fn new(pool: Vec<ColorPair>, policy: PoolPolicy) -> Self {
        Self {
            pool,
            next: 0,
            policy,
            bound: IndexMap::new(),
        }
    }

    pub fn from_source(
        source: &ColorSource,
        mixer: &dyn ColorMixer,
        policy: PoolPolicy,
    ) -> Result<Self> {
        Ok(Self::new(source.build_pool(mixer)?, policy))
    }

    /// Reorder/subset the pool: the `k`-th newly seen name gets pool entry
    /// `indices[k]`.
    pub fn select(mut self, indices: &[usize]) -> Result<Self> {
        let available = self.pool.len();
        let selected = indices
            .iter()
            .map(|&i| {
                self.pool.get(i).copied().ok_or_else(|| {
                    ChartError::validation(format!(
                        "color pair index {i} out of range, the pool has {available} pairs"
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        self.pool = selected;
        Ok(self)
    }

    /// The pair bound to `name`, binding the next pool entry if it is new.
    pub fn resolve(&mut self, name: &str) -> Result<ColorPair> {
        if let Some(pair) = self.bound.get(name) {
            return Ok(*pair);
        }
        let pair = self.take_next()?;
        log::debug!("category '{name}' -> {pair}");
        self.bound.insert(name.to_string(), pair);
        Ok(pair)
    }

    /// Check that every unbound name in `names` can get a pair, without
    /// binding anything. `names` are expected to be distinct.
    pub fn reserve<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> Result<()> {
        let fresh = names
            .into_iter()
            .filter(|n| !self.bound.contains_key(*n))
            .count();
        let available = self.pool.len();
        let needed = self.next + fresh;
        let short = match self.policy {
            PoolPolicy::Fail => needed > available,
            PoolPolicy::Wrap => fresh > 0 && available == 0,
        };
        if short {
            return Err(ChartError::ColorPoolExhausted { needed, available });
        }
        Ok(())
    }

    fn take_next(&mut self) -> Result<ColorPair> {
        let available = self.pool.len();
        let idx = match self.policy {
            PoolPolicy::Fail if self.next >= available => {
                return Err(ChartError::ColorPoolExhausted {
                    needed: self.next + 1,
                    available,
                });
            }
            PoolPolicy::Fail => self.next,
            PoolPolicy::Wrap if available == 0 => {
                return Err(ChartError::ColorPoolExhausted {
                    needed: self.next + 1,
                    available,
                });
            }
            PoolPolicy::Wrap => {
                if self.next == available {
                    log::warn!("color pool of {available} pairs exhausted, reusing from the start");
                }
                self.next % available
            }
        };
        self.next += 1;
        Ok(self.pool[idx])
    }

    /// Bind `name` explicitly. Rebinding to the same pair is a no-op; to a
    /// different one is an error.
    pub fn bind(&mut self, name: &str, pair: ColorPair) -> Result<()> {
        match self.bound.get(name) {
            Some(existing) if *existing == pair => Ok(()),
            Some(existing) => Err(ChartError::InconsistentOverride {
                kind: "color",
                name: name.to_string(),
                existing: existing.to_string(),
                requested: pair.to_string(),
            }),
            None => {
                self.bound.insert(name.to_string(), pair);
                Ok(())
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<ColorPair> {
        self.bound.get(name).copied()
    }

    /// Bindings in the order they were made.
    pub fn bindings(&self) -> impl Iterator<Item = (&str, ColorPair)> + '_ {
        self.bound.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.bound.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bound.is_empty()
    }

    pub fn pool_len(&self) -> usize {
        self.pool.len()
    }
}

/// Bar name → style, bound on first encounter.
#[derive(Debug, Clone)]
pub struct StyleRegistry {
    cycle: Vec<Style>,
    next: usize,
    bound: IndexMap<String, Style>,
}

impl Default for StyleRegistry {
    fn default() -> Self {
        Self {
            cycle: Style::DEFAULT_CYCLE.to_vec(),
            next: 0,
            bound: IndexMap::new(),
        }
    }
}

impl StyleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cycle through `cycle` instead of hatch/gradient.
    pub fn with_cycle(cycle: Vec<Style>) -> Result<Self> {
        if cycle.is_empty() {
            return Err(ChartError::validation("style cycle must not be empty"));
        }
        Ok(Self {
            cycle,
            ..Self::default()
        })
    }

    /// The style bound to `name`, taking the next cycle entry if it is new.
    ///
    /// Only auto-assigned names advance the cycle.
    pub fn resolve(&mut self, name: &str) -> Style {
        if let Some(style) = self.bound.get(name) {
            return *style;
        }
        let style = self.cycle[self.next % self.cycle.len()];
        self.next += 1;
        log::debug!("bar '{name}' -> {style}");
        self.bound.insert(name.to_string(), style);
        style
    }

    /// Bind `name` explicitly; see [`ColorRegistry::bind`].
    pub fn bind(&mut self, name: &str, style: Style) -> Result<()> {
        match self.bound.get(name) {
            Some(existing) if *existing == style => Ok(()),
            Some(existing) => Err(ChartError::InconsistentOverride {
                kind: "style",
                name: name.to_string(),
                existing: existing.to_string(),
                requested: style.to_string(),
            }),
            None => {
                self.bound.insert(name.to_string(), style);
                Ok(())
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<Style> {
        self.bound.get(name).copied()
    }

    pub fn bindings(&self) -> impl Iterator<Item = (&str, Style)> + '_ {
        self.bound.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Distinct styles in first-bound order.
    pub fn styles_used(&self) -> Vec<Style> {
        let mut out = Vec::new();
        for s in self.bound.values() {
            if !out.contains(s) {
                out.push(*s);
            }
        }
        out
    }
}
