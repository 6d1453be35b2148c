//! Turn a color pair and a style into one draw color per value.

use serde::{Deserialize, Serialize};

use crate::color::{ColorPair, Rgb};
use crate::mixing::ColorMixer;

/// Shading policy bound to a bar name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    /// Alternate primary and secondary by value index.
    Hatch,
    /// Interpolate from primary to secondary across the values.
    Gradient,
}

impl Style {
    /// The automatic cycle used when the caller supplies none.
    pub const DEFAULT_CYCLE: [Style; 2] = [Style::Hatch, Style::Gradient];
}

impl std::fmt::Display for Style {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Style::Hatch => "hatch",
            Style::Gradient => "gradient",
        })
    }
}

/// Texture marker handed to the backend with hatch-style segments.
///
/// Alternates with the colors so neighbouring segments stay distinguishable
/// even where a backend draws them in the same color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HatchPattern {
    /// `/` lines, on primary-colored segments.
    Forward,
    /// `\` lines, on secondary-colored segments.
    Backward,
}

/// One value's draw color plus its optional texture marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shade {
    pub color: Rgb,
    pub hatch: Option<HatchPattern>,
}

/// Ordered list of `n` colors for one category's values.
///
/// - `n == 0`: empty.
/// - `n == 1`: `[primary]` for both styles.
/// - `Hatch`: primary, secondary, primary, … by index parity.
/// - `Gradient`: `i / (n - 1)` interpolation from primary to secondary, both
///   endpoints exact.
pub fn sequence(pair: ColorPair, style: Style, n: usize, mixer: &dyn ColorMixer) -> Vec<Rgb> {
    shades(pair, style, n, mixer)
        .into_iter()
        .map(|s| s.color)
        .collect()
}

/// Like [`sequence`], with hatch markers attached for the backend.
pub fn shades(pair: ColorPair, style: Style, n: usize, mixer: &dyn ColorMixer) -> Vec<Shade> {
    match n {
        0 => Vec::new(),
        1 => vec![Shade {
            color: pair.primary,
            hatch: match style {
                Style::Hatch => Some(HatchPattern::Forward),
                Style::Gradient => None,
            },
        }],
        _ => match style {
            Style::Hatch => (0..n)
                .map(|i| {
                    if i % 2 == 0 {
                        Shade {
                            color: pair.primary,
                            hatch: Some(HatchPattern::Forward),
                        }
                    } else {
                        Shade {
                            color: pair.secondary,
                            hatch: Some(HatchPattern::Backward),
                        }
                    }
                })
                .collect(),
            Style::Gradient => {
                let last = n - 1;
                (0..n)
                    .map(|i| {
                        let color = if i == 0 {
                            pair.primary
                        } else if i == last {
                            pair.secondary
                        } else {
                            mixer.mix(pair.primary, pair.secondary, i as f32 / last as f32)
                        };
                        Shade { color, hatch: None }
                    })
                    .collect()
            }
        },
    }
}
