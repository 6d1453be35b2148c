//! Color blending capability.
//!
//! Two implementations exist: [`LinearMixer`] blends component-wise in sRGB and
//! is always available; [`LabMixer`] blends in CIELAB and only exists with the
//! `perceptual` cargo feature. [`MixSpace`] selects one at configuration time.
//! Asking for the perceptual space in a build without it degrades to linear
//! blending with a warning, never an error.

use serde::{Deserialize, Serialize};

use crate::color::Rgb;

/// Blends two colors. `t = 0` yields `a`, `t = 1` yields `b`.
pub trait ColorMixer: std::fmt::Debug {
    fn mix(&self, a: Rgb, b: Rgb, t: f32) -> Rgb;

    /// Short human-readable name of the blending space.
    fn space(&self) -> &'static str;
}

/// Requested blending space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MixSpace {
    /// CIELAB, when compiled in.
    #[default]
    Perceptual,
    /// Component-wise sRGB.
    Linear,
}

impl MixSpace {
    /// Resolve the requested space into a concrete mixer.
    pub fn mixer(self) -> Box<dyn ColorMixer> {
        match self {
            MixSpace::Linear => Box::new(LinearMixer),
            MixSpace::Perceptual => perceptual_or_linear(),
        }
    }
}

#[cfg(feature = "perceptual")]
fn perceptual_or_linear() -> Box<dyn ColorMixer> {
    Box::new(LabMixer)
}

#[cfg(not(feature = "perceptual"))]
fn perceptual_or_linear() -> Box<dyn ColorMixer> {
    log::warn!(
        "perceptual color mixing not compiled in (feature `perceptual`), using sRGB blending instead"
    );
    Box::new(LinearMixer)
}

/// Component-wise blend of the encoded sRGB values.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearMixer;

impl ColorMixer for LinearMixer {
    fn mix(&self, a: Rgb, b: Rgb, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let [ar, ag, ab] = a.to_unit();
        let [br, bg, bb] = b.to_unit();
        Rgb::from_unit(
            ar + (br - ar) * t,
            ag + (bg - ag) * t,
            ab + (bb - ab) * t,
        )
    }

    fn space(&self) -> &'static str {
        "srgb"
    }
}

/// Blend in CIELAB (D65), converting back to sRGB and clipping to gamut.
#[cfg(feature = "perceptual")]
#[derive(Debug, Clone, Copy, Default)]
pub struct LabMixer;

#[cfg(feature = "perceptual")]
impl ColorMixer for LabMixer {
    fn mix(&self, a: Rgb, b: Rgb, t: f32) -> Rgb {
        use palette::white_point::D65;
        use palette::{FromColor, Lab, Mix, Srgb};

        let lab = |c: Rgb| {
            let [r, g, b] = c.to_unit();
            Lab::<D65, f32>::from_color(Srgb::new(r, g, b))
        };
        let mixed = lab(a).mix(lab(b), t.clamp(0.0, 1.0));
        let srgb = Srgb::from_color(mixed);
        Rgb::from_unit(srgb.red, srgb.green, srgb.blue)
    }

    fn space(&self) -> &'static str {
        "cielab"
    }
}
