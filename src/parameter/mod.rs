//! Runtime parameters.
//!
//! A parameter has two faces. The control side sees a *logical* value in the
//! units shown to the user (Hz, percent, on/off). The render side sees the
//! value the DSP code multiplies with. [`Mapping`] converts between them and
//! [`smoothed::SmoothedParameter`] moves the render value towards new targets
//! without jumps.

pub mod address;
pub mod preset;
pub mod shared;
pub mod smoothed;

pub use smoothed::SmoothedParameter;

/// Conversion between logical and render values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mapping {
    /// Value used as is, clamped to `[min, max]`.
    Linear { min: f32, max: f32 },

    /// `[0, 100]` percent to `[0, 1]`.
    Percentage,

    /// Any positive value is on (`1.0`), anything else off (`0.0`).
    Bool,

    /// Choice among `count` options, logical value is the option index.
    Index { count: usize },
}

impl Mapping {
    /// Valid logical range.
    pub fn range(self) -> (f32, f32) {
        match self {
            Mapping::Linear { min, max } => (min, max),
            Mapping::Percentage => (0.0, 100.0),
            Mapping::Bool => (0.0, 1.0),
            Mapping::Index { count } => (0.0, count.saturating_sub(1) as f32),
        }
    }

    /// Clamp a logical value to [`Mapping::range`]. NaN maps to the minimum.
    #[inline]
    pub fn clamp(self, value: f32) -> f32 {
        let (min, max) = self.range();
        if value.is_nan() {
            min
        } else {
            value.clamp(min, max)
        }
    }

    /// Logical value to render value. Out-of-range input is clamped first.
    #[inline]
    pub fn to_render(self, value: f32) -> f32 {
        let value = self.clamp(value);
        match self {
            Mapping::Linear { .. } => value,
            Mapping::Percentage => value / 100.0,
            Mapping::Bool => {
                if value > 0.0 {
                    1.0
                } else {
                    0.0
                }
            }
            Mapping::Index { .. } => (value as usize) as f32,
        }
    }

    /// Render value back to logical units.
    #[inline]
    pub fn to_logical(self, value: f32) -> f32 {
        match self {
            Mapping::Percentage => value * 100.0,
            _ => value,
        }
    }

    /// Switches and choices change at once, everything else may ramp.
    pub fn can_ramp(self) -> bool {
        matches!(self, Mapping::Linear { .. } | Mapping::Percentage)
    }
}
