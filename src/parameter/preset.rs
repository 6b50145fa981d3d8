//! Presets and the factory preset bank.

use super::address::ParameterAddress;
use super::shared::ParameterHandle;
use crate::error::{Error, Result};

/// Logical values of the user-facing parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Preset {
    /// LFO rate in Hz.
    pub rate: f32,

    /// Modulation depth in percent.
    pub depth: f32,

    /// Dry level in percent.
    pub dry: f32,

    /// Wet level in percent.
    pub wet: f32,

    /// `1.0` for a square LFO, `0.0` for a sinusoid.
    pub square_wave: f32,

    /// `1.0` to run odd channels 90° ahead.
    pub odd90: f32,
}

impl Default for Preset {
    fn default() -> Self {
        Self {
            rate: ParameterAddress::Rate.definition().default,
            depth: ParameterAddress::Depth.definition().default,
            dry: ParameterAddress::Dry.definition().default,
            wet: ParameterAddress::Wet.definition().default,
            square_wave: ParameterAddress::SquareWave.definition().default,
            odd90: ParameterAddress::Odd90.definition().default,
        }
    }
}

impl Preset {
    pub const fn new(
        rate: f32,
        depth: f32,
        dry: f32,
        wet: f32,
        square_wave: f32,
        odd90: f32,
    ) -> Self {
        Self {
            rate,
            depth,
            dry,
            wet,
            square_wave,
            odd90,
        }
    }

    /// Snapshot of the pending values behind `handle`.
    pub fn capture(handle: &ParameterHandle) -> Self {
        Self {
            rate: handle.value(ParameterAddress::Rate),
            depth: handle.value(ParameterAddress::Depth),
            dry: handle.value(ParameterAddress::Dry),
            wet: handle.value(ParameterAddress::Wet),
            square_wave: handle.value(ParameterAddress::SquareWave),
            odd90: handle.value(ParameterAddress::Odd90),
        }
    }

    /// Address and value of every parameter in the preset.
    pub fn values(&self) -> [(ParameterAddress, f32); 6] {
        [
            (ParameterAddress::Rate, self.rate),
            (ParameterAddress::Depth, self.depth),
            (ParameterAddress::Dry, self.dry),
            (ParameterAddress::Wet, self.wet),
            (ParameterAddress::SquareWave, self.square_wave),
            (ParameterAddress::Odd90, self.odd90),
        ]
    }
}

/// Named preset shipped with the effect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FactoryPreset {
    pub name: &'static str,
    pub preset: Preset,
}

pub static FACTORY_PRESETS: [FactoryPreset; 6] = [
    FactoryPreset {
        name: "Strange",
        preset: Preset::new(2.0, 50.0, 0.0, 100.0, 0.0, 1.0),
    },
    FactoryPreset {
        name: "Clover",
        preset: Preset::new(10.0, 100.0, 0.0, 100.0, 0.0, 0.0),
    },
    FactoryPreset {
        name: "Chopper",
        preset: Preset::new(5.0, 100.0, 0.0, 100.0, 1.0, 0.0),
    },
    FactoryPreset {
        name: "Spinner",
        preset: Preset::new(1.5, 100.0, 25.0, 100.0, 0.0, 1.0),
    },
    FactoryPreset {
        name: "Ponger",
        preset: Preset::new(3.5, 100.0, 0.0, 100.0, 1.0, 1.0),
    },
    FactoryPreset {
        name: "Trills",
        preset: Preset::new(20.0, 62.0, 50.0, 100.0, 0.0, 0.0),
    },
];

/// Look up a factory preset by its position in [`FACTORY_PRESETS`].
pub fn factory_preset(index: usize) -> Result<&'static FactoryPreset> {
    FACTORY_PRESETS.get(index).ok_or(Error::UnknownPreset(index))
}
