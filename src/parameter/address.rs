//! Parameter addresses and their definitions.

use core::fmt;

use super::Mapping;
use crate::error::Error;
use crate::oscillator::lfo::Waveform;

/// Unique addresses of the runtime parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u64)]
pub enum ParameterAddress {
    Rate = 0,
    Depth = 1,
    Dry = 2,
    Wet = 3,
    SquareWave = 4,
    Odd90 = 5,
    Waveform = 6,
}

impl ParameterAddress {
    pub const COUNT: usize = 7;

    pub const ALL: [ParameterAddress; Self::COUNT] = [
        ParameterAddress::Rate,
        ParameterAddress::Depth,
        ParameterAddress::Dry,
        ParameterAddress::Wet,
        ParameterAddress::SquareWave,
        ParameterAddress::Odd90,
        ParameterAddress::Waveform,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn definition(self) -> ParameterDefinition {
        match self {
            ParameterAddress::Rate => ParameterDefinition {
                identifier: "rate",
                name: "Rate",
                unit: Unit::Hertz,
                mapping: Mapping::Linear {
                    min: 0.01,
                    max: 20.0,
                },
                default: 1.0,
                log_scale: true,
                precision: 2,
                separator: " ",
            },
            ParameterAddress::Depth => ParameterDefinition {
                precision: 2,
                separator: " ",
                ..ParameterDefinition::percent("depth", "Depth", 50.0)
            },
            ParameterAddress::Dry => ParameterDefinition::percent("dry", "Dry", 0.0),
            ParameterAddress::Wet => ParameterDefinition::percent("wet", "Wet", 100.0),
            ParameterAddress::SquareWave => {
                ParameterDefinition::switch("squareWave", "Square Wave")
            }
            ParameterAddress::Odd90 => ParameterDefinition::switch("odd90", "Odd 90°"),
            ParameterAddress::Waveform => ParameterDefinition {
                identifier: "waveform",
                name: "Waveform",
                unit: Unit::Indexed,
                mapping: Mapping::Index {
                    count: Waveform::ALL.len(),
                },
                default: 0.0,
                log_scale: false,
                precision: 0,
                separator: "",
            },
        }
    }
}

impl TryFrom<u64> for ParameterAddress {
    type Error = Error;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        ParameterAddress::ALL
            .get(value as usize)
            .copied()
            .filter(|address| *address as u64 == value)
            .ok_or(Error::UnknownParameterAddress(value))
    }
}

impl From<ParameterAddress> for u64 {
    fn from(value: ParameterAddress) -> Self {
        value as u64
    }
}

impl fmt::Display for ParameterAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<ParameterAddress: '{}' {}>",
            self.definition().identifier,
            *self as u64
        )
    }
}

/// Unit of a parameter, used for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Hertz,
    Percent,
    Boolean,
    Indexed,
}

impl Unit {
    fn suffix(self) -> &'static str {
        match self {
            Unit::Hertz => "Hz",
            Unit::Percent => "%",
            Unit::Boolean | Unit::Indexed => "",
        }
    }
}

/// Static description of a parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterDefinition {
    /// Stable identifier, e.g. for host automation lanes.
    pub identifier: &'static str,

    /// Name shown to the user.
    pub name: &'static str,

    pub unit: Unit,
    pub mapping: Mapping,

    /// Logical default value.
    pub default: f32,

    /// Whether a UI should display the range logarithmically.
    pub log_scale: bool,

    /// Digits after the decimal point when displayed.
    pub precision: usize,

    /// Text between the displayed value and its unit.
    pub separator: &'static str,
}

impl ParameterDefinition {
    const fn percent(identifier: &'static str, name: &'static str, default: f32) -> Self {
        Self {
            identifier,
            name,
            unit: Unit::Percent,
            mapping: Mapping::Percentage,
            default,
            log_scale: false,
            precision: 0,
            separator: "",
        }
    }

    const fn switch(identifier: &'static str, name: &'static str) -> Self {
        Self {
            identifier,
            name,
            unit: Unit::Boolean,
            mapping: Mapping::Bool,
            default: 0.0,
            log_scale: false,
            precision: 0,
            separator: "",
        }
    }

    pub fn range(&self) -> (f32, f32) {
        self.mapping.range()
    }

    pub fn ramping(&self) -> bool {
        self.mapping.can_ramp()
    }

    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        self.mapping.clamp(value)
    }

    /// Wrap a logical value for display, e.g. `"2.50 Hz"`, `"25%"` or `"Triangle"`.
    pub fn display(&self, value: f32) -> DisplayValue {
        DisplayValue {
            definition: *self,
            value,
        }
    }
}

/// Formatted parameter value, see [`ParameterDefinition::display`].
#[derive(Debug, Clone, Copy)]
pub struct DisplayValue {
    definition: ParameterDefinition,
    value: f32,
}

impl fmt::Display for DisplayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let definition = &self.definition;
        let value = definition.clamp(self.value);
        match definition.unit {
            Unit::Indexed => f.write_str(Waveform::from(value as usize).name()),
            unit => write!(
                f,
                "{:.*}{}{}",
                definition.precision,
                value,
                definition.separator,
                unit.suffix()
            ),
        }
    }
}
