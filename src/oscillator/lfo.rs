//! Low-frequency oscillator with a quadrature output.
//!
//! The phase runs as a modulo counter in `[0, 1)`. A second counter is kept
//! 0.25 ahead of it so every tick can deliver both the in-phase value and the
//! value 90° in advance.

use core::f64::consts::PI;

#[allow(unused_imports)]
use num_traits::float::Float;

use crate::utils::{parabolic_sine, unipolar_to_bipolar};

/// Offset between the in-phase and the quadrature counters.
const QUADRATURE_OFFSET: f64 = 0.25;

/// Waveform emitted by the [`Lfo`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Waveform {
    #[default]
    Sinusoid,

    Triangle,
    Sawtooth,
    Square,
}

impl Waveform {
    /// All waveforms in index order.
    pub const ALL: [Waveform; 4] = [
        Waveform::Sinusoid,
        Waveform::Triangle,
        Waveform::Sawtooth,
        Waveform::Square,
    ];

    /// Position of the waveform in [`Waveform::ALL`].
    pub fn index(self) -> usize {
        match self {
            Waveform::Sinusoid => 0,
            Waveform::Triangle => 1,
            Waveform::Sawtooth => 2,
            Waveform::Square => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Waveform::Sinusoid => "Sinusoid",
            Waveform::Triangle => "Triangle",
            Waveform::Sawtooth => "Sawtooth",
            Waveform::Square => "Square",
        }
    }

    /// Shape a phase in `[0, 1]` into a value in `[-1, 1]`.
    #[inline]
    pub fn shape(self, phase: f64) -> f64 {
        match self {
            Waveform::Sinusoid => parabolic_sine(PI - phase * 2.0 * PI),
            Waveform::Triangle => unipolar_to_bipolar(unipolar_to_bipolar(phase).abs()),
            Waveform::Sawtooth => unipolar_to_bipolar(phase),
            Waveform::Square => {
                if unipolar_to_bipolar(phase) > 0.0 {
                    1.0
                } else {
                    -1.0
                }
            }
        }
    }
}

/// Indices past the last waveform select the last one.
impl From<usize> for Waveform {
    fn from(value: usize) -> Self {
        match value {
            0 => Waveform::Sinusoid,
            1 => Waveform::Triangle,
            2 => Waveform::Sawtooth,
            _ => Waveform::Square,
        }
    }
}

/// Saved oscillator position, see [`Lfo::save_state`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LfoState(f64);

/// Phase-accumulating LFO.
#[derive(Debug, Clone)]
pub struct Lfo {
    sample_rate: f64,
    frequency: f64,
    phase_increment: f64,
    waveform: Waveform,

    // Oscillator state.
    phase: f64,
    quad_phase: f64,
}

impl Default for Lfo {
    fn default() -> Self {
        Self::with(crate::DEFAULT_SAMPLE_RATE, 1.0, Waveform::Sinusoid)
    }
}

impl Lfo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an oscillator running at `frequency` Hz.
    pub fn with(sample_rate: f64, frequency: f64, waveform: Waveform) -> Self {
        let mut lfo = Self {
            sample_rate,
            frequency,
            phase_increment: 0.0,
            waveform,
            phase: 0.0,
            quad_phase: QUADRATURE_OFFSET,
        };
        lfo.reset();
        lfo
    }

    /// Set every setting at once and restart from the zero phase.
    pub fn configure(&mut self, sample_rate: f64, frequency: f64, waveform: Waveform) {
        self.sample_rate = sample_rate;
        self.frequency = frequency;
        self.waveform = waveform;
        self.reset();
    }

    /// Change the sample rate. Restarts from the zero phase.
    pub fn set_sample_rate(&mut self, sample_rate: f64) {
        self.sample_rate = sample_rate;
        self.reset();
    }

    /// Change the frequency without touching the phase.
    #[inline]
    pub fn set_frequency(&mut self, frequency: f64) {
        self.frequency = frequency;
        self.phase_increment = frequency / self.sample_rate;
    }

    #[inline]
    pub fn set_waveform(&mut self, waveform: Waveform) {
        self.waveform = waveform;
    }

    /// Restart from phase 0, or from 1 when running backwards.
    pub fn reset(&mut self) {
        self.phase_increment = self.frequency / self.sample_rate;
        self.set_phase(if self.phase_increment >= 0.0 { 0.0 } else { 1.0 });
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    pub fn phase_increment(&self) -> f64 {
        self.phase_increment
    }

    pub fn waveform(&self) -> Waveform {
        self.waveform
    }

    #[inline]
    pub fn phase(&self) -> f64 {
        self.phase
    }

    #[inline]
    pub fn quad_phase(&self) -> f64 {
        self.quad_phase
    }

    /// Move the oscillator to `phase` and derive the quadrature counter from it.
    #[inline]
    pub fn set_phase(&mut self, phase: f64) {
        self.phase = phase;
        self.quad_phase = advance(phase, QUADRATURE_OFFSET);
    }

    /// Shift the phase by `offset` cycles, wrapping once.
    #[inline]
    pub fn offset_phase(&mut self, offset: f64) {
        self.set_phase(advance(self.phase, offset));
    }

    #[inline]
    pub fn save_state(&self) -> LfoState {
        LfoState(self.phase)
    }

    #[inline]
    pub fn restore_state(&mut self, state: LfoState) {
        self.set_phase(state.0);
    }

    /// In-phase value at the current position.
    #[inline]
    pub fn value(&self) -> f32 {
        self.waveform.shape(self.phase) as f32
    }

    /// Value 90° ahead of [`Lfo::value`].
    #[inline]
    pub fn quad_phase_value(&self) -> f32 {
        self.waveform.shape(self.quad_phase) as f32
    }

    /// Advance by one sample.
    #[inline]
    pub fn increment(&mut self) {
        self.phase = advance(self.phase, self.phase_increment);
        self.quad_phase = advance(self.phase, QUADRATURE_OFFSET);
    }

    /// Return the in-phase and quadrature values, then advance by one sample.
    #[inline]
    pub fn tick(&mut self) -> (f32, f32) {
        let values = (self.value(), self.quad_phase_value());
        self.increment();
        values
    }
}

/// Add `increment` to `counter` and wrap once in the direction of travel.
#[inline]
fn advance(counter: f64, increment: f64) -> f64 {
    let counter = counter + increment;
    if increment > 0.0 && counter >= 1.0 {
        counter - 1.0
    } else if increment < 0.0 && counter <= 0.0 {
        counter + 1.0
    } else {
        counter
    }
}
