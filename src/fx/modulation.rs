//! Gain coefficients for the tremolo.
//!
//! For every frame the LFO value is turned into a gain that the render loop
//! multiplies the input samples with. Odd channels can get a second sequence
//! computed from the quadrature output.

use alloc::vec::Vec;

use crate::oscillator::lfo::Lfo;
use crate::utils::bipolar_to_unipolar;

/// Render values of the parameters that shape the gain.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Mix {
    /// Modulation depth in `[0, 1]`.
    pub depth: f32,

    /// Level of the untouched input in `[0, 1]`.
    pub dry: f32,

    /// Level of the modulated input in `[0, 1]`.
    pub wet: f32,
}

impl Mix {
    pub fn new(depth: f32, dry: f32, wet: f32) -> Self {
        Self { depth, dry, wet }
    }

    /// Gain for an LFO value in `[-1, 1]`.
    #[inline]
    pub fn coefficient(&self, lfo: f32) -> f32 {
        modulation(self.depth, self.dry, self.wet, lfo)
    }
}

/// `dry + wet * depth * (1 - unipolar(lfo))`
#[inline]
pub fn modulation(depth: f32, dry: f32, wet: f32, lfo: f32) -> f32 {
    dry + wet * depth * (1.0 - bipolar_to_unipolar(lfo))
}

/// How the quadrature sequence is produced.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum QuadratureStrategy {
    /// Read both outputs of every LFO tick in one pass.
    #[default]
    Interleaved,

    /// Render the in-phase sequence, then rewind the LFO to the start of the
    /// block shifted by 90° and render the block again. The LFO ends up where
    /// the first pass left it.
    Regenerate,
}

/// Fills the coefficient buffer, two sequences of up to `max_frames` each.
#[derive(Debug, Clone)]
pub struct ModulationSynthesizer {
    modulations: Vec<f32>,
    max_frames: usize,
    strategy: QuadratureStrategy,
}

impl Default for ModulationSynthesizer {
    fn default() -> Self {
        Self::new(crate::DEFAULT_MAX_FRAMES)
    }
}

impl ModulationSynthesizer {
    pub fn new(max_frames: usize) -> Self {
        let mut synthesizer = Self {
            modulations: Vec::new(),
            max_frames: 0,
            strategy: QuadratureStrategy::default(),
        };
        synthesizer.resize(max_frames);
        synthesizer
    }

    /// Size the buffer for blocks of up to `max_frames`. Allocates, so never
    /// call it while rendering.
    pub fn resize(&mut self, max_frames: usize) {
        self.max_frames = max_frames;
        self.modulations.clear();
        self.modulations.resize(max_frames * 2, 0.0);
    }

    pub fn max_frames(&self) -> usize {
        self.max_frames
    }

    pub fn strategy(&self) -> QuadratureStrategy {
        self.strategy
    }

    pub fn set_strategy(&mut self, strategy: QuadratureStrategy) {
        self.strategy = strategy;
    }

    /// Compute `frame_count` in-phase coefficients and, with `quadrature`,
    /// as many quadrature coefficients. Advances `lfo` by `frame_count`.
    ///
    /// `frame_count` must not exceed [`ModulationSynthesizer::max_frames`].
    pub fn synthesize(&mut self, lfo: &mut Lfo, mix: Mix, quadrature: bool, frame_count: usize) {
        debug_assert!(frame_count <= self.max_frames);

        let (evens, odds) = self.modulations.split_at_mut(self.max_frames);
        let evens = &mut evens[..frame_count];
        let odds = &mut odds[..frame_count];

        if !quadrature {
            for even in evens.iter_mut() {
                *even = mix.coefficient(lfo.value());
                lfo.increment();
            }
            return;
        }

        match self.strategy {
            QuadratureStrategy::Interleaved => {
                for (even, odd) in evens.iter_mut().zip(odds.iter_mut()) {
                    let (in_phase, quad_phase) = lfo.tick();
                    *even = mix.coefficient(in_phase);
                    *odd = mix.coefficient(quad_phase);
                }
            }
            QuadratureStrategy::Regenerate => {
                let start = lfo.save_state();
                for even in evens.iter_mut() {
                    *even = mix.coefficient(lfo.value());
                    lfo.increment();
                }

                let end = lfo.save_state();
                lfo.restore_state(start);
                lfo.offset_phase(0.25);
                for odd in odds.iter_mut() {
                    *odd = mix.coefficient(lfo.value());
                    lfo.increment();
                }
                lfo.restore_state(end);
            }
        }
    }

    /// In-phase coefficients of the last [`ModulationSynthesizer::synthesize`] call.
    #[inline]
    pub fn in_phase(&self, frame_count: usize) -> &[f32] {
        &self.modulations[..frame_count]
    }

    /// Quadrature coefficients of the last [`ModulationSynthesizer::synthesize`] call.
    #[inline]
    pub fn quadrature(&self, frame_count: usize) -> &[f32] {
        &self.modulations[self.max_frames..self.max_frames + frame_count]
    }
}
