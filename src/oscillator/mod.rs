//! Oscillators.

pub mod lfo;
