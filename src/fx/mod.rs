//! Effects.

pub mod modulation;
