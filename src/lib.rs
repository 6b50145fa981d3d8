#![doc = include_str!("../README.md")]
#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod error;
pub mod fx;
pub mod kernel;
pub mod observer;
pub mod oscillator;
pub mod parameter;
pub mod utils;

pub use error::{Error, Result};
pub use kernel::{Kernel, MidiEvent, RenderEvent};
pub use oscillator::lfo::{Lfo, Waveform};
pub use parameter::address::ParameterAddress;
pub use parameter::shared::ParameterHandle;

/// Default sample rate used until the host configures the kernel.
pub const DEFAULT_SAMPLE_RATE: f64 = 44100.0;

/// Default maximum number of frames per render call.
pub const DEFAULT_MAX_FRAMES: usize = 512;
