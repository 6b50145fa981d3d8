//! Lock-free handoff of parameter changes from control threads to the render
//! thread.
//!
//! Each parameter owns one cell holding the latest requested value and ramp
//! length. A newer request simply overwrites an older one that the render
//! thread has not picked up yet.

use alloc::sync::Arc;
use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use super::address::ParameterAddress;
use super::preset::Preset;
use crate::oscillator::lfo::Waveform;

#[derive(Debug)]
struct ParameterCell {
    // f32 bits of the logical value.
    value: AtomicU32,
    ramp_frames: AtomicU32,
    dirty: AtomicBool,
}

impl ParameterCell {
    fn new(value: f32) -> Self {
        Self {
            value: AtomicU32::new(value.to_bits()),
            ramp_frames: AtomicU32::new(0),
            dirty: AtomicBool::new(false),
        }
    }

    #[inline]
    fn load(&self) -> f32 {
        f32::from_bits(self.value.load(Ordering::Relaxed))
    }

    #[inline]
    fn store(&self, value: f32) {
        self.value.store(value.to_bits(), Ordering::Relaxed);
    }

    #[inline]
    fn request(&self, value: f32, ramp_frames: u32) {
        self.store(value);
        self.ramp_frames.store(ramp_frames, Ordering::Relaxed);
        self.dirty.store(true, Ordering::Release);
    }

    #[inline]
    fn take(&self) -> Option<(f32, u32)> {
        if self.dirty.swap(false, Ordering::Acquire) {
            Some((self.load(), self.ramp_frames.load(Ordering::Relaxed)))
        } else {
            None
        }
    }
}

/// Pending values of every parameter, shared between threads.
#[derive(Debug)]
pub struct SharedParameters {
    cells: [ParameterCell; ParameterAddress::COUNT],
    default_ramp_frames: AtomicU32,
}

impl Default for SharedParameters {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedParameters {
    /// Cells holding the default of every parameter, nothing pending.
    pub fn new() -> Self {
        Self {
            cells: ParameterAddress::ALL
                .map(|address| ParameterCell::new(address.definition().default)),
            default_ramp_frames: AtomicU32::new(0),
        }
    }

    #[inline]
    fn cell(&self, address: ParameterAddress) -> &ParameterCell {
        &self.cells[address.index()]
    }

    /// Queue `value` for the render thread. The value is clamped to the
    /// parameter range and becomes the read-back value at once.
    pub fn request(&self, address: ParameterAddress, value: f32, ramp_frames: u32) {
        let value = address.definition().clamp(value);
        match address {
            ParameterAddress::SquareWave => {
                self.cell(address).store(value);
                self.cell(ParameterAddress::Waveform)
                    .request(square_wave_to_waveform(value), 0);
            }
            ParameterAddress::Waveform => {
                self.cell(address).request(value, 0);
                self.cell(ParameterAddress::SquareWave)
                    .store(waveform_to_square_wave(value));
            }
            _ => self.cell(address).request(value, ramp_frames),
        }
    }

    /// Update the read-back value without queueing it for the render thread.
    pub fn publish(&self, address: ParameterAddress, value: f32) {
        let value = address.definition().clamp(value);
        self.cell(address).store(value);
        match address {
            ParameterAddress::SquareWave => self
                .cell(ParameterAddress::Waveform)
                .store(square_wave_to_waveform(value)),
            ParameterAddress::Waveform => self
                .cell(ParameterAddress::SquareWave)
                .store(waveform_to_square_wave(value)),
            _ => {}
        }
    }

    /// Like [`SharedParameters::publish`], but leaves a cell alone while a
    /// request is waiting in it.
    pub fn publish_if_idle(&self, address: ParameterAddress, value: f32) {
        if !self.cell(address).dirty.load(Ordering::Acquire) {
            self.publish(address, value);
        }
    }

    /// Most recently requested or published logical value.
    pub fn value(&self, address: ParameterAddress) -> f32 {
        self.cell(address).load()
    }

    /// Take a waiting request, if any. Render thread only.
    #[inline]
    pub fn take(&self, address: ParameterAddress) -> Option<(f32, u32)> {
        self.cell(address).take()
    }

    /// Ramp length used by [`ParameterHandle::set`].
    pub fn default_ramp_frames(&self) -> u32 {
        self.default_ramp_frames.load(Ordering::Relaxed)
    }

    pub fn set_default_ramp_frames(&self, frames: u32) {
        self.default_ramp_frames.store(frames, Ordering::Relaxed);
    }
}

fn square_wave_to_waveform(value: f32) -> f32 {
    let waveform = if value > 0.0 {
        Waveform::Square
    } else {
        Waveform::Sinusoid
    };
    waveform.index() as f32
}

fn waveform_to_square_wave(value: f32) -> f32 {
    if Waveform::from(value as usize) == Waveform::Square {
        1.0
    } else {
        0.0
    }
}

/// Control-thread access to the parameters of one kernel.
///
/// Cheap to clone; every clone talks to the same kernel.
#[derive(Debug, Clone)]
pub struct ParameterHandle {
    shared: Arc<SharedParameters>,
}

impl ParameterHandle {
    pub fn new(shared: Arc<SharedParameters>) -> Self {
        Self { shared }
    }

    /// Set a parameter, ramping over the default ramp length where the
    /// parameter ramps.
    pub fn set(&self, address: ParameterAddress, value: f32) {
        self.shared
            .request(address, value, self.shared.default_ramp_frames());
    }

    /// Set a parameter, ramping over `ramp_frames` frames where the parameter
    /// ramps.
    pub fn set_ramped(&self, address: ParameterAddress, value: f32, ramp_frames: u32) {
        self.shared.request(address, value, ramp_frames);
    }

    /// Pending value, which may differ from the value the render thread is
    /// currently ramping through.
    pub fn value(&self, address: ParameterAddress) -> f32 {
        self.shared.value(address)
    }

    pub fn apply_preset(&self, preset: &Preset) {
        for (address, value) in preset.values() {
            self.set(address, value);
        }
    }

    pub fn shared(&self) -> &Arc<SharedParameters> {
        &self.shared
    }
}
