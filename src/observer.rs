//! Optional diagnostics sink for a [`Kernel`](crate::kernel::Kernel).
//!
//! The kernel only reports configuration changes through it, never anything
//! from inside a render call.

/// Receives kernel lifecycle events. Every method defaults to doing nothing.
pub trait KernelObserver: Send {
    /// The host configured a new audio format.
    fn format_changed(&mut self, _channel_count: usize, _sample_rate: f64, _max_frames: usize) {}

    /// The host started (`true`) or stopped (`false`) rendering.
    fn rendering_changed(&mut self, _rendering: bool) {}

    /// A factory preset was applied.
    fn preset_loaded(&mut self, _name: &str) {}
}

/// Forwards kernel events to the [`log`] facade.
#[derive(Debug, Clone)]
pub struct LogObserver {
    target: &'static str,
}

impl Default for LogObserver {
    fn default() -> Self {
        Self::new("tremolo_dsp::kernel")
    }
}

impl LogObserver {
    pub fn new(target: &'static str) -> Self {
        Self { target }
    }

    pub fn target(&self) -> &'static str {
        self.target
    }
}

impl KernelObserver for LogObserver {
    fn format_changed(&mut self, channel_count: usize, sample_rate: f64, max_frames: usize) {
        log::info!(
            target: self.target,
            "format: {} channels, {} Hz, {} frames max",
            channel_count,
            sample_rate,
            max_frames
        );
    }

    fn rendering_changed(&mut self, rendering: bool) {
        log::debug!(target: self.target, "rendering: {}", rendering);
    }

    fn preset_loaded(&mut self, name: &str) {
        log::info!(target: self.target, "preset: {}", name);
    }
}
