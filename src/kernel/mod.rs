//! Tremolo kernel: the entry point a host drives.
//!
//! A render call first picks up parameter changes (from [`ParameterHandle`]s
//! and from the events passed in), then renders the block. Frames inside a
//! parameter ramp are rendered one at a time so every frame sees its own
//! parameter values. Once all ramps are done the rest of the block goes
//! through the bulk path: one pass filling the coefficient buffer, then one
//! multiply per channel.

pub mod event;

use alloc::boxed::Box;
use alloc::sync::Arc;
use core::fmt;

pub use event::{MidiEvent, RenderEvent};

use crate::error::{Error, Result};
use crate::fx::modulation::{Mix, ModulationSynthesizer, QuadratureStrategy};
use crate::observer::KernelObserver;
use crate::oscillator::lfo::{Lfo, Waveform};
use crate::parameter::address::ParameterAddress;
use crate::parameter::preset::factory_preset;
use crate::parameter::shared::{ParameterHandle, SharedParameters};
use crate::parameter::SmoothedParameter;
use crate::utils::multiply;

/// Length of the ramp applied to changes made with [`ParameterHandle::set`].
pub const DEFAULT_RAMP_SECONDS: f64 = 0.01;

pub struct Kernel {
    lfo: Lfo,
    synthesizer: ModulationSynthesizer,

    rate: SmoothedParameter,
    depth: SmoothedParameter,
    dry: SmoothedParameter,
    wet: SmoothedParameter,
    waveform: SmoothedParameter,
    odd90: SmoothedParameter,

    shared: Arc<SharedParameters>,
    observer: Option<Box<dyn KernelObserver>>,

    channel_count: usize,
    sample_rate: f64,
    rendering: bool,
}

impl Default for Kernel {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Kernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Kernel")
            .field("lfo", &self.lfo)
            .field("rate", &self.rate)
            .field("depth", &self.depth)
            .field("dry", &self.dry)
            .field("wet", &self.wet)
            .field("waveform", &self.waveform)
            .field("odd90", &self.odd90)
            .field("channel_count", &self.channel_count)
            .field("sample_rate", &self.sample_rate)
            .field("rendering", &self.rendering)
            .finish_non_exhaustive()
    }
}

impl Kernel {
    /// Kernel with default parameters, sized for stereo at
    /// [`DEFAULT_SAMPLE_RATE`](crate::DEFAULT_SAMPLE_RATE).
    pub fn new() -> Self {
        let parameter = |address: ParameterAddress| {
            let definition = address.definition();
            SmoothedParameter::new(definition.mapping, definition.default)
        };

        let rate = parameter(ParameterAddress::Rate);
        let waveform = parameter(ParameterAddress::Waveform);
        let sample_rate = crate::DEFAULT_SAMPLE_RATE;

        let shared = Arc::new(SharedParameters::new());
        shared.set_default_ramp_frames(default_ramp_frames(sample_rate));

        Self {
            lfo: Lfo::with(
                sample_rate,
                rate.immediate_value() as f64,
                Waveform::from(waveform.immediate_value() as usize),
            ),
            synthesizer: ModulationSynthesizer::new(crate::DEFAULT_MAX_FRAMES),
            rate,
            depth: parameter(ParameterAddress::Depth),
            dry: parameter(ParameterAddress::Dry),
            wet: parameter(ParameterAddress::Wet),
            waveform,
            odd90: parameter(ParameterAddress::Odd90),
            shared,
            observer: None,
            channel_count: 2,
            sample_rate,
            rendering: false,
        }
    }

    /// Attach a diagnostics sink.
    pub fn with_observer(mut self, observer: impl KernelObserver + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    pub fn with_quadrature_strategy(mut self, strategy: QuadratureStrategy) -> Self {
        self.synthesizer.set_strategy(strategy);
        self
    }

    /// Handle for changing parameters from other threads.
    pub fn handle(&self) -> ParameterHandle {
        ParameterHandle::new(self.shared.clone())
    }

    /// Prepare for a new audio format. Resizes the coefficient buffer and
    /// restarts the LFO, so call it before rendering starts.
    pub fn configure(
        &mut self,
        channel_count: usize,
        sample_rate: f64,
        max_frames: usize,
    ) -> Result<()> {
        if channel_count == 0 {
            return Err(Error::InvalidChannelCount(channel_count));
        }
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            return Err(Error::InvalidSampleRate(sample_rate));
        }
        if max_frames == 0 {
            return Err(Error::InvalidMaxFrames(max_frames));
        }

        self.channel_count = channel_count;
        self.sample_rate = sample_rate;
        self.synthesizer.resize(max_frames);
        self.lfo.set_sample_rate(sample_rate);
        self.shared
            .set_default_ramp_frames(default_ramp_frames(sample_rate));

        if let Some(observer) = self.observer.as_mut() {
            observer.format_changed(channel_count, sample_rate, max_frames);
        }

        Ok(())
    }

    pub fn channel_count(&self) -> usize {
        self.channel_count
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    pub fn max_frames(&self) -> usize {
        self.synthesizer.max_frames()
    }

    pub fn lfo(&self) -> &Lfo {
        &self.lfo
    }

    pub fn is_rendering(&self) -> bool {
        self.rendering
    }

    /// Track the host's render state. Going idle freezes every ramp in
    /// progress where it is; the LFO simply stops advancing. Requests still
    /// waiting in the handoff cells stay there for the next render call.
    pub fn set_rendering(&mut self, rendering: bool) {
        if rendering == self.rendering {
            return;
        }

        if !rendering {
            for address in ParameterAddress::ALL {
                if address == ParameterAddress::SquareWave {
                    continue;
                }
                let parameter = self.parameter_mut(address);
                parameter.stop_ramping();
                let held = parameter.pending_logical();
                self.shared.publish_if_idle(address, held);
            }
        }

        self.rendering = rendering;

        if let Some(observer) = self.observer.as_mut() {
            observer.rendering_changed(rendering);
        }
    }

    /// Restart the LFO and settle every parameter on its pending value.
    pub fn reset(&mut self) {
        self.pick_up_requests();
        for address in ParameterAddress::ALL {
            if address == ParameterAddress::SquareWave {
                continue;
            }
            let parameter = self.parameter_mut(address);
            let pending = parameter.pending_logical();
            parameter.set_immediate(pending);
        }
        self.lfo.set_frequency(self.rate.immediate_value() as f64);
        self.lfo.reset();
    }

    /// Apply a factory preset through the regular parameter path.
    pub fn use_factory_preset(&mut self, index: usize) -> Result<()> {
        let factory = factory_preset(index)?;
        self.handle().apply_preset(&factory.preset);

        if let Some(observer) = self.observer.as_mut() {
            observer.preset_loaded(factory.name);
        }

        Ok(())
    }

    /// Apply a parameter change on the render thread. Unknown addresses are
    /// ignored.
    pub fn apply_parameter_event(&mut self, address: u64, value: f32, ramp_frames: u32) {
        let Ok(address) = ParameterAddress::try_from(address) else {
            return;
        };

        let value = address.definition().clamp(value);
        self.shared.publish(address, value);
        self.apply(address, value, ramp_frames);
    }

    /// Pending value of a parameter, 0 for unknown addresses.
    pub fn parameter_value(&self, address: u64) -> f32 {
        ParameterAddress::try_from(address)
            .map(|address| self.shared.value(address))
            .unwrap_or(0.0)
    }

    /// Value currently in effect on the render thread, in logical units.
    pub fn current_value(&self, address: ParameterAddress) -> f32 {
        match address {
            ParameterAddress::SquareWave => {
                if self.lfo.waveform() == Waveform::Square {
                    1.0
                } else {
                    0.0
                }
            }
            _ => {
                let parameter = self.parameter(address);
                parameter.mapping().to_logical(parameter.immediate_value())
            }
        }
    }

    /// MIDI input has no effect on the tremolo.
    #[inline]
    pub fn handle_midi(&mut self, _event: &MidiEvent) {}

    /// Render `frame_count` frames of every channel from `inputs` to `outputs`.
    ///
    /// Every slice must hold at least `frame_count` samples. Blocks longer
    /// than the configured maximum are processed in pieces.
    pub fn render(
        &mut self,
        _output_bus: usize,
        events: &[RenderEvent],
        inputs: &[&[f32]],
        outputs: &mut [&mut [f32]],
        frame_count: usize,
    ) {
        self.pick_up_requests();

        for event in events {
            match event {
                RenderEvent::Parameter {
                    address,
                    value,
                    ramp_frames,
                } => self.apply_parameter_event(*address, *value, *ramp_frames),
                RenderEvent::Midi(midi) => self.handle_midi(midi),
            }
        }

        if frame_count == 1 {
            self.render_frame(inputs, outputs, 0);
            return;
        }

        let mut frame = 0;
        while frame < frame_count && self.is_ramping() {
            self.render_frame(inputs, outputs, frame);
            frame += 1;
        }

        if frame < frame_count {
            self.render_bulk(inputs, outputs, frame, frame_count);
        }
    }

    fn is_ramping(&self) -> bool {
        self.rate.is_ramping()
            || self.depth.is_ramping()
            || self.dry.is_ramping()
            || self.wet.is_ramping()
    }

    /// One frame with per-frame parameter values.
    fn render_frame(&mut self, inputs: &[&[f32]], outputs: &mut [&mut [f32]], frame: usize) {
        self.lfo.set_frequency(self.rate.advance_one_frame() as f64);
        let mix = Mix::new(
            self.depth.advance_one_frame(),
            self.dry.advance_one_frame(),
            self.wet.advance_one_frame(),
        );
        let odd90 = self.odd90.advance_one_frame() > 0.5;

        let even = self.lfo.value();
        let odd = if odd90 {
            self.lfo.quad_phase_value()
        } else {
            even
        };
        self.lfo.increment();

        let even = mix.coefficient(even);
        let odd = mix.coefficient(odd);

        for (channel, (input, output)) in inputs.iter().zip(outputs.iter_mut()).enumerate() {
            let coefficient = if channel & 1 == 1 { odd } else { even };
            output[frame] = input[frame] * coefficient;
        }
    }

    /// Frames `start..end` with steady parameters.
    fn render_bulk(
        &mut self,
        inputs: &[&[f32]],
        outputs: &mut [&mut [f32]],
        start: usize,
        end: usize,
    ) {
        self.lfo.set_frequency(self.rate.bulk_value() as f64);
        let mix = Mix::new(
            self.depth.bulk_value(),
            self.dry.bulk_value(),
            self.wet.bulk_value(),
        );
        let odd90 = self.odd90.bulk_value() > 0.5;

        let mut offset = start;
        while offset < end {
            let frame_count = (end - offset).min(self.synthesizer.max_frames());
            let range = offset..offset + frame_count;
            self.synthesizer
                .synthesize(&mut self.lfo, mix, odd90, frame_count);

            for (channel, (input, output)) in inputs.iter().zip(outputs.iter_mut()).enumerate() {
                let modulations = if odd90 && channel & 1 == 1 {
                    self.synthesizer.quadrature(frame_count)
                } else {
                    self.synthesizer.in_phase(frame_count)
                };
                multiply(
                    modulations,
                    &input[range.clone()],
                    &mut output[range.clone()],
                );
            }

            offset += frame_count;
        }
    }

    /// Move waiting control-thread requests into the smoothed parameters.
    fn pick_up_requests(&mut self) {
        for address in ParameterAddress::ALL {
            if let Some((value, ramp_frames)) = self.shared.take(address) {
                self.apply(address, value, ramp_frames);
            }
        }
    }

    fn apply(&mut self, address: ParameterAddress, value: f32, ramp_frames: u32) {
        match address {
            ParameterAddress::SquareWave => {
                let waveform = if value > 0.0 {
                    Waveform::Square
                } else {
                    Waveform::Sinusoid
                };
                self.set_waveform(waveform);
            }
            ParameterAddress::Waveform => {
                self.set_waveform(Waveform::from(value as usize));
            }
            _ => {
                self.parameter_mut(address)
                    .request_ramped(value, ramp_frames);
            }
        }
    }

    fn set_waveform(&mut self, waveform: Waveform) {
        self.waveform.set_immediate(waveform.index() as f32);
        self.lfo.set_waveform(waveform);
    }

    fn parameter(&self, address: ParameterAddress) -> &SmoothedParameter {
        match address {
            ParameterAddress::Rate => &self.rate,
            ParameterAddress::Depth => &self.depth,
            ParameterAddress::Dry => &self.dry,
            ParameterAddress::Wet => &self.wet,
            ParameterAddress::Odd90 => &self.odd90,
            ParameterAddress::SquareWave | ParameterAddress::Waveform => &self.waveform,
        }
    }

    fn parameter_mut(&mut self, address: ParameterAddress) -> &mut SmoothedParameter {
        match address {
            ParameterAddress::Rate => &mut self.rate,
            ParameterAddress::Depth => &mut self.depth,
            ParameterAddress::Dry => &mut self.dry,
            ParameterAddress::Wet => &mut self.wet,
            ParameterAddress::Odd90 => &mut self.odd90,
            ParameterAddress::SquareWave | ParameterAddress::Waveform => &mut self.waveform,
        }
    }
}

fn default_ramp_frames(sample_rate: f64) -> u32 {
    (sample_rate * DEFAULT_RAMP_SECONDS) as u32
}
