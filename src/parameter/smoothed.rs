//! Linearly ramped parameter for the render thread.
//!
//! The value in effect (`immediate`) only ever moves by the ramp increment
//! once per frame. When the ramp runs out it lands exactly on the target so
//! no rounding residue is left behind.

use super::Mapping;

#[derive(Debug, Clone)]
pub struct SmoothedParameter {
    mapping: Mapping,

    // Render values.
    immediate: f32,
    pending: f32,

    // Ramp state. No ramp when `ramp_remaining` is 0.
    ramp_remaining: u32,
    ramp_increment: f32,
}

impl SmoothedParameter {
    /// Create a parameter resting at the logical value `default`.
    pub fn new(mapping: Mapping, default: f32) -> Self {
        let value = mapping.to_render(default);
        Self {
            mapping,
            immediate: value,
            pending: value,
            ramp_remaining: 0,
            ramp_increment: 0.0,
        }
    }

    pub fn mapping(&self) -> Mapping {
        self.mapping
    }

    /// Jump to a logical value, cancelling any ramp. Only for initialization
    /// and resets.
    pub fn set_immediate(&mut self, value: f32) {
        let value = self.mapping.to_render(value);
        self.immediate = value;
        self.pending = value;
        self.ramp_remaining = 0;
        self.ramp_increment = 0.0;
    }

    /// Head for the logical value `target` over `duration` frames.
    ///
    /// A zero duration, or a mapping that cannot ramp, applies the target at
    /// once. A ramp already in progress restarts from where it is now.
    /// Returns the duration actually used.
    pub fn request_ramped(&mut self, target: f32, duration: u32) -> u32 {
        let target = self.mapping.to_render(target);
        let duration = if self.mapping.can_ramp() { duration } else { 0 };

        self.pending = target;

        if duration == 0 || target == self.immediate {
            self.immediate = target;
            self.ramp_remaining = 0;
            self.ramp_increment = 0.0;
            return 0;
        }

        self.ramp_increment = (target - self.immediate) / duration as f32;
        self.ramp_remaining = duration;
        duration
    }

    /// Move one frame along the ramp and return the value for that frame.
    #[inline]
    pub fn advance_one_frame(&mut self) -> f32 {
        if self.ramp_remaining > 0 {
            self.ramp_remaining -= 1;
            if self.ramp_remaining == 0 {
                self.immediate = self.pending;
            } else {
                self.immediate += self.ramp_increment;

                // Never step past the target.
                if (self.ramp_increment > 0.0 && self.immediate > self.pending)
                    || (self.ramp_increment < 0.0 && self.immediate < self.pending)
                {
                    self.immediate = self.pending;
                }
            }
        }

        self.immediate
    }

    /// Value for block-wise consumers. Does not advance a ramp.
    #[inline]
    pub fn bulk_value(&self) -> f32 {
        self.immediate
    }

    /// Hold the current value and drop the ramp.
    pub fn stop_ramping(&mut self) {
        self.pending = self.immediate;
        self.ramp_remaining = 0;
        self.ramp_increment = 0.0;
    }

    #[inline]
    pub fn is_ramping(&self) -> bool {
        self.ramp_remaining > 0
    }

    pub fn ramp_remaining(&self) -> u32 {
        self.ramp_remaining
    }

    /// Render value currently in effect.
    pub fn immediate_value(&self) -> f32 {
        self.immediate
    }

    /// Render value the parameter is heading for.
    pub fn pending_value(&self) -> f32 {
        self.pending
    }

    /// [`SmoothedParameter::pending_value`] in logical units.
    pub fn pending_logical(&self) -> f32 {
        self.mapping.to_logical(self.pending)
    }
}
