//! Events delivered by the host at the start of a render call.

/// Short MIDI message. The kernel accepts these but does not react to them.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MidiEvent {
    pub cable: u8,
    pub length: u8,
    pub data: [u8; 3],
}

impl MidiEvent {
    pub fn new(data: &[u8]) -> Self {
        let mut event = Self::default();
        let length = data.len().min(event.data.len());
        event.data[..length].copy_from_slice(&data[..length]);
        event.length = length as u8;
        event
    }

    pub fn bytes(&self) -> &[u8] {
        &self.data[..(self.length as usize).min(self.data.len())]
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RenderEvent {
    /// Parameter change from host automation. `ramp_frames` of 0 applies the
    /// value on the first frame of the call.
    Parameter {
        address: u64,
        value: f32,
        ramp_frames: u32,
    },

    Midi(MidiEvent),
}
