//! Test signals

#![allow(dead_code)]

/// Returns a sine wave in range -1.0..1.0 sampled at `frame`.
pub fn sine(frame: usize, frequency: f32, sample_rate: f32) -> f32 {
    (2.0 * std::f32::consts::PI * frequency * frame as f32 / sample_rate).sin()
}

/// Fills `out` with a sine wave starting at `first_frame`.
pub fn fill_sine(out: &mut [f32], first_frame: usize, frequency: f32, sample_rate: f32) {
    for (index, sample) in out.iter_mut().enumerate() {
        *sample = sine(first_frame + index, frequency, sample_rate);
    }
}

/// Returns a ramp in range 0.0..1.0
pub fn ramp_up(block_no: usize, block_count: usize) -> f32 {
    block_no as f32 / block_count as f32
}

/// Largest absolute difference between neighbouring samples.
pub fn max_step(samples: &[f32]) -> f32 {
    samples
        .windows(2)
        .map(|pair| (pair[1] - pair[0]).abs())
        .fold(0.0, f32::max)
}
