//! Utility functions.
//!
//! Small numeric helpers shared by the oscillator, the modulation synthesizer
//! and the render loop.

#[allow(unused_imports)]
use num_traits::float::Float;

/// Number of lanes processed together by [`multiply`].
pub const LANES: usize = 8;

/// Map a value in `[-1, 1]` to `[0, 1]`.
#[inline]
pub fn bipolar_to_unipolar(x: f32) -> f32 {
    0.5 * x + 0.5
}

/// Map a value in `[0, 1]` to `[-1, 1]`.
#[inline]
pub fn unipolar_to_bipolar(x: f64) -> f64 {
    2.0 * x - 1.0
}

/// Parabolic approximation of `sin(angle)` for `angle` in `[-π, π]`.
///
/// Cheap and deterministic. Stays within about 0.001 of the real sine.
#[inline]
pub fn parabolic_sine(angle: f64) -> f64 {
    const B: f64 = 4.0 / core::f64::consts::PI;
    const C: f64 = -4.0 / (core::f64::consts::PI * core::f64::consts::PI);
    const P: f64 = 0.225;

    let y = B * angle + C * angle * angle.abs();
    P * (y * y.abs() - y) + y
}

/// Element-wise product of `a` and `b`, written to `out`.
///
/// Works on fixed-width chunks so the compiler can keep the inner loop in
/// vector registers. All three slices must have the same length.
#[inline]
pub fn multiply(a: &[f32], b: &[f32], out: &mut [f32]) {
    debug_assert_eq!(a.len(), out.len());
    debug_assert_eq!(b.len(), out.len());

    let mut out_chunks = out.chunks_exact_mut(LANES);
    let mut a_chunks = a.chunks_exact(LANES);
    let mut b_chunks = b.chunks_exact(LANES);

    for ((o, x), y) in (&mut out_chunks).zip(&mut a_chunks).zip(&mut b_chunks) {
        for lane in 0..LANES {
            o[lane] = x[lane] * y[lane];
        }
    }

    for ((o, x), y) in out_chunks
        .into_remainder()
        .iter_mut()
        .zip(a_chunks.remainder())
        .zip(b_chunks.remainder())
    {
        *o = x * y;
    }
}

