//! Tests for the LFO


use tremolo_dsp::oscillator::lfo::{Lfo, Waveform};

const SAMPLE_RATE: f64 = 48000.0;

// 375 Hz at 48 kHz advances the phase by exactly 1/128 per sample.
const EXACT_FREQUENCY: f64 = 375.0;
const EXACT_PERIOD: usize = 128;

const TOLERANCE: f32 = 1e-6;

fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() <= TOLERANCE,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn sinusoid_starts_at_zero_and_peaks_a_quarter_cycle_later() {
    let mut lfo = Lfo::with(SAMPLE_RATE, EXACT_FREQUENCY, Waveform::Sinusoid);

    let (in_phase, quad_phase) = lfo.tick();
    assert_close(in_phase, 0.0);
    assert_close(quad_phase, 1.0);

    for _ in 1..EXACT_PERIOD / 4 {
        lfo.tick();
    }

    assert_eq!(lfo.phase(), 0.25);
    let (in_phase, quad_phase) = lfo.tick();
    assert_close(in_phase, 1.0);
    assert_close(quad_phase, 0.0);
}

#[test]
fn waveform_shapes() {
    let cases = [
        (Waveform::Sawtooth, 0.0, -1.0),
        (Waveform::Sawtooth, 0.5, 0.0),
        (Waveform::Sawtooth, 0.75, 0.5),
        (Waveform::Triangle, 0.0, 1.0),
        (Waveform::Triangle, 0.25, 0.0),
        (Waveform::Triangle, 0.5, -1.0),
        (Waveform::Triangle, 0.75, 0.0),
        (Waveform::Square, 0.0, -1.0),
        (Waveform::Square, 0.25, -1.0),
        (Waveform::Square, 0.5, -1.0),
        (Waveform::Square, 0.75, 1.0),
        (Waveform::Sinusoid, 0.5, 0.0),
        (Waveform::Sinusoid, 0.75, -1.0),
    ];

    let mut lfo = Lfo::new();
    for (waveform, phase, expected) in cases {
        lfo.set_waveform(waveform);
        lfo.set_phase(phase);
        assert!(
            (lfo.value() - expected).abs() <= TOLERANCE,
            "{waveform:?} at {phase}: expected {expected}, got {}",
            lfo.value()
        );
    }
}

#[test]
fn sinusoid_tracks_real_sine() {
    let mut lfo = Lfo::with(SAMPLE_RATE, 1.0, Waveform::Sinusoid);
    for _ in 0..SAMPLE_RATE as usize {
        let phase = lfo.phase();
        let expected = (std::f64::consts::PI - phase * 2.0 * std::f64::consts::PI).sin();
        let (value, _) = lfo.tick();
        assert!((value as f64 - expected).abs() < 0.002);
    }
}

#[test]
fn phase_returns_after_one_period() {
    for waveform in Waveform::ALL {
        let mut lfo = Lfo::with(SAMPLE_RATE, EXACT_FREQUENCY, waveform);
        let start = lfo.phase();
        let first = lfo.tick();

        for _ in 1..EXACT_PERIOD {
            lfo.tick();
        }

        assert_eq!(lfo.phase(), start);
        assert_eq!(lfo.tick(), first);
    }
}

#[test]
fn phase_returns_after_one_period_approximately() {
    let mut lfo = Lfo::with(SAMPLE_RATE, 1.0, Waveform::Sinusoid);
    let start = lfo.phase();

    for _ in 0..SAMPLE_RATE as usize {
        lfo.tick();
    }

    let distance = (lfo.phase() - start).abs();
    assert!(distance.min(1.0 - distance) < 1e-9);
}

#[test]
fn negative_frequency_runs_backwards() {
    let mut lfo = Lfo::with(SAMPLE_RATE, -EXACT_FREQUENCY, Waveform::Sawtooth);
    assert_eq!(lfo.phase(), 1.0);
    assert_eq!(lfo.quad_phase(), 0.25);

    let (first, _) = lfo.tick();
    assert_close(first, 1.0);
    assert_eq!(lfo.phase(), 1.0 - 1.0 / EXACT_PERIOD as f64);

    for _ in 1..EXACT_PERIOD {
        lfo.tick();
        assert!(lfo.phase() > 0.0 && lfo.phase() <= 1.0);
    }

    assert_eq!(lfo.phase(), 1.0);
}

#[test]
fn save_and_restore_replays_the_same_sequence() {
    let mut lfo = Lfo::with(SAMPLE_RATE, 3.3, Waveform::Triangle);
    for _ in 0..1234 {
        lfo.tick();
    }

    let state = lfo.save_state();
    let first: Vec<_> = (0..256).map(|_| lfo.tick()).collect();

    lfo.restore_state(state);
    let second: Vec<_> = (0..256).map(|_| lfo.tick()).collect();

    assert_eq!(first, second);
}

#[test]
fn frequency_change_keeps_phase() {
    let mut lfo = Lfo::with(SAMPLE_RATE, EXACT_FREQUENCY, Waveform::Sinusoid);
    for _ in 0..10 {
        lfo.tick();
    }

    let phase = lfo.phase();
    lfo.set_frequency(2.0 * EXACT_FREQUENCY);
    assert_eq!(lfo.phase(), phase);
    assert_eq!(lfo.phase_increment(), 2.0 / EXACT_PERIOD as f64);

    lfo.tick();
    assert_eq!(lfo.phase(), phase + 2.0 / EXACT_PERIOD as f64);
}

#[test]
fn sample_rate_change_restarts_phase() {
    let mut lfo = Lfo::with(SAMPLE_RATE, 5.0, Waveform::Sinusoid);
    for _ in 0..100 {
        lfo.tick();
    }

    lfo.set_sample_rate(96000.0);
    assert_eq!(lfo.phase(), 0.0);
    assert_eq!(lfo.quad_phase(), 0.25);
    assert_eq!(lfo.phase_increment(), 5.0 / 96000.0);
}

#[test]
fn configure_replaces_all_settings() {
    let mut lfo = Lfo::with(SAMPLE_RATE, 5.0, Waveform::Sinusoid);
    for _ in 0..100 {
        lfo.tick();
    }

    lfo.configure(44100.0, -2.0, Waveform::Triangle);
    assert_eq!(lfo.sample_rate(), 44100.0);
    assert_eq!(lfo.frequency(), -2.0);
    assert_eq!(lfo.waveform(), Waveform::Triangle);
    assert_eq!(lfo.phase_increment(), -2.0 / 44100.0);
    assert_eq!(lfo.phase(), 1.0);
}

#[test]
fn offset_phase_moves_quadrature_along() {
    let mut lfo = Lfo::with(SAMPLE_RATE, EXACT_FREQUENCY, Waveform::Sawtooth);
    lfo.set_phase(0.875);
    lfo.offset_phase(0.25);

    assert_eq!(lfo.phase(), 0.125);
    assert_eq!(lfo.quad_phase(), 0.375);
}

#[test]
fn waveform_from_index_saturates() {
    assert_eq!(Waveform::from(0), Waveform::Sinusoid);
    assert_eq!(Waveform::from(1), Waveform::Triangle);
    assert_eq!(Waveform::from(2), Waveform::Sawtooth);
    assert_eq!(Waveform::from(3), Waveform::Square);
    assert_eq!(Waveform::from(42), Waveform::Square);

    for waveform in Waveform::ALL {
        assert_eq!(Waveform::from(waveform.index()), waveform);
    }
}

#[test]
fn render_waveforms() {
    let duration = 2.0;

    for waveform in Waveform::ALL {
        let mut lfo = Lfo::with(SAMPLE_RATE, 2.0, waveform);
        let frames = (duration * SAMPLE_RATE) as usize;
        let mut in_phase = Vec::with_capacity(frames);
        let mut quad_phase = Vec::with_capacity(frames);

        for _ in 0..frames {
            let (value, quad) = lfo.tick();
            in_phase.push(value);
            quad_phase.push(quad);
        }

        wav_writer::write(
            format!("lfo/{}.wav", waveform.name().to_lowercase()),
            SAMPLE_RATE as u32,
            &[in_phase.as_slice(), quad_phase.as_slice()],
        )
        .ok();
    }
}
