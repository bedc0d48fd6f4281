//! Tests for the phase accumulator and the wavetable oscillator


use koekit::oscillator::*;
use koekit::wavetable::{generate_wavetable, wavetable, Waveform, Wavetable};
use koekit::{SAMPLE_RATE_F, SAMPLE_SCALE, WAVETABLE_SIZE};

const BLOCK_SIZE: usize = 24;

fn sine_table() -> Wavetable<WAVETABLE_SIZE> {
    generate_wavetable(|i| (2.0 * core::f32::consts::PI * i as f32 / WAVETABLE_SIZE as f32).sin())
}

/// Distance between two phases on the unit circle.
fn phase_distance(a: f64, b: f64) -> f64 {
    let d = (a - b).abs();
    d.min(1.0 - d)
}

#[test]
fn phase_accumulator_returns_to_start() {
    for &(sample_rate, frequency) in &[
        (22050.0, 440.0),
        (22050.0, 441.0),
        (22050.0, 1000.0),
        (44100.0, 27.5),
        (48000.0, 3520.0),
        (8000.0, 123.4),
    ] {
        let mut phase = PhaseAccumulator::new(sample_rate);
        phase.set_frequency(frequency);
        phase.set_phase(0.3);
        let start = f64::from(phase.phase());

        let ticks = (sample_rate / frequency).round() as usize;
        for _ in 0..ticks {
            phase.tick();
        }

        let distance = phase_distance(f64::from(phase.phase()), start);
        assert!(
            distance <= phase.increment() + 1e-6,
            "{frequency} Hz at {sample_rate} Hz drifted by {distance}"
        );
    }
}

#[test]
fn phase_accumulator_limits() {
    let mut phase = PhaseAccumulator::new(22050.0);

    phase.set_frequency(30000.0);
    assert!((phase.frequency() - 11025.0).abs() < 0.01);
    assert_eq!(phase.increment(), 0.5);

    phase.set_frequency(-100.0);
    assert_eq!(phase.increment(), 0.0);
    assert_eq!(phase.frequency(), 0.0);

    phase.set_frequency(f32::NAN);
    assert_eq!(phase.increment(), 0.0);

    phase.set_phase(1.25);
    assert!((phase.phase() - 0.25).abs() < 1e-6);
    phase.set_phase(-0.25);
    assert!((phase.phase() - 0.75).abs() < 1e-6);
    phase.set_phase(f32::INFINITY);
    assert_eq!(phase.phase(), 0.0);

    phase.set_frequency(440.0);
    phase.set_sample_rate(44100.0);
    assert!((phase.frequency() - 440.0).abs() < 0.01);
    assert!((phase.increment() - 440.0 / 44100.0).abs() < 1e-9);

    phase.set_phase(0.5);
    phase.reset();
    assert_eq!(phase.phase(), 0.0);
    assert!((phase.frequency() - 440.0).abs() < 0.01);
}

#[test]
fn phase_stays_in_unit_interval() {
    for (sample_rate, frequency) in [
        (22050.0, 11025.0),
        (22050.0, 2205.0),
        (44100.0, 4410.0),
        (22050.0, 7350.0),
        (48000.0, 1000.0),
        (22050.0, 440.0),
    ] {
        let mut phase = PhaseAccumulator::new(sample_rate);
        phase.set_frequency(frequency);

        for n in 0..10_000 {
            let p = phase.tick();
            assert!(
                (0.0..1.0).contains(&p),
                "tick {n} at {frequency} Hz / {sample_rate} Hz returned {p}"
            );
            assert!((0.0..1.0).contains(&phase.phase()));
        }
    }
}

#[test]
fn sample_rate_change_restores_clamped_frequency() {
    let mut phase = PhaseAccumulator::new(22050.0);
    phase.set_frequency(15000.0);
    assert!((phase.frequency() - 11025.0).abs() < 0.01);

    phase.set_sample_rate(44100.0);
    assert!((phase.frequency() - 15000.0).abs() < 0.01);
    assert!((phase.increment() - 15000.0 / 44100.0).abs() < 1e-9);

    phase.set_sample_rate(22050.0);
    assert!((phase.frequency() - 11025.0).abs() < 0.01);

    let mut osc = Oscillator::with_waveform(Waveform::Sine);
    osc.set_frequency(15000.0);
    osc.set_sample_rate(48000.0);
    assert!((osc.frequency() - 15000.0).abs() < 0.01);
}

#[test]
fn sine_starts_at_zero_phase() {
    let table = sine_table();
    let mut osc = WavetableOscillator::with_sample_rate(&table, 22050.0);
    osc.set_frequency(440.0);
    osc.set_amplitude(1.0);

    let first = osc.process();
    assert!(first.abs() <= 1.0 / SAMPLE_SCALE, "first sample {first}");

    // 22050 / 440 = 50.1 samples per cycle: the phase wraps after sample 50.
    let mut wrapped_at = None;
    let mut previous = osc.phase();
    for n in 1..60 {
        osc.process();
        if osc.phase() < previous {
            wrapped_at = Some(n);
            break;
        }
        previous = osc.phase();
    }
    assert_eq!(wrapped_at, Some(50));
}

#[test]
fn sine_frequency() {
    let table = sine_table();
    let mut osc = WavetableOscillator::with_sample_rate(&table, 22050.0);
    osc.set_frequency(440.0);

    let mut rising_crossings = 0;
    let mut previous = osc.process();
    for _ in 1..22050 {
        let sample = osc.process();
        if previous < 0.0 && sample >= 0.0 {
            rising_crossings += 1;
        }
        previous = sample;
    }

    assert!((439..=441).contains(&rising_crossings), "{rising_crossings}");
}

#[test]
fn sine_rms() {
    // 48000 / 480 is exactly 100 samples per period.
    let table = sine_table();
    let mut osc = WavetableOscillator::with_sample_rate(&table, 48000.0);
    osc.set_frequency(480.0);

    let period: Vec<f32> = (0..100).map(|_| osc.process()).collect();
    let rms = (period.iter().map(|s| s * s).sum::<f32>() / period.len() as f32).sqrt();

    assert!((rms - core::f32::consts::FRAC_1_SQRT_2).abs() < 0.01, "rms {rms}");
}

#[test]
fn amplitude_is_clamped() {
    let mut osc = Oscillator::with_waveform(Waveform::Square);
    osc.set_frequency(100.0);

    osc.set_amplitude(2.0);
    assert_eq!(osc.amplitude(), 1.0);
    osc.set_amplitude(-1.0);
    assert_eq!(osc.amplitude(), 0.0);
    assert_eq!(osc.process(), 0.0);

    osc.set_amplitude(0.5);
    for _ in 0..1000 {
        assert!(osc.process().abs() <= 0.5 + 1e-6);
    }
}

#[test]
fn reset_restarts_cycle() {
    let table = sine_table();
    let mut osc = WavetableOscillator::new(&table);
    osc.set_frequency(1234.0);

    let first: Vec<f32> = (0..10).map(|_| osc.process()).collect();
    for _ in 0..77 {
        osc.process();
    }
    osc.reset();
    let again: Vec<f32> = (0..10).map(|_| osc.process()).collect();

    assert_eq!(first, again);
    assert!((osc.frequency() - 1234.0).abs() < 0.01);
}

#[test]
fn table_swap_keeps_phase() {
    let mut osc = Oscillator::with_waveform(Waveform::Sine);
    osc.set_frequency(100.0);
    for _ in 0..33 {
        osc.process();
    }
    let phase = osc.phase();

    osc.set_waveform(Waveform::Saw);
    assert_eq!(osc.phase(), phase);
    assert!(core::ptr::eq(osc.wavetable(), wavetable(Waveform::Saw)));

    let table = sine_table();
    let mut custom = WavetableOscillator::new(&table);
    custom.set_phase(0.25);
    custom.set_wavetable(wavetable(Waveform::Triangle));
    assert!((custom.phase() - 0.25).abs() < 1e-6);
    // Triangle peaks at half a period.
    custom.set_phase(0.5);
    assert!((custom.process() - 1.0).abs() <= 1.0 / SAMPLE_SCALE);
}

#[test]
fn set_phase_selects_table_position() {
    let table = sine_table();
    let mut osc = WavetableOscillator::new(&table);

    osc.set_phase(0.25);
    assert!((osc.process() - 1.0).abs() < 1e-3);

    osc.set_phase(1.75);
    assert!((osc.process() + 1.0).abs() < 1e-3);
}

#[test]
fn sample_rate_change_keeps_pitch() {
    let mut osc = Oscillator::with_waveform(Waveform::Sine);
    osc.set_frequency(440.0);
    osc.set_sample_rate(44100.0);
    assert!((osc.frequency() - 440.0).abs() < 0.01);

    let mut rising_crossings = 0;
    let mut previous = osc.process();
    for _ in 1..44100 {
        let sample = osc.process();
        if previous < 0.0 && sample >= 0.0 {
            rising_crossings += 1;
        }
        previous = sample;
    }
    assert!((439..=441).contains(&rising_crossings));
}

#[test]
fn boxed_sources() {
    let mut osc = Oscillator::with_waveform(Waveform::Triangle);
    FrequencyControl::set_frequency(&mut osc, 220.0);
    assert!((FrequencyControl::frequency(&osc) - 220.0).abs() < 0.01);

    let mut source: Box<dyn SampleSource> = Box::new(osc);
    let mut copy = source.clone();

    let mut a = [0.0; BLOCK_SIZE];
    let mut b = [0.0; BLOCK_SIZE];
    source.render(&mut a);
    copy.render(&mut b);
    assert_eq!(a, b);

    source.reset();
    let mut c = [0.0; BLOCK_SIZE];
    source.render(&mut c);
    assert_eq!(a, c);
}

#[test]
fn waveform_sweep() {
    let duration = 2.0;

    let mut osc = Oscillator::with_waveform(Waveform::SoftSaw);
    osc.set_amplitude(0.8);
    let mut out = [0.0; BLOCK_SIZE];
    let mut wav_data = Vec::new();

    let blocks = (duration * SAMPLE_RATE_F / (BLOCK_SIZE as f32)) as usize;

    for n in 0..blocks {
        osc.set_frequency(modulation::exp_sweep(n, blocks, 55.0, 1760.0));
        if n == blocks / 2 {
            osc.set_waveform(Waveform::Pulse);
        }
        osc.render(&mut out);
        assert!(out.iter().all(|s| s.abs() <= 0.8 + 1e-6));
        wav_data.extend_from_slice(&out);
    }

    wav_writer::write("oscillator/sweep.wav", &wav_data).ok();
}
