//! Tests for the filters


use koekit::filter::*;
use koekit::noise::NoiseSource;
use koekit::oscillator::{Oscillator, SampleSource};
use koekit::wavetable::Waveform;
use koekit::SAMPLE_RATE_F;

const BLOCK_SIZE: usize = 24;

/// Peak output amplitude for a unit sine at `frequency`, measured after the
/// filter has settled.
fn sine_gain(frequency: f32, sample_rate: f32, mut filter: impl FnMut(f32) -> f32) -> f32 {
    let mut osc = Oscillator::with_waveform(Waveform::Sine);
    osc.set_sample_rate(sample_rate);
    osc.set_frequency(frequency);

    let settle = sample_rate as usize / 2;
    for _ in 0..settle {
        filter(osc.process());
    }

    (0..settle)
        .map(|_| filter(osc.process()).abs())
        .fold(0.0, f32::max)
}

#[test]
fn one_pole_outputs_are_complementary() {
    let mut noise = NoiseSource::new(7);

    for &cutoff in &[1.0, 20.0, 440.0, 1000.0, 5000.0, 10000.0, 20000.0] {
        let mut filter = OnePole::with_cutoff(cutoff, 22050.0);
        for _ in 0..2000 {
            let input = noise.process() * 4.0;
            let outputs = filter.process(input);
            let sum = outputs.low_pass + outputs.high_pass;
            assert!((sum - input).abs() <= 1e-5);
        }
    }
}

#[test]
fn one_pole_coefficient() {
    let mut filter = OnePole::with_cutoff(1000.0, 22050.0);
    let expected = 1.0 - (-2.0 * core::f32::consts::PI * 1000.0 / 22050.0).exp();
    assert!((filter.alpha() - expected).abs() < 1e-6);

    filter.set_cutoff(0.0);
    assert_eq!(filter.cutoff(), 1.0);

    filter.set_cutoff(1.0e6);
    assert!((filter.cutoff() - 0.49 * 22050.0).abs() < 0.01);

    filter.set_cutoff(f32::NAN);
    assert_eq!(filter.cutoff(), 1.0);

    filter.set_cutoff(1000.0);
    filter.set_sample_rate(44100.0);
    let expected = 1.0 - (-2.0 * core::f32::consts::PI * 1000.0 / 44100.0).exp();
    assert!((filter.alpha() - expected).abs() < 1e-6);
}

#[test]
fn one_pole_responses() {
    let mut filter = OnePole::with_cutoff(100.0, 22050.0);

    let mut low = 0.0;
    let mut high = 1.0;
    for _ in 0..5000 {
        let outputs = filter.process(1.0);
        low = outputs.low_pass;
        high = outputs.high_pass;
    }
    assert!((low - 1.0).abs() < 1e-3);
    assert!(high.abs() < 1e-3);

    let low_gain = sine_gain(5000.0, 22050.0, |x| filter.process_low_pass(x));
    assert!(low_gain < 0.1, "{low_gain}");

    filter.reset();
    let high_gain = sine_gain(5000.0, 22050.0, |x| filter.process_high_pass(x));
    assert!(high_gain > 0.9, "{high_gain}");
}

#[test]
fn one_pole_buffer_modes() {
    let mut reference = OnePole::with_cutoff(500.0, 22050.0);
    let mut filter = reference.clone();

    let mut block = [0.5; BLOCK_SIZE];
    filter.process_buffer(&mut block, FilterMode::LowPass);
    for sample in block {
        assert_eq!(sample, reference.process_low_pass(0.5));
    }

    let mut block = [0.5; BLOCK_SIZE];
    filter.process_buffer(&mut block, FilterMode::BandPass);
    assert!(block.iter().all(|&s| s == 0.0));
}

#[test]
fn svf_impulse_response_is_stable() {
    let mut filter = Svf::with_params(1000.0, 2.0, 22050.0);
    let mut wav_data = Vec::new();

    filter.process(1.0);
    wav_data.push(filter.low_pass());

    for _ in 1..10_000 {
        filter.process(0.0);
        let low = filter.low_pass();
        assert!(low.is_finite());
        assert!(low.abs() < 2.0);
        wav_data.push(low);
    }

    let tail = &wav_data[wav_data.len() - 1000..];
    assert!(tail.iter().all(|s| s.abs() < 1e-6));

    wav_writer::write("filter/svf_impulse.wav", &wav_data).ok();
}

#[test]
fn svf_outputs() {
    let mut filter = Svf::with_params(2000.0, 0.7, 22050.0);
    let mut noise = NoiseSource::new(3);

    for _ in 0..1000 {
        filter.process(noise.process());
        assert_eq!(filter.notch(), filter.low_pass() + filter.high_pass());
        assert_eq!(filter.output(FilterMode::BandPass), filter.band_pass());
        assert_eq!(filter.output(FilterMode::HighPass), filter.high_pass());
    }

    filter.reset();
    for _ in 0..5000 {
        filter.process(1.0);
    }
    assert!((filter.low_pass() - 1.0).abs() < 1e-3);
    assert!(filter.band_pass().abs() < 1e-3);
    assert!(filter.high_pass().abs() < 1e-3);
}

#[test]
fn svf_parameter_limits() {
    let mut filter = Svf::with_params(1000.0, 1.0, 22050.0);

    filter.set_params(1.0e9, 100.0);
    assert!((filter.cutoff() - 0.45 * 22050.0).abs() < 0.01);
    assert_eq!(filter.resonance(), 10.0);

    filter.set_params(0.0, 0.0);
    assert_eq!(filter.cutoff(), 1.0);
    assert_eq!(filter.resonance(), 0.1);

    filter.set_cutoff(f32::NAN);
    filter.set_resonance(f32::NAN);
    assert_eq!(filter.cutoff(), 1.0);
    assert_eq!(filter.resonance(), 0.1);

    filter.set_params(1000.0, 2.0);
    filter.set_sample_rate(8000.0);
    assert_eq!(filter.cutoff(), 1000.0);
    filter.set_sample_rate(1000.0);
    assert!((filter.cutoff() - 450.0).abs() < 0.01);
}

#[test]
fn svf_band_pass_selects_center() {
    let mut center = Svf::with_params(1000.0, 2.0, 22050.0);
    let center_gain = sine_gain(1000.0, 22050.0, |x| center.process_mode(x, FilterMode::BandPass));

    let mut off = Svf::with_params(1000.0, 2.0, 22050.0);
    let off_gain = sine_gain(8000.0, 22050.0, |x| off.process_mode(x, FilterMode::BandPass));

    assert!(center_gain > 2.0 * off_gain, "{center_gain} vs {off_gain}");
}

#[test]
fn svf_cutoff_sweep() {
    let duration = 2.0;

    let mut filter = Svf::with_params(100.0, 4.0, SAMPLE_RATE_F);
    let mut noise = NoiseSource::default();
    noise.set_amplitude(0.5);
    let mut out = [0.0; BLOCK_SIZE];
    let mut wav_data = Vec::new();

    let blocks = (duration * SAMPLE_RATE_F / (BLOCK_SIZE as f32)) as usize;

    for n in 0..blocks {
        filter.set_cutoff(modulation::exp_sweep(n, blocks, 100.0, 5000.0));
        noise.render(&mut out);
        filter.process_buffer(&mut out, FilterMode::LowPass);
        assert!(out.iter().all(|s| s.is_finite()));
        wav_data.extend_from_slice(&out);
    }

    wav_writer::write("filter/svf_sweep.wav", &wav_data).ok();
}

#[test]
fn biquad_presets() {
    let sample_rate = 22050.0;

    let mut low_pass = Biquad::low_pass(1000.0, sample_rate);
    let (b0, b1, b2, a1, a2) = low_pass.coefficients();
    assert!((b0 - b2).abs() < 1e-7);
    assert!((b1 - 2.0 * b0).abs() < 1e-7);
    // Unity gain at DC.
    assert!(((b0 + b1 + b2) / (1.0 + a1 + a2) - 1.0).abs() < 1e-4);

    let dc = (0..5000).map(|_| low_pass.process(1.0)).last();
    assert!(dc.is_some_and(|dc| (dc - 1.0).abs() < 1e-3));

    let mut low_pass = Biquad::low_pass(1000.0, sample_rate);
    let stop = sine_gain(8000.0, sample_rate, |x| low_pass.process(x));
    assert!(stop < 0.05, "{stop}");

    let mut high_pass = Biquad::high_pass(2000.0, sample_rate);
    let dc = (0..5000).map(|_| high_pass.process(1.0)).last();
    assert!(dc.is_some_and(|dc| dc.abs() < 1e-3));

    let mut high_pass = Biquad::high_pass(2000.0, sample_rate);
    let pass = sine_gain(8000.0, sample_rate, |x| high_pass.process(x));
    assert!((pass - 1.0).abs() < 0.1, "{pass}");

    let mut band_pass = Biquad::band_pass(1000.0, 1.0, sample_rate);
    let center = sine_gain(1000.0, sample_rate, |x| band_pass.process(x));
    assert!((center - 1.0).abs() < 0.05, "{center}");

    let mut band_pass = Biquad::band_pass(1000.0, 1.0, sample_rate);
    let dc = (0..5000).map(|_| band_pass.process(1.0)).last();
    assert!(dc.is_some_and(|dc| dc.abs() < 1e-3));
}

#[test]
fn biquad_sample_rate_change_recomputes_design() {
    let mut filter = Biquad::low_pass(1000.0, 22050.0);
    filter.set_sample_rate(44100.0);
    assert_eq!(
        filter.coefficients(),
        Biquad::low_pass(1000.0, 44100.0).coefficients()
    );

    let mut filter = Biquad::band_pass(500.0, 2.0, 22050.0);
    filter.set_sample_rate(48000.0);
    assert_eq!(
        filter.coefficients(),
        Biquad::band_pass(500.0, 2.0, 48000.0).coefficients()
    );

    let mut custom = Biquad::with_sample_rate(22050.0);
    custom.set_coefficients(0.5, 0.25, 0.125, -0.1, 0.05);
    custom.set_sample_rate(44100.0);
    assert_eq!(custom.coefficients(), (0.5, 0.25, 0.125, -0.1, 0.05));
}

#[test]
fn biquad_default_passes_through() {
    let mut filter = Biquad::new();
    let mut noise = NoiseSource::new(11);

    for _ in 0..100 {
        let x = noise.process();
        assert_eq!(filter.process(x), x);
    }
}

#[test]
fn biquad_reset_clears_history() {
    let mut filter = Biquad::high_pass(300.0, 22050.0);
    let mut block = [0.0; BLOCK_SIZE];
    block[0] = 1.0;

    let mut first = block;
    filter.process_buffer(&mut first);

    let mut noise = NoiseSource::default();
    for _ in 0..100 {
        filter.process(noise.process());
    }
    filter.reset();

    let mut second = block;
    filter.process_buffer(&mut second);
    assert_eq!(first, second);
}

#[test]
fn dc_blocker() {
    let mut filter = DcBlocker::new();

    let settled = (0..5000).map(|_| filter.process(1.0)).last();
    assert!(settled.is_some_and(|y| y.abs() < 1e-6));

    filter.reset();
    let gain = sine_gain(1000.0, 22050.0, |x| filter.process(x + 0.5));
    assert!(gain > 0.9 && gain < 1.1, "{gain}");

    let mut reference = DcBlocker::new();
    let mut block = [0.0; BLOCK_SIZE];
    let mut noise = NoiseSource::default();
    noise.render(&mut block);
    let expected: Vec<f32> = block.iter().map(|&x| reference.process(x)).collect();

    let mut buffered = DcBlocker::new();
    buffered.process_buffer(&mut block);
    for (a, b) in block.iter().zip(expected) {
        assert!((a - b).abs() < 1e-5);
    }
}
