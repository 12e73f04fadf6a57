//! Offline rendering and WAV export
//!
//! Renders a tune through a standalone synth without touching an audio
//! device, and writes the result as 16-bit mono WAV. Samples stay f32
//! through the whole pipeline and are clamp-converted to i16 only at
//! the file write.

use crate::beeper::{DitherSource, LfsrDither, Note, SoundCategory, Synth, DURATION_SCALE};
use crate::player::Tune;
use crate::Result;
use std::path::Path;

/// Samples rendered per chunk when writing WAV output
const SAMPLES_PER_CHUNK: usize = 4096;

/// Render a tune to raw f32 samples at the given sample rate
///
/// Uses the default LFSR dither; tests needing exact sample sequences
/// call [`render_tune_with_dither`] with a null or seeded source.
pub fn render_tune(tune: &Tune, sample_rate: u32) -> Vec<f32> {
    render_tune_with_dither(tune, sample_rate, Box::new(LfsrDither::new()))
}

/// Render a tune to raw f32 samples with an explicit dither source
pub fn render_tune_with_dither(
    tune: &Tune,
    sample_rate: u32,
    dither: Box<dyn DitherSource>,
) -> Vec<f32> {
    let mut synth = Synth::with_dither(sample_rate, dither);
    for step in tune.steps() {
        synth.push(Note::new(
            step.freq1,
            step.freq2,
            step.duration,
            SoundCategory::Theme,
        ));
    }

    let total =
        (tune.total_ticks() as f64 * DURATION_SCALE * sample_rate as f64).ceil() as usize;
    let mut samples = vec![0.0f32; total];
    synth.render_into(&mut samples);
    samples
}

/// Render a tune and write it as a 16-bit mono WAV file
///
/// # Example
/// ```no_run
/// use zxbeeper::export::export_tune_to_wav;
/// use zxbeeper::{Tune, TuneStep};
///
/// let tune = Tune::from_steps(vec![TuneStep::new(50, 128, 102)]);
/// export_tune_to_wav(&tune, "tune.wav", 44_100).unwrap();
/// ```
pub fn export_tune_to_wav<P: AsRef<Path>>(
    tune: &Tune,
    output_path: P,
    sample_rate: u32,
) -> Result<()> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(output_path.as_ref(), spec)
        .map_err(|e| format!("Failed to create WAV file: {}", e))?;

    let mut synth = Synth::new(sample_rate);
    for step in tune.steps() {
        synth.push(Note::new(
            step.freq1,
            step.freq2,
            step.duration,
            SoundCategory::Theme,
        ));
    }

    // Generate and write in chunks to keep memory flat
    let total =
        (tune.total_ticks() as f64 * DURATION_SCALE * sample_rate as f64).ceil() as usize;
    let mut sample_buffer = vec![0.0f32; SAMPLES_PER_CHUNK];
    let mut samples_written = 0;

    while samples_written < total {
        let chunk_len = (total - samples_written).min(SAMPLES_PER_CHUNK);
        let chunk = &mut sample_buffer[..chunk_len];
        synth.render_into(chunk);

        for &sample in chunk.iter() {
            let sample_i16 = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
            writer
                .write_sample(sample_i16)
                .map_err(|e| format!("Failed to write sample: {}", e))?;
        }

        samples_written += chunk_len;
    }

    writer
        .finalize()
        .map_err(|e| format!("Failed to finalize WAV file: {}", e))?;

    Ok(())
}
