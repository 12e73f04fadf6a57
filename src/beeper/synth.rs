//! Beeper sample synthesis
//!
//! Per-sample generation of the two-tone square wave output. The synth
//! owns the pending-note queue and the playback position; the streaming
//! device locks it once per block and calls [`Synth::render_into`], so
//! every queue access and every playback-state mutation happens under
//! the same mutex.
//!
//! Algorithm per sample:
//! 1. If the current note has expired, pop the next queued note and set
//!    its end time from [`DURATION_SCALE`].
//! 2. Each non-silent tone contributes a 50% duty square wave at fixed
//!    amplitude, phase derived from elapsed time.
//! 3. With both tones sounding, the sum is clipped to ±[`AMPLITUDE`]
//!    rather than mixed linearly. The beeper was a single-bit DAC; the
//!    saturation is the characteristic sound, not a bug.
//! 4. A bounded dither offset is added, silence included.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::dither::{DitherSource, LfsrDither};
use super::freq::tone_to_hz;
use super::note::Note;

/// Fixed square wave amplitude on the normalized [-1, 1] scale.
///
/// 8192 on the original's 16-bit integer scale; conservative enough to
/// leave headroom for the dither offset.
pub const AMPLITUDE: f32 = 8_192.0 / 32_768.0;

/// Seconds of audio per duration tick of a queued note.
///
/// Distinct from the tune driver's visual pacing scale
/// ([`crate::player::FrameTiming`]); the two clocks are deliberately
/// independent.
pub const DURATION_SCALE: f64 = 0.002;

/// Beeper synthesis state: pending notes plus playback position
pub struct Synth {
    sample_rate: f64,
    queue: VecDeque<Note>,
    /// Seconds elapsed since the last clear
    current_time: f64,
    /// Note currently sounding, if any
    current_note: Option<Note>,
    /// Absolute time at which the current note expires
    note_end_time: f64,
    /// Notes popped from the queue since the last clear
    notes_started: u64,
    dither: Box<dyn DitherSource>,
    playing: Arc<AtomicBool>,
}

impl Synth {
    /// Create a synth with the default LFSR dither source
    pub fn new(sample_rate: u32) -> Self {
        Self::with_dither(sample_rate, Box::new(LfsrDither::new()))
    }

    /// Create a synth with an explicit dither source
    ///
    /// Tests that need reproducible sample sequences pass
    /// [`super::dither::NullDither`] or a seeded LFSR here.
    pub fn with_dither(sample_rate: u32, dither: Box<dyn DitherSource>) -> Self {
        Synth {
            sample_rate: sample_rate as f64,
            queue: VecDeque::new(),
            current_time: 0.0,
            current_note: None,
            note_end_time: 0.0,
            notes_started: 0,
            dither,
            playing: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Append a note to the queue and raise the playing flag
    pub fn push(&mut self, note: Note) {
        self.queue.push_back(note);
        self.playing.store(true, Ordering::Relaxed);
    }

    /// Empty the queue and reset the playback position
    ///
    /// The single sanctioned cross-thread reset: callers take the synth
    /// mutex, so the current note cannot be torn mid-pop. Idempotent.
    pub fn clear(&mut self) {
        self.queue.clear();
        self.current_note = None;
        self.current_time = 0.0;
        self.note_end_time = 0.0;
        self.notes_started = 0;
        self.playing.store(false, Ordering::Relaxed);
    }

    /// Shared handle to the advisory playing flag
    ///
    /// Best-effort hint only; it is read without the queue lock and
    /// must not be used as a synchronization barrier.
    pub fn playing_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.playing)
    }

    /// Number of queued notes not yet started
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Note currently sounding, if any
    pub fn current_note(&self) -> Option<Note> {
        self.current_note
    }

    /// Seconds of audio elapsed since the last clear
    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    /// Absolute time at which the current note expires
    pub fn note_end_time(&self) -> f64 {
        self.note_end_time
    }

    /// Notes popped from the queue since the last clear
    pub fn notes_started(&self) -> u64 {
        self.notes_started
    }

    /// Sample rate this synth renders at
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate as u32
    }

    #[inline]
    fn square(time: f64, freq: f64) -> f32 {
        let phase = (time * freq).fract();
        if phase < 0.5 {
            AMPLITUDE
        } else {
            -AMPLITUDE
        }
    }

    /// Generate one output sample and advance the playback position
    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        let mut sample = 0.0f32;

        if self.current_time >= self.note_end_time {
            if let Some(note) = self.queue.pop_front() {
                self.note_end_time = self.current_time + note.duration as f64 * DURATION_SCALE;
                self.current_note = Some(note);
                self.notes_started += 1;
            }
        }

        if self.current_time < self.note_end_time {
            if let Some(note) = self.current_note {
                let freq1 = tone_to_hz(note.freq1);
                let freq2 = tone_to_hz(note.freq2);

                if freq1 > 0.0 {
                    sample += Self::square(self.current_time, freq1);
                }
                if freq2 > 0.0 {
                    sample += Self::square(self.current_time, freq2);
                }

                // Both tones drive the same single-bit output: saturate
                // instead of summing linearly
                if freq1 > 0.0 && freq2 > 0.0 {
                    sample = if sample > 0.0 { AMPLITUDE } else { -AMPLITUDE };
                }
            }
        }

        sample += self.dither.next_offset();

        self.current_time += 1.0 / self.sample_rate;
        sample
    }

    /// Fill a buffer with output samples
    ///
    /// An empty queue renders dithered silence rather than stalling.
    /// Drops the playing flag once the queue has drained and the
    /// current note expired. No allocation.
    pub fn render_into(&mut self, out: &mut [f32]) {
        for slot in out.iter_mut() {
            *slot = self.next_sample();
        }

        if self.current_time >= self.note_end_time && self.queue.is_empty() {
            self.playing.store(false, Ordering::Relaxed);
        }
    }
}
