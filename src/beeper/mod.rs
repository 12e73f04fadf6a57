//! Beeper synthesis core
//!
//! The [`BeeperEngine`] is a cloneable handle over the shared synthesis
//! state: game logic pushes [`Note`]s from the logic thread, the audio
//! device drains them on the playback thread. One mutex guards the
//! queue and the playback position; the advisory playing flag is a
//! lock-free hint beside it.

pub mod dither;
pub mod freq;
pub mod note;
pub mod synth;

pub use dither::{DitherSource, LfsrDither, NullDither, DITHER_AMPLITUDE};
pub use freq::{tone_to_hz, BASE_CLOCK_HZ};
pub use note::{Note, SoundCategory};
pub use synth::{Synth, AMPLITUDE, DURATION_SCALE};

use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Tone code for the jump effect
const JUMP_FREQ: u8 = 150;
/// Tone code for the collect effect
const COLLECT_FREQ: u8 = 200;
/// Tone code for the death effect
const DEATH_FREQ: u8 = 50;
/// Tone code for the level-complete effect
const COMPLETE_FREQ: u8 = 100;

/// Duration ticks for each in-game music note
const INGAME_NOTE_DURATION: u8 = 90;

/// Shared handle to the beeper synthesis state
///
/// Clones share the same queue and playback position. Producers call
/// [`queue_note`](Self::queue_note) and [`clear`](Self::clear); the
/// streaming device renders through [`lock`](Self::lock).
#[derive(Clone)]
pub struct BeeperEngine {
    synth: Arc<Mutex<Synth>>,
    playing: Arc<AtomicBool>,
}

impl BeeperEngine {
    /// Create an engine rendering at the given sample rate
    pub fn new(sample_rate: u32) -> Self {
        Self::from_synth(Synth::new(sample_rate))
    }

    /// Create an engine around a pre-built synth
    ///
    /// Lets tests and offline renderers inject a deterministic dither
    /// source.
    pub fn from_synth(synth: Synth) -> Self {
        let playing = synth.playing_flag();
        BeeperEngine {
            synth: Arc::new(Mutex::new(synth)),
            playing,
        }
    }

    /// Append a note to the queue
    ///
    /// Visible to the playback thread on its next render pass.
    pub fn queue_note(&self, freq1: u8, freq2: u8, duration: u8, category: SoundCategory) {
        self.synth
            .lock()
            .push(Note::new(freq1, freq2, duration, category));
    }

    /// Atomically empty the queue and reset the playback position
    ///
    /// Silences mid-tune cancellation and resets state between distinct
    /// playback sessions. Idempotent.
    pub fn clear(&self) {
        self.synth.lock().clear();
    }

    /// Advisory playing flag
    ///
    /// True once a note is queued, false after the queue drains and the
    /// current note expires. Read without the queue lock; a best-effort
    /// hint, not a synchronization barrier.
    pub fn is_playing(&self) -> bool {
        self.playing.load(Ordering::Relaxed)
    }

    /// Queue one note of the cyclic in-game background music
    pub fn play_in_game_music(&self, note: u8) {
        self.queue_note(note, 0, INGAME_NOTE_DURATION, SoundCategory::InGame);
    }

    /// Queue a one-shot game effect
    ///
    /// Theme and in-game music go through their dedicated drivers, so
    /// those categories are ignored here. Effects only augment an
    /// active soundscape: nothing is queued while the engine is not
    /// currently playing.
    pub fn play_game_sound(&self, category: SoundCategory) {
        if !self.is_playing() {
            return;
        }

        let (freq, duration) = match category {
            // Driven by the dedicated players, not one-shot effects
            SoundCategory::Theme | SoundCategory::InGame => return,
            SoundCategory::Jump => (JUMP_FREQ, 5),
            SoundCategory::Collect => (COLLECT_FREQ, 3),
            SoundCategory::Death => (DEATH_FREQ, 20),
            SoundCategory::Complete => (COMPLETE_FREQ, 15),
        };

        self.queue_note(freq, 0, duration, category);
    }

    /// Lock the underlying synth for rendering or inspection
    pub fn lock(&self) -> parking_lot::MutexGuard<'_, Synth> {
        self.synth.lock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet_engine() -> BeeperEngine {
        BeeperEngine::from_synth(Synth::with_dither(44_100, Box::new(NullDither)))
    }

    #[test]
    fn test_queue_note_raises_playing_flag() {
        let engine = quiet_engine();
        assert!(!engine.is_playing());
        engine.queue_note(128, 0, 10, SoundCategory::Theme);
        assert!(engine.is_playing());
        assert_eq!(engine.lock().queue_len(), 1);
    }

    #[test]
    fn test_clear_silences_engine() {
        let engine = quiet_engine();
        engine.queue_note(128, 0, 10, SoundCategory::Theme);
        engine.clear();
        assert!(!engine.is_playing());
        assert_eq!(engine.lock().queue_len(), 0);
        assert_eq!(engine.lock().current_time(), 0.0);
    }

    #[test]
    fn test_game_sound_requires_active_soundscape() {
        let engine = quiet_engine();
        engine.play_game_sound(SoundCategory::Jump);
        assert_eq!(engine.lock().queue_len(), 0, "no effect from silence");

        engine.queue_note(128, 0, 10, SoundCategory::InGame);
        engine.play_game_sound(SoundCategory::Jump);
        assert_eq!(engine.lock().queue_len(), 2);
    }

    #[test]
    fn test_game_sound_ignores_music_categories() {
        let engine = quiet_engine();
        engine.queue_note(128, 0, 10, SoundCategory::InGame);
        engine.play_game_sound(SoundCategory::Theme);
        engine.play_game_sound(SoundCategory::InGame);
        assert_eq!(engine.lock().queue_len(), 1);
    }

    #[test]
    fn test_effect_table() {
        let engine = quiet_engine();
        engine.queue_note(128, 0, 10, SoundCategory::InGame);

        engine.play_game_sound(SoundCategory::Collect);
        engine.play_game_sound(SoundCategory::Death);

        let synth = engine.lock();
        assert_eq!(synth.queue_len(), 3);
        // First queued note is the in-game note; effects follow in order
        drop(synth);

        let mut buf = vec![0.0f32; 16];
        engine.lock().render_into(&mut buf);
        assert_eq!(engine.lock().current_note().map(|n| n.freq1), Some(128));
    }

    #[test]
    fn test_in_game_music_duration() {
        let engine = quiet_engine();
        engine.play_in_game_music(42);
        let mut buf = vec![0.0f32; 16];
        engine.lock().render_into(&mut buf);
        let note = engine.lock().current_note().expect("note should sound");
        assert_eq!(note.freq1, 42);
        assert_eq!(note.freq2, 0);
        assert_eq!(note.duration, INGAME_NOTE_DURATION);
        assert_eq!(note.category, SoundCategory::InGame);
    }

    #[test]
    fn test_clones_share_state() {
        let engine = quiet_engine();
        let other = engine.clone();
        engine.queue_note(128, 0, 10, SoundCategory::Theme);
        assert!(other.is_playing());
        assert_eq!(other.lock().queue_len(), 1);
        other.clear();
        assert!(!engine.is_playing());
    }
}
