//! Public sound facade
//!
//! [`BeeperSound`] is the entry point games use: initialize once, queue
//! notes and effects, shut down once. Sound is a non-essential
//! enhancement — if the audio device cannot be acquired the facade
//! stays disabled and every call degrades to a silent no-op instead of
//! failing the caller.

use crate::beeper::{BeeperEngine, SoundCategory};
use crate::streaming::{AudioDevice, StreamConfig};

/// Facade over the beeper engine and its output device
///
/// Owns the engine with an explicit lifetime: created at audio startup,
/// dropped (or [`shutdown`](Self::shutdown)) at exit. Producers that
/// need direct queue access borrow the engine handle via
/// [`engine`](Self::engine).
pub struct BeeperSound {
    engine: BeeperEngine,
    /// None while sound is disabled (device acquisition failed or
    /// shutdown was called)
    device: Option<AudioDevice>,
}

impl BeeperSound {
    /// Open the output device and start the synthesis stream
    ///
    /// On device failure the facade is returned disabled rather than
    /// failing: all queue/play calls become silent no-ops and
    /// [`is_enabled`](Self::is_enabled) reports false. Callers keep
    /// functioning without sound.
    pub fn initialize(config: StreamConfig) -> Self {
        let engine = BeeperEngine::new(config.sample_rate);
        let device = match AudioDevice::new(&engine, &config) {
            Ok(device) => Some(device),
            Err(err) => {
                log::warn!("sound disabled: {}", err);
                None
            }
        };
        BeeperSound { engine, device }
    }

    /// Create a facade with sound permanently disabled
    pub fn disabled() -> Self {
        BeeperSound {
            engine: BeeperEngine::new(crate::streaming::DEFAULT_SAMPLE_RATE),
            device: None,
        }
    }

    /// Whether the output device was acquired and is still held
    pub fn is_enabled(&self) -> bool {
        self.device.is_some()
    }

    /// Shared handle to the underlying engine
    ///
    /// Used by the playback drivers; bypasses the enabled check, so
    /// drivers gate their own enqueueing on the music-enabled flag.
    pub fn engine(&self) -> &BeeperEngine {
        &self.engine
    }

    /// Append a note to the queue; no-op while disabled
    pub fn queue_note(&self, freq1: u8, freq2: u8, duration: u8, category: SoundCategory) {
        if self.device.is_none() {
            return;
        }
        self.engine.queue_note(freq1, freq2, duration, category);
    }

    /// Queue a one-shot game effect; no-op while disabled
    pub fn play_game_sound(&self, category: SoundCategory) {
        if self.device.is_none() {
            return;
        }
        self.engine.play_game_sound(category);
    }

    /// Queue one in-game background music note; no-op while disabled
    pub fn play_in_game_music(&self, note: u8) {
        if self.device.is_none() {
            return;
        }
        self.engine.play_in_game_music(note);
    }

    /// Empty the queue and reset the playback position
    pub fn clear(&self) {
        self.engine.clear();
    }

    /// Advisory playing flag (see [`BeeperEngine::is_playing`])
    pub fn is_playing(&self) -> bool {
        self.engine.is_playing()
    }

    /// Stop the stream and release the output device; idempotent
    pub fn shutdown(&mut self) {
        if let Some(device) = self.device.take() {
            device.finish();
        }
        self.engine.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_facade_is_inert() {
        let sound = BeeperSound::disabled();
        assert!(!sound.is_enabled());

        sound.queue_note(128, 0, 10, SoundCategory::Theme);
        sound.play_in_game_music(42);
        sound.play_game_sound(SoundCategory::Jump);

        assert!(!sound.is_playing());
        assert_eq!(sound.engine().lock().queue_len(), 0);
    }

    #[test]
    fn test_shutdown_idempotent() {
        let mut sound = BeeperSound::disabled();
        sound.shutdown();
        sound.shutdown();
        assert!(!sound.is_enabled());
    }

    #[test]
    fn test_initialize_degrades_without_device() {
        // Must not panic regardless of whether an audio backend exists
        let mut sound = BeeperSound::initialize(StreamConfig::default());
        sound.queue_note(128, 0, 5, SoundCategory::Theme);
        sound.clear();
        assert!(!sound.is_playing());
        sound.shutdown();
        assert!(!sound.is_enabled());
    }
}
