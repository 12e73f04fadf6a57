//! Frame-paced theme tune playback
//!
//! Walks a [`Tune`] one step at a time on the logic thread: queue the
//! step's note, light the piano keys, hold, poll for cancellation, then
//! sleep out the remainder of the fixed frame budget so the visual
//! frame rate stays constant regardless of processing jitter.
//!
//! The synthesis engine consumes the queued notes on its own clock;
//! this driver only bounds near-term drift between the two timelines.

use super::tune::Tune;
use super::{CancelPoll, Clock, FrameTiming, KeyState, KeyVisuals, PlayOutcome};
use crate::beeper::{BeeperEngine, SoundCategory};

/// Frame-paced driver for theme tune playback
#[derive(Debug, Clone)]
pub struct TunePlayer {
    timing: FrameTiming,
    music_enabled: bool,
}

impl TunePlayer {
    /// Create a player with default timing and music enabled
    pub fn new() -> Self {
        Self::with_timing(FrameTiming::default())
    }

    /// Create a player with explicit timing
    pub fn with_timing(timing: FrameTiming) -> Self {
        TunePlayer {
            timing,
            music_enabled: true,
        }
    }

    /// Enable or disable note enqueueing
    ///
    /// With music disabled the driver still paces visuals and timing,
    /// it just skips the audio.
    pub fn set_music_enabled(&mut self, enabled: bool) {
        self.music_enabled = enabled;
    }

    /// Whether note enqueueing is enabled
    pub fn music_enabled(&self) -> bool {
        self.music_enabled
    }

    /// Play a tune from start to finish
    ///
    /// Blocks the calling (logic) thread for the whole run. The cancel
    /// input is polled once per step, so cancellation latency is
    /// bounded by one step duration. On cancel the engine is cleared
    /// and [`PlayOutcome::Cancelled`] returned.
    pub fn play<V, I, C>(
        &self,
        engine: &BeeperEngine,
        tune: &Tune,
        visuals: &mut V,
        input: &mut I,
        clock: &C,
    ) -> PlayOutcome
    where
        V: KeyVisuals,
        I: CancelPoll,
        C: Clock,
    {
        // Fresh playback session: drop whatever a previous session left
        engine.clear();

        for step in tune.steps() {
            let step_start = clock.now();

            visuals.key_display(step.freq1, KeyState::Lead);
            visuals.key_display(step.freq2, KeyState::Harmony);

            if self.music_enabled {
                engine.queue_note(step.freq1, step.freq2, step.duration, SoundCategory::Theme);
            }
            clock.sleep(self.timing.note_tick * step.duration as u32);

            if input.cancel_requested() {
                engine.clear();
                return PlayOutcome::Cancelled;
            }

            visuals.key_display(step.freq1, KeyState::Idle);
            visuals.key_display(step.freq2, KeyState::Idle);

            let elapsed = clock.now().duration_since(step_start);
            if let Some(remaining) = self.timing.frame_budget.checked_sub(elapsed) {
                if !remaining.is_zero() {
                    clock.sleep(remaining);
                }
            }
        }

        PlayOutcome::Completed
    }
}

impl Default for TunePlayer {
    fn default() -> Self {
        Self::new()
    }
}
