//! End-to-end playback behaviour through the public API
//!
//! Drives the engine the way a game would: queue notes from one side,
//! render samples from the other, and check ordering, expiry and
//! cancellation semantics. All rendering is offline with null dither so
//! sample values are exact.

use std::cell::Cell;
use std::time::{Duration, Instant};

use zxbeeper::beeper::{NullDither, Synth, AMPLITUDE, DURATION_SCALE};
use zxbeeper::export::render_tune_with_dither;
use zxbeeper::player::{CancelPoll, Clock, KeyState, KeyVisuals, NoCancel, NullVisuals};
use zxbeeper::{BeeperEngine, PlayOutcome, SoundCategory, Tune, TunePlayer, TuneStep};

const RATE: u32 = 44_100;

fn quiet_engine() -> BeeperEngine {
    BeeperEngine::from_synth(Synth::with_dither(RATE, Box::new(NullDither)))
}

fn ticks_to_samples(ticks: u32) -> usize {
    (ticks as f64 * DURATION_SCALE * RATE as f64) as usize
}

/// Clock whose time only advances through its own sleeps
struct StepClock {
    base: Instant,
    offset: Cell<Duration>,
}

impl StepClock {
    fn new() -> Self {
        StepClock {
            base: Instant::now(),
            offset: Cell::new(Duration::ZERO),
        }
    }
}

impl Clock for StepClock {
    fn now(&self) -> Instant {
        self.base + self.offset.get()
    }

    fn sleep(&self, duration: Duration) {
        self.offset.set(self.offset.get() + duration);
    }
}

struct CancelOnSecondStep {
    polls: usize,
}

impl CancelPoll for CancelOnSecondStep {
    fn cancel_requested(&mut self) -> bool {
        self.polls += 1;
        self.polls == 2
    }
}

#[derive(Default)]
struct CountingVisuals {
    sounding: usize,
    idle: usize,
}

impl KeyVisuals for CountingVisuals {
    fn key_display(&mut self, _code: u8, state: KeyState) {
        match state {
            KeyState::Idle => self.idle += 1,
            _ => self.sounding += 1,
        }
    }
}

#[test]
fn queued_notes_drain_in_order_and_stop() {
    let engine = quiet_engine();
    engine.queue_note(100, 0, 10, SoundCategory::Theme);
    engine.queue_note(120, 0, 20, SoundCategory::Theme);
    engine.queue_note(140, 0, 10, SoundCategory::Theme);
    assert!(engine.is_playing());

    let total = ticks_to_samples(40) + 64;
    let mut buf = vec![0.0f32; total];
    engine.lock().render_into(&mut buf);

    let synth = engine.lock();
    assert_eq!(synth.notes_started(), 3, "exactly three pops");
    assert_eq!(synth.queue_len(), 0);
    drop(synth);
    assert!(!engine.is_playing(), "drained queue must stop playing");
}

#[test]
fn note_expires_after_scaled_duration() {
    let engine = quiet_engine();
    engine.queue_note(100, 0, 25, SoundCategory::Theme);

    // 25 ticks * 2ms = 50ms
    let mut most = vec![0.0f32; ticks_to_samples(25) - 16];
    engine.lock().render_into(&mut most);
    assert!(engine.is_playing(), "still sounding just before expiry");

    let mut rest = vec![0.0f32; 64];
    engine.lock().render_into(&mut rest);
    assert!(!engine.is_playing(), "silent after expiry");
}

#[test]
fn two_tone_mix_saturates() {
    let tune = Tune::from_steps(vec![TuneStep::new(40, 97, 211)]);
    let samples = render_tune_with_dither(&tune, RATE, Box::new(NullDither));
    assert!(!samples.is_empty());
    for &sample in &samples {
        assert_eq!(sample.abs(), AMPLITUDE, "two-tone output must clip to ±A");
    }
}

#[test]
fn tune_player_completes_and_queues_steps() {
    let engine = quiet_engine();
    let tune = Tune::from_steps(vec![
        TuneStep::new(10, 100, 0),
        TuneStep::new(20, 120, 0),
        TuneStep::new(10, 140, 0),
    ]);

    let clock = StepClock::new();
    let outcome = TunePlayer::new().play(
        &engine,
        &tune,
        &mut NullVisuals,
        &mut NoCancel,
        &clock,
    );

    assert_eq!(outcome, PlayOutcome::Completed);
    assert_eq!(engine.lock().queue_len(), 3);

    // Rendering the queued steps reproduces the 3-pop end-to-end shape
    let mut buf = vec![0.0f32; ticks_to_samples(40) + 64];
    engine.lock().render_into(&mut buf);
    assert_eq!(engine.lock().notes_started(), 3);
    assert!(!engine.is_playing());
}

#[test]
fn cancellation_mid_tune_clears_engine() {
    let engine = quiet_engine();
    let tune = Tune::from_steps(vec![
        TuneStep::new(10, 100, 0),
        TuneStep::new(10, 110, 0),
        TuneStep::new(10, 120, 0),
        TuneStep::new(10, 130, 0),
        TuneStep::new(10, 140, 0),
    ]);

    let clock = StepClock::new();
    let mut visuals = CountingVisuals::default();
    let mut input = CancelOnSecondStep { polls: 0 };
    let outcome = TunePlayer::new().play(&engine, &tune, &mut visuals, &mut input, &clock);

    assert_eq!(outcome, PlayOutcome::Cancelled);
    assert!(!engine.is_playing());
    assert_eq!(engine.lock().queue_len(), 0);
    assert_eq!(engine.lock().current_time(), 0.0);
    // Two steps lit, only the first returned to idle
    assert_eq!(visuals.sounding, 4);
    assert_eq!(visuals.idle, 2);
}

#[test]
fn effects_layer_onto_active_music() {
    let engine = quiet_engine();

    // From silence: effect is dropped
    engine.play_game_sound(SoundCategory::Collect);
    assert!(!engine.is_playing());

    // Over active music: effect is queued behind the current note
    engine.play_in_game_music(42);
    engine.play_game_sound(SoundCategory::Collect);
    assert_eq!(engine.lock().queue_len(), 2);
}
