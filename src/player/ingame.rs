//! Cyclic in-game background music
//!
//! A lighter player than the theme driver: called once per logic frame,
//! it emits one note from a fixed table every second frame and wraps
//! around at the end. Halving the emission rate relative to the logic
//! frame rate is what sets the in-game tempo.

use crate::beeper::BeeperEngine;

/// Logic frames per emitted note
const FRAMES_PER_NOTE: u32 = 2;

/// Cyclic in-game music driver
///
/// Owns its note table and position; lives as long as the game session.
#[derive(Debug, Clone)]
pub struct GameMusic {
    notes: Vec<u8>,
    note_index: usize,
    frame_counter: u32,
    enabled: bool,
}

impl GameMusic {
    /// Create a driver over a note table (one tone code per entry)
    pub fn new(notes: Vec<u8>) -> Self {
        GameMusic {
            notes,
            note_index: 0,
            frame_counter: 0,
            enabled: true,
        }
    }

    /// Enable or disable background music
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Whether background music is enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Rewind to the start of the note table
    pub fn reset(&mut self) {
        self.note_index = 0;
        self.frame_counter = 0;
    }

    /// Advance one logic frame, emitting a note every second frame
    pub fn tick(&mut self, engine: &BeeperEngine) {
        if !self.enabled || self.notes.is_empty() {
            return;
        }

        self.frame_counter += 1;
        if self.frame_counter < FRAMES_PER_NOTE {
            return;
        }
        self.frame_counter = 0;

        engine.play_in_game_music(self.notes[self.note_index]);
        self.note_index = (self.note_index + 1) % self.notes.len();
    }
}
