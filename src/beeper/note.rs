//! Note value type
//!
//! One scheduled sound event: two tone codes, an abstract duration and
//! a semantic category. Notes are immutable once constructed and cheap
//! to copy; they are created at enqueue time and consumed by the
//! synthesis pass.

/// Semantic category of a queued sound event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCategory {
    /// Theme tune note, driven by the tune playback driver
    Theme,
    /// In-game background music note, driven by the cyclic driver
    InGame,
    /// Jump effect
    Jump,
    /// Item collection effect
    Collect,
    /// Death effect
    Death,
    /// Level complete effect
    Complete,
}

/// One scheduled sound event
///
/// `freq1` and `freq2` are hardware-style tone codes (0 = silent slot).
/// `duration` is an abstract tick count; each consumer applies its own
/// scale factor, so it is deliberately not a millisecond value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Note {
    /// First tone code (0 = silent)
    pub freq1: u8,
    /// Second tone code (0 = silent)
    pub freq2: u8,
    /// Abstract duration ticks
    pub duration: u8,
    /// Semantic category
    pub category: SoundCategory,
}

impl Note {
    /// Create a new note
    pub fn new(freq1: u8, freq2: u8, duration: u8, category: SoundCategory) -> Self {
        Note {
            freq1,
            freq2,
            duration,
            category,
        }
    }

    /// Whether both tone slots are silent
    pub fn is_silent(&self) -> bool {
        self.freq1 == 0 && self.freq2 == 0
    }
}
