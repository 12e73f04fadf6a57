//! Terminal UI Helpers
//!
//! A terminal rendition of the tune screen's piano keyboard. The core
//! drivers only raise the [`KeyVisuals`] hook; this module supplies the
//! pure key-index math plus a simple 32-key strip implementation for
//! terminal frontends and the demo binary.

use crate::player::{KeyState, KeyVisuals};
use std::io::Write;

/// Number of piano keys on the tune screen
pub const KEY_COUNT: usize = 32;

/// Map a tone code to its piano key index (0 = rightmost key)
///
/// The classic tune screen computes `K = 31 - (code - 8) / 8`, so lower
/// codes (higher pitches) land on higher key indices. Codes below 8
/// clamp to the last key; a silent code has no key and returns `None`.
pub fn piano_key_index(code: u8) -> Option<usize> {
    if code == 0 {
        return None;
    }
    let offset = (code.saturating_sub(8) / 8) as usize;
    Some(KEY_COUNT - 1 - offset.min(KEY_COUNT - 1))
}

/// Terminal piano-key strip
///
/// Renders one line per transition: `#` for the lead tone, `+` for the
/// harmony tone, `-` for idle keys.
#[derive(Debug, Clone)]
pub struct TerminalKeys {
    keys: [KeyState; KEY_COUNT],
}

impl TerminalKeys {
    /// Create a strip with all keys idle
    pub fn new() -> Self {
        TerminalKeys {
            keys: [KeyState::Idle; KEY_COUNT],
        }
    }

    /// Render the strip as a 32-character line
    pub fn line(&self) -> String {
        self.keys
            .iter()
            .map(|state| match state {
                KeyState::Lead => '#',
                KeyState::Harmony => '+',
                KeyState::Idle => '-',
            })
            .collect()
    }
}

impl KeyVisuals for TerminalKeys {
    fn key_display(&mut self, code: u8, state: KeyState) {
        let Some(index) = piano_key_index(code) else {
            return;
        };
        self.keys[index] = state;

        print!("\r{}", self.line());
        let _ = std::io::stdout().flush();
    }
}

impl Default for TerminalKeys {
    fn default() -> Self {
        Self::new()
    }
}
