//! ZX Spectrum Beeper Sound Engine
//!
//! Reproduces the square-wave "beeper" sound of the ZX Spectrum home
//! computer: two-tone notes are queued by game logic and synthesized
//! into a mono 16-bit PCM stream on the audio playback thread.
//!
//! # Features
//! - Hardware-style tone code to frequency mapping (3.5 MHz divider)
//! - Two-tone square wave synthesis with single-bit-DAC saturation
//! - Bounded LFSR dither emulating the coarse output stage
//! - Thread-safe note queue bridging game logic and audio playback
//! - Frame-paced theme tune playback with cancellation
//! - Cyclic in-game background music driver
//! - Offline tune rendering and WAV export
//!
//! # Crate feature flags
//! - `streaming` (default): Real-time audio output (enables optional `rodio` dep)
//! - `visualization` (default): Terminal piano-key display helpers
//!
//! # Quick start
//! ## Queue a note and let the device play it
//! ```no_run
//! # #[cfg(feature = "streaming")]
//! # {
//! use zxbeeper::{BeeperSound, SoundCategory, StreamConfig};
//! let mut sound = BeeperSound::initialize(StreamConfig::default());
//! sound.queue_note(128, 0, 10, SoundCategory::Theme);
//! while sound.is_playing() {
//!     std::thread::sleep(std::time::Duration::from_millis(5));
//! }
//! sound.shutdown();
//! # }
//! ```
//!
//! ## Frame-paced tune playback
//! ```no_run
//! # #[cfg(feature = "streaming")]
//! # {
//! use zxbeeper::player::{NoCancel, NullVisuals, SystemClock, TunePlayer};
//! use zxbeeper::{BeeperSound, StreamConfig, Tune, TuneStep};
//! let sound = BeeperSound::initialize(StreamConfig::default());
//! let tune = Tune::from_steps(vec![TuneStep::new(50, 128, 102)]);
//! let player = TunePlayer::new();
//! player.play(
//!     sound.engine(),
//!     &tune,
//!     &mut NullVisuals,
//!     &mut NoCancel,
//!     &SystemClock,
//! );
//! # }
//! ```
//!
//! ## Offline rendering
//! ```no_run
//! use zxbeeper::export::export_tune_to_wav;
//! use zxbeeper::{Tune, TuneStep};
//! let tune = Tune::from_steps(vec![TuneStep::new(50, 128, 102)]);
//! export_tune_to_wav(&tune, "tune.wav", 44_100).unwrap();
//! ```

#![warn(missing_docs)]

// Domain modules
pub mod beeper; // Beeper synthesis core
pub mod export; // Offline rendering & WAV export
pub mod player; // Tune playback drivers
#[cfg(feature = "streaming")]
pub mod sound; // Public facade over engine + device
#[cfg(feature = "streaming")]
pub mod streaming; // Audio Output & Streaming
#[cfg(feature = "visualization")]
pub mod visualization; // Terminal UI Helpers

/// Error types for beeper engine operations
#[derive(thiserror::Error, Debug)]
pub enum BeeperError {
    /// Audio device error
    #[error("Audio device error: {0}")]
    AudioDeviceError(String),

    /// Error writing audio file
    #[error("Audio file write error: {0}")]
    AudioFileError(String),

    /// Error parsing tune data
    #[error("Tune format error: {0}")]
    TuneFormatError(String),

    /// IO error from filesystem or device
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<String> for BeeperError {
    /// Converts a String into `BeeperError::Other`.
    ///
    /// This is a convenience conversion for generic string errors. For
    /// better error discrimination, use specific variant constructors:
    /// - `BeeperError::AudioDeviceError(msg)` for device initialization
    /// - `BeeperError::AudioFileError(msg)` for WAV output issues
    /// - `BeeperError::TuneFormatError(msg)` for tune data parsing
    /// - `BeeperError::ConfigError(msg)` for invalid configuration
    fn from(msg: String) -> Self {
        BeeperError::Other(msg)
    }
}

impl From<&str> for BeeperError {
    /// Converts a string slice into `BeeperError::Other`.
    ///
    /// See [`From<String>`] for guidance on when to use explicit variant
    /// constructors instead.
    fn from(msg: &str) -> Self {
        BeeperError::Other(msg.to_string())
    }
}

/// Result type for beeper engine operations
pub type Result<T> = std::result::Result<T, BeeperError>;

// Public API exports
pub use beeper::{tone_to_hz, BeeperEngine, Note, SoundCategory};
pub use player::{FrameTiming, GameMusic, PlayOutcome, Tune, TunePlayer, TuneStep};
#[cfg(feature = "streaming")]
pub use sound::BeeperSound;
#[cfg(feature = "streaming")]
pub use streaming::{AudioDevice, StreamConfig};
#[cfg(feature = "visualization")]
pub use visualization::piano_key_index;
