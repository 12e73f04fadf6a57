//! Tone code to frequency conversion
//!
//! The ZX Spectrum drove its beeper from the 3.5 MHz system clock
//! through a software delay loop; tune data stores the loop counter,
//! not a pitch. This module reproduces the divider arithmetic exactly,
//! since pitch correctness is directly audible.

/// ZX Spectrum system clock in Hz
pub const BASE_CLOCK_HZ: f64 = 3_500_000.0;

/// Divider applied to the tone code by the beeper delay loop
pub const TONE_DIVIDER: f64 = 8.0 * 16.0;

/// Convert an 8-bit tone code to a frequency in Hz.
///
/// A code of 0 means a silent tone slot and maps to 0.0. Larger codes
/// produce lower frequencies (longer delay loops).
///
/// # Example
/// ```
/// use zxbeeper::tone_to_hz;
/// assert_eq!(tone_to_hz(0), 0.0);
/// assert!((tone_to_hz(224) - 122.0).abs() < 0.5);
/// ```
#[inline]
pub fn tone_to_hz(code: u8) -> f64 {
    if code == 0 {
        return 0.0;
    }
    BASE_CLOCK_HZ / (code as f64 * TONE_DIVIDER)
}
