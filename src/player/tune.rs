//! Tune data
//!
//! Tune tables are injected configuration, not hard-coded constants:
//! an ordered sequence of `(duration, freq1, freq2)` records, loadable
//! from JSON in exactly that triple shape.

use serde::{Deserialize, Serialize};

/// One tune step: duration ticks plus two tone codes
///
/// Serializes as the `[duration, freq1, freq2]` triple used by the
/// classic tune data tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(u8, u8, u8)", into = "(u8, u8, u8)")]
pub struct TuneStep {
    /// Abstract duration ticks
    pub duration: u8,
    /// First tone code (0 = silent)
    pub freq1: u8,
    /// Second tone code (0 = silent)
    pub freq2: u8,
}

impl TuneStep {
    /// Create a tune step
    pub fn new(duration: u8, freq1: u8, freq2: u8) -> Self {
        TuneStep {
            duration,
            freq1,
            freq2,
        }
    }
}

impl From<(u8, u8, u8)> for TuneStep {
    fn from((duration, freq1, freq2): (u8, u8, u8)) -> Self {
        TuneStep::new(duration, freq1, freq2)
    }
}

impl From<TuneStep> for (u8, u8, u8) {
    fn from(step: TuneStep) -> Self {
        (step.duration, step.freq1, step.freq2)
    }
}

/// An ordered tune: the static data a playback driver walks
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tune {
    steps: Vec<TuneStep>,
}

impl Tune {
    /// Build a tune from its steps
    pub fn from_steps(steps: Vec<TuneStep>) -> Self {
        Tune { steps }
    }

    /// Parse a tune from a JSON array of `[duration, freq1, freq2]`
    /// triples
    pub fn from_json(json: &str) -> crate::Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| crate::BeeperError::TuneFormatError(e.to_string()))
    }

    /// The tune's steps in play order
    pub fn steps(&self) -> &[TuneStep] {
        &self.steps
    }

    /// Number of steps
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the tune has no steps
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Sum of all step durations in abstract ticks
    pub fn total_ticks(&self) -> u32 {
        self.steps.iter().map(|s| s.duration as u32).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tune_from_steps() {
        let tune = Tune::from_steps(vec![
            TuneStep::new(50, 128, 102),
            TuneStep::new(25, 114, 0),
        ]);
        assert_eq!(tune.len(), 2);
        assert!(!tune.is_empty());
        assert_eq!(tune.total_ticks(), 75);
        assert_eq!(tune.steps()[1].freq1, 114);
    }

    #[test]
    fn test_tune_json_triples() {
        let tune = Tune::from_json(r#"{"steps": [[50, 128, 102], [25, 114, 0]]}"#)
            .expect("valid tune JSON");
        assert_eq!(
            tune.steps(),
            &[TuneStep::new(50, 128, 102), TuneStep::new(25, 114, 0)]
        );
    }

    #[test]
    fn test_tune_json_roundtrip() {
        let tune = Tune::from_steps(vec![TuneStep::new(10, 1, 2)]);
        let json = serde_json::to_string(&tune).expect("serializable");
        assert_eq!(Tune::from_json(&json).expect("parseable"), tune);
    }

    #[test]
    fn test_tune_json_rejects_garbage() {
        let err = Tune::from_json("not a tune").unwrap_err();
        assert!(matches!(err, crate::BeeperError::TuneFormatError(_)));
    }
}
