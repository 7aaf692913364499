/// Resume state definitions for scanning a batch
///
/// A run either starts fresh or scans past the prefix of requests that a
/// previous run already completed, identified by the checkpoint marker.
use std::fmt;

/// Position of a run relative to its checkpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResumeState {
    /// Scanning past requests completed by a previous run
    Skipping {
        /// Strike ID of the last completed request
        target: String,
    },

    /// Processing every request from here on
    Active,
}

impl ResumeState {
    /// Initial state for a run, given the last recorded checkpoint
    pub fn from_checkpoint(checkpoint: Option<String>) -> Self {
        match checkpoint {
            Some(target) => Self::Skipping { target },
            None => Self::Active,
        }
    }

    /// Decides whether the request with `strike_id` should be processed
    ///
    /// # Transitions
    ///
    /// | State | Request | Result | Next state |
    /// |-------|---------|--------|------------|
    /// | Skipping | id ≠ target | skip | Skipping |
    /// | Skipping | id = target | skip | Active |
    /// | Active | any | process | Active |
    ///
    /// A checkpoint that never appears in the input keeps the run in
    /// `Skipping` until the end, so nothing is processed.
    pub fn admit(&mut self, strike_id: &str) -> bool {
        match self {
            Self::Active => true,
            Self::Skipping { target } => {
                if target.as_str() == strike_id {
                    *self = Self::Active;
                }
                false
            }
        }
    }

    /// Returns true if requests are being processed
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }

    /// The checkpoint being searched for, while skipping
    pub fn target(&self) -> Option<&str> {
        match self {
            Self::Skipping { target } => Some(target.as_str()),
            Self::Active => None,
        }
    }
}

impl fmt::Display for ResumeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skipping { target } => write!(f, "SKIPPING (until {})", target),
            Self::Active => write!(f, "ACTIVE"),
        }
    }
}
