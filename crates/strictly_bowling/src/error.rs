//! Error types for the bowling engine.
//!
//! Every failure the engine reports falls into one of four kinds: a bad
//! roster at setup, a rejected roll, a corrupted game snapshot, or a
//! storage failure. Each carries a human message plus an ordered list of
//! detail strings that callers render verbatim.

use crate::frame::PINS;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Kind of a [`BowlingError`], suitable for matching and for display tags.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Invalid player roster at game creation.
    Setup,
    /// A proposed pin count violates the rules for the current frame.
    RollRejected,
    /// A game snapshot is internally inconsistent.
    StateCorruption,
    /// The backing key-value store failed.
    Persistence,
}

/// Message and ordered details shared by every error kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Human-readable summary.
    pub message: String,
    /// Individual problems, in the order they were found.
    pub details: Vec<String>,
}

impl ErrorDetails {
    /// Creates details with a message and no detail lines.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            details: Vec::new(),
        }
    }

    /// Creates details with a message and detail lines.
    pub fn with_details(message: impl Into<String>, details: Vec<String>) -> Self {
        Self {
            message: message.into(),
            details,
        }
    }
}

impl std::fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if !self.details.is_empty() {
            write!(f, ": {}", self.details.join("; "))?;
        }
        Ok(())
    }
}

/// Top-level error for all engine operations.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum BowlingError {
    /// Invalid player roster.
    #[display("Setup error: {}", _0)]
    Setup(#[error(not(source))] ErrorDetails),

    /// Roll refused by the rules.
    #[display("Roll rejected: {}", _0)]
    RollRejected(#[error(not(source))] ErrorDetails),

    /// Snapshot failed validation.
    #[display("State corruption: {}", _0)]
    StateCorruption(#[error(not(source))] ErrorDetails),

    /// Storage failure.
    #[display("Persistence error: {}", _0)]
    Persistence(#[error(not(source))] ErrorDetails),
}

impl BowlingError {
    /// Creates a setup error with detail lines.
    #[instrument(skip(message, details))]
    pub fn setup(message: impl Into<String>, details: Vec<String>) -> Self {
        Self::Setup(ErrorDetails::with_details(message, details))
    }

    /// Creates a state corruption error with detail lines.
    #[instrument(skip(message, details))]
    pub fn corruption(message: impl Into<String>, details: Vec<String>) -> Self {
        Self::StateCorruption(ErrorDetails::with_details(message, details))
    }

    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Setup(_) => ErrorKind::Setup,
            Self::RollRejected(_) => ErrorKind::RollRejected,
            Self::StateCorruption(_) => ErrorKind::StateCorruption,
            Self::Persistence(_) => ErrorKind::Persistence,
        }
    }

    fn inner(&self) -> &ErrorDetails {
        match self {
            Self::Setup(d)
            | Self::RollRejected(d)
            | Self::StateCorruption(d)
            | Self::Persistence(d) => d,
        }
    }

    /// Returns the human-readable message.
    pub fn message(&self) -> &str {
        &self.inner().message
    }

    /// Returns the ordered detail lines.
    pub fn details(&self) -> &[String] {
        &self.inner().details
    }
}

/// Reason the roll validator refused a pin count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum RollRejection {
    /// The game has already finished.
    #[display("Game is already complete")]
    GameComplete,

    /// Pin count outside 0..=10.
    #[display("Pin count {} is out of range (must be 0-{})", _0, PINS)]
    PinsOutOfRange(u8),

    /// Two rolls in one rack would exceed the pins standing.
    #[display(
        "Total pins knocked down in a frame cannot exceed 10 ({} + {})",
        first,
        second
    )]
    FramePinsExceeded {
        /// Pins already down in this rack.
        first: u8,
        /// Proposed pins.
        second: u8,
    },

    /// Frames 1-9 never take a third roll.
    #[display("No third roll in a regular frame")]
    NoThirdRollInRegularFrame,

    /// After a strike and a non-strike in frame 10, the bonus pair exceeds the rack.
    #[display(
        "Bonus rolls after a strike cannot exceed 10 pins ({} + {})",
        second,
        third
    )]
    BonusPinsExceeded {
        /// Second roll of the tenth frame.
        second: u8,
        /// Proposed third roll.
        third: u8,
    },

    /// Frame 10 third roll without a strike or spare.
    #[display("Third roll only after strike or spare")]
    ThirdRollNotEarned,

    /// The active frame has no rolls left.
    #[display("Frame already complete")]
    FrameComplete,

    /// The turn pointers do not address a frame.
    #[display("No active frame for player {} at frame index {}", player, frame)]
    NoActiveFrame {
        /// Current player index.
        player: usize,
        /// Current frame index.
        frame: usize,
    },
}

impl From<RollRejection> for BowlingError {
    fn from(rejection: RollRejection) -> Self {
        Self::RollRejected(ErrorDetails::new(rejection.to_string()))
    }
}

/// Which layer of the store failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum StoreFailure {
    /// Filesystem or other I/O.
    Io,
    /// A value could not be encoded to or decoded from JSON.
    Encoding,
    /// The backing store refused the operation.
    Backend,
}

/// A key-value store operation that failed, located at the line that raised it.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("{} failure in store: {} ({}:{})", failure, message, file, line)]
pub struct StoreError {
    /// Which layer failed.
    pub failure: StoreFailure,
    /// What went wrong.
    pub message: String,
    /// Source line that raised the error.
    pub line: u32,
    /// Source file that raised the error.
    pub file: &'static str,
}

impl StoreError {
    /// Creates a backend failure located at the caller.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        Self::located(StoreFailure::Backend, message.into())
    }

    #[track_caller]
    fn located(failure: StoreFailure, message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            failure,
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<std::io::Error> for StoreError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        Self::located(StoreFailure::Io, err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        Self::located(StoreFailure::Encoding, err.to_string())
    }
}

impl From<StoreError> for BowlingError {
    fn from(err: StoreError) -> Self {
        Self::Persistence(ErrorDetails::with_details(
            err.message,
            vec![
                format!("{} failure", err.failure),
                format!("raised at {}:{}", err.file, err.line),
            ],
        ))
    }
}
