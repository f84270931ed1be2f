/// Query state definitions for tracking search progress
///
/// Each search query walks Idle → Fetching → Extracting → Accumulating → Done.
/// A failed fetch jumps straight from Fetching to Done.
use std::fmt;

/// Represents the current state of one search query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryState {
    /// Query planned but not started
    Idle,

    /// Search page request in flight
    Fetching,

    /// Listing cards being turned into records
    Extracting,

    /// Records being offered to the crawl context
    Accumulating,

    /// Query finished, successfully or not
    Done,
}

impl QueryState {
    /// Returns true if no further work happens for this query
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Returns true if `next` is a legal successor of this state
    pub fn can_transition_to(&self, next: QueryState) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Fetching)
                | (Self::Fetching, Self::Extracting)
                | (Self::Fetching, Self::Done)
                | (Self::Extracting, Self::Accumulating)
                | (Self::Accumulating, Self::Done)
        )
    }

    /// Moves to `next`, returning the new state
    ///
    /// Illegal transitions are logged and leave the state unchanged.
    pub fn advance(self, next: QueryState) -> QueryState {
        if self.can_transition_to(next) {
            next
        } else {
            tracing::warn!("Invalid query state transition: {} -> {}", self, next);
            self
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Fetching => "fetching",
            Self::Extracting => "extracting",
            Self::Accumulating => "accumulating",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for QueryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
