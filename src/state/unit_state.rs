/// Crawl unit state definitions
///
/// A crawl unit is one in-flight "visit and expand" operation for a single URL.
use std::fmt;

/// Represents the lifecycle stage of a crawl unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitState {
    /// Unit has been admitted but has not started fetching
    Scheduled,

    /// The page request is in flight
    Fetching,

    /// The body is being parsed and its anchors filtered
    Extracting,

    /// Child units are being admitted and awaited
    Expanding,

    /// Terminal, whether or not the fetch succeeded
    Done,
}

impl UnitState {
    /// Returns true if this is the terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Checks whether moving from this state to `next` is allowed
    ///
    /// A failed fetch skips extraction and expansion entirely, so
    /// `Fetching -> Done` is legal. Nothing leaves `Done`.
    pub fn can_transition_to(&self, next: UnitState) -> bool {
        matches!(
            (self, next),
            (Self::Scheduled, Self::Fetching)
                | (Self::Fetching, Self::Extracting)
                | (Self::Fetching, Self::Done)
                | (Self::Extracting, Self::Expanding)
                | (Self::Expanding, Self::Done)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Fetching => "fetching",
            Self::Extracting => "extracting",
            Self::Expanding => "expanding",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for UnitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
