//! Sample cursor and navigation decisions.
//!
//! Moving off either end of the sample list is not an error; it tells the
//! host to leave the session in that direction.

use serde::{Deserialize, Serialize};

use crate::clobbered::ClobberedState;

/// Why the labeler asked the host to leave the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExitReason {
    /// Moved past the last sample
    GoToNext,
    /// Moved before the first sample
    GoToPrevious,
}

impl ExitReason {
    /// Wire name of the reason.
    pub fn as_str(self) -> &'static str {
        match self {
            ExitReason::GoToNext => "go-to-next",
            ExitReason::GoToPrevious => "go-to-previous",
        }
    }
}

/// Result of a cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// The cursor moved to this index
    Moved(usize),
    /// There is no sample in that direction
    Exit(ExitReason),
}

/// Cursor into the sample sequence, overridable by the host.
#[derive(Debug, Clone)]
pub struct SampleCursor {
    index: ClobberedState<usize>,
    len: usize,
}

impl SampleCursor {
    /// Create a cursor over `len` samples, starting at the external index or 0.
    pub fn new(external: Option<usize>, len: usize) -> Self {
        Self {
            index: ClobberedState::new(external, 0),
            len,
        }
    }

    /// Current sample index.
    pub fn index(&self) -> usize {
        *self.index.get()
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_first(&self) -> bool {
        self.index() == 0
    }

    pub fn is_last(&self) -> bool {
        self.index() + 1 >= self.len
    }

    /// Feed the host's index. Returns true if it changed and was adopted.
    pub fn sync_external(&mut self, external: Option<usize>) -> bool {
        self.index.sync(external)
    }

    /// Update the sample count, pulling the cursor back inside the range.
    ///
    /// Returns true if the cursor had to move.
    pub fn set_len(&mut self, len: usize) -> bool {
        self.len = len;
        let last = len.saturating_sub(1);
        if self.index() > last {
            log::warn!(
                "Sample index {} past end of {} samples, clamping",
                self.index(),
                len
            );
            self.index.set(last);
            return true;
        }
        false
    }

    /// Step forward one sample.
    pub fn advance(&mut self) -> NavigationOutcome {
        if self.is_last() {
            return NavigationOutcome::Exit(ExitReason::GoToNext);
        }
        let next = self.index() + 1;
        self.index.set(next);
        NavigationOutcome::Moved(next)
    }

    /// Step back one sample.
    pub fn retreat(&mut self) -> NavigationOutcome {
        if self.is_first() {
            return NavigationOutcome::Exit(ExitReason::GoToPrevious);
        }
        let prev = self.index() - 1;
        self.index.set(prev);
        NavigationOutcome::Moved(prev)
    }

    /// Get progress string like "3/15".
    pub fn progress(&self) -> String {
        format!("{}/{}", self.index() + 1, self.len)
    }
}
