use std::fmt;

/// Monotonically increasing request identifier for a single result source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Generation(u64);

impl Generation {
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Tracks which generation is allowed to update visible state.
///
/// Only the most recently issued generation is current. Retiring it (after it
/// completes or when its source is disabled) makes every outstanding
/// generation stale.
#[derive(Debug, Default, Clone)]
pub struct GenerationTracker {
    next: u64,
    current: Option<Generation>,
}

impl GenerationTracker {
    /// Issue a new generation, superseding any previous one.
    pub fn advance(&mut self) -> Generation {
        self.next = self.next.saturating_add(1);
        let id = Generation(self.next);
        self.current = Some(id);
        id
    }

    #[must_use]
    pub fn current(&self) -> Option<Generation> {
        self.current
    }

    #[must_use]
    pub fn is_current(&self, id: Generation) -> bool {
        self.current == Some(id)
    }

    /// Forget the current generation so late completions are ignored.
    pub fn retire(&mut self) {
        self.current = None;
    }
}
