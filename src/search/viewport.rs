//! Sentinel visibility tracking for infinite scroll.
//!
//! Geometry is expressed in abstract length units. Front ends convert their
//! own measurements (terminal rows, pixels) before reporting them.

use super::limits::SCROLL_LOOKAHEAD;

/// Position of the viewport and the sentinel that follows the last result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportGeometry {
    /// Offset of the first visible unit.
    pub start: u32,
    /// Visible length.
    pub len: u32,
    /// Offset of the sentinel.
    pub sentinel: u32,
}

impl ViewportGeometry {
    /// Whether the sentinel lies inside the viewport grown by `margin` on
    /// both ends.
    #[must_use]
    pub fn sentinel_visible(&self, margin: u32) -> bool {
        let top = self.start.saturating_sub(margin);
        let bottom = self.start.saturating_add(self.len).saturating_add(margin);
        self.sentinel >= top && self.sentinel < bottom
    }
}

/// Fires once each time the sentinel comes into view while armed.
///
/// Disarming tears the observation down. Re-arming starts a fresh
/// observation, so a sentinel that is already visible fires again, the same
/// way a newly attached intersection observer reports its initial state.
#[derive(Debug, Clone)]
pub struct ViewportTrigger {
    margin: u32,
    observing: bool,
    visible: bool,
}

impl Default for ViewportTrigger {
    fn default() -> Self {
        Self::new(SCROLL_LOOKAHEAD)
    }
}

impl ViewportTrigger {
    #[must_use]
    pub fn new(margin: u32) -> Self {
        Self {
            margin,
            observing: false,
            visible: false,
        }
    }

    /// Report the current geometry (`None` when the sentinel is not rendered)
    /// and whether the pagination engine can accept a next-page request.
    /// Returns `true` when the next page should be requested.
    pub fn observe(&mut self, armed: bool, geometry: Option<ViewportGeometry>) -> bool {
        if !armed {
            self.disarm();
            return false;
        }
        if !self.observing {
            self.observing = true;
            self.visible = false;
        }
        let visible = geometry.is_some_and(|geometry| geometry.sentinel_visible(self.margin));
        let fire = visible && !self.visible;
        self.visible = visible;
        fire
    }

    /// Tear the observation down until the next armed call.
    pub fn disarm(&mut self) {
        self.observing = false;
        self.visible = false;
    }

    #[must_use]
    pub fn is_observing(&self) -> bool {
        self.observing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry(start: u32, sentinel: u32) -> Option<ViewportGeometry> {
        Some(ViewportGeometry {
            start,
            len: 600,
            sentinel,
        })
    }

    #[test]
    fn fires_within_lookahead_margin() {
        let mut trigger = ViewportTrigger::default();
        assert!(!trigger.observe(true, geometry(0, 1_000)));
        assert!(trigger.observe(true, geometry(10, 1_000)));
    }

    #[test]
    fn fires_once_per_visibility_event() {
        let mut trigger = ViewportTrigger::default();
        assert!(trigger.observe(true, geometry(500, 1_000)));
        assert!(!trigger.observe(true, geometry(520, 1_000)));
        assert!(!trigger.observe(true, geometry(540, 1_000)));
        assert!(!trigger.observe(true, geometry(0, 2_000)));
        assert!(trigger.observe(true, geometry(1_500, 2_000)));
    }

    #[test]
    fn disarmed_trigger_never_fires() {
        let mut trigger = ViewportTrigger::default();
        for start in [0, 500, 900] {
            assert!(!trigger.observe(false, geometry(start, 1_000)));
        }
        assert!(!trigger.is_observing());
    }

    #[test]
    fn rearming_with_visible_sentinel_fires_again() {
        let mut trigger = ViewportTrigger::default();
        assert!(trigger.observe(true, geometry(900, 1_000)));
        assert!(!trigger.observe(false, geometry(900, 1_000)));
        assert!(trigger.observe(true, geometry(900, 1_000)));
    }

    #[test]
    fn missing_sentinel_is_not_visible() {
        let mut trigger = ViewportTrigger::default();
        assert!(!trigger.observe(true, None));
        assert!(trigger.is_observing());
    }
}
