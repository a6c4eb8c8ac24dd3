//! Reveal tracking for displayed cards.
//!
//! The host owns viewport geometry. The store tells it which items to watch
//! through a [`VisibilityWatcher`] and the host reports back with
//! `Msg::ItemVisible(id)` once an item crosses the reveal threshold.
//!
//! # Invariants
//!
//! 1. **One-shot**: once revealed, an item stays revealed and is never
//!    observed again.
//! 2. **Observed ⊆ displayed**: after [`RevealTracker::sync`], only displayed,
//!    unrevealed items are observed.

use std::collections::{BTreeSet, HashSet};

use visuplate_catalog::ItemId;
use web_time::Duration;

/// Default per-index delay of the reveal animation.
pub const DEFAULT_STAGGER_STEP: Duration = Duration::from_millis(100);

/// Default fraction of a card that must be visible to reveal it.
pub const DEFAULT_REVEAL_THRESHOLD: f32 = 0.1;

/// Host capability that watches items for viewport entry.
pub trait VisibilityWatcher {
    fn observe(&mut self, id: &ItemId);
    fn unobserve(&mut self, id: &ItemId);
}

/// Watcher that ignores every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopWatcher;

impl VisibilityWatcher for NoopWatcher {
    fn observe(&mut self, _id: &ItemId) {}
    fn unobserve(&mut self, _id: &ItemId) {}
}

/// Watcher that records the observed set, for headless hosts and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WatchList {
    observed: BTreeSet<ItemId>,
}

impl WatchList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_observed(&self, id: &str) -> bool {
        self.observed.contains(id)
    }

    /// Observed ids in id order.
    pub fn observed(&self) -> impl Iterator<Item = &ItemId> {
        self.observed.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.observed.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observed.is_empty()
    }
}

impl VisibilityWatcher for WatchList {
    fn observe(&mut self, id: &ItemId) {
        self.observed.insert(id.clone());
    }

    fn unobserve(&mut self, id: &ItemId) {
        self.observed.remove(id.as_str());
    }
}

/// Tracks which items have been revealed and which are being watched.
#[derive(Debug, Clone)]
pub struct RevealTracker {
    revealed: HashSet<ItemId>,
    observed: HashSet<ItemId>,
    stagger_step: Duration,
    threshold: f32,
}

impl Default for RevealTracker {
    fn default() -> Self {
        Self::new(DEFAULT_STAGGER_STEP, DEFAULT_REVEAL_THRESHOLD)
    }
}

impl RevealTracker {
    #[must_use]
    pub fn new(stagger_step: Duration, threshold: f32) -> Self {
        Self {
            revealed: HashSet::new(),
            observed: HashSet::new(),
            stagger_step,
            threshold,
        }
    }

    /// Reconcile the watched set with the displayed list.
    ///
    /// Starts watching displayed items that are not yet revealed and stops
    /// watching items that left the list.
    pub fn sync<'a>(
        &mut self,
        displayed: impl IntoIterator<Item = &'a ItemId>,
        watcher: &mut dyn VisibilityWatcher,
    ) {
        let displayed: HashSet<&ItemId> = displayed.into_iter().collect();

        let gone: Vec<ItemId> = self
            .observed
            .iter()
            .filter(|id| !displayed.contains(id))
            .cloned()
            .collect();
        for id in gone {
            watcher.unobserve(&id);
            self.observed.remove(&id);
        }

        for id in displayed {
            if !self.revealed.contains(id) && self.observed.insert(id.clone()) {
                watcher.observe(id);
            }
        }
    }

    /// Record that `id` entered the viewport. Returns `true` the first time.
    pub fn mark_visible(&mut self, id: &ItemId, watcher: &mut dyn VisibilityWatcher) -> bool {
        if self.observed.remove(id) {
            watcher.unobserve(id);
        }
        self.revealed.insert(id.clone())
    }

    #[must_use]
    pub fn is_revealed(&self, id: &str) -> bool {
        self.revealed.contains(id)
    }

    #[must_use]
    pub fn is_observed(&self, id: &str) -> bool {
        self.observed.contains(id)
    }

    #[must_use]
    pub fn revealed_count(&self) -> usize {
        self.revealed.len()
    }

    /// Visible fraction at which the host should report an item.
    #[must_use]
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Animation delay for the card at `index` in the displayed list.
    #[must_use]
    pub fn stagger_delay(&self, index: usize) -> Duration {
        let index = u32::try_from(index).unwrap_or(u32::MAX);
        self.stagger_step.saturating_mul(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(names: &[&str]) -> Vec<ItemId> {
        names.iter().map(|n| ItemId::new(*n)).collect()
    }

    #[test]
    fn sync_observes_displayed_items() {
        let mut tracker = RevealTracker::default();
        let mut watcher = WatchList::new();
        tracker.sync(&ids(&["a", "b", "c"]), &mut watcher);
        assert_eq!(watcher.len(), 3);
        assert!(tracker.is_observed("b"));
    }

    #[test]
    fn sync_unobserves_items_that_left() {
        let mut tracker = RevealTracker::default();
        let mut watcher = WatchList::new();
        tracker.sync(&ids(&["a", "b", "c"]), &mut watcher);
        tracker.sync(&ids(&["b"]), &mut watcher);
        let observed: Vec<&str> = watcher.observed().map(ItemId::as_str).collect();
        assert_eq!(observed, vec!["b"]);
        assert!(!tracker.is_observed("a"));
    }

    #[test]
    fn reveal_is_one_shot() {
        let mut tracker = RevealTracker::default();
        let mut watcher = WatchList::new();
        tracker.sync(&ids(&["a", "b"]), &mut watcher);
        assert!(tracker.mark_visible(&ItemId::new("a"), &mut watcher));
        assert!(!tracker.mark_visible(&ItemId::new("a"), &mut watcher));
        assert!(tracker.is_revealed("a"));
        assert!(!watcher.is_observed("a"));

        // Revealed items are not watched again when they reappear.
        tracker.sync(&ids(&["b"]), &mut watcher);
        tracker.sync(&ids(&["a", "b"]), &mut watcher);
        assert!(!watcher.is_observed("a"));
        assert!(watcher.is_observed("b"));
        assert_eq!(tracker.revealed_count(), 1);
    }

    #[test]
    fn stagger_grows_with_index() {
        let tracker = RevealTracker::default();
        assert_eq!(tracker.stagger_delay(0), Duration::ZERO);
        assert_eq!(tracker.stagger_delay(3), Duration::from_millis(300));
        assert!((tracker.threshold() - 0.1).abs() < f32::EPSILON);
    }

    #[test]
    fn noop_watcher_still_tracks() {
        let mut tracker = RevealTracker::new(Duration::from_millis(50), 0.5);
        tracker.sync(&ids(&["x"]), &mut NoopWatcher);
        assert!(tracker.is_observed("x"));
        assert_eq!(tracker.stagger_delay(2), Duration::from_millis(100));
    }
}
