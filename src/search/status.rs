//! Reduces the facets' states to one sentence for the live status line.

use super::facet::Facet;
use super::store::{Store, SubscriptionId};

pub const SEARCHING: &str = "Searching...";
pub const SEARCH_FAILED: &str = "Search failed. Please try again.";

/// Settled view of one enabled facet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FacetSummary {
    pub facet: Facet,
    /// Loading its first result set. Next-page loads are excluded.
    pub loading: bool,
    pub errored: bool,
    pub count: u64,
}

/// Build the status sentence for the enabled facets.
///
/// `query` is `None` until a valid query has settled.
#[must_use]
pub fn synthesize(query: Option<&str>, enabled: &[FacetSummary]) -> String {
    let Some(query) = query else {
        return String::new();
    };
    if enabled.is_empty() {
        return String::new();
    }
    if enabled.iter().any(|summary| summary.loading) {
        return SEARCHING.to_string();
    }
    if enabled.iter().all(|summary| summary.errored) {
        return SEARCH_FAILED.to_string();
    }

    let mut clauses: Vec<String> = Facet::ALL
        .iter()
        .filter_map(|facet| enabled.iter().find(|summary| summary.facet == *facet))
        .filter(|summary| !summary.errored && summary.count > 0)
        .map(|summary| format!("{} {}", summary.count, summary.facet.noun()))
        .collect();

    let joined = match clauses.len() {
        0 => return format!("No results found for '{query}'"),
        1 => clauses.remove(0),
        2 => format!("{} and {}", clauses[0], clauses[1]),
        _ => {
            let last = clauses.pop().unwrap_or_default();
            format!("{}, and {last}", clauses.join(", "))
        }
    };
    format!("Found {joined} matches for '{query}'")
}

/// Emits a status sentence only when it differs from the last one emitted.
#[derive(Debug, Default)]
pub struct Announcer {
    store: Store<String>,
}

impl Announcer {
    /// Offer the latest status. Returns it when it is new.
    pub fn announce(&mut self, status: String) -> Option<&str> {
        if self.store.set(status) {
            Some(self.store.get())
        } else {
            None
        }
    }

    #[must_use]
    pub fn current(&self) -> &str {
        self.store.get()
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&String) + 'static) -> SubscriptionId {
        self.store.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.store.unsubscribe(id)
    }
}
