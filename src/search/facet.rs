use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the independently searchable content types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facet {
    Titles,
    Descriptions,
    Segments,
}

impl Facet {
    /// Every facet in display order.
    pub const ALL: [Facet; 3] = [Facet::Titles, Facet::Descriptions, Facet::Segments];

    /// Name used in the `types` link parameter.
    #[must_use]
    pub const fn link_name(self) -> &'static str {
        match self {
            Facet::Titles => "titles",
            Facet::Descriptions => "descriptions",
            Facet::Segments => "transcripts",
        }
    }

    #[must_use]
    pub fn from_link_name(name: &str) -> Option<Self> {
        match name.trim() {
            "titles" => Some(Facet::Titles),
            "descriptions" => Some(Facet::Descriptions),
            "transcripts" => Some(Facet::Segments),
            _ => None,
        }
    }

    /// Path segment of the service endpoint for this facet.
    #[must_use]
    pub const fn endpoint(self) -> &'static str {
        match self {
            Facet::Titles => "search/titles",
            Facet::Descriptions => "search/descriptions",
            Facet::Segments => "search/segments",
        }
    }

    /// Singular noun used by the status line.
    #[must_use]
    pub const fn noun(self) -> &'static str {
        match self {
            Facet::Titles => "title",
            Facet::Descriptions => "description",
            Facet::Segments => "transcript",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Facet::Titles => "Titles",
            Facet::Descriptions => "Descriptions",
            Facet::Segments => "Transcripts",
        }
    }

    const fn bit(self) -> u8 {
        match self {
            Facet::Titles => 0b001,
            Facet::Descriptions => 0b010,
            Facet::Segments => 0b100,
        }
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.link_name())
    }
}

/// Non-empty set of enabled facets.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnabledFacets(u8);

impl EnabledFacets {
    const ALL_BITS: u8 = 0b111;

    #[must_use]
    pub const fn all() -> Self {
        Self(Self::ALL_BITS)
    }

    #[must_use]
    pub const fn only(facet: Facet) -> Self {
        Self(facet.bit())
    }

    /// Build a set from an iterator, returning `None` when it would be empty.
    pub fn from_facets(facets: impl IntoIterator<Item = Facet>) -> Option<Self> {
        let bits = facets.into_iter().fold(0, |bits, facet| bits | facet.bit());
        (bits != 0).then_some(Self(bits))
    }

    #[must_use]
    pub const fn contains(self, facet: Facet) -> bool {
        self.0 & facet.bit() != 0
    }

    #[must_use]
    pub const fn is_all(self) -> bool {
        self.0 == Self::ALL_BITS
    }

    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Always `false`; the set cannot become empty.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        false
    }

    /// Flip a facet on or off. Turning off the last enabled facet is rejected
    /// and leaves the set unchanged. Returns whether the set changed.
    pub fn toggle(&mut self, facet: Facet) -> bool {
        let next = self.0 ^ facet.bit();
        if next == 0 {
            return false;
        }
        self.0 = next;
        true
    }

    pub fn iter(self) -> impl Iterator<Item = Facet> {
        Facet::ALL.into_iter().filter(move |facet| self.contains(*facet))
    }
}

impl Default for EnabledFacets {
    fn default() -> Self {
        Self::all()
    }
}

impl fmt::Debug for EnabledFacets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggling_last_facet_is_rejected() {
        let mut enabled = EnabledFacets::only(Facet::Titles);
        for _ in 0..5 {
            assert!(!enabled.toggle(Facet::Titles));
        }
        assert_eq!(enabled, EnabledFacets::only(Facet::Titles));
    }

    #[test]
    fn rapid_toggles_never_empty_the_set() {
        let mut enabled = EnabledFacets::all();
        let sequence = [
            Facet::Titles,
            Facet::Descriptions,
            Facet::Segments,
            Facet::Segments,
            Facet::Titles,
            Facet::Segments,
            Facet::Descriptions,
            Facet::Titles,
        ];
        for facet in sequence {
            enabled.toggle(facet);
            assert!(enabled.len() >= 1);
        }
    }

    #[test]
    fn iterates_in_display_order() {
        let enabled =
            EnabledFacets::from_facets([Facet::Segments, Facet::Titles]).expect("non-empty");
        assert_eq!(enabled.iter().collect::<Vec<_>>(), vec![Facet::Titles, Facet::Segments]);
    }

    #[test]
    fn empty_iterator_is_not_a_set() {
        assert!(EnabledFacets::from_facets([]).is_none());
    }

    #[test]
    fn link_names_round_trip() {
        for facet in Facet::ALL {
            assert_eq!(Facet::from_link_name(facet.link_name()), Some(facet));
        }
        assert_eq!(Facet::from_link_name("segments"), None);
    }
}
