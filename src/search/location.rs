//! Shareable link state: the search filters mirrored into a link's query
//! component.

use url::{Url, form_urlencoded};

use super::facet::{EnabledFacets, Facet};

/// Base used when a link is restored from a bare query string.
pub const DEFAULT_LINK_BASE: &str = "http://localhost:3000/search";

const QUERY_PARAM: &str = "q";
const LANGUAGE_PARAM: &str = "language";
const TYPES_PARAM: &str = "types";
const INCLUDE_UNAVAILABLE_PARAM: &str = "include_unavailable";

/// User-visible search filters, mirrored to and from link parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    /// Settled query text.
    pub query: String,
    pub language: Option<String>,
    pub enabled: EnabledFacets,
    pub include_unavailable: bool,
}

impl SearchState {
    /// Parse link parameters. The first occurrence of a parameter wins and
    /// unknown parameters are ignored.
    #[must_use]
    pub fn from_query_string(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut text = None;
        let mut language = None;
        let mut types = None;
        let mut include_unavailable = None;

        for (name, value) in form_urlencoded::parse(query.as_bytes()) {
            let slot = match name.as_ref() {
                QUERY_PARAM => &mut text,
                LANGUAGE_PARAM => &mut language,
                TYPES_PARAM => &mut types,
                INCLUDE_UNAVAILABLE_PARAM => &mut include_unavailable,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }

        let enabled = types
            .and_then(|types| {
                EnabledFacets::from_facets(types.split(',').filter_map(Facet::from_link_name))
            })
            .unwrap_or_default();

        Self {
            query: text.map(|text| text.trim().to_string()).unwrap_or_default(),
            language: language
                .map(|language| language.trim().to_string())
                .filter(|language| !language.is_empty()),
            enabled,
            include_unavailable: include_unavailable.as_deref() == Some("true"),
        }
    }

    /// Serialize to link parameters, omitting every default.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        if !self.query.is_empty() {
            serializer.append_pair(QUERY_PARAM, &self.query);
        }
        if let Some(language) = self.language.as_deref().filter(|l| !l.is_empty()) {
            serializer.append_pair(LANGUAGE_PARAM, language);
        }
        if !self.enabled.is_all() {
            let types: Vec<&str> = self.enabled.iter().map(Facet::link_name).collect();
            serializer.append_pair(TYPES_PARAM, &types.join(","));
        }
        if self.include_unavailable {
            serializer.append_pair(INCLUDE_UNAVAILABLE_PARAM, "true");
        }
        serializer.finish()
    }
}

/// Where the shareable link lives.
pub trait Location {
    /// Current query component, without the leading `?`.
    fn query(&self) -> String;

    /// Overwrite the query component in place. No history is kept.
    fn replace(&mut self, query: &str);
}

/// In-process link holder used by the terminal front end.
#[derive(Debug, Clone)]
pub struct MemoryLocation {
    url: Url,
    writes: usize,
}

impl MemoryLocation {
    #[must_use]
    pub fn new(url: Url) -> Self {
        Self { url, writes: 0 }
    }

    /// Restore from a full link, or from a bare query string applied to
    /// `base`.
    pub fn from_link(link: &str, base: &str) -> Result<Self, url::ParseError> {
        let link = link.trim();
        if let Ok(url) = Url::parse(link) {
            if url.has_host() {
                return Ok(Self::new(url));
            }
        }
        let mut url = Url::parse(base)?;
        let query = link.strip_prefix('?').unwrap_or(link);
        url.set_query((!query.is_empty()).then_some(query));
        Ok(Self::new(url))
    }

    #[must_use]
    pub fn href(&self) -> &str {
        self.url.as_str()
    }

    /// Number of times the link was rewritten.
    #[must_use]
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl Location for MemoryLocation {
    fn query(&self) -> String {
        self.url.query().unwrap_or_default().to_string()
    }

    fn replace(&mut self, query: &str) {
        self.url.set_query((!query.is_empty()).then_some(query));
        self.writes += 1;
    }
}

/// Keeps a [`Location`] in step with the search state.
#[derive(Debug, Clone)]
pub struct LinkSync<L> {
    location: L,
}

impl<L: Location> LinkSync<L> {
    pub fn new(location: L) -> Self {
        Self { location }
    }

    /// State encoded in the link at startup.
    pub fn initial_state(&self) -> SearchState {
        SearchState::from_query_string(&self.location.query())
    }

    /// Write `state` to the location when its serialized form differs from
    /// the current link. Returns whether a write happened.
    pub fn sync(&mut self, state: &SearchState) -> bool {
        let next = state.to_query_string();
        if next == self.location.query() {
            return false;
        }
        self.location.replace(&next);
        true
    }

    pub fn location(&self) -> &L {
        &self.location
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_serialize_to_nothing() {
        assert_eq!(SearchState::default().to_query_string(), "");
    }

    #[test]
    fn parameters_keep_a_stable_order() {
        let mut enabled = EnabledFacets::all();
        enabled.toggle(Facet::Descriptions);
        let state = SearchState {
            query: "machine learning".into(),
            language: Some("en".into()),
            enabled,
            include_unavailable: true,
        };
        let encoded = state.to_query_string();
        assert_eq!(
            encoded,
            "q=machine+learning&language=en&types=titles%2Ctranscripts&include_unavailable=true"
        );
        assert_eq!(SearchState::from_query_string(&encoded), state);
    }

    #[test]
    fn missing_types_means_everything() {
        let state = SearchState::from_query_string("q=rust");
        assert!(state.enabled.is_all());
        assert_eq!(state.query, "rust");
    }

    #[test]
    fn unknown_types_are_ignored() {
        let state = SearchState::from_query_string("types=videos,transcripts");
        assert_eq!(state.enabled, EnabledFacets::only(Facet::Segments));
        let nothing_known = SearchState::from_query_string("types=videos");
        assert!(nothing_known.enabled.is_all());
    }

    #[test]
    fn first_occurrence_wins() {
        let state = SearchState::from_query_string("?q=first&q=second&language=&language=fr");
        assert_eq!(state.query, "first");
        assert_eq!(state.language, None);
    }

    #[test]
    fn include_unavailable_requires_true() {
        assert!(!SearchState::from_query_string("include_unavailable=1").include_unavailable);
        assert!(!SearchState::from_query_string("include_unavailable=yes").include_unavailable);
        assert!(SearchState::from_query_string("include_unavailable=true").include_unavailable);
    }

    #[test]
    fn sync_writes_only_on_change() {
        let location = MemoryLocation::from_link("", DEFAULT_LINK_BASE).expect("base");
        let mut link = LinkSync::new(location);
        let mut state = SearchState::default();
        assert!(!link.sync(&state));
        state.query = "rust".into();
        assert!(link.sync(&state));
        assert!(!link.sync(&state));
        assert_eq!(link.location().writes(), 1);
        assert_eq!(link.location().href(), "http://localhost:3000/search?q=rust");

        state.query.clear();
        assert!(link.sync(&state));
        assert_eq!(link.location().href(), "http://localhost:3000/search");
    }

    #[test]
    fn links_restore_from_urls_or_bare_queries() {
        let full =
            MemoryLocation::from_link("https://example.com/s?q=rust&types=titles", DEFAULT_LINK_BASE)
                .expect("full link");
        let state = LinkSync::new(full).initial_state();
        assert_eq!(state.query, "rust");
        assert_eq!(state.enabled, EnabledFacets::only(Facet::Titles));

        let bare = MemoryLocation::from_link("?q=go&language=de", DEFAULT_LINK_BASE).expect("bare");
        assert_eq!(bare.href(), "http://localhost:3000/search?q=go&language=de");
        assert_eq!(bare.writes(), 0);
    }
}
