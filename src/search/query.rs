//! Turns raw keystrokes into a settled, validated query.

use std::time::{Duration, Instant};

use thiserror::Error;

use super::limits::{DEBOUNCE, MAX_QUERY_CHARS, MIN_QUERY_CHARS};

/// Reasons a settled query is not sent to the service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("query is too short ({len} of at least {min} characters)")]
    TooShort { len: usize, min: usize },
    #[error("query is too long ({len} of at most {max} characters)")]
    TooLong { len: usize, max: usize },
}

/// A settled query that passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ValidQuery(String);

impl ValidQuery {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ValidQuery {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Check that a settled query is within the accepted length bounds.
pub fn validate(settled: &str) -> Result<ValidQuery, QueryError> {
    let trimmed = settled.trim();
    let len = trimmed.chars().count();
    if len < MIN_QUERY_CHARS {
        return Err(QueryError::TooShort {
            len,
            min: MIN_QUERY_CHARS,
        });
    }
    if len > MAX_QUERY_CHARS {
        return Err(QueryError::TooLong {
            len,
            max: MAX_QUERY_CHARS,
        });
    }
    Ok(ValidQuery(trimmed.to_string()))
}

/// Tracks the live input text and emits it once typing pauses.
#[derive(Debug, Clone)]
pub struct QueryDebouncer {
    raw: String,
    settled: String,
    last_edit: Option<Instant>,
    delay: Duration,
}

impl QueryDebouncer {
    /// Start with `initial` already settled, as when restoring a shared link.
    #[must_use]
    pub fn new(initial: &str) -> Self {
        Self::with_delay(initial, DEBOUNCE)
    }

    #[must_use]
    pub fn with_delay(initial: &str, delay: Duration) -> Self {
        Self {
            raw: initial.to_string(),
            settled: initial.trim().to_string(),
            last_edit: None,
            delay,
        }
    }

    /// Record a new input value. Values longer than the maximum query length
    /// are refused and leave the input unchanged.
    pub fn input(&mut self, text: &str, now: Instant) -> bool {
        if text.chars().count() > MAX_QUERY_CHARS {
            return false;
        }
        if text == self.raw {
            return true;
        }
        self.raw = text.to_string();
        self.last_edit = Some(now);
        true
    }

    /// Return the new settled value once the input has been idle for the
    /// debounce delay. Edits that end where they started settle to nothing.
    pub fn poll(&mut self, now: Instant) -> Option<&str> {
        let last_edit = self.last_edit?;
        if now.saturating_duration_since(last_edit) < self.delay {
            return None;
        }
        self.last_edit = None;
        let normalized = self.raw.trim();
        if normalized == self.settled {
            return None;
        }
        self.settled = normalized.to_string();
        Some(&self.settled)
    }

    /// When the pending edit will settle, if any.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.last_edit.map(|edit| edit + self.delay)
    }

    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    #[must_use]
    pub fn settled(&self) -> &str {
        &self.settled
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.last_edit.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(base: Instant, millis: u64) -> Instant {
        base + Duration::from_millis(millis)
    }

    #[test]
    fn settles_only_after_inactivity() {
        let base = Instant::now();
        let mut debouncer = QueryDebouncer::new("");
        debouncer.input("m", at(base, 0));
        debouncer.input("ma", at(base, 100));
        debouncer.input("mac", at(base, 250));
        assert_eq!(debouncer.poll(at(base, 400)), None);
        assert_eq!(debouncer.poll(at(base, 550)), Some("mac"));
        assert_eq!(debouncer.poll(at(base, 900)), None);
        assert_eq!(debouncer.settled(), "mac");
    }

    #[test]
    fn raw_text_tracks_every_keystroke() {
        let base = Instant::now();
        let mut debouncer = QueryDebouncer::new("");
        debouncer.input("ab", base);
        assert_eq!(debouncer.raw(), "ab");
        assert_eq!(debouncer.settled(), "");
        assert!(debouncer.is_pending());
        assert_eq!(debouncer.deadline(), Some(base + DEBOUNCE));
    }

    #[test]
    fn edits_returning_to_settled_value_emit_nothing() {
        let base = Instant::now();
        let mut debouncer = QueryDebouncer::new("rust");
        debouncer.input("rus", at(base, 0));
        debouncer.input("rust", at(base, 50));
        assert_eq!(debouncer.poll(at(base, 400)), None);
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn settled_value_is_trimmed() {
        let base = Instant::now();
        let mut debouncer = QueryDebouncer::new("");
        debouncer.input("  deep learning ", base);
        assert_eq!(debouncer.poll(at(base, 301)), Some("deep learning"));
    }

    #[test]
    fn overlong_input_is_refused() {
        let base = Instant::now();
        let mut debouncer = QueryDebouncer::new("ok");
        let long = "x".repeat(MAX_QUERY_CHARS + 1);
        assert!(!debouncer.input(&long, base));
        assert_eq!(debouncer.raw(), "ok");
        assert!(debouncer.input(&"x".repeat(MAX_QUERY_CHARS), base));
    }

    #[test]
    fn validation_bounds() {
        assert_eq!(validate("a"), Err(QueryError::TooShort { len: 1, min: 2 }));
        assert_eq!(validate("  a  "), Err(QueryError::TooShort { len: 1, min: 2 }));
        assert_eq!(validate("ab").map(|q| q.as_str().to_string()), Ok("ab".to_string()));
        let long = "y".repeat(MAX_QUERY_CHARS + 1);
        assert!(matches!(validate(&long), Err(QueryError::TooLong { .. })));
    }
}
