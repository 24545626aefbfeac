use std::collections::HashMap;
use std::time::{Duration, Instant};

use dictionary::Word;

/// How long a successful lookup stays fresh before a re-submission of the
/// same term triggers a background refetch.
pub const STALE_AFTER: Duration = Duration::from_secs(60 * 60 * 24);

/// Read-only view of a cached lookup, used to drive rendering.
#[derive(Debug)]
pub enum QueryState<'a> {
    /// Nothing searched yet for this key.
    Idle,
    /// First fetch for this key is in flight, no data to show.
    Pending,
    /// The last fetch failed; the reason is logged, never rendered verbatim.
    Error(&'a str),
    /// A stale success is being refreshed. The previous entry stays cached
    /// but the view shows a fetching indicator instead of stale content.
    Refetching { previous: &'a Word },
    Success(&'a Word),
}

/// Instruction to start a network fetch for a term. Issued at most once per
/// in-flight window for a given key.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub term: String,
}

enum Phase {
    /// Fetch in flight, no earlier success for this key.
    Pending,
    /// Fetch in flight, previous success retained.
    Refetching { previous: Word },
    Success { entry: Word, fetched_at: Instant },
    Failed { reason: String },
}

/// Keyed async-query cache: one slot per exact term string.
///
/// The cache never talks to the network itself. `lookup` hands out a
/// [`FetchTicket`] when the caller must start a fetch, and the completed
/// result comes back through [`resolve`] under the term it was fetched for.
/// Responses for superseded terms therefore land in their own slot and can
/// never overwrite the slot currently rendered.
///
/// [`resolve`]: QueryCache::resolve
pub struct QueryCache {
    stale_after: Duration,
    slots: HashMap<String, Phase>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::with_staleness(STALE_AFTER)
    }

    pub fn with_staleness(stale_after: Duration) -> Self {
        Self {
            stale_after,
            slots: HashMap::new(),
        }
    }

    /// Registers interest in `term` and decides whether a fetch must start.
    ///
    /// An empty term never fetches. While a fetch for the term is already in
    /// flight no second one starts (single-flight). A success younger than
    /// the staleness window is a plain cache hit. A stale success moves to
    /// `Refetching` and keeps the previous entry; a failed slot retries on
    /// the next submission.
    pub fn lookup(&mut self, term: &str, now: Instant) -> Option<FetchTicket> {
        if term.is_empty() {
            return None;
        }
        match self.slots.get_mut(term) {
            None => {}
            Some(Phase::Pending | Phase::Refetching { .. }) => return None,
            Some(Phase::Success { fetched_at, .. })
                if now.duration_since(*fetched_at) < self.stale_after =>
            {
                return None;
            }
            Some(phase @ Phase::Success { .. }) => {
                let Phase::Success { entry, .. } = std::mem::replace(phase, Phase::Pending)
                else {
                    return None;
                };
                *phase = Phase::Refetching { previous: entry };
                return Some(FetchTicket {
                    term: term.to_owned(),
                });
            }
            Some(phase @ Phase::Failed { .. }) => {
                *phase = Phase::Pending;
                return Some(FetchTicket {
                    term: term.to_owned(),
                });
            }
        }
        self.slots.insert(term.to_owned(), Phase::Pending);
        Some(FetchTicket {
            term: term.to_owned(),
        })
    }

    /// Applies a completed fetch to the slot it was issued for.
    ///
    /// The result is stored under `term` no matter what the user has
    /// searched since; a late response for an old term is kept for that term
    /// and simply not rendered.
    pub fn resolve(&mut self, term: &str, result: Result<Word, String>, now: Instant) {
        let Some(phase) = self.slots.get_mut(term) else {
            tracing::debug!(%term, "dropping result for a term that was never looked up");
            return;
        };
        *phase = match result {
            Ok(entry) => Phase::Success {
                entry,
                fetched_at: now,
            },
            Err(reason) => Phase::Failed { reason },
        };
    }

    /// Current state for `term`; `Idle` for the empty term or an unknown key.
    pub fn state(&self, term: &str) -> QueryState<'_> {
        if term.is_empty() {
            return QueryState::Idle;
        }
        match self.slots.get(term) {
            None => QueryState::Idle,
            Some(Phase::Pending) => QueryState::Pending,
            Some(Phase::Refetching { previous }) => QueryState::Refetching { previous },
            Some(Phase::Success { entry, .. }) => QueryState::Success(entry),
            Some(Phase::Failed { reason }) => QueryState::Error(reason),
        }
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(name: &str) -> Word {
        serde_json::from_str(&format!(r#"{{ "word": "{name}" }}"#)).unwrap()
    }

    #[test]
    fn empty_term_never_fetches() {
        let mut cache = QueryCache::new();
        assert_eq!(cache.lookup("", Instant::now()), None);
        assert!(matches!(cache.state(""), QueryState::Idle));
    }

    #[test]
    fn first_lookup_issues_one_ticket() {
        let mut cache = QueryCache::new();
        let now = Instant::now();
        let ticket = cache.lookup("hello", now).unwrap();
        assert_eq!(ticket.term, "hello");
        assert!(matches!(cache.state("hello"), QueryState::Pending));
    }

    #[test]
    fn inflight_lookups_share_the_fetch() {
        let mut cache = QueryCache::new();
        let now = Instant::now();
        assert!(cache.lookup("hello", now).is_some());
        assert_eq!(cache.lookup("hello", now), None);
        assert_eq!(cache.lookup("hello", now + Duration::from_secs(5)), None);
    }

    #[test]
    fn fresh_success_is_a_cache_hit() {
        let mut cache = QueryCache::new();
        let now = Instant::now();
        assert!(cache.lookup("hello", now).is_some());
        cache.resolve("hello", Ok(word("hello")), now);
        // Re-submitting within the window must not fetch again.
        assert_eq!(cache.lookup("hello", now + Duration::from_secs(60)), None);
        assert_eq!(
            cache.lookup("hello", now + STALE_AFTER - Duration::from_secs(1)),
            None
        );
        assert!(matches!(cache.state("hello"), QueryState::Success(w) if w.word == "hello"));
    }

    #[test]
    fn stale_success_refetches_and_keeps_previous() {
        let mut cache = QueryCache::new();
        let now = Instant::now();
        assert!(cache.lookup("hello", now).is_some());
        cache.resolve("hello", Ok(word("hello")), now);
        let later = now + STALE_AFTER + Duration::from_secs(1);
        let ticket = cache.lookup("hello", later).unwrap();
        assert_eq!(ticket.term, "hello");
        assert!(matches!(
            cache.state("hello"),
            QueryState::Refetching { previous } if previous.word == "hello"
        ));
        // The refetch itself is single-flight too.
        assert_eq!(cache.lookup("hello", later), None);
    }

    #[test]
    fn failed_lookup_retries_on_resubmission() {
        let mut cache = QueryCache::new();
        let now = Instant::now();
        assert!(cache.lookup("zzzxyz", now).is_some());
        cache.resolve("zzzxyz", Err("not found".into()), now);
        assert!(matches!(cache.state("zzzxyz"), QueryState::Error("not found")));
        let ticket = cache.lookup("zzzxyz", now + Duration::from_secs(1)).unwrap();
        assert_eq!(ticket.term, "zzzxyz");
        assert!(matches!(cache.state("zzzxyz"), QueryState::Pending));
    }

    #[test]
    fn failed_refetch_replaces_the_stale_entry_with_the_error() {
        let mut cache = QueryCache::new();
        let now = Instant::now();
        assert!(cache.lookup("hello", now).is_some());
        cache.resolve("hello", Ok(word("hello")), now);
        let later = now + STALE_AFTER + Duration::from_secs(1);
        assert!(cache.lookup("hello", later).is_some());
        cache.resolve("hello", Err("boom".into()), later);
        assert!(matches!(cache.state("hello"), QueryState::Error("boom")));
    }

    #[test]
    fn late_response_stays_under_its_own_key() {
        let mut cache = QueryCache::new();
        let now = Instant::now();
        assert!(cache.lookup("cat", now).is_some());
        assert!(cache.lookup("dog", now).is_some());
        // "dog" resolves first and is what the user is looking at.
        cache.resolve("dog", Ok(word("dog")), now);
        assert!(matches!(cache.state("dog"), QueryState::Success(w) if w.word == "dog"));
        // The delayed "cat" response lands afterwards.
        cache.resolve("cat", Ok(word("cat")), now + Duration::from_secs(2));
        assert!(matches!(cache.state("dog"), QueryState::Success(w) if w.word == "dog"));
        assert!(matches!(cache.state("cat"), QueryState::Success(w) if w.word == "cat"));
    }

    #[test]
    fn result_for_unknown_term_is_dropped() {
        let mut cache = QueryCache::new();
        cache.resolve("ghost", Ok(word("ghost")), Instant::now());
        assert!(matches!(cache.state("ghost"), QueryState::Idle));
    }

    #[test]
    fn distinct_terms_fetch_independently() {
        let mut cache = QueryCache::with_staleness(Duration::from_secs(60));
        let now = Instant::now();
        assert!(cache.lookup("cat", now).is_some());
        assert!(cache.lookup("dog", now).is_some());
    }
}
