//! Merge/dedup engine for imports
//!
//! Combines an existing session list with an imported one without
//! silently discarding anything that is not a duplicate. The quadratic
//! scan is fine at personal-tracker scale (hundreds to low thousands
//! of records); this is not designed for bulk-scale import.

use serde::Serialize;

use crate::models::Session;

/// Result of merging an incoming list into an existing one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergeOutcome {
    /// Existing sessions in their original order, followed by the
    /// newly admitted incoming sessions in their original order.
    pub merged: Vec<Session>,
    pub added_count: usize,
    pub duplicate_count: usize,
}

/// Two sessions are duplicates if they share a non-empty id, or if
/// all of book, date, pages, page markers, and duration compare equal.
///
/// The id match always wins, even when the content differs (a record
/// edited on another device is still the same record). The content
/// match is a heuristic for data exported before ids existed; the
/// exact field set is an observable contract and must not be
/// "improved", since changing it changes merge outcomes users see.
fn is_duplicate(a: &Session, b: &Session) -> bool {
    if let (Some(id_a), Some(id_b)) = (a.id.as_deref(), b.id.as_deref()) {
        if !id_a.is_empty() && !id_b.is_empty() && id_a == id_b {
            return true;
        }
    }
    a.book == b.book
        && a.date == b.date
        && a.pages == b.pages
        && a.start_page == b.start_page
        && a.end_page == b.end_page
        && a.duration_min == b.duration_min
}

/// Union of `existing` and `incoming` with duplicate suppression.
///
/// Each incoming session is tested against the existing list only, so
/// two identical id-less records inside one import are both admitted.
/// The duplicate predicate is pairwise, not transitive; near-duplicate
/// triples can slip through, which is accepted behavior.
pub fn merge(existing: &[Session], incoming: &[Session]) -> MergeOutcome {
    let mut merged: Vec<Session> = existing.to_vec();
    let mut added_count = 0;

    for candidate in incoming {
        if existing.iter().any(|s| is_duplicate(s, candidate)) {
            continue;
        }
        merged.push(candidate.clone());
        added_count += 1;
    }

    MergeOutcome {
        merged,
        added_count,
        duplicate_count: incoming.len() - added_count,
    }
}

/// Full-overwrite import mode: the incoming list becomes the whole
/// collection. The caller is responsible for confirming with the user
/// before invoking this.
pub fn replace(incoming: Vec<Session>) -> Vec<Session> {
    incoming
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(id: Option<&str>, book: &str, date: &str, pages: i64, minutes: f64) -> Session {
        Session {
            id: id.map(str::to_string),
            date: date.to_string(),
            start: None,
            end: None,
            duration_min: Some(minutes),
            pages: Some(pages),
            start_page: None,
            end_page: None,
            pages_per_min: None,
            book: Some(book.to_string()),
            notes: None,
        }
    }

    #[test]
    fn test_merge_with_empty_incoming_is_identity() {
        let existing = vec![session(Some("a"), "Dune", "2024-01-01", 10, 10.0)];
        let outcome = merge(&existing, &[]);
        assert_eq!(outcome.merged, existing);
        assert_eq!(outcome.added_count, 0);
        assert_eq!(outcome.duplicate_count, 0);
    }

    #[test]
    fn test_merge_with_self_absorbs_everything() {
        let existing = vec![
            session(Some("a"), "Dune", "2024-01-01", 10, 10.0),
            session(Some("b"), "Emma", "2024-01-02", 20, 30.0),
        ];
        let outcome = merge(&existing, &existing);
        assert_eq!(outcome.merged, existing);
        assert_eq!(outcome.added_count, 0);
        assert_eq!(outcome.duplicate_count, existing.len());
    }

    #[test]
    fn test_merge_count_accounting() {
        let existing = vec![session(Some("a"), "Dune", "2024-01-01", 10, 10.0)];
        let incoming = vec![
            session(Some("a"), "Dune", "2024-01-01", 10, 10.0),
            session(Some("b"), "Emma", "2024-01-02", 20, 30.0),
            session(Some("c"), "Emma", "2024-01-03", 5, 15.0),
        ];

        let outcome = merge(&existing, &incoming);
        assert_eq!(outcome.added_count + outcome.duplicate_count, incoming.len());
        assert_eq!(outcome.merged.len(), existing.len() + outcome.added_count);
        assert_eq!(outcome.added_count, 2);
    }

    #[test]
    fn test_id_match_wins_over_content_mismatch() {
        let existing = vec![session(Some("a"), "X", "2024-01-01", 10, 10.0)];
        let incoming = vec![session(Some("a"), "X", "2024-01-01", 999, 999.0)];

        let outcome = merge(&existing, &incoming);
        assert_eq!(outcome.added_count, 0);
        assert_eq!(outcome.duplicate_count, 1);
        // The existing copy is kept as-is.
        assert_eq!(outcome.merged[0].pages, Some(10));
    }

    #[test]
    fn test_content_match_without_ids() {
        let mut a = session(None, "Dune", "2024-02-01", 20, 30.0);
        a.start_page = Some(1);
        a.end_page = Some(21);
        let b = a.clone();

        let outcome = merge(&[a], &[b]);
        assert_eq!(outcome.added_count, 0);
        assert_eq!(outcome.duplicate_count, 1);
        assert_eq!(outcome.merged.len(), 1);
    }

    #[test]
    fn test_different_ids_same_content_is_still_duplicate() {
        let a = session(Some("a"), "Dune", "2024-02-01", 20, 30.0);
        let b = session(Some("b"), "Dune", "2024-02-01", 20, 30.0);

        let outcome = merge(&[a], &[b]);
        assert_eq!(outcome.duplicate_count, 1);
    }

    #[test]
    fn test_new_sessions_append_in_incoming_order() {
        let existing = vec![session(Some("a"), "Dune", "2024-01-05", 10, 10.0)];
        let incoming = vec![
            session(Some("b"), "Emma", "2024-01-01", 1, 1.0),
            session(Some("c"), "Emma", "2024-01-09", 2, 2.0),
        ];

        let outcome = merge(&existing, &incoming);
        let ids: Vec<_> = outcome.merged.iter().map(|s| s.id.clone().unwrap()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_content_differs_on_any_compared_field() {
        let base = session(None, "Dune", "2024-02-01", 20, 30.0);
        let mut other = base.clone();
        other.duration_min = Some(31.0);

        let outcome = merge(&[base], &[other]);
        assert_eq!(outcome.added_count, 1);
    }

    #[test]
    fn test_replace_discards_existing() {
        let incoming = vec![session(Some("z"), "Emma", "2024-03-01", 3, 9.0)];
        assert_eq!(replace(incoming.clone()), incoming);
    }
}
