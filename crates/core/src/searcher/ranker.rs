//! Deterministic ordering of candidates gathered from several sites.

use std::cmp::Ordering;

use super::ReleaseCandidate;

/// Compare two candidates, best first.
///
/// Same-title releases are grouped (titles ascending), then ordered by
/// resolution priority, site priority and seeders, all descending.
pub fn compare_candidates(a: &ReleaseCandidate, b: &ReleaseCandidate) -> Ordering {
    a.title
        .cmp(&b.title)
        .then_with(|| b.res_order.cmp(&a.res_order))
        .then_with(|| b.site_order.cmp(&a.site_order))
        .then_with(|| b.seeders.cmp(&a.seeders))
}

/// Sort candidates into priority order. Full ties keep their input order.
pub fn rank_candidates(mut candidates: Vec<ReleaseCandidate>) -> Vec<ReleaseCandidate> {
    candidates.sort_by(compare_candidates);
    candidates
}
