//! Depth-first row ordering.
//!
//! Both strategies place a parent directly before its whole subtree. They
//! differ in how siblings are ordered:
//!
//! - [`SortStrategy::JoinedPath`] sorts by the `" > "`-joined id string. A
//!   parent's joined path is a strict prefix of its descendants', so subtrees
//!   stay contiguous as long as no id contains the separator. Siblings sort
//!   as plain strings, so `"10"` comes before `"9"`.
//! - [`SortStrategy::Natural`] compares the id sequences segment by segment,
//!   using a numeric-aware comparison per segment.

use crate::config::SortStrategy;
use crate::orphan::Placement;
use lexical_sort::natural_lexical_cmp;
use std::cmp::Ordering;

/// Row indices of `placements` in output order
pub fn depth_first_order(placements: &[Placement], strategy: SortStrategy) -> Vec<usize> {
    let mut order: Vec<usize> = (0..placements.len()).collect();

    match strategy {
        SortStrategy::JoinedPath => {
            let keys: Vec<String> = placements.iter().map(|p| p.path.joined()).collect();
            order.sort_by(|&a, &b| keys[a].cmp(&keys[b]));
        }
        SortStrategy::Natural => {
            order.sort_by(|&a, &b| natural_path_cmp(&placements[a], &placements[b]));
        }
    }

    order
}

fn natural_path_cmp(a: &Placement, b: &Placement) -> Ordering {
    for (left, right) in a.path.ids().zip(b.path.ids()) {
        let ordering = natural_lexical_cmp(left, right).then_with(|| left.cmp(right));
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    // One path is a prefix of the other: the ancestor goes first
    a.path.len().cmp(&b.path.len())
}
