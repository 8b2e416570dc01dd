//! Species-grouped ranks.

use crate::rank::{Candidate, CandidateKey};
use std::collections::HashMap;

/// Shared rank and best rating of each entry's group.
///
/// Groups are attacker identities; the first (best) entry of a group opens a
/// new rank and later entries of the same group reuse it.
pub fn group_ranks(list: &[Candidate]) -> Vec<(usize, f64)> {
    let mut seen: HashMap<&CandidateKey, (usize, f64)> = HashMap::new();
    let mut next_rank = 0;
    list.iter()
        .map(|c| {
            *seen.entry(&c.key).or_insert_with(|| {
                next_rank += 1;
                (next_rank, c.rat)
            })
        })
        .collect()
}
