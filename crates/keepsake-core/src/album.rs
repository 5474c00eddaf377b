//! Albums — ordered, duplicate-free photo membership under one owner.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::identity::Principal;

/// An ordered collection of photos under a single owner.
///
/// Invariant: every id in `photo_ids` refers to an existing photo whose
/// owner equals the album's owner, and no id appears twice. The owner is
/// immutable after creation; `updated_at` bumps on every mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Album {
  pub id:         Uuid,
  pub owner:      Principal,
  pub name:       String,
  pub photo_ids:  Vec<Uuid>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl Album {
  /// A fresh, empty album owned by `owner`. `created_at == updated_at`.
  pub fn new(owner: Principal, name: String) -> Self {
    let now = Utc::now();
    Self {
      id: Uuid::new_v4(),
      owner,
      name,
      photo_ids: Vec::new(),
      created_at: now,
      updated_at: now,
    }
  }
}

/// Whether `proposed` is exactly a rearrangement of `current` — same
/// multiset of ids, no additions, no removals, no duplicates.
pub fn is_permutation(current: &[Uuid], proposed: &[Uuid]) -> bool {
  if current.len() != proposed.len() {
    return false;
  }

  let mut counts = std::collections::HashMap::with_capacity(current.len());
  for id in current {
    *counts.entry(*id).or_insert(0u32) += 1;
  }
  for id in proposed {
    match counts.get_mut(id) {
      Some(n) if *n > 0 => *n -= 1,
      _ => return false,
    }
  }
  true
}

#[cfg(test)]
mod tests {
  use super::*;

  fn ids(n: usize) -> Vec<Uuid> { (0..n).map(|_| Uuid::new_v4()).collect() }

  #[test]
  fn reversal_is_a_permutation() {
    let current = ids(4);
    let mut proposed = current.clone();
    proposed.reverse();
    assert!(is_permutation(&current, &proposed));
  }

  #[test]
  fn identity_is_a_permutation() {
    let current = ids(3);
    assert!(is_permutation(&current, &current.clone()));
  }

  #[test]
  fn empty_lists_are_permutations() {
    assert!(is_permutation(&[], &[]));
  }

  #[test]
  fn subset_is_rejected() {
    let current = ids(3);
    assert!(!is_permutation(&current, &current[..2]));
  }

  #[test]
  fn superset_is_rejected() {
    let current = ids(2);
    let mut proposed = current.clone();
    proposed.push(Uuid::new_v4());
    assert!(!is_permutation(&current, &proposed));
  }

  #[test]
  fn duplicate_replacing_member_is_rejected() {
    let current = ids(3);
    // Same length, but one member doubled and another dropped.
    let proposed = vec![current[0], current[0], current[2]];
    assert!(!is_permutation(&current, &proposed));
  }

  #[test]
  fn foreign_id_is_rejected() {
    let current = ids(2);
    let proposed = vec![current[0], Uuid::new_v4()];
    assert!(!is_permutation(&current, &proposed));
  }
}
