//! Collision-free identifier generation.
//!
//! New ids are decimal numbers counting up from the largest numeric id
//! already present in a collection. When that count reaches `u64::MAX`, the
//! remaining ids are taken from the lowest free numbers instead, so a single
//! huge host-supplied id cannot block generation. No candidate equals an
//! existing key or an id earlier in the same batch. Non-numeric keys supplied
//! by the host are left alone.

use indexmap::IndexMap;
use log::trace;

use feyndraw_core::{element::ElementKind, identifier::Id};

use crate::error::EditError;

/// Returns `count` ids that are not keys of `existing` and are pairwise distinct.
///
/// `kind` only labels the error if the `u64` id space runs out.
///
/// # Errors
///
/// Returns [`EditError::Exhausted`] if the numeric id space cannot provide
/// `count` more ids.
///
/// # Examples
///
/// ```
/// # use indexmap::IndexMap;
/// # use feyndraw::ids::generate_element_ids;
/// # use feyndraw_core::{element::ElementKind, identifier::Id};
/// let mut existing = IndexMap::new();
/// existing.insert(Id::new("3"), ());
/// existing.insert(Id::new("label"), ());
///
/// let ids = generate_element_ids(&existing, 2, ElementKind::Anchors).unwrap();
/// assert_eq!(ids, vec![Id::new("4"), Id::new("5")]);
/// ```
pub fn generate_element_ids<V>(
    existing: &IndexMap<Id, V>,
    count: usize,
    kind: ElementKind,
) -> Result<Vec<Id>, EditError> {
    let mut ids = Vec::with_capacity(count);

    let start = match existing.keys().filter_map(Id::index).max() {
        Some(max) => max.checked_add(1),
        None => Some(1),
    };
    if let Some(start) = start {
        collect_free_ids(existing, start, count, &mut ids);
    }
    if ids.len() < count {
        trace!(kind:% = kind; "Numeric ids past the largest key ran out, reusing low ids");
        collect_free_ids(existing, 1, count, &mut ids);
    }
    if ids.len() < count {
        return Err(EditError::Exhausted(kind));
    }

    trace!(kind:% = kind, count = count; "Generated element ids");
    Ok(ids)
}

/// Pushes free ids from `from` upward until `ids` holds `count` of them.
fn collect_free_ids<V>(existing: &IndexMap<Id, V>, from: u64, count: usize, ids: &mut Vec<Id>) {
    for index in from..=u64::MAX {
        if ids.len() >= count {
            break;
        }
        let candidate = Id::from_index(index);
        if !existing.contains_key(&candidate) && !ids.contains(&candidate) {
            ids.push(candidate);
        }
    }
}

/// Returns a single fresh id for the collection
pub fn generate_element_id<V>(
    existing: &IndexMap<Id, V>,
    kind: ElementKind,
) -> Result<Id, EditError> {
    let mut ids = generate_element_ids(existing, 1, kind)?;
    ids.pop().ok_or(EditError::Exhausted(kind))
}


#[cfg(test)]
mod proptest_tests {
    use std::collections::HashSet;

    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    fn key_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            (0u64..500).prop_map(|n| n.to_string()),
            "[a-z]{1,3}[0-9]{0,2}",
            (0u64..50).prop_map(|n| format!("0{n}")),
        ]
    }

    // ===================
    // Property Test Functions
    // ===================

    /// Generated ids are pairwise distinct and never collide with existing keys.
    fn check_ids_unique(keys: Vec<String>, count: usize) -> Result<(), TestCaseError> {
        let existing: IndexMap<Id, ()> = keys.iter().map(|key| (Id::new(key), ())).collect();
        let ids = generate_element_ids(&existing, count, ElementKind::Anchors)
            .map_err(|err| TestCaseError::fail(err.to_string()))?;

        prop_assert_eq!(ids.len(), count);
        let distinct: HashSet<Id> = ids.iter().copied().collect();
        prop_assert_eq!(distinct.len(), count);
        for id in &ids {
            prop_assert!(!existing.contains_key(id));
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn ids_unique(keys in prop::collection::vec(key_strategy(), 0..40), count in 0usize..10) {
            check_ids_unique(keys, count)?;
        }
    }
}
