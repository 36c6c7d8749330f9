//! Collapsing an anchor into a coincident one.
//!
//! When an anchor is dropped on top of another one, the dropped anchor is
//! removed and every propagator that referenced it is reconnected to the
//! anchor that was already there. Propagators running between the two
//! anchors would turn into loops and are removed instead.
//!
//! References are always rewritten before the anchor is removed, so no
//! intermediate state ever holds a dangling endpoint.

use log::debug;

use feyndraw_core::{
    element::{ElementRef, Elements, Selection},
    identifier::Id,
};

use crate::{
    change::{ChangeSet, Mutation},
    error::EditError,
};

/// Finds the anchor `anchor` would merge into.
///
/// The closest other anchor within `tolerance` (Euclidean distance,
/// inclusive) wins. Equally close candidates are resolved by collection order.
///
/// # Errors
///
/// Returns [`EditError::NotFound`] if `anchor` does not exist.
pub fn find_coincident(
    elements: &Elements,
    anchor: Id,
    tolerance: f32,
) -> Result<Option<Id>, EditError> {
    let position = elements
        .anchor(anchor)
        .ok_or_else(|| EditError::anchor_not_found(anchor))?
        .position();

    let survivor = elements
        .anchors()
        .values()
        .filter(|other| other.id() != anchor)
        .map(|other| (other.id(), other.position().distance(position)))
        .filter(|(_, distance)| *distance <= tolerance)
        .min_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(id, _)| id);

    Ok(survivor)
}

/// Describes merging the just-dragged `anchor` into a coincident anchor.
///
/// Returns an empty [`ChangeSet`] when nothing lies within `tolerance`.
/// Otherwise the change-set reconnects every propagator of `anchor` to the
/// surviving anchor, drops propagators that would join the two, removes
/// `anchor`, and, if `select_result` is set, selects the survivor.
///
/// # Errors
///
/// Returns [`EditError::NotFound`] if `anchor` does not exist.
pub fn merge_anchor(
    elements: &Elements,
    anchor: Id,
    tolerance: f32,
    select_result: bool,
) -> Result<ChangeSet, EditError> {
    let Some(survivor) = find_coincident(elements, anchor, tolerance)? else {
        debug!(anchor:% = anchor; "Nothing to merge with");
        return Ok(ChangeSet::new());
    };

    let mut changes = ChangeSet::new();
    for propagator in elements.propagators_referencing(anchor) {
        let mut rewired = *propagator;
        rewired.replace_anchor(anchor, survivor);
        let (anchor1, anchor2) = rewired.endpoints();

        if anchor1 == anchor2 {
            changes.push(Mutation::RemovePropagator(propagator.id()));
        } else {
            changes.push(Mutation::SetPropagatorEndpoints {
                id: propagator.id(),
                anchor1,
                anchor2,
            });
        }
    }
    changes.push(Mutation::RemoveAnchor(anchor));

    if select_result {
        changes.push(Mutation::Select(Selection::single(ElementRef::anchor(
            survivor,
        ))));
    }

    debug!(
        removed:% = anchor,
        survivor:% = survivor,
        mutations = changes.len();
        "Merged anchors"
    );
    Ok(changes)
}
