//! Splitting a propagator at a point to start a new branch.
//!
//! Splitting propagator `P` running `A → B` at point `s` produces:
//!
//! ```text
//!   before:   A ──────P────── B
//!
//!   after:    A ───P─── S ───N─── B
//!                       │
//!                       Br          (S and Br both start at s)
//!                       via branch propagator N2
//! ```
//!
//! - two new anchors `S` (the split point) and `Br` (the branch tip), both at `s`,
//! - `P` truncated in place to run `A → S`,
//! - a new propagator `N` running `S → B` that restores the severed half,
//! - a new branch propagator running `S → Br`.
//!
//! All five mutations are returned as one [`ChangeSet`], so the split is
//! applied atomically. The branch anchor is returned as the element the user
//! keeps dragging.

use log::debug;

use feyndraw_core::{
    element::{Anchor, ElementKind, ElementRef, Elements, Propagator},
    geometry::Point,
    identifier::Id,
};

use crate::{
    change::{ChangeSet, Mutation},
    config::SplitConfig,
    error::EditError,
    ids::generate_element_ids,
};

/// Everything a split created, together with the mutations describing it
#[derive(Debug, Clone, PartialEq)]
pub struct SplitOutcome {
    /// The mutations to apply, in order.
    pub changes: ChangeSet,
    /// The element the drag should continue with: the branch anchor.
    pub target: ElementRef,
    /// The anchor now sitting between the two halves of the original propagator.
    pub split_anchor: Id,
    /// The free end of the branch.
    pub branch_anchor: Id,
    /// The propagator restoring the severed half.
    pub continuation: Id,
    /// The propagator of the new branch.
    pub branch: Id,
}

/// Describes splitting propagator `id` at `at`.
///
/// New propagator kinds come from `policy`, resolved against the kind of the
/// propagator being split.
///
/// # Errors
///
/// - [`EditError::NotFound`] if `id` is not a propagator of `elements`.
/// - [`EditError::InvariantViolation`] if that propagator has a dangling or
///   looping endpoint in the snapshot.
/// - [`EditError::Exhausted`] if fresh ids cannot be generated.
///
/// No change is described when an error is returned.
pub fn split_propagator(
    elements: &Elements,
    id: Id,
    at: Point,
    policy: &SplitConfig,
) -> Result<SplitOutcome, EditError> {
    let original = elements
        .propagator(id)
        .ok_or_else(|| EditError::propagator_not_found(id))?;
    let (anchor1, anchor2) = original.endpoints();

    if anchor1 == anchor2 {
        return Err(EditError::InvariantViolation(format!(
            "cannot split propagator `{id}`: both ends are anchor `{anchor1}`"
        )));
    }
    for anchor in [anchor1, anchor2] {
        if elements.anchor(anchor).is_none() {
            return Err(EditError::InvariantViolation(format!(
                "cannot split propagator `{id}`: anchor `{anchor}` does not exist"
            )));
        }
    }

    let anchor_ids = generate_element_ids(elements.anchors(), 2, ElementKind::Anchors)?;
    let (split_anchor, branch_anchor) = (anchor_ids[0], anchor_ids[1]);
    let propagator_ids = generate_element_ids(elements.propagators(), 2, ElementKind::Propagators)?;
    let (continuation, branch) = (propagator_ids[0], propagator_ids[1]);

    let mut changes = ChangeSet::new();
    changes.push(Mutation::AddAnchor(Anchor::new(split_anchor, at)));
    changes.push(Mutation::AddAnchor(Anchor::new(branch_anchor, at)));
    changes.push(Mutation::SetPropagatorEndpoints {
        id,
        anchor1,
        anchor2: split_anchor,
    });
    changes.push(Mutation::AddPropagator(Propagator::new(
        continuation,
        policy.continuation().resolve(original.kind()),
        split_anchor,
        anchor2,
    )));
    changes.push(Mutation::AddPropagator(Propagator::new(
        branch,
        policy.branch().resolve(original.kind()),
        split_anchor,
        branch_anchor,
    )));

    debug!(
        propagator:% = id,
        split_anchor:% = split_anchor,
        branch_anchor:% = branch_anchor,
        x = at.x(),
        y = at.y();
        "Split propagator"
    );

    Ok(SplitOutcome {
        changes,
        target: ElementRef::anchor(branch_anchor),
        split_anchor,
        branch_anchor,
        continuation,
        branch,
    })
}
