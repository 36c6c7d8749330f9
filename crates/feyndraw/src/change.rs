//! Change-sets: descriptions of diagram mutations.
//!
//! Engine operations never mutate the diagram they inspect. They read a
//! snapshot of [`Elements`] and return a [`ChangeSet`], an ordered list of
//! [`Mutation`]s the host applies to its own state.
//!
//! [`ChangeSet::apply`] is all-or-nothing: mutations are applied in order to
//! a staged copy, the result is validated with
//! [`topology::validate`](crate::topology::validate), and only a valid result
//! replaces the host's elements. No partially applied change is ever
//! observable.

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use feyndraw_core::{
    element::{Anchor, Elements, Propagator, PropagatorKind, Selection},
    geometry::Point,
    identifier::Id,
};

use crate::{error::EditError, topology};

/// A single structural or positional change to a diagram
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Mutation {
    /// Adds a new anchor. The id must be unused.
    AddAnchor(Anchor),
    /// Adds a new propagator. The id must be unused.
    AddPropagator(Propagator),
    /// Places an anchor at an absolute position.
    SetAnchorPosition { id: Id, position: Point },
    /// Moves a group of anchors by the same offset.
    MoveAnchors { ids: Vec<Id>, delta: Point },
    /// Reconnects an existing propagator.
    SetPropagatorEndpoints { id: Id, anchor1: Id, anchor2: Id },
    /// Changes the particle kind of a propagator.
    SetPropagatorKind { id: Id, kind: PropagatorKind },
    /// Removes a propagator.
    RemovePropagator(Id),
    /// Removes an anchor. No propagator may still reference it.
    RemoveAnchor(Id),
    /// Replaces the whole selection.
    Select(Selection),
}

impl Mutation {
    fn apply_to(&self, elements: &mut Elements) -> Result<(), EditError> {
        match self {
            Self::AddAnchor(anchor) => {
                if elements.anchor(anchor.id()).is_some() {
                    return Err(EditError::InvariantViolation(format!(
                        "anchor `{}` already exists",
                        anchor.id()
                    )));
                }
                elements.insert_anchor(*anchor);
            }
            Self::AddPropagator(propagator) => {
                if elements.propagator(propagator.id()).is_some() {
                    return Err(EditError::InvariantViolation(format!(
                        "propagator `{}` already exists",
                        propagator.id()
                    )));
                }
                elements.insert_propagator(*propagator);
            }
            Self::SetAnchorPosition { id, position } => {
                elements
                    .anchor_mut(*id)
                    .ok_or_else(|| EditError::anchor_not_found(*id))?
                    .set_position(*position);
            }
            Self::MoveAnchors { ids, delta } => {
                for id in ids {
                    let anchor = elements
                        .anchor_mut(*id)
                        .ok_or_else(|| EditError::anchor_not_found(*id))?;
                    let moved = anchor.position().add_point(*delta);
                    anchor.set_position(moved);
                }
            }
            Self::SetPropagatorEndpoints {
                id,
                anchor1,
                anchor2,
            } => {
                elements
                    .propagator_mut(*id)
                    .ok_or_else(|| EditError::propagator_not_found(*id))?
                    .set_endpoints(*anchor1, *anchor2);
            }
            Self::SetPropagatorKind { id, kind } => {
                elements
                    .propagator_mut(*id)
                    .ok_or_else(|| EditError::propagator_not_found(*id))?
                    .set_kind(*kind);
            }
            Self::RemovePropagator(id) => {
                elements
                    .remove_propagator(*id)
                    .ok_or_else(|| EditError::propagator_not_found(*id))?;
            }
            Self::RemoveAnchor(id) => {
                if let Some(propagator) = elements.propagators_referencing(*id).next() {
                    return Err(EditError::InvariantViolation(format!(
                        "anchor `{id}` is still referenced by propagator `{}`",
                        propagator.id()
                    )));
                }
                elements
                    .remove_anchor(*id)
                    .ok_or_else(|| EditError::anchor_not_found(*id))?;
            }
            Self::Select(selection) => elements.set_selection(selection.clone()),
        }
        Ok(())
    }
}

/// An ordered, atomically applied list of mutations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChangeSet {
    mutations: Vec<Mutation>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, mutation: Mutation) {
        self.mutations.push(mutation);
    }

    /// Appends all mutations of `other` after the ones already present
    pub fn append(&mut self, other: ChangeSet) {
        self.mutations.extend(other.mutations);
    }

    pub fn is_empty(&self) -> bool {
        self.mutations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.mutations.len()
    }

    pub fn mutations(&self) -> &[Mutation] {
        &self.mutations
    }

    /// Anchors this change-set creates
    pub fn added_anchors(&self) -> impl Iterator<Item = &Anchor> + '_ {
        self.mutations.iter().filter_map(|mutation| match mutation {
            Mutation::AddAnchor(anchor) => Some(anchor),
            _ => None,
        })
    }

    /// Propagators this change-set creates
    pub fn added_propagators(&self) -> impl Iterator<Item = &Propagator> + '_ {
        self.mutations.iter().filter_map(|mutation| match mutation {
            Mutation::AddPropagator(propagator) => Some(propagator),
            _ => None,
        })
    }

    /// Applies every mutation to `elements`, or none of them.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by a mutation, or
    /// [`EditError::InvariantViolation`] if the final state breaks a graph
    /// invariant. In both cases `elements` is left untouched.
    pub fn apply(&self, elements: &mut Elements) -> Result<(), EditError> {
        if self.is_empty() {
            return Ok(());
        }

        let mut staged = elements.clone();
        for mutation in &self.mutations {
            trace!(mutation:?; "Applying mutation");
            mutation.apply_to(&mut staged)?;
        }
        topology::validate(&staged)?;

        *elements = staged;
        debug!(mutations = self.len(); "Change set committed");
        Ok(())
    }
}

impl From<Vec<Mutation>> for ChangeSet {
    fn from(mutations: Vec<Mutation>) -> Self {
        Self { mutations }
    }
}

impl Extend<Mutation> for ChangeSet {
    fn extend<T: IntoIterator<Item = Mutation>>(&mut self, iter: T) {
        self.mutations.extend(iter);
    }
}
