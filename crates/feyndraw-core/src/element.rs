//! The diagram element model: anchors, propagators and the selection.
//!
//! A diagram is a graph. [`Anchor`]s are its vertices and [`Propagator`]s
//! are its edges, each joining exactly two anchors. [`Elements`] owns both
//! collections together with the current [`Selection`].
//!
//! Collections are insertion ordered ([`IndexMap`]/[`IndexSet`]) so that every
//! query the engine makes, such as picking a merge survivor, is deterministic.

use std::{fmt, str::FromStr};

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{geometry::Point, identifier::Id};

/// A vertex of the diagram graph
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    id: Id,
    position: Point,
}

impl Anchor {
    pub fn new(id: Id, position: Point) -> Self {
        Self { id, position }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }
}

/// The particle a propagator depicts. Only affects rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropagatorKind {
    #[default]
    Fermion,
    #[serde(alias = "em")]
    Electroweak,
    Gluon,
    Dashed,
}

impl fmt::Display for PropagatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Fermion => "fermion",
            Self::Electroweak => "electroweak",
            Self::Gluon => "gluon",
            Self::Dashed => "dashed",
        };
        f.write_str(name)
    }
}

/// Error returned when parsing an unrecognized propagator kind name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown propagator kind `{0}`")]
pub struct UnknownPropagatorKind(pub String);

impl FromStr for PropagatorKind {
    type Err = UnknownPropagatorKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fermion" => Ok(Self::Fermion),
            "electroweak" | "em" => Ok(Self::Electroweak),
            "gluon" => Ok(Self::Gluon),
            "dashed" => Ok(Self::Dashed),
            other => Err(UnknownPropagatorKind(other.to_string())),
        }
    }
}

/// An edge of the diagram graph.
///
/// Both endpoints must name existing, distinct anchors. The engine checks
/// this after every change it applies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Propagator {
    id: Id,
    kind: PropagatorKind,
    anchor1: Id,
    anchor2: Id,
}

impl Propagator {
    pub fn new(id: Id, kind: PropagatorKind, anchor1: Id, anchor2: Id) -> Self {
        Self {
            id,
            kind,
            anchor1,
            anchor2,
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn kind(&self) -> PropagatorKind {
        self.kind
    }

    pub fn anchor1(&self) -> Id {
        self.anchor1
    }

    pub fn anchor2(&self) -> Id {
        self.anchor2
    }

    /// Returns both endpoints as `(anchor1, anchor2)`
    pub fn endpoints(&self) -> (Id, Id) {
        (self.anchor1, self.anchor2)
    }

    /// Returns true if either endpoint is `anchor`
    pub fn references(&self, anchor: Id) -> bool {
        self.anchor1 == anchor || self.anchor2 == anchor
    }

    pub fn set_kind(&mut self, kind: PropagatorKind) {
        self.kind = kind;
    }

    pub fn set_endpoints(&mut self, anchor1: Id, anchor2: Id) {
        self.anchor1 = anchor1;
        self.anchor2 = anchor2;
    }

    /// Rewrites every endpoint equal to `from` into `to`.
    ///
    /// Returns true if anything changed.
    pub fn replace_anchor(&mut self, from: Id, to: Id) -> bool {
        let mut changed = false;
        if self.anchor1 == from {
            self.anchor1 = to;
            changed = true;
        }
        if self.anchor2 == from {
            self.anchor2 = to;
            changed = true;
        }
        changed
    }
}

/// The collections an element can belong to.
///
/// The serialized tags (`"anchors"`, `"propagators"`) match the collection
/// names the host uses for dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Anchors,
    Propagators,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Anchors => f.write_str("anchors"),
            Self::Propagators => f.write_str("propagators"),
        }
    }
}

/// Error returned when parsing an unrecognized element kind tag
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown element kind `{0}`")]
pub struct UnknownElementKind(pub String);

impl FromStr for ElementKind {
    type Err = UnknownElementKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "anchors" | "anchor" => Ok(Self::Anchors),
            "propagators" | "propagator" => Ok(Self::Propagators),
            other => Err(UnknownElementKind(other.to_string())),
        }
    }
}

/// A typed reference to one element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementRef {
    pub kind: ElementKind,
    pub id: Id,
}

impl ElementRef {
    pub fn new(kind: ElementKind, id: Id) -> Self {
        Self { kind, id }
    }

    pub fn anchor(id: Id) -> Self {
        Self::new(ElementKind::Anchors, id)
    }

    pub fn propagator(id: Id) -> Self {
        Self::new(ElementKind::Propagators, id)
    }
}

impl fmt::Display for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind, self.id)
    }
}

/// The set of highlighted elements, per collection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    anchors: IndexSet<Id>,
    propagators: IndexSet<Id>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// A selection holding exactly one element
    pub fn single(element: ElementRef) -> Self {
        let mut selection = Self::new();
        selection.insert(element);
        selection
    }

    pub fn ids(&self, kind: ElementKind) -> &IndexSet<Id> {
        match kind {
            ElementKind::Anchors => &self.anchors,
            ElementKind::Propagators => &self.propagators,
        }
    }

    fn ids_mut(&mut self, kind: ElementKind) -> &mut IndexSet<Id> {
        match kind {
            ElementKind::Anchors => &mut self.anchors,
            ElementKind::Propagators => &mut self.propagators,
        }
    }

    pub fn anchors(&self) -> &IndexSet<Id> {
        &self.anchors
    }

    pub fn propagators(&self) -> &IndexSet<Id> {
        &self.propagators
    }

    pub fn contains(&self, element: ElementRef) -> bool {
        self.ids(element.kind).contains(&element.id)
    }

    /// Adds an element; returns false if it was already selected
    pub fn insert(&mut self, element: ElementRef) -> bool {
        self.ids_mut(element.kind).insert(element.id)
    }

    /// Removes an element; returns true if it was selected
    pub fn remove(&mut self, element: ElementRef) -> bool {
        self.ids_mut(element.kind).shift_remove(&element.id)
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty() && self.propagators.is_empty()
    }

    pub fn len(&self) -> usize {
        self.anchors.len() + self.propagators.len()
    }

    pub fn clear(&mut self) {
        self.anchors.clear();
        self.propagators.clear();
    }

    /// Iterates over all selected elements, anchors first
    pub fn iter(&self) -> impl Iterator<Item = ElementRef> + '_ {
        self.anchors
            .iter()
            .map(|id| ElementRef::anchor(*id))
            .chain(self.propagators.iter().map(|id| ElementRef::propagator(*id)))
    }
}

impl FromIterator<ElementRef> for Selection {
    fn from_iter<T: IntoIterator<Item = ElementRef>>(iter: T) -> Self {
        let mut selection = Self::new();
        for element in iter {
            selection.insert(element);
        }
        selection
    }
}

/// All anchors, propagators and the selection of one diagram
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Elements {
    anchors: IndexMap<Id, Anchor>,
    propagators: IndexMap<Id, Propagator>,
    selection: Selection,
}

impl Elements {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn anchors(&self) -> &IndexMap<Id, Anchor> {
        &self.anchors
    }

    pub fn propagators(&self) -> &IndexMap<Id, Propagator> {
        &self.propagators
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut Selection {
        &mut self.selection
    }

    pub fn set_selection(&mut self, selection: Selection) {
        self.selection = selection;
    }

    pub fn anchor(&self, id: Id) -> Option<&Anchor> {
        self.anchors.get(&id)
    }

    pub fn anchor_mut(&mut self, id: Id) -> Option<&mut Anchor> {
        self.anchors.get_mut(&id)
    }

    pub fn propagator(&self, id: Id) -> Option<&Propagator> {
        self.propagators.get(&id)
    }

    pub fn propagator_mut(&mut self, id: Id) -> Option<&mut Propagator> {
        self.propagators.get_mut(&id)
    }

    /// Returns true if the referenced element exists in its collection
    pub fn contains(&self, element: ElementRef) -> bool {
        match element.kind {
            ElementKind::Anchors => self.anchors.contains_key(&element.id),
            ElementKind::Propagators => self.propagators.contains_key(&element.id),
        }
    }

    /// Inserts or replaces an anchor, returning the previous one with the same id
    pub fn insert_anchor(&mut self, anchor: Anchor) -> Option<Anchor> {
        self.anchors.insert(anchor.id(), anchor)
    }

    /// Inserts or replaces a propagator, returning the previous one with the same id
    pub fn insert_propagator(&mut self, propagator: Propagator) -> Option<Propagator> {
        self.propagators.insert(propagator.id(), propagator)
    }

    /// Removes an anchor, keeping the order of the remaining ones
    pub fn remove_anchor(&mut self, id: Id) -> Option<Anchor> {
        self.selection.remove(ElementRef::anchor(id));
        self.anchors.shift_remove(&id)
    }

    /// Removes a propagator, keeping the order of the remaining ones
    pub fn remove_propagator(&mut self, id: Id) -> Option<Propagator> {
        self.selection.remove(ElementRef::propagator(id));
        self.propagators.shift_remove(&id)
    }

    /// Iterates over propagators with `anchor` as one of their endpoints
    pub fn propagators_referencing(&self, anchor: Id) -> impl Iterator<Item = &Propagator> + '_ {
        self.propagators
            .values()
            .filter(move |propagator| propagator.references(anchor))
    }

    /// Positions of both endpoints of a propagator, if it and its anchors exist
    pub fn endpoints(&self, propagator: Id) -> Option<(Point, Point)> {
        let propagator = self.propagators.get(&propagator)?;
        let a = self.anchors.get(&propagator.anchor1())?;
        let b = self.anchors.get(&propagator.anchor2())?;
        Some((a.position(), b.position()))
    }

    /// Iterates over propagators paired with their endpoint positions.
    ///
    /// Propagators with a dangling endpoint are skipped.
    pub fn propagators_with_location(
        &self,
    ) -> impl Iterator<Item = (&Propagator, Point, Point)> + '_ {
        self.propagators.values().filter_map(|propagator| {
            let (a, b) = self.endpoints(propagator.id())?;
            Some((propagator, a, b))
        })
    }
}
