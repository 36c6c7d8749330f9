//! Feyndraw Core Types and Definitions
//!
//! This crate provides the foundational types for editing Feynman diagrams.
//! It includes:
//!
//! - **Identifiers**: String-interned element identifiers ([`identifier::Id`])
//! - **Geometry**: Points, bounds and hit tests ([`geometry`] module)
//! - **Grid**: Grid rounding, drag stickiness and coordinate mapping ([`grid`] module)
//! - **Elements**: Anchors, propagators and the selection ([`element`] module)
//! - **View**: The read-only view context ([`view::ViewContext`])

pub mod element;
pub mod geometry;
pub mod grid;
pub mod identifier;
pub mod view;
