// Copyright 2026 the Facsimile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Item tree data model.
//!
//! An *item* is a node in a scene graph owned by a [`Project`]. Each item has:
//!
//! - A handle ([`ItemId`]) — a generational handle that becomes stale when
//!   the item is removed, preventing use-after-free bugs at the API level.
//!   Handle equality is object identity.
//! - A serial number ([`ItemSerial`]) that is never reused.
//! - A variant ([`ItemKind`]) that decides which facets the item carries.
//! - Topology — parent, first-child, and sibling links forming an ordered tree.
//! - **Universal attributes**: opacity, [`ItemFlags`], blend mode and name.
//! - **Facets**, present only for the kinds that carry them: transform
//!   matrix, path geometry, clipping, symbol reference, text, anchor point
//!   and [`Style`](crate::style::Style).
//!
//! Items are stored in struct-of-arrays layout with index-based handles.
//!
//! # Cloning
//!
//! [`Project::clone_item`] produces a reference-distinct, value-equal copy:
//! every owned resource (matrix, fill and stroke paints, children) is copied
//! into a new slot, while shared resources (the symbol definition and the
//! owning project) are referenced, not copied.

mod facet;
mod id;
mod kind;
mod project;
mod traverse;

pub use facet::{CharacterStyle, Justification, ParagraphStyle, PathFacet, Segment, TextFacet};
pub use id::{INVALID, ItemId, ItemSerial, ProjectId, SymbolId};
pub use kind::ItemKind;
pub use project::{ItemFlags, Project};
pub use traverse::Children;
