// Copyright 2026 the Facsimile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene-graph items, paints and canonical serialization.
//!
//! `facsimile_scene` is the data model that `facsimile_verify` checks clones
//! against. It is `no_std` compatible (with `alloc`) and stores items in a
//! struct-of-arrays [`Project`](item::Project) addressed by generational
//! handles.
//!
//! **[`item`]** — The item tree: variants, facets, topology, and the
//! clone and remove operations.
//!
//! **[`color`]** — RGB, HSB and gray colors with normalization between
//! representations and hex parsing.
//!
//! **[`paint`]** — Solid and gradient paints for fills and strokes.
//!
//! **[`style`]** — Stroke and compositing attributes.
//!
//! **[`canonical`]** — The [`Canonical`](canonical::Canonical) string forms
//! used for structural comparison.
//!
//! Matrices and paints are owned by exactly one item but stored in
//! project-level tables behind [`MatrixKey`] and [`PaintKey`], so whether a
//! copy shares or owns them is observable.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod canonical;
pub mod color;
pub mod item;
pub mod paint;
pub mod style;
mod table;

pub use table::{MatrixKey, PaintKey};
