// Copyright 2026 the Facsimile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Generational value tables for per-item resources.
//!
//! Matrices and paints are owned exclusively by one item, but they live in
//! project-level tables rather than inline in the item arrays. That keeps
//! their identity observable: an item and its copy hold *different* keys to
//! *equal* values, and a copy that accidentally aliased its original's
//! resource would hold the *same* key.

use alloc::vec::Vec;
use core::fmt;

use kurbo::Affine;

use crate::paint::Paint;

/// A raw generational key into a [`Table`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct RawKey {
    idx: u32,
    generation: u32,
}

/// Handle to a transform matrix owned by an item.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct MatrixKey(pub(crate) RawKey);

/// Handle to a fill or stroke paint owned by an item.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PaintKey(pub(crate) RawKey);

impl fmt::Debug for MatrixKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MatrixKey({}@gen{})", self.0.idx, self.0.generation)
    }
}

impl fmt::Debug for PaintKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PaintKey({}@gen{})", self.0.idx, self.0.generation)
    }
}

/// Slot storage with a free list and generation counters.
#[derive(Debug)]
pub(crate) struct Table<T> {
    values: Vec<Option<T>>,
    generation: Vec<u32>,
    free_list: Vec<u32>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            values: Vec::new(),
            generation: Vec::new(),
            free_list: Vec::new(),
        }
    }
}

impl<T> Table<T> {
    pub(crate) fn insert(&mut self, value: T) -> RawKey {
        if let Some(idx) = self.free_list.pop() {
            self.generation[idx as usize] += 1;
            self.values[idx as usize] = Some(value);
            RawKey {
                idx,
                generation: self.generation[idx as usize],
            }
        } else {
            #[expect(
                clippy::cast_possible_truncation,
                reason = "slot counts are bounded by item counts, which are u32"
            )]
            let idx = self.values.len() as u32;
            self.values.push(Some(value));
            self.generation.push(0);
            RawKey { idx, generation: 0 }
        }
    }

    /// Frees the slot behind `key`. Stale keys are ignored.
    pub(crate) fn remove(&mut self, key: RawKey) -> Option<T> {
        if !self.is_live(key) {
            return None;
        }
        self.free_list.push(key.idx);
        self.values[key.idx as usize].take()
    }

    pub(crate) fn get(&self, key: RawKey) -> Option<&T> {
        if self.is_live(key) {
            self.values[key.idx as usize].as_ref()
        } else {
            None
        }
    }

    pub(crate) fn get_mut(&mut self, key: RawKey) -> Option<&mut T> {
        if self.is_live(key) {
            self.values[key.idx as usize].as_mut()
        } else {
            None
        }
    }

    /// Number of live values.
    pub(crate) fn len(&self) -> usize {
        self.values.len() - self.free_list.len()
    }

    fn is_live(&self, key: RawKey) -> bool {
        (key.idx as usize) < self.values.len()
            && self.generation[key.idx as usize] == key.generation
            && self.values[key.idx as usize].is_some()
    }
}

pub(crate) type MatrixTable = Table<Affine>;
pub(crate) type PaintTable = Table<Paint>;
