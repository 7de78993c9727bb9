// Copyright 2026 the Facsimile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Item, symbol and project identity types.

use core::fmt;
use core::sync::atomic::{AtomicU32, Ordering};

/// Sentinel value indicating "no item" in index fields.
pub const INVALID: u32 = u32::MAX;

/// A handle to an item in a [`Project`](super::Project).
///
/// Contains both a slot index and a generation counter so that stale handles
/// can be detected after an item is removed and the slot is reused.
///
/// Two handles compare equal only if they name the same live object, so
/// handle inequality is the reference-divergence test between an item and
/// its copy.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemId {
    /// Slot index into the project's arrays.
    pub(crate) idx: u32,
    /// Generation counter, must match the project's generation for this slot.
    pub(crate) generation: u32,
}

impl ItemId {
    /// Returns the raw slot index (for diagnostics only).
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.idx
    }

    /// Returns the generation counter.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ItemId({}@gen{})", self.idx, self.generation)
    }
}

/// The user-visible serial number of an item.
///
/// Serials are handed out from a per-project counter at creation and at
/// clone time. Unlike slot indices they are never reused.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemSerial(pub u32);

impl fmt::Debug for ItemSerial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ItemSerial({})", self.0)
    }
}

/// A reference to a symbol definition owned by a project.
///
/// Placed symbols share their definition: cloning a placed symbol copies
/// the `SymbolId`, never the definition.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymbolId(pub u32);

impl fmt::Debug for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SymbolId({})", self.0)
    }
}

/// Identifies a [`Project`](super::Project).
///
/// Ids are unique for the lifetime of the process.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProjectId(pub u32);

static NEXT_PROJECT: AtomicU32 = AtomicU32::new(0);

impl ProjectId {
    pub(crate) fn next() -> Self {
        Self(NEXT_PROJECT.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Debug for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ProjectId({})", self.0)
    }
}
