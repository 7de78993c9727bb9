// Copyright 2026 the Facsimile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree traversal utilities.

use super::id::{INVALID, ItemId};
use super::project::Project;

/// An iterator over the direct children of an item, in order.
///
/// Created by [`Project::children`].
#[derive(Debug)]
pub struct Children<'a> {
    project: &'a Project,
    current: u32,
}

impl<'a> Children<'a> {
    pub(crate) fn new(project: &'a Project, first: u32) -> Self {
        Self {
            project,
            current: first,
        }
    }
}

impl Iterator for Children<'_> {
    type Item = ItemId;

    fn next(&mut self) -> Option<ItemId> {
        if self.current == INVALID {
            return None;
        }
        let idx = self.current;
        self.current = self.project.next_sibling[idx as usize];
        Some(self.project.handle(idx))
    }
}

impl core::iter::FusedIterator for Children<'_> {}
