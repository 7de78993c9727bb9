// Copyright 2026 the Facsimile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Item variants and the capabilities each one carries.

/// The variant of an item.
///
/// Variants form a small hierarchy: a [`Layer`](Self::Layer) is also a
/// group, a [`CompoundPath`](Self::CompoundPath) is also path-like, and
/// [`PointText`](Self::PointText) is a text item. The `is_*` queries answer
/// for the whole hierarchy, so checks keyed on them are cumulative.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ItemKind {
    /// A single path made of segments.
    Path,
    /// A path made of child paths.
    CompoundPath,
    /// A container of items.
    Group,
    /// A top-level group owned directly by a project.
    Layer,
    /// An instance of a shared symbol definition.
    PlacedSymbol,
    /// Text anchored at a point.
    PointText,
}

impl ItemKind {
    /// Paths and compound paths.
    #[must_use]
    pub const fn is_path_like(self) -> bool {
        matches!(self, Self::Path | Self::CompoundPath)
    }

    /// Groups and layers.
    #[must_use]
    pub const fn is_group(self) -> bool {
        matches!(self, Self::Group | Self::Layer)
    }

    /// Layers only.
    #[must_use]
    pub const fn is_layer(self) -> bool {
        matches!(self, Self::Layer)
    }

    /// Any text item.
    #[must_use]
    pub const fn is_text_item(self) -> bool {
        matches!(self, Self::PointText)
    }

    /// Whether items of this kind hold an ordered child list.
    #[must_use]
    pub const fn has_children(self) -> bool {
        matches!(self, Self::CompoundPath | Self::Group | Self::Layer)
    }

    /// Whether items of this kind own a transform matrix.
    #[must_use]
    pub const fn has_matrix(self) -> bool {
        matches!(
            self,
            Self::Group | Self::Layer | Self::PlacedSymbol | Self::PointText
        )
    }

    /// Whether items of this kind carry a style facet.
    #[must_use]
    pub const fn has_style(self) -> bool {
        !self.is_group()
    }

    /// Whether items of this kind hold their own segment list.
    #[must_use]
    pub const fn has_segments(self) -> bool {
        matches!(self, Self::Path)
    }

    /// A short lowercase name for diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Path => "path",
            Self::CompoundPath => "compound-path",
            Self::Group => "group",
            Self::Layer => "layer",
            Self::PlacedSymbol => "placed-symbol",
            Self::PointText => "point-text",
        }
    }
}
