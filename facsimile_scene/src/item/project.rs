// Copyright 2026 the Facsimile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Struct-of-arrays item storage with allocation, topology, and property management.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Affine, Point};

use super::facet::{PathFacet, Segment, TextFacet};
use super::id::{INVALID, ItemId, ItemSerial, ProjectId, SymbolId};
use super::kind::ItemKind;
use super::traverse::Children;
use crate::paint::Paint;
use crate::style::{BlendMode, Style};
use crate::table::{MatrixKey, MatrixTable, PaintKey, PaintTable};

/// Per-item boolean attributes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ItemFlags {
    /// Whether the item ignores interaction.
    pub locked: bool,
    /// Whether the item is drawn.
    pub visible: bool,
    /// Whether the item's outline is closed.
    pub closed: bool,
    /// Whether the item is selected.
    pub selected: bool,
}

impl Default for ItemFlags {
    fn default() -> Self {
        Self {
            locked: false,
            visible: true,
            closed: false,
            selected: false,
        }
    }
}

/// A symbol definition: an item instanced by placed symbols.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct SymbolDefinition {
    definition: ItemId,
}

/// Struct-of-arrays storage for all items of one project.
///
/// Items are addressed by [`ItemId`] handles. Internally, each item occupies
/// a slot in parallel arrays. Removed items are recycled via a free list,
/// and generation counters prevent stale handle access. Variant-specific
/// attributes live in optional facet columns that are `Some` exactly for
/// the kinds that carry them.
#[derive(Debug)]
pub struct Project {
    id: ProjectId,
    next_serial: u32,

    // -- Topology --
    pub(crate) parent: Vec<u32>,
    pub(crate) first_child: Vec<u32>,
    pub(crate) next_sibling: Vec<u32>,
    pub(crate) prev_sibling: Vec<u32>,

    // -- Identity --
    pub(crate) kind: Vec<ItemKind>,
    pub(crate) serial: Vec<ItemSerial>,
    pub(crate) owner: Vec<ProjectId>,

    // -- Universal attributes --
    pub(crate) opacity: Vec<f64>,
    pub(crate) flags: Vec<ItemFlags>,
    pub(crate) blend_mode: Vec<BlendMode>,
    pub(crate) name: Vec<Option<String>>,
    pub(crate) matrix: Vec<Option<MatrixKey>>,

    // -- Facets --
    pub(crate) path: Vec<Option<PathFacet>>,
    pub(crate) clipped: Vec<Option<bool>>,
    pub(crate) symbol: Vec<Option<SymbolId>>,
    pub(crate) text: Vec<Option<TextFacet>>,
    pub(crate) anchor: Vec<Option<Point>>,
    pub(crate) style: Vec<Option<Style>>,

    // -- Allocation --
    pub(crate) generation: Vec<u32>,
    pub(crate) alive: Vec<bool>,
    pub(crate) free_list: Vec<u32>,
    pub(crate) len: u32,

    // -- Owned resources --
    pub(crate) matrices: MatrixTable,
    pub(crate) paints: PaintTable,
    symbols: Vec<SymbolDefinition>,
}

impl Default for Project {
    fn default() -> Self {
        Self::new()
    }
}

impl Project {
    /// Creates an empty project with a fresh [`ProjectId`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: ProjectId::next(),
            next_serial: 0,
            parent: Vec::new(),
            first_child: Vec::new(),
            next_sibling: Vec::new(),
            prev_sibling: Vec::new(),
            kind: Vec::new(),
            serial: Vec::new(),
            owner: Vec::new(),
            opacity: Vec::new(),
            flags: Vec::new(),
            blend_mode: Vec::new(),
            name: Vec::new(),
            matrix: Vec::new(),
            path: Vec::new(),
            clipped: Vec::new(),
            symbol: Vec::new(),
            text: Vec::new(),
            anchor: Vec::new(),
            style: Vec::new(),
            generation: Vec::new(),
            alive: Vec::new(),
            free_list: Vec::new(),
            len: 0,
            matrices: MatrixTable::default(),
            paints: PaintTable::default(),
            symbols: Vec::new(),
        }
    }

    /// Returns this project's identity.
    #[must_use]
    pub const fn id(&self) -> ProjectId {
        self.id
    }

    // -- Allocation API --

    /// Creates a detached path through the given segments.
    pub fn create_path(&mut self, segments: Vec<Segment>) -> ItemId {
        let id = self.alloc(ItemKind::Path);
        let clockwise = is_clockwise(&segments);
        self.path[id.idx as usize] = Some(PathFacet {
            segments,
            clockwise,
        });
        id
    }

    /// Creates a detached, empty compound path.
    pub fn create_compound_path(&mut self) -> ItemId {
        self.alloc(ItemKind::CompoundPath)
    }

    /// Creates a detached, empty group.
    pub fn create_group(&mut self) -> ItemId {
        self.alloc(ItemKind::Group)
    }

    /// Creates an empty top-level layer.
    pub fn create_layer(&mut self) -> ItemId {
        self.alloc(ItemKind::Layer)
    }

    /// Creates a detached instance of `symbol`.
    ///
    /// # Panics
    ///
    /// Panics if `symbol` was not defined in this project.
    pub fn create_placed_symbol(&mut self, symbol: SymbolId) -> ItemId {
        assert!(
            (symbol.0 as usize) < self.symbols.len(),
            "unknown {symbol:?}"
        );
        let id = self.alloc(ItemKind::PlacedSymbol);
        self.symbol[id.idx as usize] = Some(symbol);
        id
    }

    /// Creates detached text anchored at `point`.
    pub fn create_point_text(&mut self, point: Point, content: impl Into<String>) -> ItemId {
        let id = self.alloc(ItemKind::PointText);
        self.anchor[id.idx as usize] = Some(point);
        if let Some(text) = &mut self.text[id.idx as usize] {
            text.content = content.into();
        }
        id
    }

    /// Turns a detached item into a symbol definition.
    ///
    /// The definition stays in the project but is no longer part of the
    /// drawable tree; placed symbols share it.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or the item has a parent.
    pub fn define_symbol(&mut self, definition: ItemId) -> SymbolId {
        self.validate(definition);
        assert!(
            self.parent[definition.idx as usize] == INVALID,
            "symbol definition must be detached"
        );
        #[expect(
            clippy::cast_possible_truncation,
            reason = "symbol counts are bounded by item counts, which are u32"
        )]
        let symbol = SymbolId(self.symbols.len() as u32);
        self.symbols.push(SymbolDefinition { definition });
        symbol
    }

    /// Returns the definition item of a symbol.
    #[must_use]
    pub fn symbol_definition(&self, symbol: SymbolId) -> Option<ItemId> {
        self.symbols.get(symbol.0 as usize).map(|s| s.definition)
    }

    /// Removes an item and its whole subtree, freeing their slots and
    /// every matrix and paint they own.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or the item is a symbol definition.
    pub fn remove(&mut self, id: ItemId) {
        self.validate(id);
        assert!(
            !self.is_symbol_definition(id),
            "cannot remove a symbol definition"
        );
        if self.parent[id.idx as usize] != INVALID {
            self.unlink_from_parent(id.idx);
        }
        self.free_subtree(id.idx);
    }

    /// Returns whether the given handle refers to a live item.
    #[must_use]
    pub fn is_alive(&self, id: ItemId) -> bool {
        (id.idx < self.len)
            && self.generation[id.idx as usize] == id.generation
            && self.alive[id.idx as usize]
    }

    /// Number of live items, symbol definitions included.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.len as usize - self.free_list.len()
    }

    /// Number of live matrices.
    #[must_use]
    pub fn matrix_count(&self) -> usize {
        self.matrices.len()
    }

    /// Number of live paints.
    #[must_use]
    pub fn paint_count(&self) -> usize {
        self.paints.len()
    }

    // -- Clone API --

    /// Deep-copies an item.
    ///
    /// The copy gets a new slot and serial, its own matrix and paints with
    /// equal values, and recursively copied children in the same order. It
    /// shares the symbol definition and owning project of the original.
    /// The copy is inserted directly above the original in the original's
    /// parent, or left detached when the original has no parent. The
    /// original is not modified.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn clone_item(&mut self, id: ItemId) -> ItemId {
        self.validate(id);
        let copy = self.clone_subtree(id.idx);
        let copy = ItemId {
            idx: copy,
            generation: self.generation[copy as usize],
        };
        if self.parent[id.idx as usize] != INVALID {
            self.insert_above(copy, id);
        }
        copy
    }

    // -- Topology API --

    /// Adds `child` as the last child of `parent`.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale, if `parent` cannot hold children,
    /// if `child` is a layer or a symbol definition, if `child` already has
    /// a parent, or if `child` is `parent` or one of its ancestors.
    pub fn add_child(&mut self, parent: ItemId, child: ItemId) {
        self.validate(parent);
        self.validate(child);
        let p = parent.idx;
        let c = child.idx;
        assert!(
            self.kind[p as usize].has_children(),
            "{} cannot hold children",
            self.kind[p as usize].name()
        );
        self.assert_attachable(child, p);

        self.parent[c as usize] = p;
        self.prev_sibling[c as usize] = INVALID;
        self.next_sibling[c as usize] = INVALID;

        if self.first_child[p as usize] == INVALID {
            self.first_child[p as usize] = c;
        } else {
            // Walk to last child.
            let mut last = self.first_child[p as usize];
            while self.next_sibling[last as usize] != INVALID {
                last = self.next_sibling[last as usize];
            }
            self.next_sibling[last as usize] = c;
            self.prev_sibling[c as usize] = last;
        }
    }

    /// Inserts `item` directly after `target` in `target`'s parent.
    ///
    /// # Panics
    ///
    /// Panics if handles are stale or `target` has no parent, and under the
    /// same conditions on `item` as [`add_child`](Self::add_child) with
    /// `target`'s parent.
    pub fn insert_above(&mut self, item: ItemId, target: ItemId) {
        self.validate(item);
        self.validate(target);
        let c = item.idx;
        let t = target.idx;
        let p = self.parent[t as usize];
        assert!(p != INVALID, "target has no parent");
        self.assert_attachable(item, p);

        let next = self.next_sibling[t as usize];
        self.parent[c as usize] = p;
        self.prev_sibling[c as usize] = t;
        self.next_sibling[c as usize] = next;
        self.next_sibling[t as usize] = c;
        if next != INVALID {
            self.prev_sibling[next as usize] = c;
        }
    }

    /// Detaches `child` from its current parent without freeing it.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or the item has no parent.
    pub fn remove_from_parent(&mut self, child: ItemId) {
        self.validate(child);
        assert!(
            self.parent[child.idx as usize] != INVALID,
            "item has no parent"
        );
        self.unlink_from_parent(child.idx);
    }

    /// Returns the parent of an item, if any.
    #[must_use]
    pub fn parent(&self, id: ItemId) -> Option<ItemId> {
        self.validate(id);
        let p = self.parent[id.idx as usize];
        if p == INVALID { None } else { Some(self.handle(p)) }
    }

    /// Returns an iterator over the direct children of an item.
    ///
    /// Items that cannot hold children yield nothing.
    #[must_use]
    pub fn children(&self, id: ItemId) -> Children<'_> {
        self.validate(id);
        Children::new(self, self.first_child[id.idx as usize])
    }

    /// Returns the top-level items: layers and detached items, excluding
    /// symbol definitions, in slot order.
    #[must_use]
    pub fn roots(&self) -> Vec<ItemId> {
        let mut roots = Vec::new();
        for idx in 0..self.len {
            if self.alive[idx as usize] && self.parent[idx as usize] == INVALID {
                let id = self.handle(idx);
                if !self.is_symbol_definition(id) {
                    roots.push(id);
                }
            }
        }
        roots
    }

    /// Returns the project's layers in slot order.
    #[must_use]
    pub fn layers(&self) -> Vec<ItemId> {
        self.roots()
            .into_iter()
            .filter(|id| self.kind[id.idx as usize].is_layer())
            .collect()
    }

    // -- Identity getters --

    /// Returns the variant of an item.
    #[must_use]
    pub fn kind(&self, id: ItemId) -> ItemKind {
        self.validate(id);
        self.kind[id.idx as usize]
    }

    /// Returns the serial number of an item.
    #[must_use]
    pub fn serial(&self, id: ItemId) -> ItemSerial {
        self.validate(id);
        self.serial[id.idx as usize]
    }

    /// Returns the project that owns an item.
    #[must_use]
    pub fn owner(&self, id: ItemId) -> ProjectId {
        self.validate(id);
        self.owner[id.idx as usize]
    }

    // -- Universal attributes --

    /// Returns the opacity of an item.
    #[must_use]
    pub fn opacity(&self, id: ItemId) -> f64 {
        self.validate(id);
        self.opacity[id.idx as usize]
    }

    /// Sets the opacity of an item.
    pub fn set_opacity(&mut self, id: ItemId, opacity: f64) {
        self.validate(id);
        self.opacity[id.idx as usize] = opacity;
    }

    /// Returns the boolean attributes of an item.
    #[must_use]
    pub fn flags(&self, id: ItemId) -> ItemFlags {
        self.validate(id);
        self.flags[id.idx as usize]
    }

    /// Sets the boolean attributes of an item.
    pub fn set_flags(&mut self, id: ItemId, flags: ItemFlags) {
        self.validate(id);
        self.flags[id.idx as usize] = flags;
    }

    /// Returns the blend mode of an item.
    #[must_use]
    pub fn blend_mode(&self, id: ItemId) -> BlendMode {
        self.validate(id);
        self.blend_mode[id.idx as usize]
    }

    /// Sets the blend mode of an item.
    pub fn set_blend_mode(&mut self, id: ItemId, mode: BlendMode) {
        self.validate(id);
        self.blend_mode[id.idx as usize] = mode;
    }

    /// Returns the name of an item.
    #[must_use]
    pub fn name(&self, id: ItemId) -> Option<&str> {
        self.validate(id);
        self.name[id.idx as usize].as_deref()
    }

    /// Sets or clears the name of an item.
    pub fn set_name(&mut self, id: ItemId, name: Option<String>) {
        self.validate(id);
        self.name[id.idx as usize] = name;
    }

    // -- Matrix --

    /// Returns the key of the item's matrix, if the item owns one.
    #[must_use]
    pub fn matrix_key(&self, id: ItemId) -> Option<MatrixKey> {
        self.validate(id);
        self.matrix[id.idx as usize]
    }

    /// Returns the item's matrix, if it owns one.
    #[must_use]
    pub fn matrix(&self, id: ItemId) -> Option<Affine> {
        self.matrix_key(id)
            .and_then(|key| self.matrices.get(key.0).copied())
    }

    /// Replaces the item's matrix.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or the item owns no matrix.
    pub fn set_matrix(&mut self, id: ItemId, matrix: Affine) {
        *self.matrix_mut(id) = matrix;
    }

    /// Applies `transform` after the item's current matrix.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or the item owns no matrix.
    pub fn transform(&mut self, id: ItemId, transform: Affine) {
        let matrix = self.matrix_mut(id);
        *matrix = transform * *matrix;
    }

    fn matrix_mut(&mut self, id: ItemId) -> &mut Affine {
        self.validate(id);
        let key = self.matrix[id.idx as usize];
        key.and_then(|key| self.matrices.get_mut(key.0))
            .unwrap_or_else(|| panic!("{id:?} owns no matrix"))
    }

    // -- Path facet --

    /// Returns the segments of a path, or `None` for items without their
    /// own segment list.
    #[must_use]
    pub fn segments(&self, id: ItemId) -> Option<&[Segment]> {
        self.validate(id);
        if !self.kind[id.idx as usize].has_segments() {
            return None;
        }
        self.path[id.idx as usize]
            .as_ref()
            .map(|p| p.segments.as_slice())
    }

    /// Replaces the segments of a path and recomputes its orientation.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or the item is not a path.
    pub fn set_segments(&mut self, id: ItemId, segments: Vec<Segment>) {
        self.validate(id);
        assert!(
            self.kind[id.idx as usize].has_segments(),
            "{id:?} has no segments"
        );
        let clockwise = is_clockwise(&segments);
        self.path[id.idx as usize] = Some(PathFacet {
            segments,
            clockwise,
        });
    }

    /// Returns the cached orientation of a path-like item.
    #[must_use]
    pub fn clockwise(&self, id: ItemId) -> Option<bool> {
        self.validate(id);
        self.path[id.idx as usize].as_ref().map(|p| p.clockwise)
    }

    // -- Clip facet --

    /// Returns whether a group clips its children, `None` for non-groups.
    #[must_use]
    pub fn clipped(&self, id: ItemId) -> Option<bool> {
        self.validate(id);
        self.clipped[id.idx as usize]
    }

    /// Sets whether a group clips its children.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or the item is not a group.
    pub fn set_clipped(&mut self, id: ItemId, clipped: bool) {
        self.validate(id);
        let slot = &mut self.clipped[id.idx as usize];
        assert!(slot.is_some(), "{id:?} is not a group");
        *slot = Some(clipped);
    }

    // -- Symbol facet --

    /// Returns the symbol a placed symbol instances.
    #[must_use]
    pub fn symbol(&self, id: ItemId) -> Option<SymbolId> {
        self.validate(id);
        self.symbol[id.idx as usize]
    }

    // -- Text facets --

    /// Returns the text facet of a text item.
    #[must_use]
    pub fn text(&self, id: ItemId) -> Option<&TextFacet> {
        self.validate(id);
        self.text[id.idx as usize].as_ref()
    }

    /// Returns the text facet of a text item for editing.
    #[must_use]
    pub fn text_mut(&mut self, id: ItemId) -> Option<&mut TextFacet> {
        self.validate(id);
        self.text[id.idx as usize].as_mut()
    }

    /// Returns the anchor point of point text.
    #[must_use]
    pub fn point(&self, id: ItemId) -> Option<Point> {
        self.validate(id);
        self.anchor[id.idx as usize]
    }

    /// Moves the anchor point of point text.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or the item is not point text.
    pub fn set_point(&mut self, id: ItemId, point: Point) {
        self.validate(id);
        let slot = &mut self.anchor[id.idx as usize];
        assert!(slot.is_some(), "{id:?} is not point text");
        *slot = Some(point);
    }

    // -- Style facet --

    /// Returns the style facet of an item.
    #[must_use]
    pub fn style(&self, id: ItemId) -> Option<&Style> {
        self.validate(id);
        self.style[id.idx as usize].as_ref()
    }

    /// Returns the style facet of an item for editing.
    ///
    /// Paints are not reachable through this reference; use
    /// [`set_fill_color`](Self::set_fill_color) and
    /// [`set_stroke_color`](Self::set_stroke_color).
    #[must_use]
    pub fn style_mut(&mut self, id: ItemId) -> Option<&mut Style> {
        self.validate(id);
        self.style[id.idx as usize].as_mut()
    }

    /// Returns the paint behind a key.
    #[must_use]
    pub fn paint(&self, key: PaintKey) -> Option<&Paint> {
        self.paints.get(key.0)
    }

    /// Returns the fill paint of an item.
    #[must_use]
    pub fn fill_color(&self, id: ItemId) -> Option<&Paint> {
        self.style(id)
            .and_then(|s| s.fill_color)
            .and_then(|key| self.paint(key))
    }

    /// Returns the stroke paint of an item.
    #[must_use]
    pub fn stroke_color(&self, id: ItemId) -> Option<&Paint> {
        self.style(id)
            .and_then(|s| s.stroke_color)
            .and_then(|key| self.paint(key))
    }

    /// Sets or clears the fill paint of an item.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or the item has no style facet.
    pub fn set_fill_color(&mut self, id: ItemId, paint: Option<Paint>) {
        self.replace_paint(id, paint, |s| &mut s.fill_color);
    }

    /// Sets or clears the stroke paint of an item.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or the item has no style facet.
    pub fn set_stroke_color(&mut self, id: ItemId, paint: Option<Paint>) {
        self.replace_paint(id, paint, |s| &mut s.stroke_color);
    }

    fn replace_paint(
        &mut self,
        id: ItemId,
        paint: Option<Paint>,
        field: fn(&mut Style) -> &mut Option<PaintKey>,
    ) {
        self.validate(id);
        assert!(
            self.style[id.idx as usize].is_some(),
            "{id:?} has no style"
        );
        let key = paint.map(|p| PaintKey(self.paints.insert(p)));
        let old = self.style[id.idx as usize]
            .as_mut()
            .and_then(|style| core::mem::replace(field(style), key));
        if let Some(old) = old {
            self.paints.remove(old.0);
        }
    }

    // -- Internal helpers --

    /// Panics if the handle is stale.
    fn validate(&self, id: ItemId) {
        assert!(
            id.idx < self.len && self.generation[id.idx as usize] == id.generation,
            "stale ItemId: {id:?} (current gen: {})",
            if id.idx < self.len {
                self.generation[id.idx as usize]
            } else {
                u32::MAX
            }
        );
    }

    fn is_symbol_definition(&self, id: ItemId) -> bool {
        self.symbols.iter().any(|s| s.definition == id)
    }

    /// Whether `ancestor` is `idx` or lies on its parent chain.
    fn is_ancestor_or_self(&self, ancestor: u32, mut idx: u32) -> bool {
        while idx != INVALID {
            if idx == ancestor {
                return true;
            }
            idx = self.parent[idx as usize];
        }
        false
    }

    /// Panics unless `child` may be linked under the slot `parent`.
    fn assert_attachable(&self, child: ItemId, parent: u32) {
        let c = child.idx;
        assert!(
            !self.kind[c as usize].is_layer(),
            "layers are owned by the project"
        );
        assert!(
            !self.is_symbol_definition(child),
            "symbol definitions are not part of the tree"
        );
        assert!(
            self.parent[c as usize] == INVALID,
            "child already has a parent"
        );
        assert!(
            !self.is_ancestor_or_self(c, parent),
            "item cannot be nested inside itself"
        );
    }

    pub(crate) fn handle(&self, idx: u32) -> ItemId {
        ItemId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    fn next_serial(&mut self) -> ItemSerial {
        let serial = ItemSerial(self.next_serial);
        self.next_serial += 1;
        serial
    }

    /// Allocates a detached item of `kind` with default attributes and the
    /// facets its kind carries.
    fn alloc(&mut self, kind: ItemKind) -> ItemId {
        let serial = self.next_serial();
        let matrix = kind
            .has_matrix()
            .then(|| MatrixKey(self.matrices.insert(Affine::IDENTITY)));
        let path = kind.is_path_like().then(PathFacet::default);
        let clipped = kind.is_group().then_some(false);
        let text = kind.is_text_item().then(TextFacet::default);
        let style = kind.has_style().then(Style::default);

        let idx = if let Some(idx) = self.free_list.pop() {
            // Reuse a freed slot.
            let i = idx as usize;
            self.generation[i] += 1;
            self.alive[i] = true;
            self.parent[i] = INVALID;
            self.first_child[i] = INVALID;
            self.next_sibling[i] = INVALID;
            self.prev_sibling[i] = INVALID;
            self.kind[i] = kind;
            self.serial[i] = serial;
            self.owner[i] = self.id;
            self.opacity[i] = 1.0;
            self.flags[i] = ItemFlags::default();
            self.blend_mode[i] = BlendMode::Normal;
            self.name[i] = None;
            self.matrix[i] = matrix;
            self.path[i] = path;
            self.clipped[i] = clipped;
            self.symbol[i] = None;
            self.text[i] = text;
            self.anchor[i] = None;
            self.style[i] = style;
            idx
        } else {
            // Allocate a new slot.
            let idx = self.len;
            self.len += 1;
            self.parent.push(INVALID);
            self.first_child.push(INVALID);
            self.next_sibling.push(INVALID);
            self.prev_sibling.push(INVALID);
            self.kind.push(kind);
            self.serial.push(serial);
            self.owner.push(self.id);
            self.opacity.push(1.0);
            self.flags.push(ItemFlags::default());
            self.blend_mode.push(BlendMode::Normal);
            self.name.push(None);
            self.matrix.push(matrix);
            self.path.push(path);
            self.clipped.push(clipped);
            self.symbol.push(None);
            self.text.push(text);
            self.anchor.push(None);
            self.style.push(style);
            self.generation.push(0);
            self.alive.push(true);
            idx
        };

        self.handle(idx)
    }

    /// Copies the item at `idx` and its subtree into fresh slots, returning
    /// the detached copy's slot.
    fn clone_subtree(&mut self, idx: u32) -> u32 {
        let i = idx as usize;
        let copy = self.alloc(self.kind[i]).idx;
        let c = copy as usize;

        self.owner[c] = self.owner[i];
        self.opacity[c] = self.opacity[i];
        self.flags[c] = self.flags[i];
        self.blend_mode[c] = self.blend_mode[i];
        self.name[c] = self.name[i].clone();
        if let (Some(src), Some(dst)) = (self.matrix[i], self.matrix[c])
            && let Some(m) = self.matrices.get(src.0).copied()
            && let Some(slot) = self.matrices.get_mut(dst.0)
        {
            *slot = m;
        }
        self.path[c] = self.path[i].clone();
        self.clipped[c] = self.clipped[i];
        self.symbol[c] = self.symbol[i];
        self.text[c] = self.text[i].clone();
        self.anchor[c] = self.anchor[i];
        let style = self.style[i].clone().map(|mut style| {
            style.fill_color = self.copy_paint(style.fill_color);
            style.stroke_color = self.copy_paint(style.stroke_color);
            style
        });
        self.style[c] = style;

        let mut child = self.first_child[i];
        while child != INVALID {
            let child_copy = self.clone_subtree(child);
            let (parent, child_copy) = (self.handle(copy), self.handle(child_copy));
            self.add_child(parent, child_copy);
            child = self.next_sibling[child as usize];
        }
        copy
    }

    fn copy_paint(&mut self, key: Option<PaintKey>) -> Option<PaintKey> {
        let paint = self.paints.get(key?.0)?.clone();
        Some(PaintKey(self.paints.insert(paint)))
    }

    /// Frees the slot at `idx`, its descendants, and their resources.
    fn free_subtree(&mut self, idx: u32) {
        let mut child = self.first_child[idx as usize];
        while child != INVALID {
            let next = self.next_sibling[child as usize];
            self.free_subtree(child);
            child = next;
        }

        let i = idx as usize;
        if let Some(key) = self.matrix[i].take() {
            self.matrices.remove(key.0);
        }
        if let Some(style) = self.style[i].take() {
            for key in [style.fill_color, style.stroke_color].into_iter().flatten() {
                self.paints.remove(key.0);
            }
        }
        self.path[i] = None;
        self.text[i] = None;
        self.name[i] = None;
        self.parent[i] = INVALID;
        self.first_child[i] = INVALID;
        self.next_sibling[i] = INVALID;
        self.prev_sibling[i] = INVALID;

        // Bump generation so old handles immediately fail validation.
        self.generation[i] += 1;
        self.alive[i] = false;
        self.free_list.push(idx);
    }

    /// Removes `idx` from its parent's child list.
    fn unlink_from_parent(&mut self, idx: u32) {
        let p = self.parent[idx as usize];
        let prev = self.prev_sibling[idx as usize];
        let next = self.next_sibling[idx as usize];

        if prev != INVALID {
            self.next_sibling[prev as usize] = next;
        } else {
            // Was first child.
            self.first_child[p as usize] = next;
        }

        if next != INVALID {
            self.prev_sibling[next as usize] = prev;
        }

        self.parent[idx as usize] = INVALID;
        self.prev_sibling[idx as usize] = INVALID;
        self.next_sibling[idx as usize] = INVALID;
    }
}

/// Orientation of the polygon through the segment anchors, in y-down
/// coordinates. Fewer than three anchors count as clockwise.
fn is_clockwise(segments: &[Segment]) -> bool {
    let mut area = 0.0;
    for (i, a) in segments.iter().enumerate() {
        let b = &segments[(i + 1) % segments.len()];
        area += (b.point.x - a.point.x) * (b.point.y + a.point.y);
    }
    area <= 0.0
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use kurbo::Vec2;

    use super::*;
    use crate::color::{Color, RgbColor};

    fn square(p: &mut Project) -> ItemId {
        p.create_path(vec![
            Segment::corner(Point::new(0.0, 0.0)),
            Segment::corner(Point::new(10.0, 0.0)),
            Segment::corner(Point::new(10.0, 10.0)),
            Segment::corner(Point::new(0.0, 10.0)),
        ])
    }

    #[test]
    fn create_and_remove() {
        let mut p = Project::new();
        let id = p.create_group();
        assert!(p.is_alive(id));
        p.remove(id);
        assert!(!p.is_alive(id));
        assert_eq!(p.item_count(), 0);
    }

    #[test]
    fn generation_prevents_stale_access() {
        let mut p = Project::new();
        let id1 = p.create_group();
        p.remove(id1);
        let id2 = p.create_group();
        // id2 reuses the same slot but has a different generation.
        assert!(!p.is_alive(id1));
        assert!(p.is_alive(id2));
        assert_eq!(id1.idx, id2.idx);
        assert_ne!(id1.generation, id2.generation);
    }

    #[test]
    fn serials_are_never_reused() {
        let mut p = Project::new();
        let a = p.create_group();
        let first = p.serial(a);
        p.remove(a);
        let b = p.create_group();
        assert_ne!(p.serial(b), first);
    }

    #[test]
    fn add_child_and_query() {
        let mut p = Project::new();
        let parent = p.create_group();
        let child1 = p.create_group();
        let child2 = square(&mut p);

        p.add_child(parent, child1);
        p.add_child(parent, child2);

        assert_eq!(p.parent(child1), Some(parent));
        let kids: Vec<_> = p.children(parent).collect();
        assert_eq!(kids, vec![child1, child2]);
    }

    #[test]
    fn insert_above_places_after_target() {
        let mut p = Project::new();
        let parent = p.create_group();
        let a = p.create_group();
        let b = p.create_group();
        let c = p.create_group();
        p.add_child(parent, a);
        p.add_child(parent, c);
        p.insert_above(b, a);

        let kids: Vec<_> = p.children(parent).collect();
        assert_eq!(kids, vec![a, b, c]);
    }

    #[test]
    fn remove_from_parent_detaches() {
        let mut p = Project::new();
        let parent = p.create_group();
        let child = p.create_group();
        p.add_child(parent, child);
        p.remove_from_parent(child);
        assert_eq!(p.parent(child), None);
        assert!(p.children(parent).next().is_none());
        assert!(p.is_alive(child));
    }

    #[test]
    fn facets_follow_kind() {
        let mut p = Project::new();
        let path = square(&mut p);
        let group = p.create_group();
        let text = p.create_point_text(Point::new(5.0, 5.0), "hello");

        assert!(p.segments(path).is_some());
        assert!(p.matrix(path).is_none());
        assert!(p.style(path).is_some());

        assert_eq!(p.clipped(group), Some(false));
        assert!(p.style(group).is_none());
        assert_eq!(p.matrix(group), Some(Affine::IDENTITY));

        assert_eq!(p.text(text).map(|t| t.content.as_str()), Some("hello"));
        assert_eq!(p.point(text), Some(Point::new(5.0, 5.0)));
    }

    #[test]
    fn compound_path_has_no_own_segments() {
        let mut p = Project::new();
        let compound = p.create_compound_path();
        assert!(p.segments(compound).is_none());
        assert!(p.clockwise(compound).is_some());
    }

    #[test]
    fn orientation_follows_winding() {
        let mut p = Project::new();
        let cw = square(&mut p);
        let ccw = p.create_path(vec![
            Segment::corner(Point::new(0.0, 0.0)),
            Segment::corner(Point::new(0.0, 10.0)),
            Segment::corner(Point::new(10.0, 10.0)),
            Segment::corner(Point::new(10.0, 0.0)),
        ]);
        assert_ne!(p.clockwise(cw), p.clockwise(ccw));
    }

    #[test]
    fn clone_copies_values_into_new_resources() {
        let mut p = Project::new();
        let path = square(&mut p);
        p.set_fill_color(path, Some(Color::Rgb(RgbColor::new(1.0, 0.0, 0.0)).into()));
        p.set_name(path, Some("square".into()));

        let copy = p.clone_item(path);
        assert_ne!(copy, path);
        assert_ne!(p.serial(copy), p.serial(path));
        assert_eq!(p.name(copy), Some("square"));
        assert_eq!(p.segments(copy), p.segments(path));
        assert_eq!(p.fill_color(copy), p.fill_color(path));
        assert_ne!(
            p.style(copy).and_then(Style::fill_color),
            p.style(path).and_then(Style::fill_color),
            "paint keys must differ"
        );
        assert_eq!(p.paint_count(), 2);
    }

    #[test]
    fn clone_is_inserted_above_original() {
        let mut p = Project::new();
        let layer = p.create_layer();
        let a = p.create_group();
        let b = p.create_group();
        p.add_child(layer, a);
        p.add_child(layer, b);

        let copy = p.clone_item(a);
        let kids: Vec<_> = p.children(layer).collect();
        assert_eq!(kids, vec![a, copy, b]);
    }

    #[test]
    fn clone_of_root_stays_detached() {
        let mut p = Project::new();
        let g = p.create_group();
        let copy = p.clone_item(g);
        assert_eq!(p.parent(copy), None);
        assert_eq!(p.roots(), vec![g, copy]);
    }

    #[test]
    fn clone_copies_children_in_order() {
        let mut p = Project::new();
        let group = p.create_group();
        let a = square(&mut p);
        let b = p.create_point_text(Point::ZERO, "b");
        p.add_child(group, a);
        p.add_child(group, b);

        let copy = p.clone_item(group);
        let kids: Vec<_> = p.children(copy).collect();
        assert_eq!(kids.len(), 2);
        assert_eq!(p.kind(kids[0]), ItemKind::Path);
        assert_eq!(p.kind(kids[1]), ItemKind::PointText);
        assert!(!kids.contains(&a) && !kids.contains(&b));
    }

    #[test]
    fn clone_copies_matrix_into_new_key() {
        let mut p = Project::new();
        let g = p.create_group();
        p.transform(g, Affine::translate(Vec2::new(3.0, 4.0)));
        let copy = p.clone_item(g);
        assert_eq!(p.matrix(copy), p.matrix(g));
        assert_ne!(p.matrix_key(copy), p.matrix_key(g));

        p.transform(copy, Affine::scale(2.0));
        assert_ne!(p.matrix(copy), p.matrix(g), "matrices are independent");
    }

    #[test]
    fn clone_shares_symbol_and_owner() {
        let mut p = Project::new();
        let def = square(&mut p);
        let symbol = p.define_symbol(def);
        let placed = p.create_placed_symbol(symbol);
        let copy = p.clone_item(placed);
        assert_eq!(p.symbol(copy), Some(symbol));
        assert_eq!(p.owner(copy), p.owner(placed));
        assert_eq!(p.owner(copy), p.id());
        assert_eq!(p.symbol_definition(symbol), Some(def));
    }

    #[test]
    fn remove_frees_subtree_resources() {
        let mut p = Project::new();
        let layer = p.create_layer();
        let group = p.create_group();
        let path = square(&mut p);
        p.set_stroke_color(path, Some(Color::Rgb(RgbColor::new(0.0, 0.0, 1.0)).into()));
        p.add_child(layer, group);
        p.add_child(group, path);

        let copy = p.clone_item(group);
        assert_eq!(p.item_count(), 5);
        p.remove(copy);
        assert_eq!(p.item_count(), 3);
        assert_eq!(p.paint_count(), 1);
        assert_eq!(p.matrix_count(), 2);
        assert_eq!(p.children(layer).collect::<Vec<_>>(), vec![group]);
    }

    #[test]
    fn replacing_a_paint_frees_the_old_one() {
        let mut p = Project::new();
        let path = square(&mut p);
        p.set_fill_color(path, Some(Color::Rgb(RgbColor::new(1.0, 0.0, 0.0)).into()));
        p.set_fill_color(path, Some(Color::Rgb(RgbColor::new(0.0, 1.0, 0.0)).into()));
        assert_eq!(p.paint_count(), 1);
        p.set_fill_color(path, None);
        assert_eq!(p.paint_count(), 0);
    }

    #[test]
    fn layers_lists_only_layers() {
        let mut p = Project::new();
        let l1 = p.create_layer();
        let _detached = p.create_group();
        let l2 = p.create_layer();
        assert_eq!(p.layers(), vec![l1, l2]);
    }

    #[test]
    #[should_panic(expected = "cannot remove a symbol definition")]
    fn removing_a_symbol_definition_panics() {
        let mut p = Project::new();
        let def = p.create_group();
        p.define_symbol(def);
        p.remove(def);
    }

    #[test]
    #[should_panic(expected = "path cannot hold children")]
    fn paths_cannot_hold_children() {
        let mut p = Project::new();
        let path = square(&mut p);
        let g = p.create_group();
        p.add_child(path, g);
    }

    #[test]
    #[should_panic(expected = "layers are owned by the project")]
    fn layers_cannot_be_nested() {
        let mut p = Project::new();
        let outer = p.create_group();
        let layer = p.create_layer();
        p.add_child(outer, layer);
    }

    #[test]
    #[should_panic(expected = "layers are owned by the project")]
    fn layers_cannot_be_inserted_above_children() {
        let mut p = Project::new();
        let g = p.create_group();
        let a = p.create_group();
        p.add_child(g, a);
        let layer = p.create_layer();
        p.insert_above(layer, a);
    }

    #[test]
    #[should_panic(expected = "item cannot be nested inside itself")]
    fn item_cannot_be_its_own_child() {
        let mut p = Project::new();
        let g = p.create_group();
        p.add_child(g, g);
    }

    #[test]
    #[should_panic(expected = "item cannot be nested inside itself")]
    fn ancestor_cannot_become_a_child() {
        let mut p = Project::new();
        let g = p.create_group();
        let h = p.create_group();
        let k = p.create_group();
        p.add_child(g, h);
        p.add_child(h, k);
        p.add_child(k, g);
    }

    #[test]
    #[should_panic(expected = "item cannot be nested inside itself")]
    fn ancestor_cannot_be_inserted_among_descendants() {
        let mut p = Project::new();
        let g = p.create_group();
        let h = p.create_group();
        let a = p.create_group();
        p.add_child(g, h);
        p.add_child(h, a);
        p.insert_above(g, a);
    }

    #[test]
    #[should_panic(expected = "symbol definitions are not part of the tree")]
    fn symbol_definition_cannot_be_added() {
        let mut p = Project::new();
        let g = p.create_group();
        let def = square(&mut p);
        p.define_symbol(def);
        p.add_child(g, def);
    }

    #[test]
    #[should_panic(expected = "symbol definitions are not part of the tree")]
    fn symbol_definition_cannot_be_inserted() {
        let mut p = Project::new();
        let g = p.create_group();
        let a = p.create_group();
        p.add_child(g, a);
        let def = square(&mut p);
        p.define_symbol(def);
        p.insert_above(def, a);
    }

    #[test]
    fn roots_skip_freed_slots_and_definitions() {
        let mut p = Project::new();
        let a = p.create_group();
        let b = p.create_group();
        let c = p.create_layer();
        let def = square(&mut p);
        p.define_symbol(def);
        p.remove(b);
        assert_eq!(p.roots(), vec![a, c]);
        assert!(p.is_alive(def));
        let d = p.create_group();
        assert_eq!(p.roots(), vec![a, d, c]);
    }

    #[test]
    #[should_panic(expected = "stale ItemId")]
    fn removed_handle_panics_on_get() {
        let mut p = Project::new();
        let id = p.create_group();
        p.remove(id);
        let _ = p.opacity(id);
    }

    #[test]
    #[should_panic(expected = "owns no matrix")]
    fn paths_have_no_matrix() {
        let mut p = Project::new();
        let path = square(&mut p);
        p.set_matrix(path, Affine::scale(2.0));
    }
}
