// Copyright 2026 the Facsimile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recursive comparison of an item and its copy.
//!
//! [`Checker::compare_items`] walks an original/copy pair depth-first,
//! pre-order, in a fixed sequence of stages:
//!
//! 1. **Identity**: handles and serials must differ.
//! 2. **Universal attributes**: opacity, flags, blend mode and name must be
//!    equal.
//! 3. **Matrix**: if the original owns one, the copy must own a different
//!    one that serializes identically.
//! 4. **Segments**: if the copy exposes segments, both lists must serialize
//!    identically.
//! 5. **Facets**: each facet present on the original adds its checks. These
//!    are cumulative, so a layer gets both the group and the layer checks.
//! 6. **Style**: paints must be distinct but equal, other style values are
//!    compared when set on the original.
//! 7. **Children**: counts must match, then each pair is compared in order.
//!
//! No stage stops the walk. Every check produces its own record, so one
//! run reports every divergence in the tree.

use facsimile_scene::PaintKey;
use facsimile_scene::canonical::Canonical;
use facsimile_scene::item::{ItemId, Project};
use facsimile_scene::paint::Paint;

use crate::check;
use crate::checker::Checker;
use crate::config::GradientPolicy;
use crate::sink::ItemVisit;

impl Checker<'_> {
    /// Compares `original` against its copy `clone`, recursing into
    /// children.
    ///
    /// Records are made with the copy's value as `actual` and the original's
    /// as `expected`.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale. Cyclic trees are not detected.
    pub fn compare_items(&mut self, project: &Project, original: ItemId, clone: ItemId) {
        let kind = project.kind(original);
        self.visit(|path| ItemVisit {
            path: path.into(),
            kind,
            original: project.serial(original),
            clone: project.serial(clone),
        });

        self.compare_identity(project, original, clone);
        self.compare_universal(project, original, clone);
        self.compare_matrix(project, original, clone);
        if let Some(segments) = project.segments(clone) {
            self.equals(
                Some(segments.canonical()),
                project.segments(original).map(|s| s.canonical()),
                "segments",
            );
        }
        self.compare_facets(project, original, clone);
        self.compare_style(project, original, clone);
        self.compare_children(project, original, clone);
    }

    fn compare_identity(&mut self, project: &Project, original: ItemId, clone: ItemId) {
        check!(self, original != clone);
        check!(self, project.serial(original) != project.serial(clone));
    }

    fn compare_universal(&mut self, project: &Project, original: ItemId, clone: ItemId) {
        let (a, b) = (project.flags(clone), project.flags(original));
        self.equals(project.opacity(clone), project.opacity(original), "opacity");
        self.equals(a.locked, b.locked, "locked");
        self.equals(a.visible, b.visible, "visible");
        self.equals(
            project.blend_mode(clone),
            project.blend_mode(original),
            "blend_mode",
        );
        self.equals(project.name(clone), project.name(original), "name");
        self.equals(a.closed, b.closed, "closed");
        self.equals(a.selected, b.selected, "selected");
    }

    fn compare_matrix(&mut self, project: &Project, original: ItemId, clone: ItemId) {
        let Some(key) = project.matrix_key(original) else {
            return;
        };
        self.equals(
            project.matrix_key(clone) != Some(key),
            true,
            "matrix is not shared",
        );
        self.equals(
            project.matrix(clone).map(|m| m.canonical()),
            project.matrix(original).map(|m| m.canonical()),
            "matrix",
        );
    }

    fn compare_facets(&mut self, project: &Project, original: ItemId, clone: ItemId) {
        if let Some(clockwise) = project.clockwise(original) {
            self.equals(project.clockwise(clone), Some(clockwise), "clockwise");
        }
        if let Some(clipped) = project.clipped(original) {
            self.equals(project.clipped(clone), Some(clipped), "clipped");
        }
        if project.kind(original).is_layer() {
            self.equals(project.owner(clone), project.owner(original), "project is shared");
        }
        if let Some(symbol) = project.symbol(original) {
            self.equals(project.symbol(clone), Some(symbol), "symbol is shared");
        }
        if let Some(text) = project.text(original) {
            let copy = project.text(clone);
            self.equals(
                copy.map(|t| t.content.as_str()),
                Some(text.content.as_str()),
                "content",
            );
            self.equals(
                copy.map(|t| t.character_style.font_size),
                Some(text.character_style.font_size),
                "font_size",
            );
            self.equals(
                copy.map(|t| t.character_style.font.as_str()),
                Some(text.character_style.font.as_str()),
                "font",
            );
            self.equals(
                copy.map(|t| t.paragraph_style.justification),
                Some(text.paragraph_style.justification),
                "justification",
            );
        }
        if let Some(point) = project.point(original) {
            self.equals(
                project.point(clone).map(|p| p.canonical()),
                Some(point.canonical()),
                "point",
            );
        }
    }

    fn compare_style(&mut self, project: &Project, original: ItemId, clone: ItemId) {
        let Some(style) = project.style(original) else {
            return;
        };
        let copy = project.style(clone);

        self.compare_paint(
            project,
            style.fill_color(),
            copy.and_then(|s| s.fill_color()),
            "fill_color",
        );
        self.compare_paint(
            project,
            style.stroke_color(),
            copy.and_then(|s| s.stroke_color()),
            "stroke_color",
        );

        if style.stroke_cap.is_some() {
            self.equals(copy.map(|s| s.stroke_cap), Some(style.stroke_cap), "stroke_cap");
        }
        if style.stroke_join.is_some() {
            self.equals(
                copy.map(|s| s.stroke_join),
                Some(style.stroke_join),
                "stroke_join",
            );
        }
        if truthy(style.dash_offset) {
            self.equals(
                copy.map(|s| s.dash_offset),
                Some(style.dash_offset),
                "dash_offset",
            );
        }
        if truthy(style.miter_limit) {
            self.equals(
                copy.map(|s| s.miter_limit),
                Some(style.miter_limit),
                "miter_limit",
            );
        }
        if style.stroke_overprint {
            self.equals(
                copy.map(|s| s.stroke_overprint),
                Some(true),
                "stroke_overprint",
            );
        }
        if style.fill_overprint {
            self.equals(copy.map(|s| s.fill_overprint), Some(true), "fill_overprint");
        }
        if let Some(dashes) = &style.dash_array {
            self.equals(
                copy.and_then(|s| s.dash_array.as_ref()).map(|d| d.canonical()),
                Some(dashes.canonical()),
                "dash_array",
            );
        }
    }

    fn compare_paint(
        &mut self,
        project: &Project,
        original: Option<PaintKey>,
        clone: Option<PaintKey>,
        label: &str,
    ) {
        let Some(key) = original else {
            return;
        };
        self.equals(clone != Some(key), true, &format!("{label} is not shared"));

        let expected = project.paint(key);
        let actual = clone.and_then(|k| project.paint(k));
        if let Some(gradient) = expected.and_then(Paint::as_gradient) {
            match (self.config().gradients, actual.and_then(Paint::as_gradient)) {
                (GradientPolicy::Skip, _) => {
                    self.gap(&format!("{label} gradient not compared"));
                    return;
                }
                (GradientPolicy::Compare, Some(copy)) => {
                    self.compare_gradients(copy, gradient, label);
                    return;
                }
                (GradientPolicy::Compare, None) => {}
            }
        }
        self.equals(
            actual.map(|p| p.canonical()),
            expected.map(|p| p.canonical()),
            label,
        );
    }

    fn compare_children(&mut self, project: &Project, original: ItemId, clone: ItemId) {
        if !project.kind(original).has_children() {
            return;
        }
        let expected: Vec<ItemId> = project.children(original).collect();
        let actual: Vec<ItemId> = project.children(clone).collect();
        self.equals(actual.len(), expected.len(), "children.len()");
        for (i, (&a, &b)) in expected.iter().zip(&actual).enumerate() {
            self.enter(&format!("children[{i}]"));
            self.compare_items(project, a, b);
            self.leave();
        }
    }
}

/// Whether a number counts as set: nonzero and not NaN.
fn truthy(value: f64) -> bool {
    value != 0.0 && !value.is_nan()
}

#[cfg(test)]
mod tests {
    use facsimile_scene::color::{Color, GrayColor, RgbColor};
    use facsimile_scene::item::{ItemFlags, Justification, Segment};
    use facsimile_scene::paint::{Gradient, GradientColor, GradientStop};
    use facsimile_scene::style::{BlendMode, StrokeCap, StrokeJoin};
    use kurbo::{Affine, Point, Vec2};

    use super::*;
    use crate::config::CompareConfig;
    use crate::sink::Report;

    fn square(project: &mut Project) -> ItemId {
        project.create_path(vec![
            Segment::corner(Point::new(0.0, 0.0)),
            Segment::corner(Point::new(10.0, 0.0)),
            Segment::smooth(
                Point::new(10.0, 10.0),
                Vec2::new(0.0, -2.0),
                Vec2::new(-2.0, 0.0),
            ),
            Segment::corner(Point::new(0.0, 10.0)),
        ])
    }

    fn red() -> Paint {
        Paint::Color("#ff0000".parse::<Color>().unwrap())
    }

    fn ramp() -> Paint {
        Paint::Gradient(GradientColor {
            gradient: Gradient {
                stops: vec![
                    GradientStop {
                        color: Color::Gray(GrayColor::new(1.0)),
                        offset: 0.0,
                    },
                    GradientStop {
                        color: Color::Rgb(RgbColor::new(0.0, 0.0, 1.0)),
                        offset: 1.0,
                    },
                ],
                radial: true,
            },
            origin: Point::new(5.0, 5.0),
            destination: Point::new(5.0, 15.0),
            highlight: Some(Point::new(6.0, 6.0)),
        })
    }

    /// Compares `original` against a fresh copy and returns the report.
    fn compare_copy(project: &mut Project, original: ItemId, config: CompareConfig) -> Report {
        let copy = project.clone_item(original);
        let mut report = Report::new();
        let mut checker = Checker::new(&mut report).with_config(config);
        checker.compare_items(project, original, copy);
        drop(checker);
        report
    }

    fn failed_messages(report: &Report) -> Vec<&str> {
        report.failures().map(|r| r.message.as_str()).collect()
    }

    #[test]
    fn path_copy_is_equivalent() {
        let mut project = Project::new();
        let path = square(&mut project);
        project.set_fill_color(path, Some(red()));
        project.set_stroke_color(path, Some(Paint::Color(Color::Gray(GrayColor::new(0.2)))));
        project.set_opacity(path, 0.5);
        project.set_name(path, Some("square".into()));
        project.set_blend_mode(path, BlendMode::Multiply);
        if let Some(style) = project.style_mut(path) {
            style.dash_array = Some(vec![4.0, 2.0]);
            style.dash_offset = 1.5;
            style.stroke_overprint = true;
        }

        let report = compare_copy(&mut project, path, CompareConfig::standard());
        assert!(report.is_clean(), "{:?}", failed_messages(&report));
        for message in [
            "original != clone",
            "project.serial(original) != project.serial(clone)",
            "segments",
            "clockwise",
            "fill_color is not shared",
            "fill_color",
            "stroke_color",
            "dash_array",
            "dash_offset",
            "stroke_overprint",
        ] {
            assert!(report.find(message).is_some(), "missing check {message}");
        }
        assert!(report.find("fill_overprint").is_none());
        assert_eq!(report.visited(), 1);
    }

    #[test]
    fn fill_color_is_distinct_but_equal() {
        let mut project = Project::new();
        let path = square(&mut project);
        project.set_fill_color(path, Some(red()));
        let report = compare_copy(&mut project, path, CompareConfig::standard());
        let fill = report.find("fill_color").map(|r| r.expected.clone());
        assert_eq!(
            fill.as_deref(),
            Some("Some(\"{ red: 1, green: 0, blue: 0, alpha: 1 }\")")
        );
        assert_eq!(report.find("fill_color is not shared").map(|r| r.passed), Some(true));
        assert!(report.is_clean());
    }

    #[test]
    fn comparing_an_item_with_itself_fails_identity() {
        let mut project = Project::new();
        let path = square(&mut project);
        project.set_fill_color(path, Some(red()));
        let mut report = Report::new();
        let mut checker = Checker::new(&mut report);
        checker.compare_items(&project, path, path);
        drop(checker);
        assert_eq!(
            failed_messages(&report),
            [
                "original != clone",
                "project.serial(original) != project.serial(clone)",
                "fill_color is not shared",
            ]
        );
    }

    #[test]
    fn mutated_copy_reports_every_divergence() {
        let mut project = Project::new();
        let group = project.create_group();
        let a = square(&mut project);
        let b = square(&mut project);
        project.add_child(group, a);
        project.add_child(group, b);
        project.set_fill_color(b, Some(red()));

        let copy = project.clone_item(group);
        project.set_opacity(copy, 0.25);
        project.set_flags(
            copy,
            ItemFlags {
                locked: true,
                ..ItemFlags::default()
            },
        );
        project.transform(copy, Affine::translate((3.0, 4.0)));
        let copied: Vec<_> = project.children(copy).collect();
        project.set_fill_color(copied[1], Some(Paint::Color(Color::Gray(GrayColor::new(0.5)))));

        let mut report = Report::new();
        let mut checker = Checker::new(&mut report);
        checker.compare_items(&project, group, copy);
        drop(checker);

        assert_eq!(
            failed_messages(&report),
            ["opacity", "locked", "matrix", "fill_color"]
        );
        let fill = report.find("fill_color");
        assert_eq!(
            fill.map(|r| r.path.as_str()),
            Some("item.children[1]")
        );
        assert_eq!(report.visited(), 3);
    }

    #[test]
    fn missing_child_is_counted_and_rest_compared() {
        let mut project = Project::new();
        let group = project.create_group();
        for _ in 0..3 {
            let child = square(&mut project);
            project.add_child(group, child);
        }
        let copy = project.clone_item(group);
        let last = project.children(copy).last();
        if let Some(last) = last {
            project.remove(last);
        }

        let mut report = Report::new();
        let mut checker = Checker::new(&mut report);
        checker.compare_items(&project, group, copy);
        drop(checker);

        assert_eq!(failed_messages(&report), ["children.len()"]);
        assert_eq!(report.visited(), 3);
    }

    #[test]
    fn missing_facets_on_the_copy_are_failures() {
        let mut project = Project::new();
        let path = square(&mut project);
        project.set_fill_color(path, Some(red()));
        let group = project.create_group();

        let mut report = Report::new();
        let mut checker = Checker::new(&mut report);
        checker.compare_items(&project, path, group);
        drop(checker);

        assert_eq!(
            failed_messages(&report),
            ["clockwise", "fill_color", "stroke_cap", "stroke_join", "miter_limit"]
        );
        assert_eq!(report.find("fill_color").map(|r| r.actual.as_str()), Some("None"));
        assert_eq!(report.visited(), 1);
    }

    #[test]
    fn missing_text_on_the_copy_is_a_failure() {
        let mut project = Project::new();
        let text = project.create_point_text(Point::new(2.0, 3.0), "caption");
        let group = project.create_group();

        let mut report = Report::new();
        let mut checker = Checker::new(&mut report);
        checker.compare_items(&project, text, group);
        drop(checker);

        assert_eq!(
            failed_messages(&report),
            [
                "content",
                "font_size",
                "font",
                "justification",
                "point",
                "stroke_cap",
                "stroke_join",
                "miter_limit",
            ]
        );
    }

    #[test]
    fn set_style_flags_are_compared() {
        let mut project = Project::new();
        let path = square(&mut project);
        if let Some(style) = project.style_mut(path) {
            style.fill_overprint = true;
            style.stroke_join = Some(StrokeJoin::Round);
        }
        let copy = project.clone_item(path);
        if let Some(style) = project.style_mut(copy) {
            style.fill_overprint = false;
            style.stroke_join = Some(StrokeJoin::Bevel);
        }

        let mut report = Report::new();
        let mut checker = Checker::new(&mut report);
        checker.compare_items(&project, path, copy);
        drop(checker);

        assert_eq!(failed_messages(&report), ["stroke_join", "fill_overprint"]);
        assert_eq!(
            report.find("fill_overprint").map(|r| r.actual.as_str()),
            Some("Some(false)")
        );
    }

    #[test]
    fn layer_shares_its_project() {
        let mut project = Project::new();
        let layer = project.create_layer();
        let child = square(&mut project);
        project.add_child(layer, child);
        let report = compare_copy(&mut project, layer, CompareConfig::standard());
        assert_eq!(report.find("project is shared").map(|r| r.passed), Some(true));
        assert_eq!(report.find("clipped").map(|r| r.passed), Some(true));
        assert!(report.is_clean());
    }

    #[test]
    fn placed_symbol_shares_its_symbol() {
        let mut project = Project::new();
        let definition = square(&mut project);
        let symbol = project.define_symbol(definition);
        let placed = project.create_placed_symbol(symbol);
        project.transform(placed, Affine::rotate(0.5));
        let report = compare_copy(&mut project, placed, CompareConfig::standard());
        assert_eq!(report.find("symbol is shared").map(|r| r.passed), Some(true));
        assert_eq!(report.find("matrix is not shared").map(|r| r.passed), Some(true));
        assert!(report.is_clean());
    }

    #[test]
    fn point_text_compares_text_and_anchor() {
        let mut project = Project::new();
        let text = project.create_point_text(Point::new(20.0, 30.0), "Hello");
        if let Some(facet) = project.text_mut(text) {
            facet.character_style.font_size = 18.0;
            facet.paragraph_style.justification = Justification::Center;
        }
        let copy = project.clone_item(text);
        if let Some(facet) = project.text_mut(copy) {
            facet.content.push('!');
        }
        project.set_point(copy, Point::new(20.0, 31.0));

        let mut report = Report::new();
        let mut checker = Checker::new(&mut report);
        checker.compare_items(&project, text, copy);
        drop(checker);

        assert_eq!(failed_messages(&report), ["content", "point"]);
        assert_eq!(report.find("justification").map(|r| r.passed), Some(true));
        assert_eq!(report.find("font_size").map(|r| r.passed), Some(true));
    }

    #[test]
    fn unset_style_values_are_skipped() {
        let mut project = Project::new();
        let path = square(&mut project);
        if let Some(style) = project.style_mut(path) {
            style.stroke_cap = None;
            style.stroke_join = None;
            style.miter_limit = 0.0;
        }
        let copy = project.clone_item(path);
        if let Some(style) = project.style_mut(copy) {
            style.stroke_cap = Some(StrokeCap::Round);
            style.stroke_join = Some(StrokeJoin::Bevel);
            style.miter_limit = 4.0;
            style.fill_overprint = true;
        }
        let mut report = Report::new();
        let mut checker = Checker::new(&mut report);
        checker.compare_items(&project, path, copy);
        drop(checker);
        assert!(report.find("stroke_cap").is_none());
        assert!(report.find("stroke_join").is_none());
        assert!(report.find("miter_limit").is_none());
        assert!(report.find("fill_overprint").is_none());
        assert!(report.is_clean(), "{:?}", failed_messages(&report));
    }

    #[test]
    fn gradients_are_compared() {
        let mut project = Project::new();
        let path = square(&mut project);
        project.set_fill_color(path, Some(ramp()));
        let copy = project.clone_item(path);

        let mut report = Report::new();
        let mut checker = Checker::new(&mut report);
        checker.compare_items(&project, path, copy);
        drop(checker);
        assert!(report.is_clean());
        assert!(report.find("fill_color radial").is_some());
        assert!(report.find("fill_color highlight").is_some());

        if let Some(Paint::Gradient(g)) = project.fill_color(copy).cloned() {
            let mut g = g;
            g.gradient.radial = false;
            project.set_fill_color(copy, Some(Paint::Gradient(g)));
        }
        let mut report = Report::new();
        let mut checker = Checker::new(&mut report);
        checker.compare_items(&project, path, copy);
        drop(checker);
        assert_eq!(failed_messages(&report), ["fill_color radial"]);
    }

    #[test]
    fn skipped_gradients_leave_a_gap() {
        let mut project = Project::new();
        let path = square(&mut project);
        project.set_stroke_color(path, Some(ramp()));
        let report = compare_copy(&mut project, path, CompareConfig::solid_paints_only());
        assert!(report.is_clean());
        assert_eq!(report.gaps().len(), 1);
        assert_eq!(report.gaps()[0].message, "stroke_color gradient not compared");
        assert!(report.find("stroke_color radial").is_none());
    }

    #[test]
    fn gradient_replaced_by_color_fails() {
        let mut project = Project::new();
        let path = square(&mut project);
        project.set_fill_color(path, Some(ramp()));
        let copy = project.clone_item(path);
        project.set_fill_color(copy, Some(red()));
        let mut report = Report::new();
        let mut checker = Checker::new(&mut report);
        checker.compare_items(&project, path, copy);
        drop(checker);
        assert_eq!(failed_messages(&report), ["fill_color"]);
    }

    #[test]
    fn compound_path_recurses_into_children() {
        let mut project = Project::new();
        let compound = project.create_compound_path();
        let a = square(&mut project);
        let b = square(&mut project);
        project.add_child(compound, a);
        project.add_child(compound, b);
        let report = compare_copy(&mut project, compound, CompareConfig::standard());
        assert!(report.is_clean());
        assert_eq!(report.visited(), 3);
        assert_eq!(
            report.records().last().map(|r| r.path.as_str()),
            Some("item.children[1]")
        );
    }
}
