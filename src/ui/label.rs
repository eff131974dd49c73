//! Label placement for a task bar.
//!
//! Placement runs in two phases. [`LabelLayout::anchor`] positions the label
//! from the current state, then once the label has been painted its measured
//! width goes through [`LabelLayout::reconcile`], which decides whether the
//! text fits inside the bar. A changed decision takes effect on the next pass.

use egui::{Align2, Color32, FontId, Pos2};

use crate::model::TaskGeometry;

/// Sizing and direction inputs for placing a label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelParams {
    /// Height of the bar; the label is vertically centered on it.
    pub task_height: f32,
    /// Clearance kept free for dependency arrows leaving the bar.
    pub arrow_indent: f32,
    pub rtl: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelPlacement {
    Inside,
    Outside,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelAnchor {
    pub pos: Pos2,
    pub placement: LabelPlacement,
}

/// Text style for one placement. Labels are painted only, never interactive.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelTextStyle {
    pub font: FontId,
    pub color: Color32,
    pub align: Align2,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabelStyles {
    pub inside: LabelTextStyle,
    pub outside: LabelTextStyle,
}

impl LabelStyles {
    pub fn for_placement(&self, placement: LabelPlacement) -> &LabelTextStyle {
        match placement {
            LabelPlacement::Inside => &self.inside,
            LabelPlacement::Outside => &self.outside,
        }
    }
}

impl Default for LabelStyles {
    fn default() -> Self {
        crate::ui::theme::default_label_styles()
    }
}

/// Placement state carried between passes for one task item.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelLayout {
    is_text_inside: bool,
    measured_width: Option<f32>,
    /// Geometry and text the current decision was made for.
    decided_for: Option<(TaskGeometry, String)>,
}

impl Default for LabelLayout {
    fn default() -> Self {
        Self {
            is_text_inside: true,
            measured_width: None,
            decided_for: None,
        }
    }
}

impl LabelLayout {
    pub fn is_text_inside(&self) -> bool {
        self.is_text_inside
    }

    pub fn placement(&self) -> LabelPlacement {
        if self.is_text_inside {
            LabelPlacement::Inside
        } else {
            LabelPlacement::Outside
        }
    }

    pub fn measured_width(&self) -> Option<f32> {
        self.measured_width
    }

    /// Phase one: where to draw the label given what is known so far.
    pub fn anchor(
        &self,
        geometry: &TaskGeometry,
        has_children: bool,
        params: &LabelParams,
    ) -> LabelAnchor {
        let y = geometry.y + params.task_height * 0.5;
        if self.is_text_inside {
            return LabelAnchor {
                pos: Pos2::new(geometry.mid_x(), y),
                placement: LabelPlacement::Inside,
            };
        }

        let child_indent = if has_children { params.arrow_indent } else { 0.0 };
        let gap = params.arrow_indent * 0.2;
        let x = if params.rtl {
            geometry.x1 - self.measured_width.unwrap_or(0.0) - child_indent - gap
        } else {
            geometry.x1 + geometry.width() + child_indent + gap
        };
        LabelAnchor {
            pos: Pos2::new(x, y),
            placement: LabelPlacement::Outside,
        }
    }

    /// Replace the stored width without revisiting the decision, for a label
    /// measured in a style other than the one it was painted with.
    pub fn remeasure(&mut self, width: f32) {
        self.measured_width = Some(width);
    }

    /// Phase two: fold in the width of the label as it was actually laid out.
    ///
    /// `None` means nothing was measured (the label is not on screen) and keeps
    /// the current placement. The inside/outside decision is taken once per
    /// geometry and text; later widths for the same inputs only refresh the
    /// stored width, so a style switch cannot flip the label back and forth.
    /// Returns `true` when the anchor may have moved.
    pub fn reconcile(&mut self, geometry: &TaskGeometry, text: &str, measured: Option<f32>) -> bool {
        let Some(width) = measured else {
            return false;
        };
        let previous_width = self.measured_width.replace(width);

        let decided = self
            .decided_for
            .as_ref()
            .is_some_and(|(g, t)| g == geometry && t == text);
        if decided {
            return !self.is_text_inside && previous_width != Some(width);
        }

        let was_inside = self.is_text_inside;
        self.is_text_inside = width < geometry.width();
        self.decided_for = Some((*geometry, text.to_owned()));

        was_inside != self.is_text_inside
            || (!self.is_text_inside && previous_width != Some(width))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARAMS: LabelParams = LabelParams {
        task_height: 30.0,
        arrow_indent: 20.0,
        rtl: false,
    };
    const NAME: &str = "Write report";

    fn geometry() -> TaskGeometry {
        TaskGeometry::new(100.0, 140.0, 10.0)
    }

    #[test]
    fn starts_inside_until_measured() {
        let layout = LabelLayout::default();
        let anchor = layout.anchor(&geometry(), false, &PARAMS);
        assert_eq!(anchor.placement, LabelPlacement::Inside);
        assert_eq!(anchor.pos, Pos2::new(120.0, 25.0));
    }

    #[test]
    fn wide_label_moves_after_the_bar() {
        let mut layout = LabelLayout::default();
        assert!(layout.reconcile(&geometry(), NAME, Some(60.0)));
        let anchor = layout.anchor(&geometry(), false, &PARAMS);
        assert_eq!(anchor.placement, LabelPlacement::Outside);
        assert_eq!(anchor.pos, Pos2::new(144.0, 25.0));
    }

    #[test]
    fn narrow_label_stays_centered() {
        let mut layout = LabelLayout::default();
        assert!(!layout.reconcile(&geometry(), NAME, Some(20.0)));
        assert_eq!(layout.anchor(&geometry(), true, &PARAMS).pos.x, 120.0);
    }

    #[test]
    fn width_equal_to_bar_goes_outside() {
        let mut layout = LabelLayout::default();
        layout.reconcile(&geometry(), NAME, Some(40.0));
        assert_eq!(layout.placement(), LabelPlacement::Outside);
    }

    #[test]
    fn children_push_the_label_past_the_arrow() {
        let mut layout = LabelLayout::default();
        layout.reconcile(&geometry(), NAME, Some(60.0));
        assert_eq!(layout.anchor(&geometry(), true, &PARAMS).pos.x, 164.0);
    }

    #[test]
    fn rtl_places_the_label_before_the_bar() {
        let params = LabelParams { rtl: true, ..PARAMS };
        let mut layout = LabelLayout::default();
        layout.reconcile(&geometry(), NAME, Some(60.0));
        assert_eq!(layout.anchor(&geometry(), false, &params).pos.x, 100.0 - 60.0 - 4.0);
        assert_eq!(layout.anchor(&geometry(), true, &params).pos.x, 100.0 - 60.0 - 24.0);
    }

    #[test]
    fn missing_measurement_keeps_previous_decision() {
        let mut layout = LabelLayout::default();
        assert!(!layout.reconcile(&geometry(), NAME, None));
        assert!(layout.is_text_inside());

        layout.reconcile(&geometry(), NAME, Some(60.0));
        let wider = TaskGeometry::new(0.0, 400.0, 10.0);
        assert!(!layout.reconcile(&wider, NAME, None));
        assert!(!layout.is_text_inside());
    }

    #[test]
    fn reconcile_is_idempotent() {
        let mut layout = LabelLayout::default();
        assert!(layout.reconcile(&geometry(), NAME, Some(60.0)));
        let settled = layout.clone();
        assert!(!layout.reconcile(&geometry(), NAME, Some(60.0)));
        assert_eq!(layout, settled);
    }

    #[test]
    fn geometry_change_rechecks_fit() {
        let mut layout = LabelLayout::default();
        layout.reconcile(&geometry(), NAME, Some(60.0));
        let wider = TaskGeometry::new(100.0, 300.0, 10.0);
        assert!(layout.reconcile(&wider, NAME, Some(60.0)));
        assert_eq!(layout.anchor(&wider, false, &PARAMS).pos.x, 200.0);
    }

    #[test]
    fn renamed_task_rechecks_fit() {
        let mut layout = LabelLayout::default();
        layout.reconcile(&geometry(), NAME, Some(60.0));
        assert!(layout.reconcile(&geometry(), "QA", Some(15.0)));
        assert!(layout.is_text_inside());
    }

    #[test]
    fn restyled_width_does_not_flip_back() {
        let mut layout = LabelLayout::default();
        assert!(layout.reconcile(&geometry(), NAME, Some(41.0)));
        // Outside style measures narrower, same inputs: keep the decision.
        assert!(layout.reconcile(&geometry(), NAME, Some(39.0)));
        assert!(!layout.is_text_inside());
        assert_eq!(layout.measured_width(), Some(39.0));
        assert!(!layout.reconcile(&geometry(), NAME, Some(39.0)));
    }

    #[test]
    fn remeasured_width_is_kept_by_the_next_reconcile() {
        let params = LabelParams { rtl: true, ..PARAMS };
        let mut layout = LabelLayout::default();
        assert!(layout.reconcile(&geometry(), NAME, Some(60.0)));
        layout.remeasure(64.0);
        let anchor = layout.anchor(&geometry(), false, &params);
        assert_eq!(anchor.pos.x, 100.0 - 64.0 - 4.0);

        assert!(!layout.reconcile(&geometry(), NAME, Some(64.0)));
        assert_eq!(layout.anchor(&geometry(), false, &params), anchor);
    }

    #[test]
    fn styles_follow_placement() {
        let styles = LabelStyles::default();
        assert_eq!(styles.for_placement(LabelPlacement::Inside).align, Align2::CENTER_CENTER);
        assert_eq!(styles.for_placement(LabelPlacement::Outside).align, Align2::LEFT_CENTER);
    }
}
