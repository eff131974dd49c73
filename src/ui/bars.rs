//! Shape renderers for task bars and the variant -> shape mapping.

use egui::{Color32, Painter, Pos2, Rect, Rounding, Shape, Stroke, Vec2};

use crate::model::{BarTask, TaskVariant};
use crate::ui::theme;

/// Host flags that influence which shape is chosen and how it is configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeOptions {
    pub rtl: bool,
    pub is_date_changeable: bool,
    pub is_progress_changeable: bool,
}

/// The renderer picked for a task, with the props it was handed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BarShape {
    Milestone,
    Project {
        background: Color32,
        progress: Color32,
    },
    Small,
    Standard {
        rtl: bool,
        is_date_changeable: bool,
        is_progress_changeable: bool,
    },
}

/// Map a task to its renderer. Every variant has exactly one shape.
pub fn select_shape(task: &BarTask, options: &ShapeOptions) -> BarShape {
    match task.variant {
        TaskVariant::Milestone => BarShape::Milestone,
        TaskVariant::Project => BarShape::Project {
            background: opaque(task.styles.background_color),
            progress: task.styles.progress_selected_color,
        },
        TaskVariant::SmallTask => BarShape::Small,
        TaskVariant::Default => BarShape::Standard {
            rtl: options.rtl,
            is_date_changeable: options.is_date_changeable && !task.is_disabled,
            is_progress_changeable: options.is_progress_changeable && !task.is_disabled,
        },
    }
}

fn opaque(color: Color32) -> Color32 {
    let [r, g, b, _] = color.to_srgba_unmultiplied();
    Color32::from_rgb(r, g, b)
}

/// Per-pass paint inputs shared by all shapes.
#[derive(Debug, Clone, Copy)]
pub struct PaintContext {
    /// Chart origin in screen space; task geometry is relative to it.
    pub origin: Pos2,
    pub task_height: f32,
    pub handle_width: f32,
    pub is_selected: bool,
}

impl PaintContext {
    pub fn bar_rect(&self, task: &BarTask) -> Rect {
        let g = task.geometry;
        Rect::from_min_max(
            self.origin + Vec2::new(g.x1, g.y),
            self.origin + Vec2::new(g.x2, g.y + self.task_height),
        )
    }
}

impl BarShape {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Milestone => "milestone",
            Self::Project { .. } => "project",
            Self::Small => "small",
            Self::Standard { .. } => "standard",
        }
    }

    /// Paint the shape and return the rect that receives pointer input.
    pub fn paint(&self, painter: &Painter, task: &BarTask, cx: &PaintContext) -> Rect {
        match *self {
            Self::Milestone => draw_milestone(painter, task, cx),
            Self::Project {
                background,
                progress,
            } => draw_project(painter, task, cx, background, progress),
            Self::Small => {
                let rect = cx.bar_rect(task);
                draw_bar_body(painter, task, cx, rect, false);
                rect
            }
            Self::Standard {
                rtl,
                is_date_changeable,
                is_progress_changeable,
            } => {
                let rect = cx.bar_rect(task);
                let progress_x = draw_bar_body(painter, task, cx, rect, rtl);
                if cx.is_selected && is_date_changeable {
                    draw_date_handles(painter, rect, cx.handle_width);
                }
                if cx.is_selected && is_progress_changeable {
                    draw_progress_handle(painter, rect, progress_x);
                }
                rect
            }
        }
    }
}

/// Background and progress fill. Returns the x of the progress edge.
fn draw_bar_body(painter: &Painter, task: &BarTask, cx: &PaintContext, rect: Rect, rtl: bool) -> f32 {
    let rounding = Rounding::same(theme::BAR_ROUNDING);
    let (background, progress_color) = if cx.is_selected {
        (task.styles.background_selected_color, task.styles.progress_selected_color)
    } else {
        (task.styles.background_color, task.styles.progress_color)
    };

    painter.rect_filled(rect.translate(Vec2::new(1.0, 2.0)), rounding, Color32::from_black_alpha(35));
    painter.rect_filled(rect, rounding, background);

    let progress_width = rect.width() * task.progress / 100.0;
    let progress_rect = if rtl {
        Rect::from_min_max(Pos2::new(rect.right() - progress_width, rect.top()), rect.max)
    } else {
        Rect::from_min_size(rect.min, Vec2::new(progress_width, rect.height()))
    };
    if progress_width > 0.0 {
        painter.rect_filled(progress_rect, rounding, progress_color);
    }

    if cx.is_selected {
        painter.rect_stroke(
            rect.expand(1.5),
            Rounding::same(theme::BAR_ROUNDING + 1.5),
            Stroke::new(2.0, theme::BORDER_ACCENT),
        );
    }

    if rtl {
        progress_rect.left()
    } else {
        progress_rect.right()
    }
}

fn draw_date_handles(painter: &Painter, rect: Rect, handle_width: f32) {
    let handle_h = rect.height() * 0.55;
    let handle_y = rect.center().y - handle_h / 2.0;
    let width = (handle_width * 0.5).max(3.0);
    for x in [rect.left() + 1.0, rect.right() - 1.0 - width] {
        painter.rect_filled(
            Rect::from_min_size(Pos2::new(x, handle_y), Vec2::new(width, handle_h)),
            Rounding::same(2.0),
            theme::HANDLE_COLOR,
        );
    }
}

fn draw_progress_handle(painter: &Painter, rect: Rect, x: f32) {
    let size = (rect.height() * 0.25).max(3.0);
    let tip = Pos2::new(x, rect.bottom() - size * 0.5);
    painter.add(Shape::convex_polygon(
        vec![
            tip,
            Pos2::new(x + size, rect.bottom() + size),
            Pos2::new(x - size, rect.bottom() + size),
        ],
        theme::HANDLE_COLOR,
        Stroke::NONE,
    ));
}

fn draw_project(
    painter: &Painter,
    task: &BarTask,
    cx: &PaintContext,
    background: Color32,
    progress: Color32,
) -> Rect {
    let rect = cx.bar_rect(task);
    let rounding = Rounding::same(theme::BAR_ROUNDING);
    painter.rect_filled(rect, rounding, background);

    let progress_width = rect.width() * task.progress / 100.0;
    if progress_width > 0.0 {
        painter.rect_filled(
            Rect::from_min_size(rect.min, Vec2::new(progress_width, rect.height())),
            rounding,
            progress,
        );
    }

    // Summary brackets hanging below both ends.
    let top = rect.top() + rect.height() * 0.5;
    let tri = rect.height() * 0.5;
    let left = vec![
        Pos2::new(rect.left(), top),
        Pos2::new(rect.left(), rect.bottom() + tri * 0.5),
        Pos2::new(rect.left() + tri, top),
    ];
    let right = vec![
        Pos2::new(rect.right(), top),
        Pos2::new(rect.right(), rect.bottom() + tri * 0.5),
        Pos2::new(rect.right() - tri, top),
    ];
    painter.add(Shape::convex_polygon(left, background, Stroke::NONE));
    painter.add(Shape::convex_polygon(right, background, Stroke::NONE));

    if cx.is_selected {
        painter.rect_stroke(rect.expand(1.5), rounding, Stroke::new(2.0, theme::BORDER_ACCENT));
    }
    rect
}

fn draw_milestone(painter: &Painter, task: &BarTask, cx: &PaintContext) -> Rect {
    let g = task.geometry;
    let center = cx.origin + Vec2::new(g.mid_x(), g.y + cx.task_height * 0.5);
    let size = (cx.task_height * 0.5).max(4.0);
    let fill = if cx.is_selected {
        task.styles.background_selected_color
    } else {
        task.styles.background_color
    };

    let shadow_offset = Vec2::new(1.0, 1.5);
    let diamond = |offset: Vec2| {
        vec![
            center + offset + Vec2::new(0.0, -size),
            center + offset + Vec2::new(size, 0.0),
            center + offset + Vec2::new(0.0, size),
            center + offset + Vec2::new(-size, 0.0),
        ]
    };
    painter.add(Shape::convex_polygon(
        diamond(shadow_offset),
        Color32::from_black_alpha(40),
        Stroke::NONE,
    ));

    let stroke = if cx.is_selected {
        Stroke::new(2.0, theme::BORDER_ACCENT)
    } else {
        Stroke::NONE
    };
    painter.add(Shape::convex_polygon(diamond(Vec2::ZERO), fill, stroke));

    Rect::from_center_size(center, Vec2::splat(size * 2.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BarStyles, TaskGeometry};

    fn task(variant: TaskVariant) -> BarTask {
        BarTask {
            id: "t".into(),
            name: "Task".into(),
            index: 0,
            variant,
            geometry: TaskGeometry::new(10.0, 90.0, 4.0),
            progress: 50.0,
            bar_children: Vec::new(),
            styles: BarStyles {
                background_color: Color32::from_rgba_unmultiplied(200, 100, 50, 80),
                background_selected_color: Color32::from_rgb(1, 2, 3),
                progress_color: Color32::from_rgb(4, 5, 6),
                progress_selected_color: Color32::from_rgb(7, 8, 9),
            },
            is_disabled: false,
        }
    }

    const OPTIONS: ShapeOptions = ShapeOptions {
        rtl: true,
        is_date_changeable: true,
        is_progress_changeable: false,
    };

    #[test]
    fn every_variant_maps_to_one_shape() {
        let shapes: Vec<_> = [
            TaskVariant::Milestone,
            TaskVariant::Project,
            TaskVariant::SmallTask,
            TaskVariant::Default,
        ]
        .into_iter()
        .map(|v| select_shape(&task(v), &OPTIONS).name())
        .collect();
        assert_eq!(shapes, ["milestone", "project", "small", "standard"]);
    }

    #[test]
    fn unknown_tag_falls_back_to_standard_bar() {
        let variant = TaskVariant::from_type_name("roadmap-item");
        assert_eq!(
            select_shape(&task(variant), &OPTIONS),
            BarShape::Standard {
                rtl: true,
                is_date_changeable: true,
                is_progress_changeable: false,
            }
        );
    }

    #[test]
    fn project_background_is_forced_opaque() {
        match select_shape(&task(TaskVariant::Project), &OPTIONS) {
            BarShape::Project {
                background,
                progress,
            } => {
                assert_eq!(background.a(), 255);
                assert!(background.r() > background.g() && background.g() > background.b());
                assert_eq!(progress, Color32::from_rgb(7, 8, 9));
            }
            other => panic!("expected project shape, got {other:?}"),
        }
    }

    #[test]
    fn disabled_tasks_are_not_changeable() {
        let mut t = task(TaskVariant::Default);
        t.is_disabled = true;
        let options = ShapeOptions {
            is_progress_changeable: true,
            ..OPTIONS
        };
        assert_eq!(
            select_shape(&t, &options),
            BarShape::Standard {
                rtl: true,
                is_date_changeable: false,
                is_progress_changeable: false,
            }
        );
    }

    #[test]
    fn bar_rect_is_offset_by_origin() {
        let cx = PaintContext {
            origin: Pos2::new(5.0, 100.0),
            task_height: 30.0,
            handle_width: 8.0,
            is_selected: false,
        };
        let rect = cx.bar_rect(&task(TaskVariant::Default));
        assert_eq!(rect, Rect::from_min_max(Pos2::new(15.0, 104.0), Pos2::new(95.0, 134.0)));
    }
}
