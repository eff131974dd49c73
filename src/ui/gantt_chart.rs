use chrono::{Datelike, NaiveDate};
use egui::{Align2, Color32, Painter, Pos2, Rect, Rounding, Sense, Shape, Stroke, Ui, Vec2};

use crate::config::ChartConfig;
use crate::model::{BarTask, TaskId, TimelineScale, TimelineViewport};
use crate::ui::interaction::TaskEventHandler;
use crate::ui::label::LabelStyles;
use crate::ui::task_item::TaskItem;
use crate::ui::theme;

/// Everything the chart reads for one pass.
pub struct ChartView<'a> {
    pub bar_tasks: &'a [BarTask],
    pub config: &'a ChartConfig,
    pub selected_task: Option<&'a TaskId>,
    pub label_styles: &'a LabelStyles,
}

/// Result details from one chart pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChartOutput {
    /// Vertical scroll offset of the chart body after this pass.
    pub scroll_y: f32,
}

/// Render the Gantt chart area (right panel).
pub fn show_gantt_chart(
    ui: &mut Ui,
    view: &ChartView<'_>,
    viewport: &mut TimelineViewport,
    handler: &mut dyn TaskEventHandler,
) -> ChartOutput {
    let config = view.config;
    let available = ui.available_size();
    let chart_width = viewport.total_width().max(available.x);
    let chart_height =
        config.header_height + view.bar_tasks.len() as f32 * config.row_height + 40.0;

    // Ctrl + wheel (and pinch) arrive as a zoom factor, not as scroll
    let zoom = ui.input(|i| i.zoom_delta());
    if ui.rect_contains_pointer(ui.max_rect()) {
        if zoom > 1.0 {
            viewport.zoom_in();
        } else if zoom < 1.0 {
            viewport.zoom_out();
        }
    }

    let output = egui::ScrollArea::both()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            let (response, painter) = ui.allocate_painter(
                Vec2::new(chart_width, chart_height.max(available.y)),
                Sense::hover(),
            );
            let origin = response.rect.min;
            painter.rect_filled(response.rect, 0.0, theme::BG_DARK);

            let axis = Axis {
                viewport,
                total_width: viewport.total_width(),
                rtl: config.rtl,
            };
            draw_timeline_header(&painter, origin, &axis, chart_width, config.header_height);

            let body_origin = origin + Vec2::new(0.0, config.header_height);
            for i in 0..view.bar_tasks.len() {
                let y = body_origin.y + i as f32 * config.row_height;
                if i % 2 == 0 {
                    painter.rect_filled(
                        Rect::from_min_size(
                            Pos2::new(origin.x, y),
                            Vec2::new(chart_width, config.row_height),
                        ),
                        0.0,
                        theme::BG_PANEL,
                    );
                }
                painter.line_segment(
                    [
                        Pos2::new(origin.x, y + config.row_height),
                        Pos2::new(origin.x + chart_width, y + config.row_height),
                    ],
                    Stroke::new(0.5, theme::BORDER_SUBTLE),
                );
            }

            draw_today_line(&painter, origin, &axis, config.header_height, chart_height);
            draw_dependency_arrows(&painter, body_origin, view);

            for task in view.bar_tasks {
                let is_selected = view.selected_task == Some(&task.id);
                TaskItem::new(task, body_origin)
                    .task_height(config.task_height())
                    .arrow_indent(config.arrow_indent)
                    .handle_width(config.handle_width)
                    .rtl(config.rtl)
                    .date_changeable(config.is_date_changeable)
                    .progress_changeable(config.is_progress_changeable)
                    .deletable(config.is_delete)
                    .selected(is_selected)
                    .label_styles(view.label_styles)
                    .show(ui, handler);
            }
        });

    ChartOutput {
        scroll_y: output.state.offset.y,
    }
}

/// Date to x mapping, mirrored for right-to-left charts.
struct Axis<'a> {
    viewport: &'a TimelineViewport,
    total_width: f32,
    rtl: bool,
}

impl Axis<'_> {
    fn x(&self, date: NaiveDate) -> f32 {
        let x = self.viewport.date_to_x(date);
        if self.rtl {
            self.total_width - x
        } else {
            x
        }
    }

    /// Text offset and alignment for labels that sit after a tick.
    fn label_side(&self) -> (f32, Align2) {
        if self.rtl {
            (-3.0, Align2::RIGHT_CENTER)
        } else {
            (3.0, Align2::LEFT_CENTER)
        }
    }
}

fn draw_timeline_header(painter: &Painter, origin: Pos2, axis: &Axis<'_>, width: f32, height: f32) {
    painter.rect_filled(
        Rect::from_min_size(origin, Vec2::new(width, height)),
        0.0,
        theme::BG_HEADER,
    );
    painter.line_segment(
        [
            Pos2::new(origin.x, origin.y + height),
            Pos2::new(origin.x + width, origin.y + height),
        ],
        Stroke::new(1.0, theme::BORDER_SUBTLE),
    );

    let viewport = axis.viewport;
    let (dx, align) = axis.label_side();
    let top_row = origin.y + height * 0.3;
    let bottom_row = origin.y + height * 0.7;
    let tick = |date: NaiveDate| {
        let x = origin.x + axis.x(date);
        painter.line_segment(
            [Pos2::new(x, origin.y + height * 0.5), Pos2::new(x, origin.y + height)],
            Stroke::new(0.5, theme::GRID_LINE),
        );
        x
    };

    let mut date = viewport.start;
    match viewport.scale {
        TimelineScale::Days => {
            while date <= viewport.end {
                let x = tick(date);
                let color = if date.weekday().num_days_from_monday() >= 5 {
                    theme::TEXT_DIM
                } else {
                    theme::TEXT_SECONDARY
                };
                painter.text(Pos2::new(x + dx, bottom_row), align, date.format("%d").to_string(), theme::font_sub(), color);
                if date.day() == 1 {
                    painter.text(Pos2::new(x + dx, top_row), align, date.format("%b %Y").to_string(), theme::font_header(), theme::TEXT_PRIMARY);
                }
                date += chrono::Duration::days(1);
            }
        }
        TimelineScale::Weeks => {
            date -= chrono::Duration::days(date.weekday().num_days_from_monday() as i64);
            while date <= viewport.end {
                let x = tick(date);
                painter.text(Pos2::new(x + dx, bottom_row), align, date.format("W%V").to_string(), theme::font_sub(), theme::TEXT_SECONDARY);
                if date.day() <= 7 {
                    painter.text(Pos2::new(x + dx, top_row), align, date.format("%b %Y").to_string(), theme::font_header(), theme::TEXT_PRIMARY);
                }
                date += chrono::Duration::days(7);
            }
        }
        TimelineScale::Months => {
            date = NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date);
            while date <= viewport.end {
                let x = tick(date);
                painter.text(Pos2::new(x + dx, bottom_row), align, date.format("%b %Y").to_string(), theme::font_header(), theme::TEXT_PRIMARY);
                let (y, m) = if date.month() == 12 {
                    (date.year() + 1, 1)
                } else {
                    (date.year(), date.month() + 1)
                };
                date = NaiveDate::from_ymd_opt(y, m, 1).unwrap_or(date + chrono::Duration::days(30));
            }
        }
    }
}

fn draw_today_line(painter: &Painter, origin: Pos2, axis: &Axis<'_>, header_height: f32, height: f32) {
    let today = chrono::Local::now().date_naive();
    if today < axis.viewport.start || today > axis.viewport.end {
        return;
    }
    let x = origin.x + axis.x(today);
    painter.line_segment(
        [Pos2::new(x, origin.y + header_height), Pos2::new(x, origin.y + height)],
        Stroke::new(1.5, theme::TODAY_LINE),
    );

    let badge_w = 42.0;
    let badge_rect = Rect::from_min_size(
        Pos2::new(x - badge_w / 2.0, origin.y + header_height - 1.0),
        Vec2::new(badge_w, 14.0),
    );
    painter.rect_filled(badge_rect, Rounding::same(3.0), theme::TODAY_LINE);
    painter.text(badge_rect.center(), Align2::CENTER_CENTER, "Today", theme::font_small(), Color32::WHITE);
}

/// Elbow arrows from each bar's end to the bars that depend on it.
fn draw_dependency_arrows(painter: &Painter, body_origin: Pos2, view: &ChartView<'_>) {
    let config = view.config;
    let half = config.task_height() * 0.5;
    let indent = config.arrow_indent;
    let dir = if config.rtl { -1.0 } else { 1.0 };
    let stroke = Stroke::new(1.2, theme::TEXT_DIM);

    for from in view.bar_tasks {
        for child_id in &from.bar_children {
            let Some(to) = view.bar_tasks.iter().find(|t| &t.id == child_id) else {
                continue;
            };
            let (start_x, end_x) = if config.rtl {
                (from.geometry.x1, to.geometry.x2)
            } else {
                (from.geometry.x2, to.geometry.x1)
            };
            let start = body_origin + Vec2::new(start_x, from.geometry.y + half);
            let end = body_origin + Vec2::new(end_x, to.geometry.y + half);
            let elbow_x = start.x + dir * indent;
            let points = vec![
                start,
                Pos2::new(elbow_x, start.y),
                Pos2::new(elbow_x, end.y),
                Pos2::new(end.x - dir * indent * 0.5, end.y),
                end,
            ];
            painter.add(Shape::line(points, stroke));

            let head = 5.0;
            painter.add(Shape::convex_polygon(
                vec![
                    end,
                    Pos2::new(end.x - dir * head, end.y - head * 0.6),
                    Pos2::new(end.x - dir * head, end.y + head * 0.6),
                ],
                theme::TEXT_DIM,
                Stroke::NONE,
            ));
        }
    }
}
