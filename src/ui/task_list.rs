//! Task list sidebar: a header row plus one row per task, scrolled by the host.

use egui::scroll_area::ScrollBarVisibility;
use egui::{Align, Align2, FontId, Layout, Pos2, RichText, ScrollArea, Sense, Stroke, Ui, Vec2};
use egui_extras::{Column, TableBuilder};

use crate::config::ChartConfig;
use crate::model::{Task, TaskId};
use crate::ui::theme;

/// Receives row-level events from the task list.
pub trait TaskListHandler {
    fn set_selected_task(&mut self, id: &TaskId);
    fn on_expander_click(&mut self, task: &Task);
}

/// Header layout derived from the list configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderStyle {
    pub font: FontId,
    pub height: f32,
    pub column_min_width: f32,
    pub separator_height: f32,
    pub separator_margin_top: f32,
}

impl HeaderStyle {
    pub fn derive(header_height: f32, row_width: f32, font: FontId) -> Self {
        Self {
            font,
            height: header_height - 2.0,
            column_min_width: row_width,
            separator_height: header_height * 0.5,
            separator_margin_top: header_height * 0.2,
        }
    }
}

/// Inputs handed to a table renderer each pass.
#[derive(Debug)]
pub struct TableProps<'a> {
    pub row_height: f32,
    pub row_width: f32,
    pub font: FontId,
    pub tasks: &'a [Task],
    /// Opaque locale tag for custom tables.
    pub locale: &'a str,
    /// Empty when nothing is selected.
    pub selected_task_id: &'a str,
    /// Host scroll position the body is shown at. Tables do not scroll themselves.
    pub scroll_y: f32,
}

pub trait TaskListHeader {
    fn show(&self, ui: &mut Ui, style: &HeaderStyle);
}

pub trait TaskListTable {
    fn show(&self, ui: &mut Ui, props: &TableProps<'_>, handler: &mut dyn TaskListHandler);
}

/// Identifier rows are compared against; `""` matches no task.
pub fn selected_task_id(selected: Option<&TaskId>) -> &str {
    selected.map_or("", TaskId::as_str)
}

pub fn is_row_selected(task: &Task, selected_task_id: &str) -> bool {
    task.id.as_str() == selected_task_id
}

const COLUMNS: [&str; 3] = ["Name", "From", "To"];

pub struct DefaultHeader;

impl TaskListHeader for DefaultHeader {
    fn show(&self, ui: &mut Ui, style: &HeaderStyle) {
        let width = style.column_min_width * COLUMNS.len() as f32;
        let (rect, _) = ui.allocate_exact_size(Vec2::new(width, style.height), Sense::hover());
        let painter = ui.painter();
        painter.rect_filled(rect, 0.0, theme::BG_HEADER);
        painter.line_segment(
            [rect.left_bottom(), rect.right_bottom()],
            Stroke::new(1.0, theme::BORDER_SUBTLE),
        );

        for (i, title) in COLUMNS.iter().enumerate() {
            let left = rect.left() + i as f32 * style.column_min_width;
            if i > 0 {
                let top = rect.top() + style.separator_margin_top;
                painter.line_segment(
                    [Pos2::new(left, top), Pos2::new(left, top + style.separator_height)],
                    Stroke::new(1.0, theme::BORDER_SUBTLE),
                );
            }
            painter.text(
                Pos2::new(left + 8.0, rect.center().y),
                Align2::LEFT_CENTER,
                *title,
                style.font.clone(),
                theme::TEXT_PRIMARY,
            );
        }
    }
}

pub struct DefaultTable;

impl TaskListTable for DefaultTable {
    fn show(&self, ui: &mut Ui, props: &TableProps<'_>, handler: &mut dyn TaskListHandler) {
        let table = TableBuilder::new(ui)
            .striped(true)
            .resizable(false)
            .vscroll(false)
            .cell_layout(Layout::left_to_right(Align::Center))
            .columns(Column::exact(props.row_width), COLUMNS.len())
            .sense(Sense::click());

        table.body(|body| {
            body.rows(props.row_height, props.tasks.len(), |mut row| {
                let task = &props.tasks[row.index()];
                row.set_selected(is_row_selected(task, props.selected_task_id));

                let mut expander_clicked = false;
                let (_, name) = row.col(|ui| {
                    match task.hide_children {
                        Some(hidden) => {
                            let icon = if hidden {
                                egui_phosphor::regular::CARET_RIGHT
                            } else {
                                egui_phosphor::regular::CARET_DOWN
                            };
                            let button = egui::Button::new(RichText::new(icon).font(props.font.clone()))
                                .frame(false);
                            expander_clicked = ui.add(button).clicked();
                        }
                        None => {
                            ui.add_space(props.font.size + ui.spacing().item_spacing.x);
                        }
                    }
                    ui.add(
                        egui::Label::new(RichText::new(&task.name).font(props.font.clone()))
                            .truncate(),
                    );
                });
                let (_, from) = row.col(|ui| {
                    ui.label(RichText::new(format_date(task.start)).font(props.font.clone()));
                });
                let (_, to) = row.col(|ui| {
                    ui.label(RichText::new(format_date(task.end)).font(props.font.clone()));
                });

                if expander_clicked {
                    handler.on_expander_click(task);
                } else if name.clicked() || from.clicked() || to.clicked() {
                    handler.set_selected_task(&task.id);
                }
            });
        });
    }
}

fn format_date(date: chrono::NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Sidebar widget listing tasks next to the chart.
pub struct TaskList<'a> {
    tasks: &'a [Task],
    header_height: f32,
    row_height: f32,
    row_width: f32,
    font: FontId,
    locale: &'a str,
    gantt_height: f32,
    scroll_y: f32,
    selected_task: Option<&'a TaskId>,
    header: &'a dyn TaskListHeader,
    table: &'a dyn TaskListTable,
}

impl<'a> TaskList<'a> {
    pub fn new(tasks: &'a [Task], config: &'a ChartConfig) -> Self {
        Self {
            tasks,
            header_height: config.header_height,
            row_height: config.row_height,
            row_width: config.row_width,
            font: config.font(),
            locale: &config.locale,
            gantt_height: 0.0,
            scroll_y: 0.0,
            selected_task: None,
            header: &DefaultHeader,
            table: &DefaultTable,
        }
    }

    /// Height of the scrollable body; `0.0` lets it take the available height.
    pub fn gantt_height(mut self, height: f32) -> Self {
        self.gantt_height = height;
        self
    }

    pub fn scroll_y(mut self, scroll_y: f32) -> Self {
        self.scroll_y = scroll_y;
        self
    }

    pub fn selected_task(mut self, selected: Option<&'a TaskId>) -> Self {
        self.selected_task = selected;
        self
    }

    pub fn header(mut self, header: &'a dyn TaskListHeader) -> Self {
        self.header = header;
        self
    }

    pub fn table(mut self, table: &'a dyn TaskListTable) -> Self {
        self.table = table;
        self
    }

    pub fn show(self, ui: &mut Ui, handler: &mut dyn TaskListHandler) {
        let header_style = HeaderStyle::derive(self.header_height, self.row_width, self.font.clone());
        ui.push_id("task-list", |ui| {
            self.header.show(ui, &header_style);

            let max_height = if self.gantt_height > 0.0 {
                self.gantt_height
            } else {
                ui.available_height()
            };
            let props = TableProps {
                row_height: self.row_height,
                row_width: self.row_width,
                font: self.font.clone(),
                tasks: self.tasks,
                locale: self.locale,
                selected_task_id: selected_task_id(self.selected_task),
                scroll_y: self.scroll_y,
            };

            // The host owns the offset: it is applied every pass and user
            // scrolling over the list is ignored.
            ScrollArea::vertical()
                .enable_scrolling(false)
                .scroll_bar_visibility(ScrollBarVisibility::AlwaysHidden)
                .auto_shrink([false, false])
                .max_height(max_height)
                .vertical_scroll_offset(self.scroll_y)
                .show(ui, |ui| self.table.show(ui, &props, handler));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn task(id: &str) -> Task {
        let day = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();
        Task::new(id, day, day).with_id(id)
    }

    #[test]
    fn header_style_is_derived_from_config() {
        let style = HeaderStyle::derive(50.0, 155.0, FontId::proportional(14.0));
        assert_eq!(style.height, 48.0);
        assert_eq!(style.column_min_width, 155.0);
        assert_eq!(style.separator_height, 25.0);
        assert_eq!(style.separator_margin_top, 10.0);
        assert_eq!(style.font, FontId::proportional(14.0));
    }

    #[test]
    fn selection_matches_ids_exactly() {
        let selected = TaskId::new("Task-2");
        let id = selected_task_id(Some(&selected));
        assert!(is_row_selected(&task("Task-2"), id));
        assert!(!is_row_selected(&task("task-2"), id));
        assert!(!is_row_selected(&task("Task-2 "), id));
    }

    #[test]
    fn no_selection_matches_no_row() {
        let id = selected_task_id(None);
        assert_eq!(id, "");
        assert!(!is_row_selected(&task("a"), id));
        assert!(!is_row_selected(&task("Task-2"), id));
    }
}
