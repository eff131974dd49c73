use std::path::PathBuf;

use egui::{Context, Id, Pos2};

use crate::config::ChartConfig;
use crate::model::{convert_to_bar_tasks, BarLayout, BarTask, Project, Task, TaskId, TimelineViewport};
use crate::ui;
use crate::ui::gantt_chart::{show_gantt_chart, ChartView};
use crate::ui::interaction::{OriginEvent, TaskAction, TaskEventHandler};
use crate::ui::label::LabelStyles;
use crate::ui::task_item::TaskItem;
use crate::ui::task_list::{TaskList, TaskListHandler};

/// Something the chart or the task list asked the host to do.
#[derive(Debug, Clone, PartialEq)]
pub enum HostCommand {
    Select(TaskId),
    Delete(TaskId),
    Hover(TaskId),
    Unhover(TaskId),
    ContextMenu(TaskId, Option<Pos2>),
    ToggleExpander(TaskId),
}

/// Collects commands during a frame; applied once rendering is done.
#[derive(Debug, Default)]
pub struct HostEvents {
    pub commands: Vec<HostCommand>,
}

impl TaskEventHandler for HostEvents {
    fn on_event_start(&mut self, action: TaskAction, task: &BarTask, event: Option<&OriginEvent>) {
        tracing::debug!(%action, task = %task.id, ?event, "task action");
        let id = task.id.clone();
        let command = match action {
            TaskAction::Select => HostCommand::Select(id),
            TaskAction::Delete => HostCommand::Delete(id),
            TaskAction::MouseEnter => HostCommand::Hover(id),
            TaskAction::MouseLeave => HostCommand::Unhover(id),
            TaskAction::DoubleClick => {
                let pos = match event {
                    Some(OriginEvent::Pointer { pos }) => *pos,
                    _ => None,
                };
                HostCommand::ContextMenu(id, pos)
            }
        };
        self.commands.push(command);
    }
}

impl TaskListHandler for HostEvents {
    fn set_selected_task(&mut self, id: &TaskId) {
        tracing::debug!(task = %id, "row selected");
        self.commands.push(HostCommand::Select(id.clone()));
    }

    fn on_expander_click(&mut self, task: &Task) {
        tracing::debug!(task = %task.id, "expander clicked");
        self.commands.push(HostCommand::ToggleExpander(task.id.clone()));
    }
}

/// Main application state.
pub struct GanttApp {
    pub project: Project,
    pub viewport: TimelineViewport,
    pub config: ChartConfig,
    pub selected_task: Option<TaskId>,
    pub hovered_task: Option<TaskId>,
    pub context_menu: Option<(TaskId, Pos2)>,
    /// Vertical scroll shared by the chart and the task list.
    pub scroll_y: f32,
    pub status_message: String,
    /// Where "Save settings" writes; `None` uses the OS config directory.
    pub settings_path: Option<PathBuf>,
    label_styles: LabelStyles,
}

impl GanttApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: ChartConfig) -> Self {
        // Register Phosphor icon font as a fallback so icons render inline with text
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);
        ui::theme::apply_theme(&cc.egui_ctx);

        Self::with_project(Self::sample_project(), config)
    }

    pub fn with_project(project: Project, config: ChartConfig) -> Self {
        let today = chrono::Local::now().date_naive();
        let mut viewport = TimelineViewport::fit_to_tasks(&project.tasks, today);
        viewport.pixels_per_day = config.pixels_per_day;

        Self {
            project,
            viewport,
            config,
            selected_task: None,
            hovered_task: None,
            context_menu: None,
            scroll_y: 0.0,
            status_message: "Ready".to_string(),
            settings_path: None,
            label_styles: LabelStyles::default(),
        }
    }

    /// Generate a sample project for demonstration.
    fn sample_project() -> Project {
        let today = chrono::Local::now().date_naive();
        let days = chrono::Duration::days;
        let mut project = Project::new("Sample Project");

        let mut phase1 = Task::new_project("Planning", today - days(5), today + days(8));
        phase1.progress = 55.0;

        let mut kickoff = Task::new("Project Kickoff", today - days(5), today - days(2));
        kickoff.progress = 100.0;
        kickoff.project = Some(phase1.id.clone());

        let mut requirements =
            Task::new("Requirements Gathering", today - days(2), today + days(5));
        requirements.progress = 60.0;
        requirements.project = Some(phase1.id.clone());
        requirements.dependencies.push(kickoff.id.clone());

        let mut review = Task::new("Review", today + days(5), today + days(6));
        review.project = Some(phase1.id.clone());
        review.dependencies.push(requirements.id.clone());

        let mut planned = Task::new_milestone("Planning Complete", today + days(8));
        planned.project = Some(phase1.id.clone());
        planned.styles.background_color = Some(ui::theme::MILESTONE_FILL);

        let mut phase2 = Task::new_project("Execution", today + days(6), today + days(30));
        phase2.progress = 10.0;

        let mut design = Task::new("UI Design", today + days(6), today + days(18));
        design.project = Some(phase2.id.clone());
        design.styles.progress_color = Some(ui::theme::task_color(2));

        let mut backend = Task::new("Backend Development", today + days(6), today + days(28));
        backend.project = Some(phase2.id.clone());
        backend.progress = 20.0;
        backend.dependencies.push(planned.id.clone());

        let mut qa = Task::new("Testing & QA", today + days(22), today + days(30));
        qa.project = Some(phase2.id.clone());
        qa.dependencies.push(backend.id.clone());
        qa.is_disabled = true;

        let mut launch = Task::new_milestone("Launch", today + days(32));
        launch.dependencies.push(qa.id.clone());
        launch.styles.background_color = Some(ui::theme::MILESTONE_FILL);

        project.tasks = vec![
            phase1,
            kickoff,
            requirements,
            review,
            planned,
            phase2,
            design,
            backend,
            qa,
            launch,
        ];
        project
    }

    pub fn with_settings_path(mut self, path: Option<PathBuf>) -> Self {
        self.settings_path = path;
        self
    }

    fn save_settings(&mut self) {
        let Some(path) = self.settings_path.clone().or_else(ChartConfig::default_path) else {
            self.status_message = "No settings directory available".to_string();
            return;
        };
        match self.config.save(&path) {
            Ok(()) => {
                tracing::info!(path = %path.display(), "chart settings saved");
                self.status_message = "Settings saved".to_string();
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to save chart settings");
                self.status_message = err.to_string();
            }
        }
    }

    fn bar_layout(&self) -> BarLayout {
        BarLayout {
            row_height: self.config.row_height,
            bar_fill: self.config.bar_fill,
            handle_width: self.config.handle_width,
            rtl: self.config.rtl,
        }
    }

    /// Carry out one command from the chart or the task list.
    pub fn apply(&mut self, ctx: &Context, command: HostCommand) {
        match command {
            HostCommand::Select(id) => {
                if let Some(task) = self.project.find(&id) {
                    self.status_message = format!("Selected '{}'", task.name);
                }
                self.selected_task = Some(id);
            }
            HostCommand::Delete(id) => self.delete_task(ctx, &id),
            HostCommand::Hover(id) => self.hovered_task = Some(id),
            HostCommand::Unhover(id) => {
                if self.hovered_task.as_ref() == Some(&id) {
                    self.hovered_task = None;
                }
            }
            HostCommand::ContextMenu(id, pos) => {
                let pos = pos.unwrap_or(Pos2::ZERO);
                self.context_menu = Some((id, pos));
            }
            HostCommand::ToggleExpander(id) => {
                if let Some(hidden) = self.project.toggle_expander(&id) {
                    tracing::debug!(task = %id, hidden, "toggled children");
                }
            }
        }
    }

    fn delete_task(&mut self, ctx: &Context, id: &TaskId) {
        let Some(task) = self.project.remove_task(id) else {
            return;
        };
        tracing::info!(task = %id, name = %task.name, "task deleted");
        TaskItem::forget(ctx, id);
        if self.selected_task.as_ref() == Some(id) {
            self.selected_task = None;
        }
        if self.hovered_task.as_ref() == Some(id) {
            self.hovered_task = None;
        }
        if self.context_menu.as_ref().is_some_and(|(menu_id, _)| menu_id == id) {
            self.context_menu = None;
        }
        self.status_message = format!("Deleted '{}'", task.name);
    }

    fn show_toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.strong(&self.project.name);
            ui.separator();
            if ui.button(egui_phosphor::regular::MAGNIFYING_GLASS_MINUS).on_hover_text("Zoom out").clicked() {
                self.viewport.zoom_out();
            }
            if ui.button(egui_phosphor::regular::MAGNIFYING_GLASS_PLUS).on_hover_text("Zoom in").clicked() {
                self.viewport.zoom_in();
            }
            ui.separator();
            ui.checkbox(&mut self.config.rtl, "Right to left");
            ui.checkbox(&mut self.config.is_delete, "Allow delete");
            if ui.button(format!("{} Save settings", egui_phosphor::regular::FLOPPY_DISK)).clicked() {
                self.save_settings();
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(egui::RichText::new(&self.status_message).color(ui::theme::TEXT_SECONDARY));
            });
        });
    }

    fn show_hover_tooltip(&self, ui: &egui::Ui) {
        let Some(task) = self.hovered_task.as_ref().and_then(|id| self.project.find(id)) else {
            return;
        };
        egui::show_tooltip_at_pointer(ui.ctx(), ui.layer_id(), Id::new(("task-tip", task.id.as_str())), |ui| {
            ui.strong(&task.name);
            ui.label(format!(
                "{} → {}",
                task.start.format("%d/%m/%Y"),
                task.end.format("%d/%m/%Y"),
            ));
            ui.label(format!("Progress: {}%", task.progress as i32));
        });
    }

    fn show_context_menu(&mut self, ctx: &Context, events: &mut HostEvents) {
        let Some((id, pos)) = self.context_menu.clone() else {
            return;
        };
        let Some(name) = self.project.find(&id).map(|t| t.name.clone()) else {
            self.context_menu = None;
            return;
        };

        let mut close = false;
        let area = egui::Area::new(Id::new("task-context-menu"))
            .order(egui::Order::Foreground)
            .fixed_pos(pos)
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.label(egui::RichText::new(&name).strong());
                    ui.separator();
                    if ui.button("Select").clicked() {
                        events.commands.push(HostCommand::Select(id.clone()));
                        close = true;
                    }
                    if self.config.is_delete && ui.button("Delete").clicked() {
                        events.commands.push(HostCommand::Delete(id.clone()));
                        close = true;
                    }
                });
            });

        let clicked_elsewhere = ctx.input(|i| i.pointer.any_click())
            && !area.response.contains_pointer();
        if close || clicked_elsewhere {
            self.context_menu = None;
        }
    }
}

impl eframe::App for GanttApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut events = HostEvents::default();
        let visible = self.project.visible_tasks();
        let bar_tasks = convert_to_bar_tasks(
            &visible,
            &self.viewport,
            &self.bar_layout(),
            &ui::theme::default_bar_styles(),
        );

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| self.show_toolbar(ui));

        egui::SidePanel::left("task_list")
            .resizable(false)
            .show(ctx, |ui| {
                TaskList::new(&visible, &self.config)
                    .scroll_y(self.scroll_y)
                    .selected_task(self.selected_task.as_ref())
                    .show(ui, &mut events);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            let view = ChartView {
                bar_tasks: &bar_tasks,
                config: &self.config,
                selected_task: self.selected_task.as_ref(),
                label_styles: &self.label_styles,
            };
            let output = show_gantt_chart(ui, &view, &mut self.viewport, &mut events);
            self.scroll_y = output.scroll_y;
            self.show_hover_tooltip(ui);
        });

        self.show_context_menu(ctx, &mut events);

        for command in events.commands {
            self.apply(ctx, command);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn app() -> GanttApp {
        let day = NaiveDate::from_ymd_opt(2026, 4, 1).unwrap();
        let mut project = Project::new("test");
        let parent = Task::new_project("Parent", day, day + chrono::Duration::days(9)).with_id("p");
        let mut child = Task::new("Child", day, day + chrono::Duration::days(3)).with_id("c");
        child.project = Some(TaskId::new("p"));
        project.tasks = vec![parent, child];
        GanttApp::with_project(project, ChartConfig::default())
    }

    #[test]
    fn select_and_delete_update_host_state() {
        let ctx = Context::default();
        let mut app = app();
        app.apply(&ctx, HostCommand::Select(TaskId::new("c")));
        app.apply(&ctx, HostCommand::Hover(TaskId::new("c")));
        assert_eq!(app.selected_task, Some(TaskId::new("c")));

        app.apply(&ctx, HostCommand::Delete(TaskId::new("c")));
        assert!(app.project.find(&TaskId::new("c")).is_none());
        assert_eq!(app.selected_task, None);
        assert_eq!(app.hovered_task, None);
        assert_eq!(app.status_message, "Deleted 'Child'");
    }

    #[test]
    fn unhover_only_clears_the_matching_task() {
        let ctx = Context::default();
        let mut app = app();
        app.apply(&ctx, HostCommand::Hover(TaskId::new("p")));
        app.apply(&ctx, HostCommand::Unhover(TaskId::new("c")));
        assert_eq!(app.hovered_task, Some(TaskId::new("p")));
        app.apply(&ctx, HostCommand::Unhover(TaskId::new("p")));
        assert_eq!(app.hovered_task, None);
    }

    #[test]
    fn expander_collapses_children() {
        let ctx = Context::default();
        let mut app = app();
        app.apply(&ctx, HostCommand::ToggleExpander(TaskId::new("p")));
        let visible = app.project.visible_tasks();
        assert_eq!(visible.len(), 1);
    }

    #[test]
    fn double_click_opens_menu_at_pointer() {
        let ctx = Context::default();
        let mut app = app();
        let mut events = HostEvents::default();
        let bars = convert_to_bar_tasks(
            &app.project.tasks,
            &app.viewport,
            &app.bar_layout(),
            &ui::theme::default_bar_styles(),
        );
        let event = OriginEvent::Pointer {
            pos: Some(Pos2::new(40.0, 80.0)),
        };
        events.on_event_start(TaskAction::DoubleClick, &bars[1], Some(&event));
        for command in events.commands {
            app.apply(&ctx, command);
        }
        assert_eq!(app.context_menu, Some((TaskId::new("c"), Pos2::new(40.0, 80.0))));
    }

    #[test]
    fn save_settings_writes_to_chosen_path() {
        let path = std::env::temp_dir().join(format!("gantt-app-{}.json", TaskId::random()));
        let mut app = app().with_settings_path(Some(path.clone()));
        app.config.rtl = true;
        app.save_settings();
        assert_eq!(app.status_message, "Settings saved");
        assert!(ChartConfig::load(&path).unwrap().rtl);
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn list_events_become_commands() {
        let mut events = HostEvents::default();
        let app = app();
        let parent = &app.project.tasks[0];
        events.set_selected_task(&parent.id);
        events.on_expander_click(parent);
        assert_eq!(
            events.commands,
            vec![
                HostCommand::Select(TaskId::new("p")),
                HostCommand::ToggleExpander(TaskId::new("p")),
            ]
        );
    }
}
