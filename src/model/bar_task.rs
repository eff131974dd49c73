use egui::Color32;
use serde::{Deserialize, Serialize};

use super::task::{Task, TaskId, TaskType};
use super::timeline::TimelineViewport;

/// Screen bounds of a task bar on the time axis.
///
/// `y` is the top edge of the bar within the chart; the label's vertical
/// anchor sits half a bar height below it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TaskGeometry {
    pub x1: f32,
    pub x2: f32,
    pub y: f32,
}

impl TaskGeometry {
    /// Build a geometry, swapping the bounds if they arrive reversed so `x2 >= x1` holds.
    pub fn new(x1: f32, x2: f32, y: f32) -> Self {
        if x2 < x1 {
            Self { x1: x2, x2: x1, y }
        } else {
            Self { x1, x2, y }
        }
    }

    pub fn width(&self) -> f32 {
        self.x2 - self.x1
    }

    pub fn mid_x(&self) -> f32 {
        self.x1 + self.width() * 0.5
    }
}

/// Which shape a task is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskVariant {
    Milestone,
    Project,
    SmallTask,
    /// Standard bar. Any unknown tag lands here.
    #[default]
    #[serde(other)]
    Default,
}

impl TaskVariant {
    /// Parse a variant tag. Unrecognized tags select the standard bar.
    pub fn from_type_name(name: &str) -> Self {
        match name {
            "milestone" => Self::Milestone,
            "project" => Self::Project,
            "smalltask" => Self::SmallTask,
            _ => Self::Default,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Milestone => "milestone",
            Self::Project => "project",
            Self::SmallTask => "smalltask",
            Self::Default => "default",
        }
    }
}

/// Fill colors resolved for one bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarStyles {
    pub background_color: Color32,
    pub background_selected_color: Color32,
    pub progress_color: Color32,
    pub progress_selected_color: Color32,
}

/// Snapshot of a task laid out for one render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct BarTask {
    pub id: TaskId,
    pub name: String,
    /// Row index in the visible task list.
    pub index: usize,
    pub variant: TaskVariant,
    pub geometry: TaskGeometry,
    /// Progress from 0.0 to 100.0.
    pub progress: f32,
    /// Tasks depending on this one; their arrows leave from this bar's end.
    pub bar_children: Vec<TaskId>,
    pub styles: BarStyles,
    pub is_disabled: bool,
}

impl BarTask {
    pub fn has_children(&self) -> bool {
        !self.bar_children.is_empty()
    }
}

/// Sizing inputs for turning tasks into bars.
#[derive(Debug, Clone, Copy)]
pub struct BarLayout {
    pub row_height: f32,
    /// Bar height as a percentage of the row height.
    pub bar_fill: f32,
    pub handle_width: f32,
    pub rtl: bool,
}

impl BarLayout {
    pub fn task_height(&self) -> f32 {
        self.row_height * self.bar_fill / 100.0
    }
}

/// Lay out `tasks` (already in display order) as bars.
pub fn convert_to_bar_tasks(
    tasks: &[Task],
    viewport: &TimelineViewport,
    layout: &BarLayout,
    defaults: &BarStyles,
) -> Vec<BarTask> {
    let task_height = layout.task_height();
    let total_width = viewport.total_width();

    tasks
        .iter()
        .enumerate()
        .map(|(index, task)| {
            let y = index as f32 * layout.row_height + (layout.row_height - task_height) * 0.5;
            let (mut x1, mut x2) = match task.task_type {
                TaskType::Milestone => {
                    let x = viewport.date_to_x(task.start);
                    (x - task_height * 0.5, x + task_height * 0.5)
                }
                _ => (viewport.date_to_x(task.start), viewport.date_to_x(task.end)),
            };
            if layout.rtl {
                (x1, x2) = (total_width - x2, total_width - x1);
            }
            let geometry = TaskGeometry::new(x1, x2, y);

            let variant = match task.task_type {
                TaskType::Milestone => TaskVariant::Milestone,
                TaskType::Project => TaskVariant::Project,
                TaskType::Task if geometry.width() < layout.handle_width * 2.0 => {
                    TaskVariant::SmallTask
                }
                TaskType::Task => TaskVariant::Default,
            };

            let bar_children = tasks
                .iter()
                .filter(|other| other.dependencies.contains(&task.id))
                .map(|other| other.id.clone())
                .collect();

            BarTask {
                id: task.id.clone(),
                name: task.name.clone(),
                index,
                variant,
                geometry,
                progress: task.progress.clamp(0.0, 100.0),
                bar_children,
                styles: resolve_styles(task, defaults),
                is_disabled: task.is_disabled,
            }
        })
        .collect()
}

fn resolve_styles(task: &Task, defaults: &BarStyles) -> BarStyles {
    let overrides = &task.styles;
    BarStyles {
        background_color: overrides
            .background_color
            .unwrap_or(defaults.background_color),
        background_selected_color: overrides
            .background_selected_color
            .unwrap_or(defaults.background_selected_color),
        progress_color: overrides.progress_color.unwrap_or(defaults.progress_color),
        progress_selected_color: overrides
            .progress_selected_color
            .unwrap_or(defaults.progress_selected_color),
    }
}
