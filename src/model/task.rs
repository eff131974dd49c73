use chrono::NaiveDate;
use egui::Color32;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identifier of a task. Comparison is exact: case-sensitive, no trimming.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// A fresh random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// What the host declares a task to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    #[default]
    Task,
    Milestone,
    Project,
}

/// Optional per-task color overrides. Unset fields fall back to the theme.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskStyles {
    #[serde(with = "opt_color_serde")]
    pub background_color: Option<Color32>,
    #[serde(with = "opt_color_serde")]
    pub background_selected_color: Option<Color32>,
    #[serde(with = "opt_color_serde")]
    pub progress_color: Option<Color32>,
    #[serde(with = "opt_color_serde")]
    pub progress_selected_color: Option<Color32>,
}

/// A single schedulable unit as the host knows it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub name: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Progress from 0.0 (not started) to 100.0 (complete).
    pub progress: f32,
    #[serde(rename = "type", default)]
    pub task_type: TaskType,
    /// Parent project, if any.
    #[serde(default)]
    pub project: Option<TaskId>,
    /// `None` when the task has no expander; `Some(true)` while its children are collapsed.
    #[serde(default)]
    pub hide_children: Option<bool>,
    /// Tasks this one depends on.
    #[serde(default)]
    pub dependencies: Vec<TaskId>,
    #[serde(default)]
    pub is_disabled: bool,
    #[serde(default)]
    pub styles: TaskStyles,
}

impl Task {
    /// Create a new task with sensible defaults.
    pub fn new(name: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            id: TaskId::random(),
            name: name.into(),
            start,
            end,
            progress: 0.0,
            task_type: TaskType::Task,
            project: None,
            hide_children: None,
            dependencies: Vec::new(),
            is_disabled: false,
            styles: TaskStyles::default(),
        }
    }

    /// Create a new milestone.
    pub fn new_milestone(name: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            task_type: TaskType::Milestone,
            ..Self::new(name, date, date)
        }
    }

    /// Create a new project summary task. Projects start expanded.
    pub fn new_project(name: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            task_type: TaskType::Project,
            hide_children: Some(false),
            ..Self::new(name, start, end)
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = TaskId::new(id);
        self
    }
}

/// Serde helper for `Option<Color32>` stored as an RGBA array.
mod opt_color_serde {
    use egui::Color32;
    use serde::{self, Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(color: &Option<Color32>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        color
            .map(|c| [c.r(), c.g(), c.b(), c.a()])
            .serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Color32>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let rgba: Option<[u8; 4]> = Deserialize::deserialize(deserializer)?;
        Ok(rgba.map(|[r, g, b, a]| Color32::from_rgba_premultiplied(r, g, b, a)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_ids_compare_exactly() {
        assert_eq!(TaskId::new("Task-1"), TaskId::from("Task-1"));
        assert_ne!(TaskId::new("Task-1"), TaskId::new("task-1"));
        assert_ne!(TaskId::new("Task-1"), TaskId::new(" Task-1"));
    }

    #[test]
    fn task_deserializes_with_defaults() {
        let json = r#"{
            "id": "t1",
            "name": "Write docs",
            "start": "2026-03-01",
            "end": "2026-03-04",
            "progress": 25.0
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.id.as_str(), "t1");
        assert_eq!(task.task_type, TaskType::Task);
        assert!(task.dependencies.is_empty());
        assert_eq!(task.hide_children, None);
        assert_eq!(task.styles, TaskStyles::default());
    }

    #[test]
    fn style_overrides_survive_json() {
        let mut task = Task::new_project(
            "Phase",
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 1, 9).unwrap(),
        );
        task.styles.background_color = Some(Color32::from_rgb(10, 20, 30));
        let json = serde_json::to_string(&task).unwrap();
        let back: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(back.styles.background_color, Some(Color32::from_rgb(10, 20, 30)));
        assert_eq!(back.styles.progress_color, None);
        assert_eq!(back.task_type, TaskType::Project);
    }
}
