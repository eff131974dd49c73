use std::collections::HashSet;

use super::task::{Task, TaskId};

/// The host's ordered task list. Order is display order.
#[derive(Debug, Clone, Default)]
pub struct Project {
    pub name: String,
    pub tasks: Vec<Task>,
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tasks: Vec::new(),
        }
    }

    pub fn find(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    /// Tasks that are not hidden under a collapsed project, in display order.
    pub fn visible_tasks(&self) -> Vec<Task> {
        let mut hidden: HashSet<&TaskId> = HashSet::new();
        let mut visible = Vec::with_capacity(self.tasks.len());
        for task in &self.tasks {
            let parent_hidden = task.project.as_ref().is_some_and(|parent| {
                hidden.contains(parent)
                    || self
                        .find(parent)
                        .is_some_and(|p| p.hide_children == Some(true))
            });
            if parent_hidden {
                hidden.insert(&task.id);
            } else {
                visible.push(task.clone());
            }
        }
        visible
    }

    /// Remove a task and every dependency link pointing at it.
    /// Returns the removed task, if it existed.
    pub fn remove_task(&mut self, id: &TaskId) -> Option<Task> {
        let pos = self.tasks.iter().position(|t| &t.id == id)?;
        let removed = self.tasks.remove(pos);
        for task in &mut self.tasks {
            task.dependencies.retain(|dep| dep != id);
            if task.project.as_ref() == Some(id) {
                task.project = None;
            }
        }
        Some(removed)
    }

    /// Flip the collapsed state of a task that has an expander.
    /// Returns the new `hide_children` value.
    pub fn toggle_expander(&mut self, id: &TaskId) -> Option<bool> {
        let task = self.tasks.iter_mut().find(|t| &t.id == id)?;
        let hidden = !task.hide_children?;
        task.hide_children = Some(hidden);
        Some(hidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 7, d).unwrap()
    }

    fn sample() -> Project {
        let phase = Task::new_project("Phase", day(1), day(20)).with_id("phase");
        let mut a = Task::new("A", day(1), day(5)).with_id("a");
        a.project = Some(TaskId::new("phase"));
        let mut sub = Task::new_project("Sub", day(5), day(9)).with_id("sub");
        sub.project = Some(TaskId::new("phase"));
        let mut b = Task::new("B", day(5), day(9)).with_id("b");
        b.project = Some(TaskId::new("sub"));
        b.dependencies.push(TaskId::new("a"));
        let other = Task::new("Other", day(2), day(3)).with_id("other");

        let mut project = Project::new("p");
        project.tasks = vec![phase, a, sub, b, other];
        project
    }

    fn ids(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn collapsed_projects_hide_all_descendants() {
        let mut project = sample();
        assert_eq!(ids(&project.visible_tasks()), ["phase", "a", "sub", "b", "other"]);

        assert_eq!(project.toggle_expander(&TaskId::new("phase")), Some(true));
        assert_eq!(ids(&project.visible_tasks()), ["phase", "other"]);
    }

    #[test]
    fn toggle_ignores_tasks_without_expander() {
        let mut project = sample();
        assert_eq!(project.toggle_expander(&TaskId::new("a")), None);
        assert_eq!(project.toggle_expander(&TaskId::new("missing")), None);
    }

    #[test]
    fn removing_a_task_drops_links_to_it() {
        let mut project = sample();
        let removed = project.remove_task(&TaskId::new("a")).unwrap();
        assert_eq!(removed.name, "A");
        let b = project.find(&TaskId::new("b")).unwrap();
        assert!(b.dependencies.is_empty());
        assert!(project.remove_task(&TaskId::new("a")).is_none());
    }
}
