use egui::{Key, Modifiers, Pos2};
use std::fmt;

use crate::model::BarTask;

/// Interaction a task item forwards to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskAction {
    Select,
    Delete,
    MouseEnter,
    MouseLeave,
    DoubleClick,
}

impl TaskAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Select => "select",
            Self::Delete => "delete",
            Self::MouseEnter => "mouseenter",
            Self::MouseLeave => "mouseleave",
            Self::DoubleClick => "dblclick",
        }
    }
}

impl fmt::Display for TaskAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The input that triggered an action.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OriginEvent {
    Pointer { pos: Option<Pos2> },
    Key { key: Key, modifiers: Modifiers },
}

/// Receives every action a task item emits. The return value of the host's
/// handling is not observed by the item, and failures are the host's to deal with.
pub trait TaskEventHandler {
    fn on_event_start(&mut self, action: TaskAction, task: &BarTask, event: Option<&OriginEvent>);
}

impl<F> TaskEventHandler for F
where
    F: FnMut(TaskAction, &BarTask, Option<&OriginEvent>),
{
    fn on_event_start(&mut self, action: TaskAction, task: &BarTask, event: Option<&OriginEvent>) {
        self(action, task, event)
    }
}

/// Outcome of a key press on a focused task item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyDispatch {
    pub action: Option<TaskAction>,
    /// Key presses never leak past a focused task item.
    pub stop_propagation: bool,
}

pub fn dispatch_key(key: Key, is_delete: bool) -> KeyDispatch {
    let action = match key {
        Key::Delete if is_delete => Some(TaskAction::Delete),
        _ => None,
    };
    KeyDispatch {
        action,
        stop_propagation: true,
    }
}

/// Turns per-frame hover and focus levels into enter/leave/select edges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HoverFocusTracker {
    hovered: bool,
    focused: bool,
}

impl HoverFocusTracker {
    pub fn hover(&mut self, hovered: bool) -> Option<TaskAction> {
        let edge = match (self.hovered, hovered) {
            (false, true) => Some(TaskAction::MouseEnter),
            (true, false) => Some(TaskAction::MouseLeave),
            _ => None,
        };
        self.hovered = hovered;
        edge
    }

    /// Gaining focus selects the task; losing it emits nothing.
    pub fn focus(&mut self, focused: bool) -> Option<TaskAction> {
        let edge = (!self.focused && focused).then_some(TaskAction::Select);
        self.focused = focused;
        edge
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delete_key_emits_only_when_permitted() {
        assert_eq!(
            dispatch_key(Key::Delete, true),
            KeyDispatch {
                action: Some(TaskAction::Delete),
                stop_propagation: true
            }
        );
        assert_eq!(
            dispatch_key(Key::Delete, false),
            KeyDispatch {
                action: None,
                stop_propagation: true
            }
        );
    }

    #[test]
    fn other_keys_are_swallowed_silently() {
        for key in [Key::Backspace, Key::Enter, Key::ArrowLeft, Key::A, Key::Escape] {
            let dispatch = dispatch_key(key, true);
            assert_eq!(dispatch.action, None, "{key:?}");
            assert!(dispatch.stop_propagation);
        }
    }

    #[test]
    fn hover_emits_edges_only() {
        let mut tracker = HoverFocusTracker::default();
        assert_eq!(tracker.hover(false), None);
        assert_eq!(tracker.hover(true), Some(TaskAction::MouseEnter));
        assert_eq!(tracker.hover(true), None);
        assert!(tracker.is_hovered());
        assert_eq!(tracker.hover(false), Some(TaskAction::MouseLeave));
        assert_eq!(tracker.hover(false), None);
    }

    #[test]
    fn focus_gain_selects_once() {
        let mut tracker = HoverFocusTracker::default();
        assert_eq!(tracker.focus(true), Some(TaskAction::Select));
        assert_eq!(tracker.focus(true), None);
        assert_eq!(tracker.focus(false), None);
        assert_eq!(tracker.focus(true), Some(TaskAction::Select));
    }

    #[test]
    fn action_names_are_stable() {
        let names: Vec<_> = [
            TaskAction::Select,
            TaskAction::Delete,
            TaskAction::MouseEnter,
            TaskAction::MouseLeave,
            TaskAction::DoubleClick,
        ]
        .iter()
        .map(TaskAction::to_string)
        .collect();
        assert_eq!(names, ["select", "delete", "mouseenter", "mouseleave", "dblclick"]);
    }

    #[test]
    fn closures_are_handlers() {
        let mut seen = Vec::new();
        let mut handler = |action: TaskAction, task: &BarTask, event: Option<&OriginEvent>| {
            seen.push((action, task.id.clone(), event.is_some()));
        };
        let task = BarTask {
            id: "t".into(),
            name: "T".into(),
            index: 0,
            variant: Default::default(),
            geometry: Default::default(),
            progress: 0.0,
            bar_children: Vec::new(),
            styles: crate::ui::theme::default_bar_styles(),
            is_disabled: false,
        };
        handler.on_event_start(TaskAction::Select, &task, None);
        assert_eq!(seen, vec![(TaskAction::Select, "t".into(), false)]);
    }
}
