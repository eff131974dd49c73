//! Interactive Gantt task items for egui.
//!
//! [`ui::task_item::TaskItem`] draws one task: it picks the bar shape for the
//! task's variant, places the name inside or beside the bar depending on the
//! measured text width, and forwards hover, focus, double-click and delete
//! to the host as [`ui::interaction::TaskAction`]s. [`ui::task_list::TaskList`]
//! is the sidebar that follows the host's vertical scroll position.

pub mod app;
pub mod config;
pub mod model;
pub mod ui;
