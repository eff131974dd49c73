pub mod bar_task;
pub mod project;
pub mod task;
pub mod timeline;

pub use bar_task::{convert_to_bar_tasks, BarLayout, BarStyles, BarTask, TaskGeometry, TaskVariant};
pub use project::Project;
pub use task::{Task, TaskId, TaskStyles, TaskType};
pub use timeline::{TimelineScale, TimelineViewport};
