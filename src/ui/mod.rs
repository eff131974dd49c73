pub mod bars;
pub mod gantt_chart;
pub mod interaction;
pub mod label;
pub mod task_item;
pub mod task_list;
pub mod theme;
