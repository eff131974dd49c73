use chrono::NaiveDate;

use super::task::Task;

/// Controls what scale the timeline header displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelineScale {
    Days,
    Weeks,
    Months,
}

/// Maps dates onto the chart's horizontal axis.
#[derive(Debug, Clone)]
pub struct TimelineViewport {
    /// The leftmost visible date.
    pub start: NaiveDate,
    /// The rightmost visible date.
    pub end: NaiveDate,
    pub scale: TimelineScale,
    /// Pixels per day (controls zoom level).
    pub pixels_per_day: f32,
}

impl TimelineViewport {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start,
            end,
            scale: TimelineScale::Weeks,
            pixels_per_day: 18.0,
        }
    }

    /// A viewport spanning all `tasks` with a week of slack before and a month after.
    pub fn fit_to_tasks(tasks: &[Task], fallback: NaiveDate) -> Self {
        let start = tasks.iter().map(|t| t.start).min().unwrap_or(fallback)
            - chrono::Duration::days(7);
        let end = tasks.iter().map(|t| t.end).max().unwrap_or(fallback)
            + chrono::Duration::days(30);
        Self::new(start, end)
    }

    /// Convert a date to an x-pixel offset from the viewport start.
    pub fn date_to_x(&self, date: NaiveDate) -> f32 {
        let days = (date - self.start).num_days() as f32;
        days * self.pixels_per_day
    }

    /// Total width in pixels for the visible range.
    pub fn total_width(&self) -> f32 {
        self.date_to_x(self.end)
    }

    /// Zoom in (increase pixels per day).
    pub fn zoom_in(&mut self) {
        self.pixels_per_day = (self.pixels_per_day * 1.2).min(80.0);
        self.scale = scale_for(self.pixels_per_day);
    }

    /// Zoom out (decrease pixels per day).
    pub fn zoom_out(&mut self) {
        self.pixels_per_day = (self.pixels_per_day / 1.2).max(2.0);
        self.scale = scale_for(self.pixels_per_day);
    }
}

fn scale_for(pixels_per_day: f32) -> TimelineScale {
    if pixels_per_day >= 30.0 {
        TimelineScale::Days
    } else if pixels_per_day >= 6.0 {
        TimelineScale::Weeks
    } else {
        TimelineScale::Months
    }
}
