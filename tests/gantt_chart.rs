//! Chart-level input handling in headless egui passes.

use chrono::NaiveDate;
use egui::{CentralPanel, Context, Event, Modifiers, MouseWheelUnit, Pos2, RawInput, Rect, Vec2};
use gantt_task_view::config::ChartConfig;
use gantt_task_view::model::{BarTask, TimelineViewport};
use gantt_task_view::ui::gantt_chart::{show_gantt_chart, ChartView};
use gantt_task_view::ui::interaction::{OriginEvent, TaskAction};
use gantt_task_view::ui::label::LabelStyles;

fn viewport() -> TimelineViewport {
    let start = NaiveDate::from_ymd_opt(2026, 5, 4).unwrap();
    TimelineViewport::new(start, start + chrono::Duration::days(60))
}

fn wheel(delta_y: f32, modifiers: Modifiers) -> Event {
    Event::MouseWheel {
        unit: MouseWheelUnit::Point,
        delta: Vec2::new(0.0, delta_y),
        modifiers,
    }
}

fn pass(ctx: &Context, viewport: &mut TimelineViewport, events: Vec<Event>) {
    let config = ChartConfig::default();
    let label_styles = LabelStyles::default();
    let view = ChartView {
        bar_tasks: &[],
        config: &config,
        selected_task: None,
        label_styles: &label_styles,
    };
    let input = RawInput {
        screen_rect: Some(Rect::from_min_size(Pos2::ZERO, Vec2::new(800.0, 600.0))),
        events,
        ..Default::default()
    };
    let _ = ctx.run(input, |ctx| {
        CentralPanel::default().show(ctx, |ui| {
            let mut ignore = |_: TaskAction, _: &BarTask, _: Option<&OriginEvent>| {};
            show_gantt_chart(ui, &view, viewport, &mut ignore);
        });
    });
}

#[test]
fn ctrl_wheel_zooms_the_time_axis() {
    let ctx = Context::default();
    let mut viewport = viewport();
    let initial = viewport.pixels_per_day;
    let over_chart = Pos2::new(400.0, 300.0);

    pass(&ctx, &mut viewport, vec![Event::PointerMoved(over_chart)]);
    pass(&ctx, &mut viewport, vec![wheel(50.0, Modifiers::CTRL)]);
    assert!(viewport.pixels_per_day > initial);

    let zoomed = viewport.pixels_per_day;
    pass(&ctx, &mut viewport, vec![wheel(-50.0, Modifiers::CTRL)]);
    assert!(viewport.pixels_per_day < zoomed);
}

#[test]
fn plain_wheel_does_not_zoom() {
    let ctx = Context::default();
    let mut viewport = viewport();
    let initial = viewport.pixels_per_day;

    pass(&ctx, &mut viewport, vec![Event::PointerMoved(Pos2::new(400.0, 300.0))]);
    pass(&ctx, &mut viewport, vec![wheel(50.0, Modifiers::NONE)]);
    assert_eq!(viewport.pixels_per_day, initial);
}
