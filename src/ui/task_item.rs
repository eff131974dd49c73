//! A single task on the chart: its bar shape, its label and the actions it
//! forwards to the host.

use egui::{Context, Event, Id, Pos2, Rect, Response, Sense, Ui};

use crate::model::{BarTask, TaskId};
use crate::ui::bars::{select_shape, BarShape, PaintContext, ShapeOptions};
use crate::ui::interaction::{dispatch_key, HoverFocusTracker, OriginEvent, TaskAction, TaskEventHandler};
use crate::ui::label::{LabelAnchor, LabelLayout, LabelParams, LabelPlacement, LabelStyles};

/// Per-item state kept in egui memory between passes.
#[derive(Debug, Clone, Default)]
struct TaskItemState {
    label: LabelLayout,
    tracker: HoverFocusTracker,
}

/// What a task item did this pass.
#[derive(Debug)]
pub struct TaskItemResponse {
    pub response: Response,
    pub shape: BarShape,
    pub label: LabelAnchor,
    /// Screen rect of the painted label, `None` when the item was culled.
    pub label_rect: Option<Rect>,
}

/// Widget drawing one [`BarTask`].
pub struct TaskItem<'a> {
    task: &'a BarTask,
    origin: Pos2,
    task_height: f32,
    arrow_indent: f32,
    handle_width: f32,
    rtl: bool,
    is_date_changeable: bool,
    is_progress_changeable: bool,
    is_delete: bool,
    is_selected: bool,
    label_styles: Option<&'a LabelStyles>,
}

impl<'a> TaskItem<'a> {
    /// `origin` is the screen position of the chart's top-left corner.
    pub fn new(task: &'a BarTask, origin: Pos2) -> Self {
        Self {
            task,
            origin,
            task_height: 30.0,
            arrow_indent: 20.0,
            handle_width: 8.0,
            rtl: false,
            is_date_changeable: true,
            is_progress_changeable: true,
            is_delete: true,
            is_selected: false,
            label_styles: None,
        }
    }

    pub fn task_height(mut self, task_height: f32) -> Self {
        self.task_height = task_height;
        self
    }

    pub fn arrow_indent(mut self, arrow_indent: f32) -> Self {
        self.arrow_indent = arrow_indent;
        self
    }

    pub fn handle_width(mut self, handle_width: f32) -> Self {
        self.handle_width = handle_width;
        self
    }

    pub fn rtl(mut self, rtl: bool) -> Self {
        self.rtl = rtl;
        self
    }

    pub fn date_changeable(mut self, changeable: bool) -> Self {
        self.is_date_changeable = changeable;
        self
    }

    pub fn progress_changeable(mut self, changeable: bool) -> Self {
        self.is_progress_changeable = changeable;
        self
    }

    /// Whether the delete key may remove this task.
    pub fn deletable(mut self, is_delete: bool) -> Self {
        self.is_delete = is_delete;
        self
    }

    pub fn selected(mut self, is_selected: bool) -> Self {
        self.is_selected = is_selected;
        self
    }

    pub fn label_styles(mut self, styles: &'a LabelStyles) -> Self {
        self.label_styles = Some(styles);
        self
    }

    pub fn id_for(task: &TaskId) -> Id {
        Id::new(("task-item", task.as_str()))
    }

    /// Label placement state last stored for `task`.
    pub fn label_layout(ctx: &Context, task: &TaskId) -> Option<LabelLayout> {
        ctx.data_mut(|data| data.get_temp::<TaskItemState>(Self::id_for(task)))
            .map(|state| state.label)
    }

    /// Drop the stored state of a task that is no longer shown.
    pub fn forget(ctx: &Context, task: &TaskId) {
        ctx.data_mut(|data| data.remove::<TaskItemState>(Self::id_for(task)));
    }

    pub fn show(self, ui: &mut Ui, handler: &mut dyn TaskEventHandler) -> TaskItemResponse {
        let id = Self::id_for(&self.task.id);
        let mut state: TaskItemState = ui
            .ctx()
            .data_mut(|data| data.get_temp(id))
            .unwrap_or_default();

        let shape = select_shape(
            self.task,
            &ShapeOptions {
                rtl: self.rtl,
                is_date_changeable: self.is_date_changeable,
                is_progress_changeable: self.is_progress_changeable,
            },
        );
        let cx = PaintContext {
            origin: self.origin,
            task_height: self.task_height,
            handle_width: self.handle_width,
            is_selected: self.is_selected,
        };

        let painter = ui.painter();
        let bar_rect = shape.paint(painter, self.task, &cx);
        let response = ui.interact(bar_rect, id, Sense::click());

        // Phase one: place the label from what is known so far.
        let params = LabelParams {
            task_height: self.task_height,
            arrow_indent: self.arrow_indent,
            rtl: self.rtl,
        };
        let anchor = state
            .label
            .anchor(&self.task.geometry, self.task.has_children(), &params);

        let default_styles;
        let styles = match self.label_styles {
            Some(styles) => styles,
            None => {
                default_styles = LabelStyles::default();
                &default_styles
            }
        };

        let row_band = Rect::from_x_y_ranges(ui.clip_rect().x_range(), bar_rect.y_range());
        let label_rect = ui.is_rect_visible(row_band).then(|| {
            let style = styles.for_placement(anchor.placement);
            let galley = painter.layout_no_wrap(self.task.name.clone(), style.font.clone(), style.color);
            let rect = style
                .align
                .anchor_size(self.origin + anchor.pos.to_vec2(), galley.size());
            painter.galley(rect.min, galley, style.color);
            rect
        });

        // Phase two: reconcile against the label as painted.
        let measured = label_rect.map(|rect| rect.width());
        let changed = state.label.reconcile(&self.task.geometry, &self.task.name, measured);
        if changed && anchor.placement == LabelPlacement::Inside && !state.label.is_text_inside() {
            // Painted with the inside style; the outside anchor needs the outside width.
            let outside = &styles.outside;
            let galley = painter.layout_no_wrap(self.task.name.clone(), outside.font.clone(), outside.color);
            state.label.remeasure(galley.size().x);
        }
        if changed {
            tracing::trace!(
                task = %self.task.id,
                inside = state.label.is_text_inside(),
                "label placement changed"
            );
            ui.ctx().request_repaint();
        }

        self.forward_interactions(ui, &response, &mut state.tracker, handler);
        ui.ctx().data_mut(|data| data.insert_temp(id, state));

        TaskItemResponse {
            response,
            shape,
            label: anchor,
            label_rect,
        }
    }

    fn forward_interactions(
        &self,
        ui: &Ui,
        response: &Response,
        tracker: &mut HoverFocusTracker,
        handler: &mut dyn TaskEventHandler,
    ) {
        let pointer = OriginEvent::Pointer {
            pos: ui.input(|input| input.pointer.latest_pos()),
        };

        if response.clicked() {
            response.request_focus();
        }
        if let Some(action) = tracker.hover(response.hovered()) {
            self.emit(handler, action, Some(&pointer));
        }
        if response.double_clicked() {
            self.emit(handler, TaskAction::DoubleClick, Some(&pointer));
        }
        if let Some(action) = tracker.focus(response.has_focus()) {
            self.emit(handler, action, None);
        }

        if response.has_focus() {
            let is_delete = self.is_delete;
            let pressed = ui.input_mut(|input| {
                let mut actions = Vec::new();
                input.events.retain(|event| match event {
                    Event::Key {
                        key,
                        pressed: true,
                        modifiers,
                        ..
                    } => {
                        let dispatch = dispatch_key(*key, is_delete);
                        if let Some(action) = dispatch.action {
                            actions.push((action, *key, *modifiers));
                        }
                        !dispatch.stop_propagation
                    }
                    _ => true,
                });
                actions
            });
            for (action, key, modifiers) in pressed {
                self.emit(handler, action, Some(&OriginEvent::Key { key, modifiers }));
            }
        }
    }

    fn emit(&self, handler: &mut dyn TaskEventHandler, action: TaskAction, event: Option<&OriginEvent>) {
        tracing::trace!(task = %self.task.id, %action, "task action");
        handler.on_event_start(action, self.task, event);
    }
}
