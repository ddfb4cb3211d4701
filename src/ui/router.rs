use ratatui::Frame;
use ratatui::crossterm::event::KeyEvent;
use ratatui::layout::Rect;

use crate::event::events::Event;
use crate::store::BookStateModel;
use crate::ui::context::AppContext;
use crate::ui::state::Route;
use crate::ui::traits::{Action, View};

/// View stack with an optional modal overlay on top. The bottom view is
/// never popped.
pub struct Router {
    stack: Vec<Box<dyn View>>,
    overlay: Option<Box<dyn View>>,
}

impl Router {
    pub fn new(initial_view: Box<dyn View>) -> Self {
        Self {
            stack: vec![initial_view],
            overlay: None,
        }
    }

    pub async fn mount_initial(&mut self, ctx: &AppContext) {
        if let Some(view) = self.stack.last_mut() {
            view.on_mount(ctx).await;
        }
    }

    pub async fn push(&mut self, mut view: Box<dyn View>, ctx: &AppContext) {
        view.on_mount(ctx).await;
        self.stack.push(view);
    }

    pub fn pop(&mut self, ctx: &AppContext) {
        if self.stack.len() > 1 {
            if let Some(mut view) = self.stack.pop() {
                view.on_unmount(ctx);
            }
        }
    }

    /// Pops views until `route` is no longer on top.
    pub fn pop_route(&mut self, route: Route, ctx: &AppContext) {
        while self.stack.len() > 1 && self.top_route() == Some(route) {
            self.pop(ctx);
        }
    }

    pub async fn set_overlay(&mut self, mut view: Box<dyn View>, ctx: &AppContext) {
        view.on_mount(ctx).await;
        self.overlay = Some(view);
    }

    pub fn clear_overlay(&mut self, ctx: &AppContext) {
        if let Some(mut overlay) = self.overlay.take() {
            overlay.on_unmount(ctx);
        }
    }

    pub fn has_overlay(&self) -> bool {
        self.overlay.is_some()
    }

    pub fn back(&mut self, ctx: &AppContext) {
        if self.has_overlay() {
            self.clear_overlay(ctx);
        } else {
            self.pop(ctx);
        }
    }

    /// Route of the top of the stack, ignoring any overlay.
    pub fn top_route(&self) -> Option<Route> {
        self.stack.last().map(|view| view.route())
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect, state: &BookStateModel, ctx: &AppContext) {
        if let Some(view) = self.stack.last_mut() {
            view.render(f, area, state, ctx);
        }
        if let Some(overlay) = &mut self.overlay {
            overlay.render(f, area, state, ctx);
        }
    }

    pub async fn handle_input(
        &mut self,
        key: KeyEvent,
        state: &BookStateModel,
        ctx: &AppContext,
    ) -> Option<Action> {
        if let Some(overlay) = &mut self.overlay {
            overlay.handle_input(key, state, ctx).await
        } else if let Some(view) = self.stack.last_mut() {
            view.handle_input(key, state, ctx).await
        } else {
            None
        }
    }

    pub async fn on_event(&mut self, event: &Event, ctx: &AppContext) {
        for view in &mut self.stack {
            view.on_event(event, ctx).await;
        }

        if let Some(overlay) = &mut self.overlay {
            overlay.on_event(event, ctx).await;
        }
    }
}
