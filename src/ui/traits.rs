use async_trait::async_trait;
use ratatui::crossterm::event::KeyEvent;
use ratatui::{Frame, layout::Rect};

use crate::{event::events::Event, store::BookStateModel, ui::context::AppContext};

use super::state::Route;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    Back,
    /// Key consumed, nothing else to do.
    None,
}

#[async_trait]
pub trait View: Send {
    fn route(&self) -> Route;

    async fn on_mount(&mut self, _ctx: &AppContext) {}

    fn on_unmount(&mut self, _ctx: &AppContext) {}

    fn render(&mut self, f: &mut Frame, area: Rect, state: &BookStateModel, ctx: &AppContext);

    async fn handle_input(
        &mut self,
        key: KeyEvent,
        state: &BookStateModel,
        ctx: &AppContext,
    ) -> Option<Action>;

    async fn on_event(&mut self, _event: &Event, _ctx: &AppContext) {}
}
