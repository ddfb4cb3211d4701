use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::{
    store::selectors,
    ui::{app::App, state::Route},
    util::colors,
};

pub struct AppLayout<'a> {
    pub app: &'a mut App,
}

impl<'a> AppLayout<'a> {
    pub fn new(app: &'a mut App) -> Self {
        Self { app }
    }

    pub fn render(self, f: &mut Frame, area: Rect) {
        let buf = f.buffer_mut();
        buf.set_style(area, Style::new().bg(colors::BACKGROUND));

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(area);

        let content_area = chunks[0];
        let status_area = chunks[1];

        let content_block = Block::default()
            .borders(Borders::ALL)
            .border_set(border::ROUNDED)
            .title(" Bookshelf ")
            .title_alignment(Alignment::Center);
        let content_inner = content_block.inner(content_area);
        f.render_widget(content_block, content_area);

        let state = self.app.ctx.store().snapshot();
        self.app
            .router
            .render(f, content_inner, &state, &self.app.ctx);

        if let Some(notification) = &self.app.notification {
            f.render_widget(notification, status_area);
        } else if let Some(error) = selectors::error(&state) {
            let line = Line::from(vec![
                Span::styled(" ✗ ", Style::default().fg(colors::ERROR)),
                Span::styled(error, Style::default().fg(colors::ERROR)),
                Span::styled("  (x to dismiss)", Style::default().fg(colors::NEUTRAL)),
            ]);
            f.render_widget(Paragraph::new(line), status_area);
        } else {
            let hints = match self.app.router.top_route() {
                Some(Route::BookList) => " enter open · a add · e edit · d delete · / search · q quit",
                Some(Route::BookDetail) => " e edit · d delete · esc back · q quit",
                _ => " esc back",
            };
            f.render_widget(
                Paragraph::new(hints).style(Style::default().fg(colors::NEUTRAL)),
                status_area,
            );
        }
    }
}
