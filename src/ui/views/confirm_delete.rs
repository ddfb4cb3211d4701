use async_trait::async_trait;
use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Modifier, Style},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::{
    event::events::Event,
    model::{Book, BookId},
    store::BookStateModel,
    ui::{
        context::AppContext,
        state::Route,
        traits::{Action, View},
        util::truncate,
    },
    util::colors,
};

const POPUP_WIDTH: u16 = 50;
const POPUP_HEIGHT: u16 = 7;

pub struct ConfirmDelete {
    id: BookId,
    title: String,
}

impl ConfirmDelete {
    pub fn new(book: &Book) -> Self {
        Self {
            id: book.id,
            title: book.title_or_default().to_string(),
        }
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    popup
}

#[async_trait]
impl View for ConfirmDelete {
    fn route(&self) -> Route {
        Route::ConfirmDelete
    }

    fn render(&mut self, f: &mut Frame, area: Rect, _state: &BookStateModel, _ctx: &AppContext) {
        let popup = centered(area, POPUP_WIDTH.min(area.width), POPUP_HEIGHT.min(area.height));
        f.render_widget(Clear, popup);

        let lines = vec![
            Line::from("Delete this book?"),
            Line::from(Span::styled(
                truncate(&self.title, POPUP_WIDTH as usize - 4),
                Style::default()
                    .fg(colors::PRIMARY)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::default(),
            Line::from(Span::styled(
                "y confirm · n cancel",
                Style::default().fg(colors::NEUTRAL),
            )),
        ];

        f.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_set(border::ROUNDED)
                        .border_style(Style::default().fg(colors::ERROR))
                        .title(" Confirm ")
                        .style(Style::default().bg(colors::BACKGROUND)),
                ),
            popup,
        );
    }

    async fn handle_input(
        &mut self,
        key: KeyEvent,
        _state: &BookStateModel,
        ctx: &AppContext,
    ) -> Option<Action> {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                ctx.send(Event::DeleteBook(self.id));
                Some(Action::Back)
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(Action::Back),
            _ => Some(Action::None),
        }
    }
}
