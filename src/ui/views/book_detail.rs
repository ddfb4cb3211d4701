use async_trait::async_trait;
use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::{
    event::events::Event,
    model::{Book, BookId},
    store::{BookStateModel, selectors},
    ui::{
        components::spinner::Spinner,
        context::AppContext,
        state::Route,
        traits::{Action, View},
        util::{format_rating, format_year},
    },
    util::{colors, task::TaskManager},
};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

pub struct BookDetail {
    id: BookId,
    tasks: TaskManager,
}

impl BookDetail {
    pub fn new(id: BookId) -> Self {
        Self {
            id,
            tasks: TaskManager::new(),
        }
    }

    fn book<'a>(&self, state: &'a BookStateModel) -> Option<&'a Book> {
        state.selected_book.as_ref().filter(|book| book.id == self.id)
    }
}

fn field(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<10}", label), Style::default().fg(colors::NEUTRAL)),
        Span::raw(value),
    ])
}

#[async_trait]
impl View for BookDetail {
    fn route(&self) -> Route {
        Route::BookDetail
    }

    async fn on_mount(&mut self, ctx: &AppContext) {
        self.tasks.spawn("detail", ctx.catalog.fetch_detail(self.id));
    }

    fn on_unmount(&mut self, ctx: &AppContext) {
        self.tasks.abort_all();
        ctx.catalog.clear_selection();
    }

    fn render(&mut self, f: &mut Frame, area: Rect, state: &BookStateModel, _ctx: &AppContext) {
        let Some(book) = self.book(state) else {
            if selectors::is_loading(state) {
                let spinner = Spinner::new()
                    .with_style(Style::default().fg(colors::PRIMARY))
                    .with_label("Loading book...");
                f.render_widget(spinner, area);
            } else {
                let message = selectors::error(state).unwrap_or("Book not found");
                f.render_widget(
                    Paragraph::new(message)
                        .style(Style::default().fg(colors::ERROR))
                        .wrap(Wrap { trim: true }),
                    area,
                );
            }
            return;
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(area);

        f.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(
                    book.title_or_default(),
                    Style::default()
                        .add_modifier(Modifier::BOLD)
                        .fg(colors::PRIMARY),
                ),
                Span::raw(" by "),
                Span::raw(book.author_or_default()),
            ]))
            .block(Block::default().borders(Borders::ALL).title(" Book ")),
            chunks[0],
        );

        let stamp = |value: Option<chrono::DateTime<chrono::Utc>>| {
            value
                .map(|v| v.format(TIMESTAMP_FORMAT).to_string())
                .unwrap_or_else(|| "—".to_string())
        };

        let lines = vec![
            field("ISBN", book.isbn.clone().unwrap_or_else(|| "—".into())),
            field("Year", format_year(book.published_year)),
            field("Genre", book.genre.clone().unwrap_or_else(|| "—".into())),
            field("Status", book.status.clone().unwrap_or_else(|| "—".into())),
            field("Rating", format_rating(book.rating)),
            Line::default(),
            field("Added", stamp(book.created_at)),
            field("Updated", stamp(book.updated_at)),
        ];
        f.render_widget(
            Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Details ")),
            chunks[1],
        );

        f.render_widget(
            Paragraph::new("e edit · d delete · esc back")
                .style(Style::default().fg(colors::NEUTRAL)),
            chunks[2],
        );
    }

    async fn handle_input(
        &mut self,
        key: KeyEvent,
        state: &BookStateModel,
        ctx: &AppContext,
    ) -> Option<Action> {
        let book = self.book(state)?;
        match key.code {
            KeyCode::Char('e') => {
                ctx.send(Event::OpenEdit(book.clone()));
                Some(Action::None)
            }
            KeyCode::Char('d') => {
                ctx.send(Event::ConfirmDelete(book.clone()));
                Some(Action::None)
            }
            _ => None,
        }
    }
}
