use async_trait::async_trait;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
};

use crate::{
    controller::ListController,
    event::events::Event,
    model::{Book, PageQuery, SortColumn},
    store::{
        BookAction, BookStateModel,
        selectors::{self, LocalProjection},
    },
    ui::{
        components::spinner::Spinner,
        context::AppContext,
        state::Route,
        traits::{Action, View},
        util::{format_rating, format_year, truncate},
    },
    util::{colors, task::TaskManager},
};

const TITLE_WIDTH: usize = 40;
const AUTHOR_WIDTH: usize = 24;

pub struct BookList {
    controller: ListController,
    table_state: TableState,
    search_input: String,
    is_editing: bool,
    paged: bool,
    projection: LocalProjection,
    tasks: TaskManager,
}

impl BookList {
    pub fn new(page_size: u32, paged: bool) -> Self {
        Self {
            controller: ListController::new(page_size),
            table_state: TableState::default(),
            search_input: String::new(),
            is_editing: false,
            paged,
            projection: LocalProjection::new(),
            tasks: TaskManager::new(),
        }
    }

    fn fetch(&mut self, query: PageQuery, ctx: &AppContext) {
        self.table_state.select(Some(0));
        if self.paged {
            self.tasks.spawn("page", ctx.catalog.fetch_page(query));
        } else {
            ctx.store()
                .dispatch(BookAction::SetFilter(query.filter.into()));
            self.tasks.spawn("page", ctx.catalog.fetch_all());
        }
    }

    fn visible<'a>(&'a mut self, state: &'a BookStateModel) -> Vec<&'a Book> {
        if self.paged {
            selectors::books(state).iter().collect()
        } else {
            self.projection.get(state).iter().collect()
        }
    }

    fn selected_book(&mut self, state: &BookStateModel) -> Option<Book> {
        let index = self.table_state.selected()?;
        self.visible(state).get(index).map(|book| (*book).clone())
    }

    fn move_selection(&mut self, len: usize, delta: isize) {
        if len == 0 {
            return;
        }
        let current = self.table_state.selected().unwrap_or(0) as isize;
        let next = (current + delta).clamp(0, len as isize - 1);
        self.table_state.select(Some(next as usize));
    }

    fn handle_search_input(&mut self, key: KeyEvent, ctx: &AppContext) -> Option<Action> {
        match key.code {
            KeyCode::Enter => {
                self.is_editing = false;
                if self.search_input != self.controller.filter().search {
                    let query = self.controller.set_search(self.search_input.clone());
                    self.fetch(query, ctx);
                }
            }
            KeyCode::Esc => {
                self.is_editing = false;
                self.search_input = self.controller.filter().search.clone();
            }
            KeyCode::Backspace => {
                self.search_input.pop();
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return None,
            KeyCode::Char(c) => self.search_input.push(c),
            _ => {}
        }
        Some(Action::None)
    }

    fn render_header(&self, f: &mut Frame, area: Rect, state: &BookStateModel) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(20), Constraint::Length(44)])
            .split(area);

        let input_style = if self.is_editing {
            Style::default().fg(colors::PRIMARY)
        } else {
            Style::default().fg(colors::NEUTRAL)
        };
        let search = Paragraph::new(self.search_input.as_str()).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Search (/) ")
                .border_style(input_style),
        );
        f.render_widget(search, chunks[0]);

        let filter = self.controller.filter();
        let filters = Paragraph::new(Line::from(vec![
            Span::styled("Status ", Style::default().fg(colors::NEUTRAL)),
            Span::raw(selectors::status_name(state, filter.status_id)),
            Span::styled("  Genre ", Style::default().fg(colors::NEUTRAL)),
            Span::raw(selectors::genre_name(state, filter.genre_id)),
        ]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Filters (s/c) ")
                .border_style(Style::default().fg(colors::NEUTRAL)),
        );
        f.render_widget(filters, chunks[1]);
    }

    fn render_table(&mut self, f: &mut Frame, area: Rect, state: &BookStateModel) {
        let filter = self.controller.filter().clone();
        let header = Row::new(SortColumn::ALL.iter().enumerate().map(|(i, column)| {
            Cell::from(format!(
                "{} {}{}",
                i + 1,
                column.label(),
                selectors::sort_indicator(&filter, *column)
            ))
        }))
        .style(
            Style::default()
                .fg(colors::SECONDARY)
                .add_modifier(Modifier::BOLD),
        );

        let rows: Vec<Row> = self
            .visible(state)
            .into_iter()
            .map(|book| {
                Row::new(vec![
                    Cell::from(truncate(book.title_or_default(), TITLE_WIDTH)),
                    Cell::from(truncate(book.author_or_default(), AUTHOR_WIDTH)),
                    Cell::from(format_year(book.published_year)),
                    Cell::from(book.genre.clone().unwrap_or_default()),
                    Cell::from(book.status.clone().unwrap_or_default()),
                    Cell::from(format_rating(book.rating)),
                ])
            })
            .collect();

        if rows.is_empty() {
            let message = if filter.is_narrowed() {
                "No books match the current filters."
            } else {
                "No books yet. Press 'a' to add one."
            };
            f.render_widget(
                Paragraph::new(message).style(Style::default().fg(colors::NEUTRAL)),
                area,
            );
            return;
        }

        if self.table_state.selected().is_none_or(|i| i >= rows.len()) {
            self.table_state.select(Some(0));
        }

        let table = Table::new(
            rows,
            [
                Constraint::Percentage(32),
                Constraint::Percentage(20),
                Constraint::Length(6),
                Constraint::Percentage(14),
                Constraint::Percentage(12),
                Constraint::Length(11),
            ],
        )
        .header(header)
        .row_highlight_style(
            Style::default()
                .fg(colors::PRIMARY)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

        f.render_stateful_widget(table, area, &mut self.table_state);
    }

    fn render_footer(&self, f: &mut Frame, area: Rect, state: &BookStateModel) {
        let mut spans = Vec::with_capacity(5);
        if selectors::is_loading(state) {
            spans.push(Span::styled(
                format!("{} ", Spinner::frame()),
                Style::default().fg(colors::PRIMARY),
            ));
        }
        if let Some(pagination) = selectors::pagination(state) {
            let arrow = |enabled: bool, symbol: &'static str| {
                let color = if enabled { colors::PRIMARY } else { colors::NEUTRAL };
                Span::styled(symbol, Style::default().fg(color))
            };
            spans.push(arrow(pagination.has_prev(), "◀ "));
            spans.push(Span::raw(selectors::page_summary(state)));
            spans.push(arrow(pagination.has_next(), " ▶"));
        } else {
            spans.push(Span::raw(selectors::page_summary(state)));
        }
        spans.push(Span::styled(
            "   ←/→ page · z size · 1-6 sort · s/c status/genre · R reset",
            Style::default().fg(colors::NEUTRAL),
        ));
        f.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

#[async_trait]
impl View for BookList {
    fn route(&self) -> Route {
        Route::BookList
    }

    async fn on_mount(&mut self, ctx: &AppContext) {
        let state = ctx.store().snapshot();
        if state.statuses.is_empty() || state.genres.is_empty() {
            self.tasks.spawn("lookups", ctx.catalog.fetch_lookups());
        }
        let query = self.controller.refresh();
        self.fetch(query, ctx);
    }

    async fn on_event(&mut self, event: &Event, ctx: &AppContext) {
        if let Event::BookDeleted(_) = event {
            let state = ctx.store().snapshot();
            if self.paged && state.books.is_empty() {
                let query = self
                    .controller
                    .prev_page(state.pagination)
                    .unwrap_or_else(|| self.controller.refresh());
                self.fetch(query, ctx);
            }
        }
    }

    fn render(&mut self, f: &mut Frame, area: Rect, state: &BookStateModel, _ctx: &AppContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(area);

        self.render_header(f, chunks[0], state);

        if selectors::is_loading(state) && state.books.is_empty() {
            let spinner = Spinner::new()
                .with_style(Style::default().fg(colors::PRIMARY))
                .with_label("Loading books...");
            f.render_widget(spinner, chunks[1]);
        } else {
            self.render_table(f, chunks[1], state);
        }

        self.render_footer(f, chunks[2], state);
    }

    async fn handle_input(
        &mut self,
        key: KeyEvent,
        state: &BookStateModel,
        ctx: &AppContext,
    ) -> Option<Action> {
        if self.is_editing {
            return self.handle_search_input(key, ctx);
        }

        let len = self.visible(state).len();
        let pagination = selectors::pagination(state);

        let query = match key.code {
            KeyCode::Char('/') => {
                self.is_editing = true;
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.move_selection(len, 1);
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.move_selection(len, -1);
                None
            }
            KeyCode::Char('g') => {
                self.move_selection(len, -(len as isize));
                None
            }
            KeyCode::Char('G') => {
                self.move_selection(len, len as isize);
                None
            }
            KeyCode::Enter => {
                if let Some(book) = self.selected_book(state) {
                    ctx.send(Event::OpenDetail(book.id));
                }
                None
            }
            KeyCode::Char('a') => {
                ctx.send(Event::OpenCreate);
                None
            }
            KeyCode::Char('e') => {
                if let Some(book) = self.selected_book(state) {
                    ctx.send(Event::OpenEdit(book));
                }
                None
            }
            KeyCode::Char('d') => {
                if let Some(book) = self.selected_book(state) {
                    ctx.send(Event::ConfirmDelete(book));
                }
                None
            }
            KeyCode::Char('s') => {
                let next = state.statuses.next_id(self.controller.filter().status_id);
                Some(self.controller.set_status(next))
            }
            KeyCode::Char('S') => {
                let prev = state.statuses.prev_id(self.controller.filter().status_id);
                Some(self.controller.set_status(prev))
            }
            KeyCode::Char('c') if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                let next = state.genres.next_id(self.controller.filter().genre_id);
                Some(self.controller.set_genre(next))
            }
            KeyCode::Char('C') => {
                let prev = state.genres.prev_id(self.controller.filter().genre_id);
                Some(self.controller.set_genre(prev))
            }
            KeyCode::Char(c @ '1'..='6') => {
                let index = c as usize - '1' as usize;
                Some(self.controller.sort_by(SortColumn::ALL[index]))
            }
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(']') => {
                self.controller.next_page(pagination)
            }
            KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('[') => {
                self.controller.prev_page(pagination)
            }
            KeyCode::Char('z') => Some(self.controller.cycle_page_size()),
            KeyCode::Char('r') => Some(self.controller.refresh()),
            KeyCode::Char('R') => {
                self.search_input.clear();
                Some(self.controller.clear_filters())
            }
            _ => return None,
        };

        if let Some(query) = query {
            self.fetch(query, ctx);
        }
        Some(Action::None)
    }
}
