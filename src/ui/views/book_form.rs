use async_trait::async_trait;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::{
    event::events::{Event, Operation},
    model::{Book, BookId, CreateBookRequest, GenreId, StatusId},
    store::BookStateModel,
    ui::{
        context::AppContext,
        state::Route,
        traits::{Action, View},
    },
    util::colors,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Author,
    Isbn,
    Year,
    Genre,
    Status,
    Rating,
}

impl Field {
    const ORDER: [Field; 7] = [
        Field::Title,
        Field::Author,
        Field::Isbn,
        Field::Year,
        Field::Genre,
        Field::Status,
        Field::Rating,
    ];

    fn label(&self) -> &'static str {
        match self {
            Field::Title => "Title *",
            Field::Author => "Author *",
            Field::Isbn => "ISBN",
            Field::Year => "Year",
            Field::Genre => "Genre",
            Field::Status => "Status *",
            Field::Rating => "Rating",
        }
    }

    fn is_select(&self) -> bool {
        matches!(self, Field::Genre | Field::Status)
    }

    fn next(&self) -> Self {
        let i = Self::ORDER.iter().position(|f| f == self).unwrap_or(0);
        Self::ORDER[(i + 1) % Self::ORDER.len()]
    }

    fn prev(&self) -> Self {
        let i = Self::ORDER.iter().position(|f| f == self).unwrap_or(0);
        Self::ORDER[(i + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// Create/edit form. Text fields are edited in place; genre and status
/// cycle through the lookup tables with ←/→.
pub struct BookForm {
    editing: Option<BookId>,
    title: String,
    author: String,
    isbn: String,
    year: String,
    rating: String,
    genre_id: Option<GenreId>,
    status_id: Option<StatusId>,
    focus: Field,
    error: Option<String>,
    submitting: bool,
}

impl BookForm {
    pub fn create() -> Self {
        Self {
            editing: None,
            title: String::new(),
            author: String::new(),
            isbn: String::new(),
            year: String::new(),
            rating: String::new(),
            genre_id: None,
            status_id: None,
            focus: Field::Title,
            error: None,
            submitting: false,
        }
    }

    /// Prefills from `book`. Genre and status arrive as names and are mapped
    /// back to ids through the cached lookups.
    pub fn edit(book: &Book, state: &BookStateModel) -> Self {
        Self {
            editing: Some(book.id),
            title: book.title.clone().unwrap_or_default(),
            author: book.author.clone().unwrap_or_default(),
            isbn: book.isbn.clone().unwrap_or_default(),
            year: book.published_year.map(|y| y.to_string()).unwrap_or_default(),
            rating: book.rating.map(|r| r.to_string()).unwrap_or_default(),
            genre_id: book.genre.as_deref().and_then(|name| state.genres.id_for(name)),
            status_id: book.status.as_deref().and_then(|name| state.statuses.id_for(name)),
            ..Self::create()
        }
    }

    fn text_mut(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::Title => Some(&mut self.title),
            Field::Author => Some(&mut self.author),
            Field::Isbn => Some(&mut self.isbn),
            Field::Year => Some(&mut self.year),
            Field::Rating => Some(&mut self.rating),
            Field::Genre | Field::Status => None,
        }
    }

    fn cycle(&mut self, state: &BookStateModel, forward: bool) {
        match self.focus {
            Field::Genre => {
                self.genre_id = if forward {
                    state.genres.next_id(self.genre_id)
                } else {
                    state.genres.prev_id(self.genre_id)
                };
            }
            Field::Status => {
                self.status_id = if forward {
                    state.statuses.next_id(self.status_id)
                } else {
                    state.statuses.prev_id(self.status_id)
                };
            }
            _ => {}
        }
    }

    pub fn to_request(&self) -> Result<CreateBookRequest, String> {
        let published_year = parse_optional::<i32>(&self.year, "Year must be a whole number")?;
        let rating = parse_optional::<f64>(&self.rating, "Rating must be a number")?;
        let status_id = self.status_id.ok_or_else(|| "Status is required".to_string())?;

        let request = CreateBookRequest {
            title: self.title.trim().to_string(),
            author: self.author.trim().to_string(),
            isbn: Some(self.isbn.trim().to_string()).filter(|s| !s.is_empty()),
            published_year,
            genre_id: self.genre_id,
            status_id,
            rating,
        };
        request.validate().map_err(|e| e.to_string())?;
        Ok(request)
    }

    fn submit(&mut self, ctx: &AppContext) {
        match self.to_request() {
            Ok(request) => {
                self.error = None;
                self.submitting = true;
                match self.editing {
                    Some(id) => ctx.send(Event::UpdateBook(request.into_update(id))),
                    None => ctx.send(Event::CreateBook(request)),
                }
            }
            Err(message) => self.error = Some(message),
        }
    }

    fn value_line(&self, field: Field, state: &BookStateModel) -> Line<'_> {
        let focused = field == self.focus;
        let label_style = if focused {
            Style::default()
                .fg(colors::PRIMARY)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(colors::NEUTRAL)
        };

        let value = match field {
            Field::Title => self.title.clone(),
            Field::Author => self.author.clone(),
            Field::Isbn => self.isbn.clone(),
            Field::Year => self.year.clone(),
            Field::Rating => self.rating.clone(),
            Field::Genre => self
                .genre_id
                .and_then(|id| state.genres.name_for(id))
                .unwrap_or("None")
                .to_string(),
            Field::Status => self
                .status_id
                .and_then(|id| state.statuses.name_for(id))
                .unwrap_or("Select…")
                .to_string(),
        };

        let value = match (focused, field.is_select()) {
            (true, true) => format!("◀ {} ▶", value),
            (true, false) => format!("{}▏", value),
            _ => value,
        };

        Line::from(vec![
            Span::styled(format!("{:<10}", field.label()), label_style),
            Span::raw(value),
        ])
    }
}

fn parse_optional<T: std::str::FromStr>(raw: &str, message: &str) -> Result<Option<T>, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse().map(Some).map_err(|_| message.to_string())
}

#[async_trait]
impl View for BookForm {
    fn route(&self) -> Route {
        Route::BookForm
    }

    async fn on_event(&mut self, event: &Event, _ctx: &AppContext) {
        if let Event::OperationFailed {
            operation: Operation::Create | Operation::Update,
            message,
        } = event
        {
            self.submitting = false;
            self.error = Some(message.clone());
        }
    }

    fn render(&mut self, f: &mut Frame, area: Rect, state: &BookStateModel, _ctx: &AppContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(area);

        let title = match self.editing {
            Some(id) => format!(" Edit book #{} ", id),
            None => " New book ".to_string(),
        };

        let mut lines: Vec<Line> = Field::ORDER
            .iter()
            .map(|field| self.value_line(*field, state))
            .collect();
        lines.push(Line::default());
        if let Some(error) = &self.error {
            lines.push(Line::from(Span::styled(
                error.as_str(),
                Style::default().fg(colors::ERROR),
            )));
        } else if self.submitting {
            lines.push(Line::from(Span::styled(
                "Saving…",
                Style::default().fg(colors::ACCENT),
            )));
        }

        f.render_widget(
            Paragraph::new(lines).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .border_style(Style::default().fg(colors::SECONDARY)),
            ),
            chunks[0],
        );
        f.render_widget(
            Paragraph::new("tab/↑↓ field · ←/→ choose · enter save · esc cancel")
                .style(Style::default().fg(colors::NEUTRAL)),
            chunks[1],
        );
    }

    async fn handle_input(
        &mut self,
        key: KeyEvent,
        state: &BookStateModel,
        ctx: &AppContext,
    ) -> Option<Action> {
        if self.submitting {
            return Some(Action::None);
        }

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return None,
            KeyCode::Esc => return Some(Action::Back),
            KeyCode::Tab | KeyCode::Down => self.focus = self.focus.next(),
            KeyCode::BackTab | KeyCode::Up => self.focus = self.focus.prev(),
            KeyCode::Left => self.cycle(state, false),
            KeyCode::Right => self.cycle(state, true),
            KeyCode::Enter => self.submit(ctx),
            KeyCode::Backspace => {
                let focus = self.focus;
                if let Some(text) = self.text_mut(focus) {
                    text.pop();
                }
            }
            KeyCode::Char(c) => {
                let focus = self.focus;
                if let Some(text) = self.text_mut(focus) {
                    text.push(c);
                }
            }
            _ => {}
        }
        Some(Action::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GenreDto, LookupTable, StatusDto};

    fn lookups() -> BookStateModel {
        BookStateModel {
            statuses: LookupTable::new(vec![
                StatusDto {
                    id: 1,
                    name: Some("To Read".into()),
                },
                StatusDto {
                    id: 2,
                    name: Some("Finished".into()),
                },
            ]),
            genres: LookupTable::new(vec![GenreDto {
                id: 9,
                name: Some("Mystery".into()),
            }]),
            ..BookStateModel::default()
        }
    }

    #[test]
    fn edit_maps_names_back_to_ids() {
        let book = Book {
            id: 3,
            title: Some("Gaudy Night".into()),
            author: Some("Dorothy L. Sayers".into()),
            isbn: None,
            published_year: Some(1935),
            genre: Some("Mystery".into()),
            status: Some("Finished".into()),
            rating: Some(5.0),
            created_at: None,
            updated_at: None,
        };
        let form = BookForm::edit(&book, &lookups());
        let request = form.to_request().unwrap();
        assert_eq!(request.genre_id, Some(9));
        assert_eq!(request.status_id, 2);
        assert_eq!(request.published_year, Some(1935));
    }

    #[test]
    fn request_requires_status_and_numeric_year() {
        let mut form = BookForm::create();
        form.title = "Emma".into();
        form.author = "Jane Austen".into();
        assert_eq!(form.to_request().unwrap_err(), "Status is required");

        form.status_id = Some(1);
        form.year = "eighteen fifteen".into();
        assert_eq!(form.to_request().unwrap_err(), "Year must be a whole number");

        form.year = "1815".into();
        let request = form.to_request().unwrap();
        assert_eq!(request.isbn, None);
        assert_eq!(request.rating, None);
    }
}
