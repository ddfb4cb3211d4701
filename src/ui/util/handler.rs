use std::time::Instant;

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::{debug, info};

use crate::{
    event::events::Event,
    ui::{
        app::App,
        components::notification::Notification,
        input::InputHandler,
        message::AppMessage,
        state::Route,
        traits::Action,
        tui::{TerminalEvent, Tui},
        views::{BookDetail, BookForm, ConfirmDelete},
    },
};

pub struct EventHandler;

impl EventHandler {
    pub async fn handle_events(app: &mut App, tui: &mut Tui) -> color_eyre::Result<bool> {
        let mut should_render = false;
        if let Some(evt) = tui.next().await {
            if Self::handle_event(app, evt, tui).await? {
                should_render = true;
            }
        }

        while let Ok(evt) = app.event_rx.try_recv() {
            Self::handle_action(app, evt).await;
            should_render = true;
        }

        Ok(should_render)
    }

    pub async fn handle_event(
        app: &mut App,
        evt: TerminalEvent,
        tui: &mut Tui,
    ) -> color_eyre::Result<bool> {
        match evt {
            TerminalEvent::Init => {}
            TerminalEvent::FocusGained => {
                app.has_focus = true;
                tui.clear()?;
            }
            TerminalEvent::FocusLost => app.has_focus = false,
            TerminalEvent::Key(key) => Self::handle_key_event(app, key).await,
            TerminalEvent::Tick => {
                if app
                    .notification
                    .as_ref()
                    .is_some_and(|n| n.is_expired(Instant::now()))
                {
                    app.notification = None;
                }
                return Ok(app.has_focus);
            }
            TerminalEvent::Resize(..) => {}
        }

        Ok(true)
    }

    pub async fn handle_action(app: &mut App, evt: Event) {
        app.router.on_event(&evt, &app.ctx).await;

        match evt {
            Event::OpenDetail(id) => {
                app.router.push(Box::new(BookDetail::new(id)), &app.ctx).await;
            }
            Event::OpenCreate => {
                app.router.push(Box::new(BookForm::create()), &app.ctx).await;
            }
            Event::OpenEdit(book) => {
                let state = app.ctx.store().snapshot();
                app.router
                    .push(Box::new(BookForm::edit(&book, &state)), &app.ctx)
                    .await;
            }
            Event::ConfirmDelete(book) => {
                app.router
                    .set_overlay(Box::new(ConfirmDelete::new(&book)), &app.ctx)
                    .await;
            }
            Event::CreateBook(payload) => {
                let catalog = &app.ctx.catalog;
                app.task_manager
                    .spawn_if_idle("create", || catalog.create(payload));
            }
            Event::UpdateBook(payload) => {
                let catalog = &app.ctx.catalog;
                app.task_manager
                    .spawn_if_idle(format!("update:{}", payload.id), || catalog.update(payload));
            }
            Event::DeleteBook(id) => {
                let catalog = &app.ctx.catalog;
                app.task_manager
                    .spawn_if_idle(format!("delete:{}", id), || catalog.delete(id));
            }
            Event::BookCreated(book) => {
                app.router.pop_route(Route::BookForm, &app.ctx);
                app.notify(format!("Added \"{}\"", book.title_or_default()));
            }
            Event::BookUpdated(book) => {
                app.router.pop_route(Route::BookForm, &app.ctx);
                app.notify(format!("Saved \"{}\"", book.title_or_default()));
            }
            Event::BookDeleted(id) => {
                app.router.clear_overlay(&app.ctx);
                app.router.pop_route(Route::BookDetail, &app.ctx);
                app.notify(format!("Deleted book #{}", id));
            }
            Event::OperationFailed { operation, message } => {
                info!("{} failed: {}", operation, message);
                let ttl = app.ctx.config.notification_ttl;
                app.notification = Some(Notification::error(
                    format!("{} failed: {}", operation, message),
                    ttl,
                ));
            }
            loaded @ (Event::PageLoaded | Event::DetailLoaded(_) | Event::LookupsLoaded) => {
                debug!("{:?}", loaded);
            }
        }
    }

    async fn handle_key_event(app: &mut App, evt: KeyEvent) {
        if evt.kind != KeyEventKind::Press {
            return;
        }

        if evt.code == KeyCode::Char('c') && evt.modifiers == KeyModifiers::CONTROL {
            app.update(AppMessage::Quit);
            return;
        }

        let state = app.ctx.store().snapshot();
        let action = app.router.handle_input(evt, &state, &app.ctx).await;

        if let Some(action) = action {
            Self::dispatch_action(app, action);
            return;
        }

        if let Some(msg) = InputHandler::handle_key(evt) {
            app.update(msg);
        }
    }

    fn dispatch_action(app: &mut App, action: Action) {
        match action {
            Action::Quit => app.should_quit = true,
            Action::Back => app.router.back(&app.ctx),
            Action::None => {}
        }
    }
}
