use std::sync::Arc;

use flume::Receiver;
use ratatui::Frame;
use tracing::info;

use crate::{
    catalog::Catalog,
    config::AppConfig,
    event::events::Event,
    http::ApiService,
    store::{BookAction, BookStore},
    util::task::TaskManager,
};

use super::{
    components::notification::Notification,
    context::AppContext,
    layout::AppLayout,
    message::AppMessage,
    router::Router,
    tui::{self, TerminalEvent},
    util::handler::EventHandler,
    views::BookList,
};

pub struct App {
    pub event_rx: Receiver<Event>,
    pub ctx: AppContext,
    pub router: Router,
    pub task_manager: TaskManager,
    pub notification: Option<Notification>,
    pub has_focus: bool,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig) -> color_eyre::Result<Self> {
        let (event_tx, event_rx) = flume::unbounded();
        let api = Arc::new(ApiService::new(&config.api_url)?);
        let store = Arc::new(BookStore::new());
        let catalog = Catalog::new(api, store, event_tx.clone());

        info!(
            "Using book service at {} (page size {}, paged: {})",
            config.api_url, config.page_size, config.paged
        );

        let router = Router::new(Box::new(BookList::new(config.page_size, config.paged)));
        let ctx = AppContext {
            catalog,
            config: Arc::new(config),
            event_tx,
        };

        Ok(Self {
            event_rx,
            ctx,
            router,
            task_manager: TaskManager::new(),
            notification: None,
            has_focus: true,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> color_eyre::Result<()> {
        let mut tui = tui::Tui::new()?;
        tui.enter()?;

        self.router.mount_initial(&self.ctx).await;
        EventHandler::handle_event(self, TerminalEvent::Init, &mut tui).await?;

        let mut should_render = true;
        while !self.should_quit {
            if should_render {
                tui.draw(|f| self.ui(f))?;
            }
            should_render = EventHandler::handle_events(self, &mut tui).await?;
        }

        self.task_manager.abort_all();
        tui.exit()?;
        Ok(())
    }

    pub fn update(&mut self, msg: AppMessage) {
        match msg {
            AppMessage::Quit => self.should_quit = true,
            AppMessage::GoBack => self.router.back(&self.ctx),
            AppMessage::DismissError => {
                self.ctx.store().dispatch(BookAction::ClearError);
                self.notification = None;
            }
        }
    }

    pub fn notify(&mut self, message: impl Into<String>) {
        self.notification = Some(Notification::info(message, self.ctx.config.notification_ttl));
    }

    fn ui(&mut self, frame: &mut Frame) {
        if self.has_focus {
            let area = frame.area();
            AppLayout::new(self).render(frame, area);
        }
    }
}
