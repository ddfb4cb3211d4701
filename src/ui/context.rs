use std::sync::Arc;

use flume::Sender;

use crate::{catalog::Catalog, config::AppConfig, event::events::Event, store::BookStore};

/// Handles threaded to every view: the catalog workflows (and through them
/// the store), configuration, and the application event channel.
#[derive(Clone)]
pub struct AppContext {
    pub catalog: Catalog,
    pub config: Arc<AppConfig>,
    pub event_tx: Sender<Event>,
}

impl AppContext {
    pub fn store(&self) -> &Arc<BookStore> {
        self.catalog.store()
    }

    pub fn send(&self, event: Event) {
        let _ = self.event_tx.send(event);
    }
}
