//! Request workflows tying [`BookApi`] calls to [`BookStore`] transitions.
//!
//! Each operation dispatches its request action before returning the
//! future, so tokens are issued in call order even when the futures are
//! spawned and complete out of order.

use std::{future::Future, sync::Arc};

use flume::Sender;
use futures::future::try_join;
use tracing::{info, warn};

use crate::{
    event::events::{Event, Operation},
    http::BookApi,
    model::{BookId, CreateBookRequest, PageQuery, UpdateBookRequest},
    store::{BookAction, BookStore},
};

#[derive(Clone)]
pub struct Catalog {
    api: Arc<dyn BookApi>,
    store: Arc<BookStore>,
    event_tx: Sender<Event>,
}

impl Catalog {
    pub fn new(api: Arc<dyn BookApi>, store: Arc<BookStore>, event_tx: Sender<Event>) -> Self {
        Self {
            api,
            store,
            event_tx,
        }
    }

    pub fn store(&self) -> &Arc<BookStore> {
        &self.store
    }

    pub fn fetch_page(&self, query: PageQuery) -> impl Future<Output = ()> + Send + use<> {
        let token = self.store.issue_token();
        info!(
            "Fetching page {} (size {}, sort {} {})",
            query.page,
            query.page_size,
            query.filter.sort_by.as_str(),
            query.filter.sort_dir.as_str()
        );
        self.store.dispatch(BookAction::FetchPage {
            token,
            query: query.clone(),
        });

        let this = self.clone();
        async move {
            match this.api.fetch_page(&query).await {
                Ok(page) => {
                    if this.store.dispatch(BookAction::PageLoaded { token, page }) {
                        this.emit(Event::PageLoaded);
                    }
                }
                Err(e) => {
                    let message = e.to_string();
                    this.fail(
                        BookAction::PageFailed {
                            token,
                            error: message.clone(),
                        },
                        Operation::FetchPage,
                        message,
                    );
                }
            }
        }
    }

    pub fn fetch_all(&self) -> impl Future<Output = ()> + Send + use<> {
        let token = self.store.issue_token();
        info!("Fetching full catalog");
        self.store.dispatch(BookAction::FetchAll { token });

        let this = self.clone();
        async move {
            match this.api.fetch_books().await {
                Ok(books) => {
                    if this.store.dispatch(BookAction::AllLoaded { token, books }) {
                        this.emit(Event::PageLoaded);
                    }
                }
                Err(e) => {
                    let message = e.to_string();
                    this.fail(
                        BookAction::PageFailed {
                            token,
                            error: message.clone(),
                        },
                        Operation::FetchAll,
                        message,
                    );
                }
            }
        }
    }

    pub fn fetch_detail(&self, id: BookId) -> impl Future<Output = ()> + Send + use<> {
        let token = self.store.issue_token();
        info!("Fetching book {}", id);
        self.store.dispatch(BookAction::FetchDetail { token, id });

        let this = self.clone();
        async move {
            match this.api.fetch_book(id).await {
                Ok(book) => {
                    if this.store.dispatch(BookAction::DetailLoaded { token, book }) {
                        this.emit(Event::DetailLoaded(id));
                    }
                }
                Err(e) => {
                    let message = e.to_string();
                    this.fail(
                        BookAction::DetailFailed {
                            token,
                            error: message.clone(),
                        },
                        Operation::FetchDetail,
                        message,
                    );
                }
            }
        }
    }

    pub fn fetch_lookups(&self) -> impl Future<Output = ()> + Send + use<> {
        let this = self.clone();
        async move {
            let lookups = try_join(this.api.fetch_statuses(), this.api.fetch_genres()).await;
            match lookups {
                Ok((statuses, genres)) => {
                    info!(
                        "Loaded {} statuses and {} genres",
                        statuses.len(),
                        genres.len()
                    );
                    this.store
                        .dispatch(BookAction::LookupsLoaded { statuses, genres });
                    this.emit(Event::LookupsLoaded);
                }
                Err(e) => {
                    let message = e.to_string();
                    this.fail(
                        BookAction::LookupsFailed {
                            error: message.clone(),
                        },
                        Operation::FetchLookups,
                        message,
                    );
                }
            }
        }
    }

    pub fn create(&self, payload: CreateBookRequest) -> impl Future<Output = ()> + Send + use<> {
        let this = self.clone();
        let valid = payload.validate();
        if valid.is_ok() {
            info!("Creating '{}'", payload.title);
            self.store.dispatch(BookAction::Create {
                payload: payload.clone(),
            });
        }

        async move {
            if let Err(e) = valid {
                let message = e.to_string();
                this.fail(
                    BookAction::MutationFailed {
                        error: message.clone(),
                    },
                    Operation::Create,
                    message,
                );
                return;
            }

            match this.api.create_book(&payload).await {
                Ok(book) => {
                    info!("Created book {}", book.id);
                    this.store
                        .dispatch(BookAction::Created { book: book.clone() });
                    this.emit(Event::BookCreated(book));
                }
                Err(e) => {
                    let message = e.to_string();
                    this.fail(
                        BookAction::MutationFailed {
                            error: message.clone(),
                        },
                        Operation::Create,
                        message,
                    );
                }
            }
        }
    }

    pub fn update(&self, payload: UpdateBookRequest) -> impl Future<Output = ()> + Send + use<> {
        let this = self.clone();
        let valid = payload.validate();
        if valid.is_ok() {
            info!("Updating book {}", payload.id);
            self.store.dispatch(BookAction::Update {
                payload: payload.clone(),
            });
        }

        async move {
            if let Err(e) = valid {
                let message = e.to_string();
                this.fail(
                    BookAction::MutationFailed {
                        error: message.clone(),
                    },
                    Operation::Update,
                    message,
                );
                return;
            }

            match this.api.update_book(&payload).await {
                Ok(book) => {
                    this.store
                        .dispatch(BookAction::Updated { book: book.clone() });
                    this.emit(Event::BookUpdated(book));
                }
                Err(e) => {
                    let message = e.to_string();
                    this.fail(
                        BookAction::MutationFailed {
                            error: message.clone(),
                        },
                        Operation::Update,
                        message,
                    );
                }
            }
        }
    }

    pub fn delete(&self, id: BookId) -> impl Future<Output = ()> + Send + use<> {
        info!("Deleting book {}", id);
        self.store.dispatch(BookAction::Delete { id });

        let this = self.clone();
        async move {
            match this.api.delete_book(id).await {
                Ok(()) => {
                    this.store.dispatch(BookAction::Deleted { id });
                    this.emit(Event::BookDeleted(id));
                }
                Err(e) => {
                    let message = e.to_string();
                    this.fail(
                        BookAction::MutationFailed {
                            error: message.clone(),
                        },
                        Operation::Delete,
                        message,
                    );
                }
            }
        }
    }

    pub fn clear_selection(&self) {
        self.store.dispatch(BookAction::ClearSelection);
    }

    fn fail(&self, action: BookAction, operation: Operation, message: String) {
        warn!("{} failed: {}", operation, message);
        if self.store.dispatch(action) {
            self.emit(Event::OperationFailed { operation, message });
        }
    }

    fn emit(&self, event: Event) {
        let _ = self.event_tx.send(event);
    }
}
