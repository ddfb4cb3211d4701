pub mod action;
pub mod reducer;
pub mod selectors;
pub mod state;

pub use action::BookAction;
pub use state::BookStateModel;

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use arc_swap::ArcSwap;
use tracing::debug;

/// Monotonic id handed to each page or detail request and echoed back by its
/// result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(pub u64);

/// Holds the current [`BookStateModel`] snapshot. Transitions go through
/// [`reducer::reduce`] and swap in a whole new snapshot, so a reader never
/// sees a half-applied change.
pub struct BookStore {
    state: ArcSwap<BookStateModel>,
    sequence: AtomicU64,
}

impl Default for BookStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BookStore {
    pub fn new() -> Self {
        Self::with_state(BookStateModel::default())
    }

    pub fn with_state(state: BookStateModel) -> Self {
        Self {
            state: ArcSwap::from_pointee(state),
            sequence: AtomicU64::new(0),
        }
    }

    pub fn snapshot(&self) -> Arc<BookStateModel> {
        self.state.load_full()
    }

    pub fn issue_token(&self) -> RequestToken {
        RequestToken(self.sequence.fetch_add(1, Ordering::Relaxed) + 1)
    }

    /// Applies `action`. Returns `false` when it was dropped as stale.
    pub fn dispatch(&self, action: BookAction) -> bool {
        let name = action.name();
        let mut applied = true;

        self.state.rcu(|current| {
            match reducer::reduce(current, action.clone()) {
                Some(next) => {
                    applied = true;
                    Arc::new(next)
                }
                None => {
                    applied = false;
                    Arc::clone(current)
                }
            }
        });

        if applied {
            debug!("Applied {}", name);
        } else {
            debug!("Dropped stale {}", name);
        }
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FilterPatch, PageQuery};

    #[test]
    fn tokens_increase_monotonically() {
        let store = BookStore::new();
        let first = store.issue_token();
        let second = store.issue_token();
        assert!(second > first);
    }

    #[test]
    fn earlier_snapshots_are_untouched_by_dispatch() {
        let store = BookStore::new();
        let before = store.snapshot();

        store.dispatch(BookAction::SetFilter(FilterPatch {
            search: Some("hobbit".into()),
            ..FilterPatch::default()
        }));

        assert_eq!(before.filter.search, "");
        assert_eq!(store.snapshot().filter.search, "hobbit");
    }

    #[test]
    fn stale_results_report_as_dropped() {
        let store = BookStore::new();
        let old = store.issue_token();
        store.dispatch(BookAction::FetchPage {
            token: old,
            query: PageQuery::default(),
        });
        let new = store.issue_token();
        store.dispatch(BookAction::FetchPage {
            token: new,
            query: PageQuery::default(),
        });

        let before = store.snapshot();
        let applied = store.dispatch(BookAction::PageFailed {
            token: old,
            error: "late".into(),
        });

        assert!(!applied);
        assert_eq!(*store.snapshot(), *before);
    }
}
