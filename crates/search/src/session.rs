//! Search-as-you-type session.
//!
//! Ties the pieces together the way a search box uses them: text changes are
//! debounced, then ranked and presented; the activation key skips ranking and
//! navigates to the full search page instead.

use crate::catalog::Product;
use crate::debounce::Debouncer;
use crate::present::{Presenter, SearchView};
use crate::rank::rank;
use std::time::{Duration, Instant};

/// Keys the session reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Submit the query to the full search page
    Enter,
    /// Close the search box
    Escape,
}

/// New content for the result area.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionUpdate {
    /// The query became empty; hide results
    Clear,
    /// Replace the result area with this view
    Render(SearchView),
}

/// Something the host page should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    /// Navigate to this URL
    Navigate(String),
    /// Close the search box
    Close,
}

/// Live search over a borrowed catalog.
#[derive(Debug)]
pub struct SearchSession<'a> {
    catalog: &'a [Product],
    presenter: Presenter,
    debouncer: Debouncer<String>,
}

impl<'a> SearchSession<'a> {
    pub fn new(catalog: &'a [Product], presenter: Presenter, debounce: Duration) -> Self {
        Self {
            catalog,
            presenter,
            debouncer: Debouncer::new(debounce),
        }
    }

    /// Record a text change. The search runs once input settles.
    pub fn on_input(&mut self, raw: &str, now: Instant) {
        self.debouncer.schedule(raw.trim().to_string(), now);
    }

    /// Run the pending search if it is due.
    pub fn poll(&mut self, now: Instant) -> Option<SessionUpdate> {
        let query = self.debouncer.poll(now)?;
        Some(self.search(&query))
    }

    /// When [`poll`](Self::poll) should next be called.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    /// Handle a key press with the current raw input value.
    pub fn on_key(&mut self, key: Key, raw: &str) -> Option<SessionAction> {
        match key {
            Key::Enter => {
                let query = raw.trim();
                if query.is_empty() {
                    return None;
                }
                self.debouncer.cancel();
                let url = self.presenter.search_url(query);
                tracing::info!(query = %query, url = %url, "Navigating to search page");
                Some(SessionAction::Navigate(url))
            }
            Key::Escape => {
                self.debouncer.cancel();
                Some(SessionAction::Close)
            }
        }
    }

    /// Rank and present `query` immediately.
    pub fn search(&self, query: &str) -> SessionUpdate {
        if query.is_empty() {
            return SessionUpdate::Clear;
        }
        let results = rank(self.catalog, query);
        SessionUpdate::Render(self.presenter.present(&results, query))
    }
}
