// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Client-side pagination state
//!
//! The backend pages forward only: every list response carries an opaque
//! `next_cursor` or `null` for the terminal page. Two state machines sit
//! on top of that, both reset on any filter change so pages fetched under
//! an old filter combination can never appear merged with new results.
//!
//! [`PagedList`] accumulates pages into one flat list ("load more").
//! [`CursorHistory`] drives page-at-a-time tables: it remembers the
//! cursors used to reach earlier pages, and "previous page" re-issues a
//! fetch with the prior cursor instead of asking the backend to page
//! backwards.

/// Accumulated pages of one cursor-paginated listing.
#[derive(Debug, Clone)]
pub struct PagedList<T> {
    items: Vec<T>,
    next_cursor: Option<String>,
    pages_loaded: usize,
}

impl<T> Default for PagedList<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            next_cursor: None,
            pages_loaded: 0,
        }
    }
}

impl<T> PagedList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn pages_loaded(&self) -> usize {
        self.pages_loaded
    }

    /// Cursor for the next page request; `None` on the first fetch.
    pub fn request_cursor(&self) -> Option<&str> {
        self.next_cursor.as_deref()
    }

    /// False once a fetched page reported no continuation cursor. Before
    /// the first page lands there is always more to load.
    pub fn has_more(&self) -> bool {
        self.pages_loaded == 0 || self.next_cursor.is_some()
    }

    /// Append one fetched page. A failed page fetch simply never reaches
    /// this point, leaving earlier pages intact for a retry of the same
    /// request.
    pub fn record_page(&mut self, mut items: Vec<T>, next_cursor: Option<String>) {
        self.items.append(&mut items);
        self.next_cursor = next_cursor;
        self.pages_loaded += 1;
    }

    /// Discard everything, called on any filter change.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Cursor trail for page-at-a-time tables with a "previous page" action.
#[derive(Debug, Clone, Default)]
pub struct CursorHistory {
    /// Cursors that fetched the pages before the current one. The first
    /// page's "cursor" is `None`.
    previous: Vec<Option<String>>,
    current: Option<String>,
}

impl CursorHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cursor that fetches the current page.
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// 1-based page number for the pagination label.
    pub fn page_number(&self) -> usize {
        self.previous.len() + 1
    }

    pub fn can_go_back(&self) -> bool {
        !self.previous.is_empty()
    }

    /// Step to the page reached through `next_cursor`, remembering how the
    /// current page was fetched.
    pub fn advance(&mut self, next_cursor: String) {
        self.previous.push(self.current.take());
        self.current = Some(next_cursor);
    }

    /// Step back to the prior page's cursor. Returns false on page one.
    pub fn back(&mut self) -> bool {
        match self.previous.pop() {
            Some(prior) => {
                self.current = prior;
                true
            }
            None => false,
        }
    }

    /// Forget the whole trail, called on any filter change.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
