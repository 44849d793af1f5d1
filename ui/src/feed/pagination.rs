//! Page-at-a-time list state for infinite-scroll feeds.
//!
//! Every load starts with [`PagedList::begin`], which hands out a
//! [`PageTicket`]. Only the most recent ticket can be applied; responses for
//! superseded loads are dropped. `has_more` is always derived from the list
//! as it stands after the merge, never from the length before it.

use api::types::Page;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMode {
    /// Start over from page 1 (first load, pull to refresh).
    Replace,
    /// Fetch the next page and extend the list.
    Append,
}

/// Receipt for a started load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageTicket {
    pub seq: u64,
    pub page: u32,
    pub mode: LoadMode,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PagedList<T> {
    items: Vec<T>,
    page_size: u32,
    next_page: u32,
    has_more: bool,
    loading: bool,
    loading_more: bool,
    error: Option<String>,
    seq: u64,
}

impl<T> PagedList<T> {
    pub fn new(page_size: u32) -> Self {
        Self {
            items: Vec::new(),
            page_size: page_size.max(1),
            next_page: 1,
            has_more: true,
            loading: false,
            loading_more: false,
            error: None,
            seq: 0,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// First page (or a refresh) in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_loading_more(&self) -> bool {
        self.loading_more
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Start a load. `Replace` always starts and supersedes whatever is in
    /// flight. `Append` is refused (`None`) while any load is running or once
    /// the end of the feed has been reached.
    pub fn begin(&mut self, mode: LoadMode) -> Option<PageTicket> {
        let page = match mode {
            LoadMode::Replace => {
                self.loading = true;
                self.loading_more = false;
                1
            }
            LoadMode::Append => {
                if self.loading || self.loading_more || !self.has_more {
                    return None;
                }
                self.loading_more = true;
                self.next_page
            }
        };

        self.seq += 1;
        self.error = None;
        Some(PageTicket {
            seq: self.seq,
            page,
            mode,
        })
    }

    fn is_current(&self, ticket: &PageTicket) -> bool {
        ticket.seq == self.seq
    }

    /// Merge a fetched page. Returns `false` for a stale ticket.
    pub fn apply(&mut self, ticket: PageTicket, page: Page<T>) -> bool {
        if !self.is_current(&ticket) {
            tracing::debug!(seq = ticket.seq, current = self.seq, "stale page ignored");
            return false;
        }

        let received = page.items.len();
        match ticket.mode {
            LoadMode::Replace => self.items = page.items,
            LoadMode::Append => self.items.extend(page.items),
        }

        self.has_more = match page.total {
            Some(total) => (self.items.len() as u64) < total,
            None => received >= self.page_size as usize,
        };
        self.next_page = ticket.page + 1;
        self.finish();
        true
    }

    /// Record a failed load. Items already shown stay. Returns `false` for a
    /// stale ticket.
    pub fn fail(&mut self, ticket: PageTicket, message: impl Into<String>) -> bool {
        if !self.is_current(&ticket) {
            return false;
        }
        self.error = Some(message.into());
        self.finish();
        true
    }

    /// Release a ticket whose load produced nothing to show (cancelled).
    pub fn abandon(&mut self, ticket: PageTicket) {
        if self.is_current(&ticket) {
            self.finish();
        }
    }

    fn finish(&mut self) {
        self.loading = false;
        self.loading_more = false;
    }
}

impl<T> Default for PagedList<T> {
    fn default() -> Self {
        Self::new(10)
    }
}
