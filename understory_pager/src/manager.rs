// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-list page state: current page, active slot, and change notification.

use alloc::boxed::Box;
use core::fmt;

use crate::{PageState, PageStateKind, PagerError, WINDOW_LEN, page_range};

/// Callback invoked with the final page index after each settle.
pub type PageChangedCallback = Box<dyn FnMut(usize)>;

/// State holder for one paging list.
///
/// The manager records *what* should be shown: the logical page, the pending
/// [`PageStateKind`], and which slot of the window is active. It never touches
/// the slots themselves; [`ListView`](crate::ListView) reads it on every
/// settle and writes the outcome back.
pub struct ListManager {
    current_page: PageState,
    page_count: usize,
    active_index: usize,
    on_page_changed: Option<PageChangedCallback>,
}

impl ListManager {
    /// Creates a manager for `page_count` pages starting at `starting_page`.
    ///
    /// `starting_page` is clamped into range. The active slot starts on the
    /// slot that holds the starting page: the center, or the matching edge for
    /// the first and last page.
    ///
    /// # Errors
    ///
    /// Returns [`PagerError::NoPages`] if `page_count` is zero.
    pub fn new(starting_page: usize, page_count: usize) -> Result<Self, PagerError> {
        if page_count == 0 {
            return Err(PagerError::NoPages);
        }
        let starting_page = starting_page.min(page_count - 1);
        let active_index = starting_page - page_range(starting_page, page_count).start;
        Ok(Self {
            current_page: PageState::completed(starting_page),
            page_count,
            active_index,
            on_page_changed: None,
        })
    }

    /// The current page and its pending action.
    #[must_use]
    pub const fn current_page(&self) -> PageState {
        self.current_page
    }

    /// Number of logical pages. Always at least one.
    #[must_use]
    pub const fn page_count(&self) -> usize {
        self.page_count
    }

    /// Active slot within the window.
    #[must_use]
    pub const fn active_index(&self) -> usize {
        self.active_index
    }

    /// Position of the last slot in the window.
    #[must_use]
    pub fn max_slot_index(&self) -> usize {
        self.page_count.min(WINDOW_LEN) - 1
    }

    /// Registers the callback fired once per settle with the final page.
    ///
    /// Replaces any previously registered callback.
    pub fn on_page_changed(&mut self, callback: impl FnMut(usize) + 'static) {
        self.on_page_changed = Some(Box::new(callback));
    }

    /// Removes the page-change callback.
    pub fn clear_page_changed(&mut self) {
        self.on_page_changed = None;
    }

    /// Requests an animated scroll to `page`.
    ///
    /// `page` is clamped into range. Returns `false` if the list is already
    /// settled on that page.
    pub fn scroll_to(&mut self, page: usize) -> bool {
        let page = page.min(self.page_count - 1);
        if self.current_page == PageState::completed(page) {
            return false;
        }
        self.current_page = PageState::scroll(page);
        true
    }

    /// Records that the user came to rest on slot `active_index` showing `page`.
    ///
    /// Returns `true` if the logical page changed and a rearrange is now
    /// pending.
    pub fn settle_on(&mut self, page: usize, active_index: usize) -> bool {
        self.set_active_index(active_index);
        let page = page.min(self.page_count - 1);
        if page == self.current_page.index {
            return false;
        }
        self.current_page = PageState::rearrange(page);
        true
    }

    /// Moves the active slot. Clamped to the window.
    pub fn set_active_index(&mut self, index: usize) {
        self.active_index = index.min(self.max_slot_index());
    }

    /// Marks the current page settled and notifies the page-change callback.
    ///
    /// Returns `false`, without notifying, if the page was already settled.
    pub fn complete(&mut self) -> bool {
        if self.current_page.is_completed() {
            return false;
        }
        self.current_page.state = PageStateKind::Completed;
        let page = self.current_page.index;
        tracing::debug!(page, "page settled");
        if let Some(callback) = self.on_page_changed.as_mut() {
            callback(page);
        }
        true
    }
}

impl fmt::Debug for ListManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListManager")
            .field("current_page", &self.current_page)
            .field("page_count", &self.page_count)
            .field("active_index", &self.active_index)
            .field("on_page_changed", &self.on_page_changed.is_some())
            .finish()
    }
}
