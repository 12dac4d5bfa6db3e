// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Page state: which logical page is current and why it last changed.

/// Why the current page last changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageStateKind {
    /// The user came to rest on a neighboring slot; the window should recycle
    /// by one and the active slot snap back to the center without animation.
    Rearrange,
    /// The page was set programmatically; the active slot should animate to
    /// the new resting page.
    Scroll,
    /// Nothing left to do until the next external change.
    Completed,
}

/// The current logical page and the pending action for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageState {
    /// Logical page index, always in `0..page_count`.
    pub index: usize,
    /// Pending action.
    pub state: PageStateKind,
}

impl PageState {
    /// A settled state at `index`.
    #[must_use]
    pub const fn completed(index: usize) -> Self {
        Self {
            index,
            state: PageStateKind::Completed,
        }
    }

    /// A state at `index` waiting for the window to recycle.
    #[must_use]
    pub const fn rearrange(index: usize) -> Self {
        Self {
            index,
            state: PageStateKind::Rearrange,
        }
    }

    /// A state at `index` waiting for an animated page turn.
    #[must_use]
    pub const fn scroll(index: usize) -> Self {
        Self {
            index,
            state: PageStateKind::Scroll,
        }
    }

    /// Returns `true` once no further action is needed.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        matches!(self.state, PageStateKind::Completed)
    }
}
