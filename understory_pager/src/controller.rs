// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The pager controller: owns the slot window and recycles it as pages move.

use core::fmt;

use kurbo::{Size, Vec2};

use crate::{Axis, Direction, PageSource, PagerConfig, SlotWindow, page_range};

/// Owns up to three page slots laid out along an axis and recycles them.
///
/// The controller only knows about logical page indices and slot bindings.
/// Deciding *when* to rearrange or reset is the job of
/// [`ListView`](crate::ListView); hosts that drive the controller directly
/// should follow the same rules:
///
/// - after the user comes to rest on a neighboring slot, call
///   [`PagerController::rearrange`] and, if it returns a direction, snap the
///   active slot back to the center;
/// - after a programmatic jump, call [`PagerController::reset`].
pub struct PagerController<S: PageSource> {
    source: S,
    window: SlotWindow<S::View>,
    previous_page: usize,
    page_count: usize,
    axis: Axis,
    page_size: Size,
}

impl<S: PageSource> PagerController<S> {
    /// Creates a controller bound to the neighborhood of `current_page`.
    ///
    /// The window holds `min(3, page_count)` slots for the rest of the
    /// controller's life. `page_count` must be at least one; with zero pages
    /// the window is empty and every operation is a no-op.
    #[must_use]
    pub fn new(source: S, config: &PagerConfig, current_page: usize, page_count: usize) -> Self {
        debug_assert!(page_count > 0, "PagerController needs at least one page");
        let current_page = current_page.min(page_count.saturating_sub(1));
        let window = SlotWindow::bind(
            &source,
            page_range(current_page, page_count),
            config.axis,
            config.page_size,
        );
        Self {
            source,
            window,
            previous_page: current_page,
            page_count,
            axis: config.axis,
            page_size: config.page_size,
        }
    }

    /// Last settled logical page.
    #[must_use]
    pub const fn previous_page(&self) -> usize {
        self.previous_page
    }

    /// Number of logical pages.
    #[must_use]
    pub const fn page_count(&self) -> usize {
        self.page_count
    }

    /// Layout axis.
    #[must_use]
    pub const fn axis(&self) -> Axis {
        self.axis
    }

    /// Size of one page.
    #[must_use]
    pub const fn page_size(&self) -> Size {
        self.page_size
    }

    /// The slot window, in logical order.
    #[must_use]
    pub const fn window(&self) -> &SlotWindow<S::View> {
        &self.window
    }

    /// The page source.
    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Size of the strip holding every slot.
    #[must_use]
    pub fn content_size(&self) -> Size {
        self.axis.strip_size(self.page_size, self.window.len())
    }

    /// Translation of the strip that brings slot `active_index` into the viewport.
    #[must_use]
    pub fn content_offset(&self, active_index: usize) -> Vec2 {
        let active_index = active_index.min(self.window.len().saturating_sub(1));
        #[allow(
            clippy::cast_precision_loss,
            reason = "Slot positions are bounded by the window length"
        )]
        let offset = self.axis.extent(self.page_size) * active_index as f64;
        self.axis.vec_at(-offset)
    }

    fn clamp_page(&self, page: usize) -> usize {
        page.min(self.page_count.saturating_sub(1))
    }

    /// Recycles the window by one slot toward `new_index`.
    ///
    /// Nothing happens unless `new_index` differs from the previous page and
    /// neither of them is the first or last page; near the edges there is no
    /// neighbor to recycle on both sides. When the window does recycle, the
    /// slot that fell off the trailing edge is rebound to the new neighbor and
    /// every slot is moved back to its canonical frame.
    ///
    /// A jump between two interior pages that are not neighbors cannot be
    /// caught up by recycling one slot; the window is [`reset`](Self::reset)
    /// instead and `None` is returned.
    ///
    /// The previous page becomes `new_index` in every case. Returns the
    /// direction of travel if the window recycled.
    pub fn rearrange(&mut self, new_index: usize) -> Option<Direction> {
        let new_index = self.clamp_page(new_index);
        let previous = core::mem::replace(&mut self.previous_page, new_index);
        let last = self.page_count.saturating_sub(1);

        let interior = |page: usize| page != 0 && page != last;
        if new_index == previous || !interior(previous) || !interior(new_index) {
            tracing::trace!(previous, new_index, "rearrange skipped");
            return None;
        }
        if new_index.abs_diff(previous) > 1 {
            tracing::debug!(previous, new_index, "rearrange too far, resetting");
            self.reset(new_index);
            return None;
        }

        let (direction, page) = if new_index > previous {
            (Direction::Forward, new_index + 1)
        } else {
            (Direction::Backward, new_index - 1)
        };
        let position = self.window.rotate(direction);
        let view = self.source.view_for(page);
        self.window.rebind(position, page, view);
        self.window.layout(self.axis, self.page_size);

        tracing::debug!(previous, new_index, ?direction, rebound = page, "window rearranged");
        Some(direction)
    }

    /// Rebinds every slot to the neighborhood of `new_index`.
    ///
    /// Ring order and frames are left alone. The previous page becomes
    /// `new_index`.
    pub fn reset(&mut self, new_index: usize) {
        let new_index = self.clamp_page(new_index);
        let pages = page_range(new_index, self.page_count);
        debug_assert_eq!(
            pages.len(),
            self.window.len(),
            "window length is fixed at construction"
        );
        for (position, page) in pages.clone().enumerate() {
            let view = self.source.view_for(page);
            self.window.rebind(position, page, view);
        }
        self.previous_page = new_index;
        tracing::debug!(new_index, ?pages, "window reset");
    }
}

impl<S> fmt::Debug for PagerController<S>
where
    S: PageSource,
    S::View: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PagerController")
            .field("window", &self.window)
            .field("previous_page", &self.previous_page)
            .field("page_count", &self.page_count)
            .field("axis", &self.axis)
            .field("page_size", &self.page_size)
            .finish_non_exhaustive()
    }
}
