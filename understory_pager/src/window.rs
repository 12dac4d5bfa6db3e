// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The three-slot window and the page-range rule that feeds it.

use core::ops::Range;

use kurbo::{Rect, Size};
use smallvec::SmallVec;

use crate::{Axis, PageSource};

/// Maximum number of slots in a window.
pub const WINDOW_LEN: usize = 3;

/// Logical position of the center slot.
pub const CENTER_SLOT: usize = 1;

/// Returns the pages a window should hold when `index` is current.
///
/// The current page is kept in the center except at the first and last page,
/// where the window pins to the edge. `index` is clamped into `0..page_count`
/// first. The result always holds `min(3, page_count)` indices.
///
/// ```
/// use understory_pager::page_range;
///
/// assert_eq!(page_range(0, 10), 0..3);
/// assert_eq!(page_range(5, 10), 4..7);
/// assert_eq!(page_range(9, 10), 7..10);
/// assert_eq!(page_range(1, 2), 0..2);
/// ```
#[must_use]
pub fn page_range(index: usize, page_count: usize) -> Range<usize> {
    if page_count == 0 {
        return 0..0;
    }
    let last = page_count - 1;
    let index = index.min(last);
    let start = if index == last {
        last.saturating_sub(WINDOW_LEN - 1)
    } else {
        index.saturating_sub(1)
    };
    let end = (start + WINDOW_LEN - 1).min(last);
    start..end + 1
}

/// Direction the logical page moved in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Toward higher page indices.
    Forward,
    /// Toward lower page indices.
    Backward,
}

/// Stable identity of a slot for the life of its window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(u8);

impl SlotId {
    /// Returns the raw id, in creation order starting at zero.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0 as usize
    }
}

/// One renderer binding in the window.
#[derive(Debug, Clone)]
pub struct Slot<V> {
    id: SlotId,
    page: usize,
    view: V,
    frame: Rect,
    generation: u32,
}

impl<V> Slot<V> {
    /// Stable identity of the renderer behind this slot.
    #[must_use]
    pub const fn id(&self) -> SlotId {
        self.id
    }

    /// Logical page currently bound.
    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    /// Content currently bound.
    #[must_use]
    pub const fn view(&self) -> &V {
        &self.view
    }

    /// Frame of this slot within the pager's strip.
    #[must_use]
    pub const fn frame(&self) -> Rect {
        self.frame
    }

    /// Number of times this slot has been rebound since it was created.
    #[must_use]
    pub const fn generation(&self) -> u32 {
        self.generation
    }
}

/// Fixed ring of up to [`WINDOW_LEN`] slots.
///
/// Positions passed to and returned from the window are *logical*: position
/// 0 is the leading slot along the axis. Recycling only moves the ring head,
/// so slots are never reallocated once the window exists.
#[derive(Debug, Clone)]
pub struct SlotWindow<V> {
    slots: SmallVec<[Slot<V>; WINDOW_LEN]>,
    head: usize,
}

impl<V> SlotWindow<V> {
    /// Binds one slot per page in `pages` and lays them out along `axis`.
    pub(crate) fn bind<S>(source: &S, pages: Range<usize>, axis: Axis, page_size: Size) -> Self
    where
        S: PageSource<View = V> + ?Sized,
    {
        debug_assert!(
            pages.len() <= WINDOW_LEN,
            "a window holds at most {WINDOW_LEN} pages; got {pages:?}"
        );
        let slots = pages
            .take(WINDOW_LEN)
            .enumerate()
            .map(|(position, page)| {
                #[allow(
                    clippy::cast_possible_truncation,
                    reason = "Positions are bounded by WINDOW_LEN"
                )]
                let id = SlotId(position as u8);
                Slot {
                    id,
                    page,
                    view: source.view_for(page),
                    frame: Rect::ZERO,
                    generation: 0,
                }
            })
            .collect();
        let mut window = Self { slots, head: 0 };
        window.layout(axis, page_size);
        window
    }

    /// Number of slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if the window holds no slots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn physical(&self, position: usize) -> usize {
        (self.head + position) % self.slots.len()
    }

    /// Slot at logical `position`, if any.
    #[must_use]
    pub fn get(&self, position: usize) -> Option<&Slot<V>> {
        if position >= self.slots.len() {
            return None;
        }
        self.slots.get(self.physical(position))
    }

    /// Slots in logical order.
    pub fn iter(&self) -> impl Iterator<Item = &Slot<V>> + '_ {
        (0..self.slots.len()).map(move |position| &self.slots[self.physical(position)])
    }

    /// Bound pages in logical order.
    pub fn pages(&self) -> impl Iterator<Item = usize> + '_ {
        self.iter().map(Slot::page)
    }

    /// Advances or retreats the ring head by one.
    ///
    /// Returns the logical position the recycled slot now occupies. Frames are
    /// left stale until the next layout.
    pub(crate) fn rotate(&mut self, direction: Direction) -> usize {
        let len = self.slots.len();
        debug_assert!(len > 0, "cannot rotate an empty window");
        match direction {
            Direction::Forward => {
                self.head = (self.head + 1) % len;
                len - 1
            }
            Direction::Backward => {
                self.head = (self.head + len - 1) % len;
                0
            }
        }
    }

    /// Rebinds the slot at logical `position` to `page`.
    pub(crate) fn rebind(&mut self, position: usize, page: usize, view: V) {
        let index = self.physical(position);
        let slot = &mut self.slots[index];
        slot.page = page;
        slot.view = view;
        slot.generation = slot.generation.wrapping_add(1);
    }

    /// Puts every slot at its canonical frame for its logical position.
    pub(crate) fn layout(&mut self, axis: Axis, page_size: Size) {
        let extent = axis.extent(page_size);
        for position in 0..self.slots.len() {
            let index = self.physical(position);
            #[allow(
                clippy::cast_precision_loss,
                reason = "Positions are bounded by WINDOW_LEN"
            )]
            let offset = extent * position as f64;
            self.slots[index].frame = Rect::from_origin_size(axis.point_at(offset), page_size);
        }
    }
}
