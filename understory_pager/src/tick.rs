// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-threaded "run after the current tick" queue.
//!
//! Host UI frameworks generally forbid mutating layout while a render pass is
//! in flight. Work that reacts to a render pass is therefore scheduled here
//! and run by the host once the pass has finished:
//!
//! - [`TickQueue::schedule`] appends an action, coalescing it with an equal
//!   action that is already pending.
//! - [`TickQueue::begin_tick`] hands over everything scheduled so far, in
//!   order. Actions scheduled while those run land in the next tick.
//!
//! ```
//! use understory_pager::TickQueue;
//!
//! let mut queue = TickQueue::new();
//! assert!(queue.schedule("layout"));
//! assert!(!queue.schedule("layout"));
//! assert!(queue.schedule("notify"));
//!
//! let ran: Vec<_> = queue.begin_tick().collect();
//! assert_eq!(ran, ["layout", "notify"]);
//! assert!(queue.is_empty());
//! assert_eq!(queue.ticks(), 1);
//! ```

use alloc::collections::VecDeque;
use alloc::collections::vec_deque::IntoIter;

/// FIFO of deferred actions, drained once per host tick.
#[derive(Debug, Clone)]
pub struct TickQueue<A> {
    pending: VecDeque<A>,
    ticks: u64,
}

impl<A> Default for TickQueue<A> {
    fn default() -> Self {
        Self {
            pending: VecDeque::new(),
            ticks: 0,
        }
    }
}

impl<A: PartialEq> TickQueue<A> {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `action` for the next tick.
    ///
    /// Returns `false` if an equal action was already pending.
    pub fn schedule(&mut self, action: A) -> bool {
        if self.pending.contains(&action) {
            return false;
        }
        self.pending.push_back(action);
        true
    }

    /// Number of pending actions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Returns `true` if nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Number of ticks started so far.
    #[must_use]
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Starts a tick and returns the actions scheduled before it, in order.
    pub fn begin_tick(&mut self) -> IntoIter<A> {
        self.ticks += 1;
        core::mem::take(&mut self.pending).into_iter()
    }

    /// Drops every pending action.
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
