// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_pager --heading-base-level=0

//! Understory Pager: a recycling core for full-page paging lists.
//!
//! A paging list shows one full-viewport page at a time and lets the user
//! swipe to its neighbors along one axis. This crate keeps at most three page
//! renderers ("slots") alive, whatever the page count, and recycles them as
//! the user moves through the list:
//!
//! - [`page_range`]: the pages a window should hold for a given current page.
//! - [`SlotWindow`]: a fixed ring of up to three [`Slot`]s. Recycling moves the
//!   ring head; slots are rebound, never recreated.
//! - [`PagerController`]: owns the window and implements the two recycling
//!   operations, [`PagerController::rearrange`] (shift by one after a swipe)
//!   and [`PagerController::reset`] (rebind everything after a jump).
//! - [`ListManager`]: the logical page, its [`PageState`], the active slot and
//!   the page-change callback.
//! - [`ListView`]: ties the two together, defers its work through a
//!   [`TickQueue`] so nothing moves mid-render, and reports what the host
//!   should do as [`ListEvent`]s.
//!
//! This crate deliberately does **not** recognize gestures, run animations,
//! or lay out anything beyond the slot frames. Host frameworks are
//! responsible for:
//!
//! - Rendering each slot's view at its [`Slot::frame`], translated by
//!   [`ListView::content_offset`].
//! - Calling [`ListView::settle_at_slot`] when a drag comes to rest and
//!   [`ListView::update`] on every render pass.
//! - Calling [`ListView::run_tick`] after each render pass and applying
//!   [`ListView::drain_events`].
//!
//! ## Minimal example
//!
//! ```rust
//! use std::{cell::RefCell, rc::Rc};
//! use understory_pager::{ListManager, ListView};
//!
//! // Ten pages; the "view" for a page is just a label here.
//! let manager = ListManager::new(4, 10).unwrap();
//! let mut list = ListView::horizontal(manager, |page: usize| format!("page {page}"));
//!
//! let changes = Rc::new(RefCell::new(Vec::new()));
//! let sink = Rc::clone(&changes);
//! list.on_page_changed(move |page| sink.borrow_mut().push(page));
//!
//! // The user swipes forward and comes to rest on the trailing slot.
//! list.settle_at_slot(2);
//! list.run_tick();
//!
//! // One slot was recycled to page 6; the window is centered on page 5.
//! let pages: Vec<usize> = list.controller().window().pages().collect();
//! assert_eq!(pages, [4, 5, 6]);
//! assert_eq!(list.manager().active_index(), 1);
//! assert_eq!(*changes.borrow(), [5]);
//!
//! // A programmatic jump turns the page, rebinds, and snaps back to center.
//! list.scroll_to(8);
//! list.run_tick();
//! let pages: Vec<usize> = list.controller().window().pages().collect();
//! assert_eq!(pages, [7, 8, 9]);
//! assert_eq!(*changes.borrow(), [5, 8]);
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo`.
//! - `libm`: enables `no_std` builds that rely on `libm` for floating-point math.
//!
//! Diagnostics are emitted through `tracing`; no subscriber is installed.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod controller;
mod error;
mod list_view;
mod manager;
mod source;
mod state;
mod tick;
mod window;

pub use config::{Axis, EarlyCutoffConfig, PageTurnAnimation, PageTurnType, PagerConfig};
pub use controller::PagerController;
pub use error::PagerError;
pub use list_view::{ListEvent, ListView};
pub use manager::{ListManager, PageChangedCallback};
pub use source::PageSource;
pub use state::{PageState, PageStateKind};
pub use tick::TickQueue;
pub use window::{CENTER_SLOT, Direction, Slot, SlotId, SlotWindow, WINDOW_LEN, page_range};
