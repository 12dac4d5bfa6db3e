// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Orchestration between host input, the [`ListManager`], and the [`PagerController`].

use alloc::vec::Vec;
use core::fmt;
use core::ops::Range;

use kurbo::Vec2;

use crate::{
    Axis, CENTER_SLOT, Direction, ListManager, PageSource, PageState, PageStateKind,
    PageTurnAnimation, PagerConfig, PagerController, Slot, TickQueue, page_range,
};

/// Something the host should apply to its view tree.
#[derive(Debug, Clone, PartialEq)]
pub enum ListEvent {
    /// `page` is about to be displayed. Emitted on every update; an undrained
    /// one is updated in place rather than repeated.
    WillDisplay {
        /// Current logical page.
        page: usize,
    },
    /// The active slot moved.
    ///
    /// With an animation the host should animate its strip to the new slot;
    /// without one it should jump there immediately.
    ActiveIndexChanged {
        /// New active slot.
        index: usize,
        /// Animation to use, if any.
        animation: Option<PageTurnAnimation>,
    },
    /// The window recycled one slot; slot frames were reset.
    Rearranged {
        /// Direction of travel.
        direction: Direction,
    },
    /// Every slot was rebound to `pages`.
    Reset {
        /// Pages now bound, in slot order.
        pages: Range<usize>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Deferred {
    /// Settle the page state this was scheduled for.
    Settle(PageState),
}

/// A paging list: manager, controller, and the deferred work between them.
///
/// The host drives the list with four calls:
///
/// - [`ListView::settle_at_slot`] when a drag comes to rest,
/// - [`ListView::scroll_to`] for programmatic page changes,
/// - [`ListView::update`] on every render pass,
/// - [`ListView::run_tick`] once the render pass has finished.
///
/// Changes are never applied during the call that causes them. They are
/// queued and applied by the next [`ListView::run_tick`]; the host then
/// applies [`ListView::drain_events`] to its own views. A queued settle only
/// runs if the page state it was scheduled for is still current, so a burst
/// of gestures within one tick settles once, on the last one.
pub struct ListView<S: PageSource> {
    manager: ListManager,
    controller: PagerController<S>,
    config: PagerConfig,
    queue: TickQueue<Deferred>,
    events: Vec<ListEvent>,
}

impl<S: PageSource> ListView<S> {
    /// Creates a list showing `manager`'s current page.
    #[must_use]
    pub fn new(manager: ListManager, source: S, config: PagerConfig) -> Self {
        let current = manager.current_page();
        let controller =
            PagerController::new(source, &config, current.index, manager.page_count());
        Self {
            manager,
            controller,
            config,
            queue: TickQueue::new(),
            events: Vec::new(),
        }
    }

    /// Creates a horizontally paging list with default configuration.
    #[must_use]
    pub fn horizontal(manager: ListManager, source: S) -> Self {
        Self::new(manager, source, PagerConfig::new(Axis::Horizontal))
    }

    /// Creates a vertically paging list with default configuration.
    #[must_use]
    pub fn vertical(manager: ListManager, source: S) -> Self {
        Self::new(manager, source, PagerConfig::new(Axis::Vertical))
    }

    /// The page state holder.
    #[must_use]
    pub const fn manager(&self) -> &ListManager {
        &self.manager
    }

    /// The slot controller.
    #[must_use]
    pub const fn controller(&self) -> &PagerController<S> {
        &self.controller
    }

    /// Configuration this list was built with.
    #[must_use]
    pub const fn config(&self) -> &PagerConfig {
        &self.config
    }

    /// Whether the host should let drags bounce past the first and last page.
    #[must_use]
    pub const fn bounces(&self) -> bool {
        self.config.bounces
    }

    /// Returns `true` if deferred work is waiting for [`ListView::run_tick`].
    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.queue.is_empty()
    }

    /// Translation of the slot strip for the current active slot.
    #[must_use]
    pub fn content_offset(&self) -> Vec2 {
        self.controller.content_offset(self.manager.active_index())
    }

    /// Registers the callback fired once per settle with the final page.
    pub fn on_page_changed(&mut self, callback: impl FnMut(usize) + 'static) {
        self.manager.on_page_changed(callback);
    }

    /// Number of events waiting for [`ListView::drain_events`].
    #[must_use]
    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    /// Takes the events produced since the last drain.
    ///
    /// Hosts that never drain still see a bounded buffer: will-display
    /// notifications and back-to-back active slot changes collapse into the
    /// latest one.
    pub fn drain_events(&mut self) -> alloc::vec::Drain<'_, ListEvent> {
        self.events.drain(..)
    }

    /// Reacts to a render pass.
    ///
    /// Emits [`ListEvent::WillDisplay`] for the current page and, unless the
    /// page is settled, schedules a settle for the next tick.
    pub fn update(&mut self) {
        let current = self.manager.current_page();
        self.push_event(ListEvent::WillDisplay {
            page: current.index,
        });
        if current.is_completed() {
            return;
        }
        if !self.queue.schedule(Deferred::Settle(current)) {
            tracing::trace!(?current, "settle already pending");
        }
    }

    /// Requests an animated scroll to `page`, clamped into range.
    ///
    /// Returns `false` if the list is already settled on that page.
    pub fn scroll_to(&mut self, page: usize) -> bool {
        if !self.manager.scroll_to(page) {
            return false;
        }
        self.update();
        true
    }

    /// Records that a drag came to rest on slot `slot`.
    ///
    /// The slot is clamped into the window and mapped to the page it shows.
    /// Returns `true` if the logical page changed.
    pub fn settle_at_slot(&mut self, slot: usize) -> bool {
        let window = self.controller.window();
        let slot = slot.min(window.len().saturating_sub(1));
        let Some(page) = window.get(slot).map(Slot::page) else {
            return false;
        };
        if !self.manager.settle_on(page, slot) {
            // Same page; the host may still have moved between slots.
            self.push_active_index(None);
            return false;
        }
        self.update();
        true
    }

    /// Runs the work deferred before this tick.
    pub fn run_tick(&mut self) {
        for action in self.queue.begin_tick() {
            match action {
                Deferred::Settle(scheduled) => {
                    if scheduled != self.manager.current_page() {
                        tracing::trace!(?scheduled, "settle superseded");
                        continue;
                    }
                    self.settle();
                }
            }
        }
    }

    fn settle(&mut self) {
        let current = self.manager.current_page();
        match current.state {
            PageStateKind::Rearrange => self.settle_rearrange(current.index),
            PageStateKind::Scroll => self.settle_scroll(current.index),
            PageStateKind::Completed => {}
        }
    }

    fn settle_rearrange(&mut self, index: usize) {
        let previous = self.controller.previous_page();
        if index.abs_diff(previous) > 1 {
            // A fling across two slots: recycling one slot cannot catch up.
            self.reset_window(index);
            let slot = self.slot_of(index);
            self.set_active_index(slot, None, true);
            return;
        }
        match self.controller.rearrange(index) {
            Some(direction) => {
                self.push_event(ListEvent::Rearranged { direction });
                self.set_active_index(CENTER_SLOT, None, true);
            }
            None => {
                self.manager.complete();
            }
        }
    }

    fn settle_scroll(&mut self, index: usize) {
        let previous = self.controller.previous_page();
        let animation = Some(self.config.page_turn.page_turn_animation());
        if index == previous {
            let slot = self.slot_of(index);
            self.set_active_index(slot, animation, true);
            return;
        }

        let turn_to = if index > previous {
            self.manager.max_slot_index()
        } else {
            0
        };
        let last = self.manager.page_count() - 1;
        // Turn the page first so the rebind happens under an already
        // turned page instead of under the user's eyes.
        self.set_active_index(turn_to, animation, false);
        self.reset_window(index);
        if index == 0 || index == last {
            self.manager.complete();
        } else {
            self.set_active_index(CENTER_SLOT, None, true);
        }
    }

    fn reset_window(&mut self, index: usize) {
        self.controller.reset(index);
        self.push_event(ListEvent::Reset {
            pages: page_range(index, self.manager.page_count()),
        });
    }

    fn slot_of(&self, index: usize) -> usize {
        index - page_range(index, self.manager.page_count()).start
    }

    fn set_active_index(
        &mut self,
        index: usize,
        animation: Option<PageTurnAnimation>,
        complete: bool,
    ) {
        self.manager.set_active_index(index);
        self.push_active_index(animation);
        if complete {
            self.manager.complete();
        }
    }

    fn push_active_index(&mut self, animation: Option<PageTurnAnimation>) {
        self.push_event(ListEvent::ActiveIndexChanged {
            index: self.manager.active_index(),
            animation,
        });
    }

    fn push_event(&mut self, event: ListEvent) {
        match event {
            ListEvent::WillDisplay { .. } => {
                let pending = self
                    .events
                    .iter_mut()
                    .find(|pending| matches!(pending, ListEvent::WillDisplay { .. }));
                if let Some(pending) = pending {
                    *pending = event;
                    return;
                }
            }
            ListEvent::ActiveIndexChanged { .. } => {
                if matches!(self.events.last(), Some(ListEvent::ActiveIndexChanged { .. })) {
                    self.events.pop();
                }
            }
            ListEvent::Rearranged { .. } | ListEvent::Reset { .. } => {}
        }
        self.events.push(event);
    }
}

impl<S> fmt::Debug for ListView<S>
where
    S: PageSource,
    S::View: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListView")
            .field("manager", &self.manager)
            .field("controller", &self.controller)
            .field("config", &self.config)
            .field("queue", &self.queue)
            .field("events", &self.events)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    use kurbo::{Rect, Size, Vec2};

    use super::{ListEvent, ListView};
    use crate::{
        Axis, Direction, ListManager, PageSource, PageState, PageTurnAnimation, PageTurnType,
        PagerConfig, page_range,
    };

    const TURN: Option<PageTurnAnimation> = Some(PageTurnAnimation::EaseInOut { duration: 0.3 });

    type Source = fn(usize) -> usize;

    fn list(start: usize, count: usize) -> (ListView<Source>, Rc<RefCell<Vec<usize>>>) {
        let manager = ListManager::new(start, count).unwrap();
        let mut view = ListView::horizontal(manager, (|page: usize| page) as Source);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        view.on_page_changed(move |page| sink.borrow_mut().push(page));
        (view, seen)
    }

    fn pages<S: PageSource>(view: &ListView<S>) -> Vec<usize> {
        view.controller().window().pages().collect()
    }

    fn assert_settled<S: PageSource>(view: &ListView<S>, page: usize) {
        let count = view.manager().page_count();
        assert_eq!(view.manager().current_page(), PageState::completed(page));
        assert_eq!(pages(view), page_range(page, count).collect::<Vec<_>>());
        let active = view.manager().active_index();
        assert_eq!(
            view.controller().window().get(active).map(|s| s.page()),
            Some(page),
            "active slot {active} should show page {page}"
        );
    }

    #[test]
    fn settles_wait_for_the_next_tick() {
        let (mut view, seen) = list(3, 10);
        assert!(view.settle_at_slot(2));
        assert!(view.has_pending());
        assert_eq!(view.manager().current_page(), PageState::rearrange(4));
        assert_eq!(pages(&view), [2, 3, 4]);
        assert!(seen.borrow().is_empty());
        assert_eq!(
            view.drain_events().collect::<Vec<_>>(),
            [ListEvent::WillDisplay { page: 4 }]
        );

        view.run_tick();
        assert!(!view.has_pending());
        assert_settled(&view, 4);
        assert_eq!(view.manager().active_index(), 1);
        assert_eq!(*seen.borrow(), [4]);
        assert_eq!(
            view.drain_events().collect::<Vec<_>>(),
            [
                ListEvent::Rearranged {
                    direction: Direction::Forward
                },
                ListEvent::ActiveIndexChanged {
                    index: 1,
                    animation: None
                },
            ]
        );
    }

    #[test]
    fn swiping_from_the_first_page_to_the_last() {
        let (mut view, seen) = list(0, 6);
        for page in 1..6 {
            let slot = (view.manager().active_index() + 1).min(2);
            assert!(view.settle_at_slot(slot));
            view.run_tick();
            assert_settled(&view, page);
        }
        assert_eq!(view.manager().active_index(), 2);
        assert_eq!(*seen.borrow(), [1, 2, 3, 4, 5]);

        // Nothing further to the right.
        assert!(!view.settle_at_slot(5));
        view.run_tick();
        assert_eq!(*seen.borrow(), [1, 2, 3, 4, 5]);
    }

    #[test]
    fn swiping_back_recycles_backward() {
        let (mut view, seen) = list(5, 10);
        assert!(view.settle_at_slot(0));
        view.run_tick();
        assert_settled(&view, 4);
        assert!(view.drain_events().any(|e| e
            == ListEvent::Rearranged {
                direction: Direction::Backward
            }));
        assert_eq!(*seen.borrow(), [4]);
    }

    #[test]
    fn leaving_the_first_page_keeps_the_window() {
        let (mut view, seen) = list(0, 10);
        assert!(view.settle_at_slot(1));
        view.run_tick();
        assert_settled(&view, 1);
        assert_eq!(pages(&view), [0, 1, 2]);
        assert_eq!(view.controller().previous_page(), 1);
        assert_eq!(*seen.borrow(), [1]);
    }

    #[test]
    fn flinging_across_two_slots_resets() {
        let (mut view, seen) = list(0, 10);
        assert!(view.settle_at_slot(2));
        view.run_tick();
        assert_settled(&view, 2);
        assert_eq!(view.manager().active_index(), 1);
        assert_eq!(*seen.borrow(), [2]);

        let (mut view, _) = list(9, 10);
        assert!(view.settle_at_slot(0));
        view.run_tick();
        assert_settled(&view, 7);
    }

    #[test]
    fn scrolling_to_an_interior_page_turns_then_snaps() {
        let (mut view, seen) = list(2, 10);
        view.drain_events().for_each(drop);
        assert!(view.scroll_to(6));
        view.run_tick();
        assert_settled(&view, 6);
        assert_eq!(view.manager().active_index(), 1);
        assert_eq!(
            view.drain_events().collect::<Vec<_>>(),
            [
                ListEvent::WillDisplay { page: 6 },
                ListEvent::ActiveIndexChanged {
                    index: 2,
                    animation: TURN
                },
                ListEvent::Reset { pages: 5..8 },
                ListEvent::ActiveIndexChanged {
                    index: 1,
                    animation: None
                },
            ]
        );
        assert_eq!(*seen.borrow(), [6]);
    }

    #[test]
    fn scrolling_to_an_edge_stays_on_the_edge() {
        let (mut view, seen) = list(5, 10);
        assert!(view.scroll_to(0));
        view.run_tick();
        assert_settled(&view, 0);
        assert_eq!(view.manager().active_index(), 0);

        assert!(view.scroll_to(42));
        view.run_tick();
        assert_settled(&view, 9);
        assert_eq!(view.manager().active_index(), 2);
        assert_eq!(*seen.borrow(), [0, 9]);

        let events: Vec<_> = view.drain_events().collect();
        assert!(events.contains(&ListEvent::Reset { pages: 7..10 }));
        assert!(!events.contains(&ListEvent::ActiveIndexChanged {
            index: 1,
            animation: None
        }));
    }

    #[test]
    fn scrolling_backward_turns_to_the_leading_slot() {
        let (mut view, _) = list(7, 10);
        view.drain_events().for_each(drop);
        assert!(view.scroll_to(3));
        view.run_tick();
        assert_settled(&view, 3);
        let events: Vec<_> = view.drain_events().collect();
        assert_eq!(
            events[1],
            ListEvent::ActiveIndexChanged {
                index: 0,
                animation: TURN
            }
        );
    }

    #[test]
    fn later_requests_supersede_pending_ones() {
        let (mut view, seen) = list(3, 10);
        assert!(view.settle_at_slot(2));
        assert!(view.scroll_to(8));
        view.run_tick();
        assert_settled(&view, 8);
        assert_eq!(*seen.borrow(), [8]);
    }

    #[test]
    fn scrolling_back_before_a_rearrange_restores_the_slot() {
        let (mut view, seen) = list(5, 10);
        assert!(view.settle_at_slot(2));
        assert!(view.scroll_to(5));
        view.run_tick();
        assert_settled(&view, 5);
        assert_eq!(view.manager().active_index(), 1);
        assert_eq!(*seen.borrow(), [5]);
    }

    #[test]
    fn repeated_updates_settle_once() {
        let (mut view, seen) = list(3, 10);
        assert!(view.scroll_to(5));
        view.update();
        view.update();
        view.run_tick();
        view.update();
        view.run_tick();
        assert_settled(&view, 5);
        assert_eq!(*seen.borrow(), [5]);
        let events: Vec<_> = view.drain_events().collect();
        let will_display = events
            .iter()
            .filter(|e| matches!(e, ListEvent::WillDisplay { .. }))
            .count();
        assert_eq!(will_display, 1);
        assert_eq!(events[0], ListEvent::WillDisplay { page: 5 });
    }

    #[test]
    fn undrained_events_stay_bounded() {
        let (mut view, seen) = list(4, 10);
        for _ in 0..10_000 {
            view.update();
            view.run_tick();
        }
        assert_eq!(view.pending_events(), 1);

        // Repeated no-op gestures on the current slot collapse as well.
        for _ in 0..1_000 {
            view.settle_at_slot(1);
            view.update();
        }
        assert!(view.pending_events() <= 2, "{}", view.pending_events());

        // Real page changes still come through in order.
        view.settle_at_slot(2);
        view.run_tick();
        assert_eq!(*seen.borrow(), [5]);
        let events: Vec<_> = view.drain_events().collect();
        assert!(events.contains(&ListEvent::Rearranged {
            direction: Direction::Forward
        }));
        assert_eq!(
            events.last(),
            Some(&ListEvent::ActiveIndexChanged {
                index: 1,
                animation: None
            })
        );
    }

    #[test]
    fn vertical_lists_stack_slots_top_to_bottom() {
        let manager = ListManager::new(0, 6).unwrap();
        let config = PagerConfig::new(Axis::Vertical).with_page_size(Size::new(320.0, 480.0));
        let mut view = ListView::new(manager, |page: usize| page, config);
        assert_eq!(view.content_offset(), Vec2::new(0.0, 0.0));

        assert!(view.settle_at_slot(1));
        view.run_tick();
        assert!(view.settle_at_slot(2));
        view.run_tick();
        assert_settled(&view, 2);
        assert_eq!(pages(&view), [1, 2, 3]);
        assert_eq!(view.content_offset(), Vec2::new(0.0, -480.0));

        let frames: Vec<Rect> = view
            .controller()
            .window()
            .iter()
            .map(|slot| slot.frame())
            .collect();
        assert_eq!(
            frames,
            [
                Rect::new(0.0, 0.0, 320.0, 480.0),
                Rect::new(0.0, 480.0, 320.0, 960.0),
                Rect::new(0.0, 960.0, 320.0, 1440.0),
            ]
        );
        assert_eq!(view.controller().content_size(), Size::new(320.0, 1440.0));

        let short = ListView::vertical(ListManager::new(0, 1).unwrap(), |page: usize| page);
        assert_eq!(short.controller().axis(), Axis::Vertical);
        assert_eq!(short.controller().window().len(), 1);
    }

    #[test]
    fn settled_lists_ignore_redundant_input() {
        let (mut view, seen) = list(4, 10);
        assert!(!view.scroll_to(4));
        assert!(!view.settle_at_slot(1));
        assert!(!view.has_pending());
        view.run_tick();
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn short_lists_page_without_recycling() {
        let (mut view, seen) = list(0, 2);
        assert!(view.settle_at_slot(1));
        view.run_tick();
        assert_settled(&view, 1);
        assert!(view.scroll_to(0));
        view.run_tick();
        assert_settled(&view, 0);
        assert_eq!(*seen.borrow(), [1, 0]);

        let (mut view, seen) = list(0, 1);
        assert!(!view.settle_at_slot(3));
        assert!(!view.scroll_to(3));
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn early_cutoff_turns_use_the_spring() {
        let manager = ListManager::new(1, 10).unwrap();
        let config = PagerConfig::default().with_page_turn(PageTurnType::early_cutoff_default());
        let mut view = ListView::new(manager, |page: usize| page, config);
        view.scroll_to(5);
        view.run_tick();
        let animated = view.drain_events().find_map(|e| match e {
            ListEvent::ActiveIndexChanged {
                animation: Some(animation),
                ..
            } => Some(animation),
            _ => None,
        });
        assert_eq!(
            animated,
            Some(PageTurnAnimation::Spring {
                response: 0.3,
                damping_fraction: 0.95,
            })
        );
    }
}
