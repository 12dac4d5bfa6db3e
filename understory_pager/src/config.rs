// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction-time configuration for a paging list.

use kurbo::{Point, Size, Vec2};

/// Axis along which pages are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Axis {
    /// Pages are laid out left to right.
    #[default]
    Horizontal,
    /// Pages are laid out top to bottom.
    Vertical,
}

impl Axis {
    /// Extent of `size` along this axis.
    #[must_use]
    pub const fn extent(self, size: Size) -> f64 {
        match self {
            Self::Horizontal => size.width,
            Self::Vertical => size.height,
        }
    }

    /// Point at `offset` along this axis, zero on the cross axis.
    #[must_use]
    pub const fn point_at(self, offset: f64) -> Point {
        match self {
            Self::Horizontal => Point::new(offset, 0.0),
            Self::Vertical => Point::new(0.0, offset),
        }
    }

    /// Vector of length `offset` along this axis.
    #[must_use]
    pub const fn vec_at(self, offset: f64) -> Vec2 {
        match self {
            Self::Horizontal => Vec2::new(offset, 0.0),
            Self::Vertical => Vec2::new(0.0, offset),
        }
    }

    /// Size of a strip of `count` pages of `page` size laid out along this axis.
    #[must_use]
    pub fn strip_size(self, page: Size, count: usize) -> Size {
        #[allow(
            clippy::cast_precision_loss,
            reason = "Page counts are far below the f64 mantissa limit"
        )]
        let count = count as f64;
        match self {
            Self::Horizontal => Size::new(page.width * count, page.height),
            Self::Vertical => Size::new(page.width, page.height * count),
        }
    }
}

/// Animation the host should use when turning a page.
///
/// Durations are in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PageTurnAnimation {
    /// Ease-in-out curve over a fixed duration.
    EaseInOut {
        /// Duration in seconds.
        duration: f64,
    },
    /// Spring animation.
    Spring {
        /// Response time in seconds.
        response: f64,
        /// Damping fraction, `1.0` being critically damped.
        damping_fraction: f64,
    },
}

/// Thresholds for the early-cutoff page turn style.
///
/// Distances are in the same logical units as the page size. They are carried
/// for host gesture code; the pager core never reads pointer positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EarlyCutoffConfig {
    /// Drag distance past which further dragging meets resistance.
    pub scroll_resistance_cutoff: f64,
    /// Drag distance past which the page turns without waiting for release.
    pub page_turn_cutoff: f64,
    /// Animation used once the cutoff is reached.
    pub page_turn_animation: PageTurnAnimation,
}

impl Default for EarlyCutoffConfig {
    fn default() -> Self {
        Self {
            scroll_resistance_cutoff: 40.0,
            page_turn_cutoff: 80.0,
            page_turn_animation: PageTurnAnimation::Spring {
                response: 0.3,
                damping_fraction: 0.95,
            },
        }
    }
}

/// How pages turn in response to drags and programmatic scrolls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PageTurnType {
    /// Pages turn on release; `page_turn_delay` is the turn duration in seconds.
    Regular {
        /// Turn duration in seconds.
        page_turn_delay: f64,
    },
    /// Pages turn as soon as the drag crosses a cutoff.
    EarlyCutoff(EarlyCutoffConfig),
}

impl PageTurnType {
    /// The default regular page turn.
    pub const REGULAR_DEFAULT: Self = Self::Regular {
        page_turn_delay: 0.3,
    };

    /// The default early-cutoff page turn.
    #[must_use]
    pub fn early_cutoff_default() -> Self {
        Self::EarlyCutoff(EarlyCutoffConfig::default())
    }

    /// Animation to use for an animated page turn.
    #[must_use]
    pub const fn page_turn_animation(&self) -> PageTurnAnimation {
        match self {
            Self::Regular { page_turn_delay } => PageTurnAnimation::EaseInOut {
                duration: *page_turn_delay,
            },
            Self::EarlyCutoff(config) => config.page_turn_animation,
        }
    }
}

impl Default for PageTurnType {
    fn default() -> Self {
        Self::REGULAR_DEFAULT
    }
}

/// Immutable configuration of a paging list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PagerConfig {
    /// Layout axis.
    pub axis: Axis,
    /// Whether the host should let drags bounce past the first and last page.
    pub bounces: bool,
    /// Page turn style.
    pub page_turn: PageTurnType,
    /// Size of a single page, usually the viewport size.
    pub page_size: Size,
}

impl PagerConfig {
    /// Configuration for the given axis with all other fields defaulted.
    #[must_use]
    pub fn new(axis: Axis) -> Self {
        Self {
            axis,
            ..Self::default()
        }
    }

    /// Sets the bounce flag.
    #[must_use]
    pub const fn with_bounces(mut self, bounces: bool) -> Self {
        self.bounces = bounces;
        self
    }

    /// Sets the page turn style.
    #[must_use]
    pub const fn with_page_turn(mut self, page_turn: PageTurnType) -> Self {
        self.page_turn = page_turn;
        self
    }

    /// Sets the page size. Negative extents are clamped to zero.
    #[must_use]
    pub fn with_page_size(mut self, page_size: Size) -> Self {
        self.page_size = Size::new(page_size.width.max(0.0), page_size.height.max(0.0));
        self
    }

    /// Extent of one page along the layout axis.
    #[must_use]
    pub const fn page_extent(&self) -> f64 {
        self.axis.extent(self.page_size)
    }
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            axis: Axis::Horizontal,
            bounces: false,
            page_turn: PageTurnType::default(),
            page_size: Size::new(1.0, 1.0),
        }
    }
}
