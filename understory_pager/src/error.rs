// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction errors.

/// Errors raised while building a paging list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PagerError {
    /// A paging list needs at least one page.
    #[error("a paging list needs at least one page")]
    NoPages,
}
