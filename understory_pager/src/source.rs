// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The page datasource.

/// Produces the renderable content for a logical page.
///
/// `view_for` is called synchronously while slots are rebound, so it should be
/// cheap and free of side effects. Hosts usually return a handle to a view
/// description rather than a fully built widget.
///
/// Any `Fn(usize) -> V` closure is a [`PageSource`].
pub trait PageSource {
    /// Content bound into a slot.
    type View;

    /// Returns the content for `page`.
    fn view_for(&self, page: usize) -> Self::View;
}

impl<F, V> PageSource for F
where
    F: Fn(usize) -> V,
{
    type View = V;

    fn view_for(&self, page: usize) -> V {
        self(page)
    }
}
