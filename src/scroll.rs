//! Scroll position of the article view.

use std::cell::Cell;

/// Boundaries are matched within this many pixels to absorb fractional scroll positions.
const BOUNDARY_TOLERANCE: f64 = 1.;

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    /// Distance scrolled from the top.
    pub scroll_top: f64,
    /// Visible height of the scroll container.
    pub client_height: f64,
    /// Total scrollable height of the content.
    pub scroll_height: f64,
}

impl ScrollMetrics {
    pub fn is_at_top(&self) -> bool {
        self.scroll_top <= BOUNDARY_TOLERANCE
    }

    pub fn is_at_bottom(&self) -> bool {
        self.scroll_top + self.client_height >= self.scroll_height - BOUNDARY_TOLERANCE
    }
}

/// Source of the current scroll position.
///
/// Returns `None` when there's no scroll container, in which case both boundaries count as
/// reached.
pub trait ScrollOracle {
    fn metrics(&self) -> Option<ScrollMetrics>;

    fn is_at_top(&self) -> bool {
        self.metrics().map_or(true, |m| m.is_at_top())
    }

    fn is_at_bottom(&self) -> bool {
        self.metrics().map_or(true, |m| m.is_at_bottom())
    }
}

impl ScrollOracle for ScrollMetrics {
    fn metrics(&self) -> Option<ScrollMetrics> {
        Some(*self)
    }
}

impl ScrollOracle for Option<ScrollMetrics> {
    fn metrics(&self) -> Option<ScrollMetrics> {
        *self
    }
}

impl ScrollOracle for Cell<ScrollMetrics> {
    fn metrics(&self) -> Option<ScrollMetrics> {
        Some(self.get())
    }
}

impl ScrollOracle for Cell<Option<ScrollMetrics>> {
    fn metrics(&self) -> Option<ScrollMetrics> {
        self.get()
    }
}

impl<T: ScrollOracle + ?Sized> ScrollOracle for &T {
    fn metrics(&self) -> Option<ScrollMetrics> {
        (**self).metrics()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(scroll_top: f64) -> ScrollMetrics {
        ScrollMetrics {
            scroll_top,
            client_height: 600.,
            scroll_height: 2000.,
        }
    }

    #[test]
    fn boundaries_within_one_pixel() {
        assert!(metrics(0.).is_at_top());
        assert!(metrics(1.).is_at_top());
        assert!(!metrics(1.5).is_at_top());

        assert!(!metrics(1398.).is_at_bottom());
        assert!(metrics(1399.).is_at_bottom());
        assert!(metrics(1400.).is_at_bottom());
    }

    #[test]
    fn short_content_is_at_both_boundaries() {
        let m = ScrollMetrics {
            scroll_top: 0.,
            client_height: 600.,
            scroll_height: 300.,
        };
        assert!(m.is_at_top());
        assert!(m.is_at_bottom());
    }

    #[test]
    fn missing_container_counts_as_boundary() {
        let oracle: Option<ScrollMetrics> = None;
        assert!(oracle.is_at_top());
        assert!(oracle.is_at_bottom());
    }

    #[test]
    fn cell_follows_updates() {
        let cell = Cell::new(metrics(500.));
        assert!(!cell.is_at_top());
        assert!(!cell.is_at_bottom());

        cell.set(metrics(0.));
        assert!(cell.is_at_top());

        let oracle = &cell;
        assert!(oracle.metrics().is_some());
    }
}
