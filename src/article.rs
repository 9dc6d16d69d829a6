//! Ordered article sequence with a current position.

use crate::overscroll::Direction;

pub trait ArticleSequence {
    fn len(&self) -> usize;

    fn current_index(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn has_prev(&self) -> bool {
        self.current_index() > 0
    }

    fn has_next(&self) -> bool {
        self.current_index() + 1 < self.len()
    }

    /// Index of the neighbour in `direction`, if it exists.
    fn adjacent(&self, direction: Direction) -> Option<usize> {
        direction
            .apply(self.current_index())
            .filter(|&idx| idx < self.len())
    }
}

/// Sequences the host lets the reader move through.
pub trait ArticleSequenceMut: ArticleSequence {
    /// Makes `idx` the current article.
    ///
    /// Returns whether the current article changed.
    fn set_current(&mut self, idx: usize) -> bool;
}

/// Vec-backed article sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Articles<T> {
    items: Vec<T>,
    current: usize,
}

impl<T> Articles<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items, current: 0 }
    }

    pub fn current(&self) -> Option<&T> {
        self.items.get(self.current)
    }

    pub fn get(&self, idx: usize) -> Option<&T> {
        self.items.get(idx)
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }
}

impl<T> ArticleSequence for Articles<T> {
    fn len(&self) -> usize {
        self.items.len()
    }

    fn current_index(&self) -> usize {
        self.current
    }
}

impl<T> ArticleSequenceMut for Articles<T> {
    fn set_current(&mut self, idx: usize) -> bool {
        if idx >= self.items.len() {
            warn!(
                "ignoring article index {idx}, only {} articles",
                self.items.len()
            );
            return false;
        }

        if idx == self.current {
            return false;
        }

        self.current = idx;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn articles(len: usize, current: usize) -> Articles<usize> {
        let mut rv = Articles::new((0..len).collect());
        rv.set_current(current);
        rv
    }

    #[test]
    fn neighbours() {
        let a = articles(5, 2);
        assert!(a.has_prev());
        assert!(a.has_next());
        assert_eq!(a.adjacent(Direction::Prev), Some(1));
        assert_eq!(a.adjacent(Direction::Next), Some(3));
    }

    #[test]
    fn edges() {
        let first = articles(5, 0);
        assert!(!first.has_prev());
        assert_eq!(first.adjacent(Direction::Prev), None);

        let last = articles(5, 4);
        assert!(!last.has_next());
        assert_eq!(last.adjacent(Direction::Next), None);

        let single = articles(1, 0);
        assert!(!single.has_prev());
        assert!(!single.has_next());
    }

    #[test]
    fn empty_has_no_neighbours() {
        let a = Articles::<usize>::new(Vec::new());
        assert!(a.is_empty());
        assert!(!a.has_prev());
        assert!(!a.has_next());
        assert_eq!(a.current(), None);
    }

    #[test]
    fn set_current_rejects_out_of_range() {
        let mut a = articles(3, 1);
        assert!(!a.set_current(3));
        assert_eq!(a.current_index(), 1);

        assert!(!a.set_current(1));
        assert!(a.set_current(2));
        assert_eq!(a.current(), Some(&2));
    }
}
