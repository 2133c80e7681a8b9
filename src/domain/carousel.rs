/// Wrap any signed position into `0..len`. `len` must be non-zero.
pub fn wrap_index(position: i64, len: usize) -> usize {
    let len = len as i64;
    position.rem_euclid(len) as usize
}

/// A non-empty list with a current position that wraps at both ends.
#[derive(Debug, Clone)]
pub struct Carousel<T> {
    items: Vec<T>,
    index: usize,
}

impl<T> Carousel<T> {
    /// Returns `None` for an empty list.
    pub fn new(items: Vec<T>) -> Option<Self> {
        if items.is_empty() {
            None
        } else {
            Some(Self { items, index: 0 })
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn current(&self) -> &T {
        &self.items[self.index]
    }

    pub fn step(&mut self, delta: i64) -> &T {
        self.index = wrap_index(self.index as i64 + delta, self.items.len());
        self.current()
    }

    pub fn next(&mut self) -> &T {
        self.step(1)
    }

    pub fn previous(&mut self) -> &T {
        self.step(-1)
    }

    pub fn go_to(&mut self, position: i64) -> &T {
        self.index = wrap_index(position, self.items.len());
        self.current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_index_handles_negative_and_large_positions() {
        assert_eq!(wrap_index(-1, 11), 10);
        assert_eq!(wrap_index(-12, 11), 10);
        assert_eq!(wrap_index(11, 11), 0);
        assert_eq!(wrap_index(25, 11), 3);
    }

    #[test]
    fn empty_list_has_no_carousel() {
        assert!(Carousel::<u8>::new(Vec::new()).is_none());
    }

    #[test]
    fn steps_wrap_both_ways() {
        let mut carousel = Carousel::new(vec!["a", "b", "c"]).unwrap();
        assert_eq!(*carousel.previous(), "c");
        assert_eq!(*carousel.next(), "a");
        assert_eq!(*carousel.step(5), "c");
        assert_eq!(*carousel.go_to(-4), "c");
        assert_eq!(carousel.index(), 2);
    }
}
