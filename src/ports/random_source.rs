//! Random Source Port - Injected randomness for message and question selection.
//!
//! Companion messages and the generic exploration pool are drawn uniformly at
//! random. Routing every draw through this port lets tests script the exact
//! selection while production uses an entropy-seeded generator.

/// Port for uniform index selection.
pub trait RandomSource: Send {
    /// Returns an index uniformly distributed in `0..upper`.
    ///
    /// Callers never pass `upper == 0`.
    fn next_index(&mut self, upper: usize) -> usize;
}

/// Picks one element of `items` using `source`, or `None` for an empty slice.
///
/// Out-of-range indices from a misbehaving source wrap around instead of
/// panicking.
pub fn pick<'a, T>(source: &mut dyn RandomSource, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    let index = source.next_index(items.len()) % items.len();
    items.get(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(usize);

    impl RandomSource for Fixed {
        fn next_index(&mut self, _upper: usize) -> usize {
            self.0
        }
    }

    #[test]
    fn pick_returns_none_for_empty_slice() {
        let items: [&str; 0] = [];
        assert!(pick(&mut Fixed(0), &items).is_none());
    }

    #[test]
    fn pick_uses_source_index() {
        let items = ["a", "b", "c"];
        assert_eq!(pick(&mut Fixed(2), &items), Some(&"c"));
    }

    #[test]
    fn pick_wraps_out_of_range_index() {
        let items = ["a", "b", "c"];
        assert_eq!(pick(&mut Fixed(4), &items), Some(&"b"));
    }
}
