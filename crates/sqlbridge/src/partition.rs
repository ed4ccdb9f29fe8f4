//! Splits a sequence into fixed-size windows.

use sqlbridge_core::{Error, Result};

/// Lazily yields consecutive windows of at most `size` items, in order.
///
/// ```
/// let sizes: Vec<_> = sqlbridge::partition(1..=5, 2)
///     .unwrap()
///     .map(|window| window.len())
///     .collect();
/// assert_eq!(sizes, [2, 2, 1]);
/// ```
pub fn partition<I: IntoIterator>(items: I, size: usize) -> Result<Partitions<I::IntoIter>> {
    if size == 0 {
        return Err(Error::invalid_argument(
            "size",
            "partition size must be at least 1",
        ));
    }

    Ok(Partitions {
        items: items.into_iter(),
        size,
    })
}

/// Iterator returned by [`partition`].
#[derive(Debug, Clone)]
pub struct Partitions<I> {
    items: I,
    size: usize,
}

impl<I: Iterator> Iterator for Partitions<I> {
    type Item = Vec<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        let window: Vec<_> = self.items.by_ref().take(self.size).collect();

        if window.is_empty() {
            None
        } else {
            Some(window)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lower, upper) = self.items.size_hint();
        (
            lower.div_ceil(self.size),
            upper.map(|upper| upper.div_ceil(self.size)),
        )
    }
}
