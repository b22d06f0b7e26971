use std::{iter::FusedIterator, ops::RangeInclusive, slice};

use super::Interval;

/// Итератор по упакованным интервалам `(lo, hi)` в порядке возрастания.
#[derive(Debug, Clone)]
pub struct Ranges<'a> {
    inner: slice::Iter<'a, Interval>,
}

/// Итератор по отдельным целым числам в порядке возрастания.
///
/// Обходит каждый интервал лениво, поэтому огромный диапазон ничего не стоит,
/// пока его не начнут потреблять.
#[derive(Debug, Clone)]
pub struct Integers<'a> {
    ranges: slice::Iter<'a, Interval>,
    current: Option<RangeInclusive<i64>>,
}

////////////////////////////////////////////////////////////////////////////////
// Собственные методы
////////////////////////////////////////////////////////////////////////////////

impl<'a> Ranges<'a> {
    pub(crate) fn new(ranges: &'a [Interval]) -> Self {
        Self {
            inner: ranges.iter(),
        }
    }
}

impl<'a> Integers<'a> {
    pub(crate) fn new(ranges: &'a [Interval]) -> Self {
        Self {
            ranges: ranges.iter(),
            current: None,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Общие реализации трейтов для Ranges, Integers
////////////////////////////////////////////////////////////////////////////////

impl Iterator for Ranges<'_> {
    type Item = Interval;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().copied()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for Ranges<'_> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().copied()
    }
}

impl ExactSizeIterator for Ranges<'_> {}

impl FusedIterator for Ranges<'_> {}

impl Iterator for Integers<'_> {
    type Item = i64;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(v) = self.current.as_mut().and_then(|r| r.next()) {
                return Some(v);
            }
            let &(lo, hi) = self.ranges.next()?;
            self.current = Some(lo..=hi);
        }
    }
}

impl FusedIterator for Integers<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranges_iter_is_restartable() {
        let data = [(1, 3), (7, 7)];
        let it = Ranges::new(&data);
        let again = it.clone();
        assert_eq!(it.collect::<Vec<_>>(), vec![(1, 3), (7, 7)]);
        assert_eq!(again.rev().collect::<Vec<_>>(), vec![(7, 7), (1, 3)]);
    }

    #[test]
    fn test_integers_expand_each_interval() {
        let data = [(-2, 0), (5, 5), (9, 10)];
        let values: Vec<i64> = Integers::new(&data).collect();
        assert_eq!(values, vec![-2, -1, 0, 5, 9, 10]);
    }

    #[test]
    fn test_integers_on_huge_range_is_lazy() {
        let data = [(i64::MIN, i64::MAX)];
        let first: Vec<i64> = Integers::new(&data).take(2).collect();
        assert_eq!(first, vec![i64::MIN, i64::MIN + 1]);
    }

    #[test]
    fn test_integers_empty() {
        assert_eq!(Integers::new(&[]).next(), None);
    }
}
