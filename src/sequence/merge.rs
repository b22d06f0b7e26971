//! Упаковка и вставка со слиянием для отсортированных списков интервалов.
//!
//! Упакованный список это `Vec<Interval>`, отсортированный по `lo`, без
//! пустых интервалов и с пропуском хотя бы одного числа между соседями
//! (`next.lo > prev.hi + 1`). Обе функции модуля строят и сохраняют именно
//! такую форму.

use super::Interval;

/// Строит упакованный список из произвольного набора целых чисел.
///
/// Повторы допустимы. Одна сортировка, затем один проход, который продлевает
/// текущую серию, пока следующее значение равно `end + 1`.
pub fn pack_integers<I>(values: I) -> Vec<Interval>
where
    I: IntoIterator<Item = i64>,
{
    let mut sorted: Vec<i64> = values.into_iter().collect();
    sorted.sort_unstable();
    sorted.dedup();

    let mut packed = Vec::new();
    let mut iter = sorted.into_iter();
    let Some(first) = iter.next() else {
        return packed;
    };

    let (mut run_lo, mut run_hi) = (first, first);
    for v in iter {
        if run_hi.checked_add(1) == Some(v) {
            run_hi = v;
        } else {
            packed.push((run_lo, run_hi));
            run_lo = v;
            run_hi = v;
        }
    }
    packed.push((run_lo, run_hi));
    packed
}

/// Вливает замкнутый интервал `[a, b]` в упакованный список.
///
/// Границы могут идти в любом порядке. Все интервалы, которые пересекаются
/// с новым или касаются его, заменяются одним объединённым. Если таких нет,
/// интервал вставляется на своё место по порядку.
pub fn merge_range(
    ranges: &mut Vec<Interval>,
    a: i64,
    b: i64,
) {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };

    // First interval that reaches `lo`: its `hi + 1 >= lo`.
    let start = ranges.partition_point(|&(_, r_hi)| r_hi.saturating_add(1) < lo);
    // One past the last interval reached from the right: its `lo - 1 <= hi`.
    let end = start + ranges[start..].partition_point(|&(r_lo, _)| r_lo.saturating_sub(1) <= hi);

    if start == end {
        ranges.insert(start, (lo, hi));
        return;
    }

    let merged = (lo.min(ranges[start].0), hi.max(ranges[end - 1].1));
    ranges.splice(start..end, std::iter::once(merged));
}

/// Количество целых в интервале, с насыщением на `u64::MAX`.
pub fn interval_len(&(lo, hi): &Interval) -> u64 {
    let width = i128::from(hi) - i128::from(lo) + 1;
    u64::try_from(width).unwrap_or(u64::MAX)
}

/// Проверяет инварианты упакованного списка.
pub fn is_packed(ranges: &[Interval]) -> bool {
    ranges.iter().all(|&(lo, hi)| lo <= hi)
        && ranges
            .windows(2)
            .all(|w| i128::from(w[1].0) > i128::from(w[0].1) + 1)
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    fn merged(
        start: &[Interval],
        a: i64,
        b: i64,
    ) -> Vec<Interval> {
        let mut ranges = start.to_vec();
        merge_range(&mut ranges, a, b);
        assert!(is_packed(&ranges), "not packed: {ranges:?}");
        ranges
    }

    #[test]
    fn test_pack_empty() {
        assert!(pack_integers(Vec::new()).is_empty());
    }

    #[test]
    fn test_pack_runs_and_duplicates() {
        let packed = pack_integers([5, 3, 4, 10, 1, 3, 11, 5]);
        assert_eq!(packed, vec![(1, 1), (3, 5), (10, 11)]);
    }

    #[test]
    fn test_pack_single() {
        assert_eq!(pack_integers([7]), vec![(7, 7)]);
    }

    #[test]
    fn test_pack_extremes_do_not_overflow() {
        let packed = pack_integers([i64::MAX, i64::MIN, i64::MAX - 1, i64::MIN + 1]);
        assert_eq!(packed, vec![(i64::MIN, i64::MIN + 1), (i64::MAX - 1, i64::MAX)]);
    }

    #[test]
    fn test_merge_into_empty() {
        assert_eq!(merged(&[], 3, 8), vec![(3, 8)]);
    }

    #[test]
    fn test_merge_swaps_bounds() {
        assert_eq!(merged(&[], 8, 3), vec![(3, 8)]);
    }

    #[test]
    fn test_merge_append_after_gap() {
        assert_eq!(merged(&[(1, 5)], 8, 10), vec![(1, 5), (8, 10)]);
    }

    #[test]
    fn test_merge_prepend_before_gap() {
        assert_eq!(merged(&[(8, 10)], 1, 5), vec![(1, 5), (8, 10)]);
    }

    /// Зазор 0 (перекрытие), 1 (смежность) и 2 (настоящий разрыв) справа.
    #[test]
    fn test_merge_right_gap_boundaries() {
        // overlap
        assert_eq!(merged(&[(10, 20)], 1, 10), vec![(1, 20)]);
        // adjacent: hi == lo - 1
        assert_eq!(merged(&[(10, 20)], 1, 9), vec![(1, 20)]);
        // one missing integer: hi == lo - 2
        assert_eq!(merged(&[(10, 20)], 1, 8), vec![(1, 8), (10, 20)]);
    }

    /// То же самое слева.
    #[test]
    fn test_merge_left_gap_boundaries() {
        assert_eq!(merged(&[(10, 20)], 20, 30), vec![(10, 30)]);
        assert_eq!(merged(&[(10, 20)], 21, 30), vec![(10, 30)]);
        assert_eq!(merged(&[(10, 20)], 22, 30), vec![(10, 20), (22, 30)]);
    }

    #[test]
    fn test_merge_fills_hole_between_two() {
        assert_eq!(merged(&[(1, 5), (8, 10)], 6, 7), vec![(1, 10)]);
    }

    #[test]
    fn test_merge_point_fills_single_hole() {
        assert_eq!(merged(&[(1, 5), (7, 10)], 6, 6), vec![(1, 10)]);
    }

    #[test]
    fn test_merge_absorbs_many() {
        let start = [(0, 0), (2, 3), (5, 6), (9, 9), (20, 25)];
        assert_eq!(merged(&start, 1, 10), vec![(0, 10), (20, 25)]);
    }

    #[test]
    fn test_merge_contained_is_noop() {
        assert_eq!(merged(&[(1, 10)], 3, 4), vec![(1, 10)]);
    }

    #[test]
    fn test_merge_inserts_in_middle() {
        assert_eq!(
            merged(&[(1, 2), (20, 30)], 10, 12),
            vec![(1, 2), (10, 12), (20, 30)]
        );
    }

    #[test]
    fn test_merge_at_extremes() {
        let r = merged(&[(i64::MIN, i64::MIN)], i64::MIN + 1, i64::MIN + 3);
        assert_eq!(r, vec![(i64::MIN, i64::MIN + 3)]);
        let r = merged(&[(i64::MAX, i64::MAX)], i64::MAX - 2, i64::MAX - 1);
        assert_eq!(r, vec![(i64::MAX - 2, i64::MAX)]);
    }

    #[test]
    fn test_interval_len() {
        assert_eq!(interval_len(&(1, 10)), 10);
        assert_eq!(interval_len(&(-3, -3)), 1);
        assert_eq!(interval_len(&(i64::MIN, i64::MAX)), u64::MAX);
    }

    #[test]
    fn test_is_packed_rejects_adjacent() {
        assert!(is_packed(&[(1, 2), (4, 5)]));
        assert!(!is_packed(&[(1, 2), (3, 5)]));
        assert!(!is_packed(&[(3, 1)]));
    }
}
