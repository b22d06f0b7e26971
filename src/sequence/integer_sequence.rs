//! `IntegerSequence`: множество целых чисел (обычно номеров кадров) с
//! отложенной упаковкой в интервалы.
//!
//! Новая последовательность собирает числа в хеш-множество, поэтому массовая
//! вставка отдельных значений стоит O(1). Первое чтение (обход интервалов,
//! границы, вывод) упаковывает множество в отсортированные непересекающиеся
//! несмежные замкнутые интервалы. После этого каждая запись вливается прямо
//! в список интервалов, и множество больше не строится.

use std::{fmt, str::FromStr};

use rustc_hash::FxHashSet;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use tracing::trace;

use super::{
    iter::{Integers, Ranges},
    merge::{interval_len, merge_range, pack_integers},
    Interval,
};
use crate::{codec, error::SequenceError};

/// Текущее представление элементов.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Members {
    /// Unordered, before the first read.
    Unpacked(FxHashSet<i64>),
    /// Sorted, disjoint, non-adjacent intervals.
    Packed(Vec<Interval>),
}

/// Изменяемая последовательность целых чисел с кодеком строк диапазонов.
///
/// ```
/// use frameseq::IntegerSequence;
///
/// let mut frames = IntegerSequence::from_string("1,2,3,4-10,13,15-30").unwrap();
/// assert_eq!(frames.iter_ranges().collect::<Vec<_>>(), vec![(1, 10), (13, 13), (15, 30)]);
/// assert_eq!(frames.count(), 27);
/// assert_eq!(frames.get_range(), Some((1, 30)));
/// ```
#[derive(Debug, Clone)]
pub struct IntegerSequence {
    members: Members,
    cached_count: u64,
    count_dirty: bool,
}

////////////////////////////////////////////////////////////////////////////////
// Собственные методы
////////////////////////////////////////////////////////////////////////////////

impl IntegerSequence {
    /// Создаёт пустую неупакованную последовательность.
    pub fn new() -> Self {
        Self {
            members: Members::Unpacked(FxHashSet::default()),
            cached_count: 0,
            count_dirty: true,
        }
    }

    /// Разбирает строку диапазонов в новую последовательность.
    pub fn from_string(spec: &str) -> Result<Self, SequenceError> {
        let mut seq = Self::new();
        seq.add_from_string(spec)?;
        Ok(seq)
    }

    /// Добавляет одно целое число.
    ///
    /// Принимает любой тип, приводимый к `i64`. Значения, которые не
    /// помещаются (например, `u64::MAX`), дают
    /// [`SequenceError::InvalidArgumentType`].
    pub fn add_integer<N>(
        &mut self,
        n: N,
    ) -> Result<(), SequenceError>
    where
        N: TryInto<i64>,
    {
        let value = n.try_into().map_err(|_| {
            SequenceError::not_an_integer(format!(
                "{} value outside the i64 range",
                short_type_name::<N>()
            ))
        })?;
        self.insert(value);
        Ok(())
    }

    /// Добавляет значения по порядку; останавливается на первой ошибке,
    /// уже добавленные значения остаются.
    pub fn add_integers<I, N>(
        &mut self,
        values: I,
    ) -> Result<(), SequenceError>
    where
        I: IntoIterator<Item = N>,
        N: TryInto<i64>,
    {
        values.into_iter().try_for_each(|n| self.add_integer(n))
    }

    /// Добавляет значение из динамически типизированного источника (JSON).
    ///
    /// Принимаются только целые числа. `1.0` считается дробным и
    /// отвергается наравне со строками, `null` и составными значениями.
    pub fn add_value(
        &mut self,
        value: &serde_json::Value,
    ) -> Result<(), SequenceError> {
        use serde_json::Value;

        match value {
            Value::Number(num) => {
                if let Some(v) = num.as_i64() {
                    self.insert(v);
                    Ok(())
                } else if num.is_u64() {
                    Err(SequenceError::not_an_integer(format!(
                        "integer {num} outside the i64 range"
                    )))
                } else {
                    Err(SequenceError::not_an_integer(format!("float {num}")))
                }
            }
            Value::String(s) => Err(SequenceError::not_an_integer(format!("string {s:?}"))),
            Value::Bool(b) => Err(SequenceError::not_an_integer(format!("bool {b}"))),
            Value::Null => Err(SequenceError::not_an_integer("null")),
            Value::Array(_) => Err(SequenceError::not_an_integer("array")),
            Value::Object(_) => Err(SequenceError::not_an_integer("object")),
        }
    }

    /// Добавляет замкнутый интервал; порядок границ не важен.
    pub fn add_range(
        &mut self,
        lo: i64,
        hi: i64,
    ) {
        let ranges = self.packed_mut();
        merge_range(ranges, lo, hi);
        self.count_dirty = true;
    }

    /// Добавляет все диапазоны из строки.
    ///
    /// Строка разбирается целиком до применения, поэтому некорректный токен
    /// оставляет последовательность без изменений.
    pub fn add_from_string(
        &mut self,
        spec: &str,
    ) -> Result<(), SequenceError> {
        let tokens = codec::parse_tokens(spec)?;

        let ranges = self.packed_mut();
        for token in &tokens {
            for (lo, hi) in token.pairs() {
                merge_range(ranges, lo, hi);
            }
        }
        trace!(
            tokens = tokens.len(),
            intervals = ranges.len(),
            "merged range spec"
        );
        self.count_dirty = true;
        Ok(())
    }

    /// Упаковывает множество в интервалы. Повторный вызов ничего не делает.
    pub fn pack(&mut self) {
        if let Members::Unpacked(set) = &mut self.members {
            let values = std::mem::take(set);
            let count = values.len();
            let packed = pack_integers(values);
            trace!(values = count, intervals = packed.len(), "packed integer sequence");
            self.members = Members::Packed(packed);
        }
    }

    /// `true`, если последовательность уже упакована.
    pub fn is_packed(&self) -> bool {
        matches!(self.members, Members::Packed(_))
    }

    /// Количество различных целых чисел.
    ///
    /// До упаковки это размер множества. После упаковки это сумма ширин
    /// интервалов, она считается один раз и кешируется до следующей записи.
    /// Насыщается на `u64::MAX`.
    pub fn count(&mut self) -> u64 {
        match &self.members {
            Members::Unpacked(set) => set.len() as u64,
            Members::Packed(ranges) => {
                if self.count_dirty {
                    self.cached_count = ranges
                        .iter()
                        .map(interval_len)
                        .fold(0u64, u64::saturating_add);
                    self.count_dirty = false;
                }
                self.cached_count
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        match &self.members {
            Members::Unpacked(set) => set.is_empty(),
            Members::Packed(ranges) => ranges.is_empty(),
        }
    }

    /// Интервалы `(lo, hi)` по возрастанию.
    pub fn iter_ranges(&mut self) -> Ranges<'_> {
        Ranges::new(self.packed_mut())
    }

    /// Отдельные целые числа по возрастанию.
    ///
    /// Каждый интервал разворачивается лениво. Если нужны только границы,
    /// лучше взять [`get_range`](Self::get_range).
    pub fn iter_integers(&mut self) -> Integers<'_> {
        Integers::new(self.packed_mut())
    }

    /// Наименьшее и наибольшее значение, либо `None` для пустой
    /// последовательности.
    pub fn get_range(&mut self) -> Option<Interval> {
        let ranges = self.packed_mut();
        let &(min, _) = ranges.first()?;
        let &(_, max) = ranges.last()?;
        Some((min, max))
    }

    /// Строка для отображения; см. [`codec::integer_string`].
    pub fn get_integer_string(
        &mut self,
        max_length: usize,
        zero_pad: usize,
    ) -> String {
        codec::integer_string(self.packed_mut(), max_length, zero_pad)
    }

    /// Упакованные интервалы как срез.
    pub fn as_ranges(&mut self) -> &[Interval] {
        self.packed_mut()
    }

    fn insert(
        &mut self,
        value: i64,
    ) {
        match &mut self.members {
            Members::Unpacked(set) => {
                set.insert(value);
            }
            Members::Packed(ranges) => merge_range(ranges, value, value),
        }
        self.count_dirty = true;
    }

    fn packed_mut(&mut self) -> &mut Vec<Interval> {
        self.pack();
        match &mut self.members {
            Members::Packed(ranges) => ranges,
            Members::Unpacked(_) => unreachable!("pack() leaves the sequence packed"),
        }
    }
}

fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}

////////////////////////////////////////////////////////////////////////////////
// Общие реализации трейтов для IntegerSequence
////////////////////////////////////////////////////////////////////////////////

impl Default for IntegerSequence {
    fn default() -> Self {
        Self::new()
    }
}

/// Полная строка без усечения и без дополнения нулями. Не требует `&mut`:
/// неупакованное множество упаковывается во временный список.
impl fmt::Display for IntegerSequence {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match &self.members {
            Members::Packed(ranges) => f.write_str(&codec::render_ranges(ranges, 0)),
            Members::Unpacked(set) => {
                let packed = pack_integers(set.iter().copied());
                f.write_str(&codec::render_ranges(&packed, 0))
            }
        }
    }
}

impl FromStr for IntegerSequence {
    type Err = SequenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_string(s)
    }
}

impl FromIterator<i64> for IntegerSequence {
    fn from_iter<T: IntoIterator<Item = i64>>(iter: T) -> Self {
        let mut seq = Self::new();
        seq.extend(iter);
        seq
    }
}

impl Extend<i64> for IntegerSequence {
    fn extend<T: IntoIterator<Item = i64>>(
        &mut self,
        iter: T,
    ) {
        for v in iter {
            self.insert(v);
        }
    }
}

impl Serialize for IntegerSequence {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for IntegerSequence {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let spec = String::deserialize(deserializer)?;
        Self::from_string(&spec).map_err(de::Error::custom)
    }
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::error::TokenFault;

    fn ranges(seq: &mut IntegerSequence) -> Vec<Interval> {
        seq.iter_ranges().collect()
    }

    #[test]
    fn test_new_is_empty_and_unpacked() {
        let mut seq = IntegerSequence::new();
        assert!(seq.is_empty());
        assert!(!seq.is_packed());
        assert_eq!(seq.count(), 0);
        assert_eq!(seq.get_range(), None);
        assert!(seq.is_packed());
        assert_eq!(seq.get_integer_string(10, 0), "");
    }

    #[test]
    fn test_add_integers_then_pack() {
        let mut seq = IntegerSequence::new();
        seq.add_integers([5, 1, 2, 3, 9, 2]).unwrap();
        assert_eq!(seq.count(), 5);
        assert!(!seq.is_packed());
        assert_eq!(ranges(&mut seq), vec![(1, 3), (5, 5), (9, 9)]);
        assert!(seq.is_packed());
    }

    #[test]
    fn test_add_integer_after_pack_merges() {
        let mut seq: IntegerSequence = [1, 2, 3, 5].into_iter().collect();
        seq.pack();
        seq.add_integer(4).unwrap();
        assert_eq!(ranges(&mut seq), vec![(1, 5)]);
        seq.add_integer(7u8).unwrap();
        assert_eq!(ranges(&mut seq), vec![(1, 5), (7, 7)]);
    }

    #[test]
    fn test_add_integer_out_of_range() {
        let mut seq = IntegerSequence::new();
        let err = seq.add_integer(u64::MAX).unwrap_err();
        assert!(matches!(err, SequenceError::InvalidArgumentType { .. }));
        assert!(err.to_string().contains("u64"), "{err}");
        assert!(seq.is_empty());
    }

    #[test]
    fn test_add_integers_stops_at_first_failure() {
        let mut seq = IntegerSequence::new();
        let err = seq.add_integers([1u64, 2, u64::MAX, 4]).unwrap_err();
        assert!(matches!(err, SequenceError::InvalidArgumentType { .. }));
        assert_eq!(ranges(&mut seq), vec![(1, 2)]);
    }

    #[test]
    fn test_add_value() {
        let mut seq = IntegerSequence::new();
        seq.add_value(&json!(3)).unwrap();
        seq.add_value(&json!(-4)).unwrap();
        for bad in [json!(1.5), json!(1.0), json!("3"), json!(null), json!(true), json!([1]), json!({})] {
            let err = seq.add_value(&bad).unwrap_err();
            assert!(
                matches!(err, SequenceError::InvalidArgumentType { .. }),
                "{bad} must be rejected"
            );
        }
        let err = seq.add_value(&json!(u64::MAX)).unwrap_err();
        assert!(err.to_string().contains("outside the i64 range"));
        assert_eq!(ranges(&mut seq), vec![(-4, -4), (3, 3)]);
    }

    #[test]
    fn test_add_range_packs_first() {
        let mut seq = IntegerSequence::new();
        seq.add_integers([1, 2, 10]).unwrap();
        seq.add_range(3, 4);
        assert!(seq.is_packed());
        assert_eq!(ranges(&mut seq), vec![(1, 4), (10, 10)]);
    }

    #[test]
    fn test_add_range_unordered_bounds() {
        let mut seq = IntegerSequence::new();
        seq.add_range(10, 1);
        assert_eq!(ranges(&mut seq), vec![(1, 10)]);
    }

    #[test]
    fn test_count_cache_invalidated_by_writes() {
        let mut seq = IntegerSequence::from_string("1-10").unwrap();
        assert_eq!(seq.count(), 10);
        seq.add_range(20, 24);
        assert_eq!(seq.count(), 15);
        seq.add_integer(11).unwrap();
        assert_eq!(seq.count(), 16);
        seq.add_from_string("100").unwrap();
        assert_eq!(seq.count(), 17);
        seq.extend([200]);
        assert_eq!(seq.count(), 18);
    }

    #[test]
    fn test_malformed_string_leaves_sequence_untouched() {
        let mut seq = IntegerSequence::new();
        seq.add_integers([1, 2, 3]).unwrap();
        let err = seq.add_from_string("5,6,oops,8").unwrap_err();
        assert_eq!(
            err,
            SequenceError::MalformedRangeToken {
                token: "oops".into(),
                reason: TokenFault::Syntax
            }
        );
        assert!(!seq.is_packed());
        assert_eq!(ranges(&mut seq), vec![(1, 3)]);
    }

    #[test]
    fn test_pack_is_idempotent() {
        let mut seq: IntegerSequence = [4, 2, 3, 9].into_iter().collect();
        seq.pack();
        let once = ranges(&mut seq);
        seq.pack();
        assert_eq!(ranges(&mut seq), once);
    }

    #[test]
    fn test_iter_integers() {
        let mut seq = IntegerSequence::from_string("-2-0,5,8-9").unwrap();
        let all: Vec<i64> = seq.iter_integers().collect();
        assert_eq!(all, vec![-2, -1, 0, 5, 8, 9]);
        // restartable
        assert_eq!(seq.iter_integers().count(), 6);
    }

    #[test]
    fn test_display_does_not_pack() {
        let seq: IntegerSequence = [3, 1, 2, 7].into_iter().collect();
        assert_eq!(seq.to_string(), "1-3,7");
        assert!(!seq.is_packed());
    }

    #[test]
    fn test_from_str_and_serde() {
        let seq: IntegerSequence = "20-40:5, 1-3".parse().unwrap();
        let json = serde_json::to_string(&seq).unwrap();
        assert_eq!(json, "\"1-3,20,25,30,35,40\"");

        let mut back: IntegerSequence = serde_json::from_str(&json).unwrap();
        assert_eq!(back.count(), 8);

        let bad = serde_json::from_str::<IntegerSequence>("\"1,,2\"");
        assert!(bad.is_err());
    }

    #[test]
    fn test_full_i64_domain_count_saturates() {
        let mut seq = IntegerSequence::new();
        seq.add_range(i64::MIN, i64::MAX);
        assert_eq!(seq.count(), u64::MAX);
        assert_eq!(seq.get_range(), Some((i64::MIN, i64::MAX)));
    }
}
