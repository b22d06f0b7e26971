//! Разбор строк диапазонов вида `"-50,-45--35,-12,-4-3,8-15,17,20-40:5"`.
//!
//! Грамматика, по одному токену на каждый фрагмент между запятыми:
//!
//! ```text
//! token   := integer | integer "-" integer | integer "-" integer ":" integer
//! integer := "-"? digit+
//! ```
//!
//! Пробелы вокруг чисел и операторов игнорируются, поэтому `-45--35` и
//! `-45 - -35` задают один и тот же диапазон.

use std::{iter::FusedIterator, str::Split};

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::{
    error::{SequenceError, TokenFault},
    sequence::Interval,
};

static TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(-?[0-9]+)(?:\s*-\s*(-?[0-9]+))?(?:\s*:\s*(-?[0-9]+))?\s*$")
        .expect("range token pattern must compile")
});

/// Один разобранный токен.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeToken {
    /// `N`
    Single(i64),
    /// `A-B` в исходном порядке. `B < A` допустимо, порядок наводит слияние.
    Span(i64, i64),
    /// `A-B:STEP`, прогрессия `A, A+STEP, ...`, которая останавливается до
    /// `B+1` (или после него при отрицательном шаге). `STEP` не бывает нулём.
    Stepped { start: i64, end: i64, step: i64 },
}

/// Пары `(lo, hi)`, которые порождает один токен.
#[derive(Debug, Clone)]
pub enum TokenPairs {
    Once(Option<Interval>),
    Stepped { next: i128, stop: i128, step: i128 },
}

/// Ленивый итератор по парам всей строки.
///
/// Выдаёт `Err` на первом некорректном токене и затем останавливается.
#[derive(Debug, Clone)]
pub struct RangesInStr<'a> {
    tokens: Option<Split<'a, char>>,
    current: Option<TokenPairs>,
}

////////////////////////////////////////////////////////////////////////////////
// Собственные методы
////////////////////////////////////////////////////////////////////////////////

impl RangeToken {
    /// Expands the token into `(lo, hi)` pairs.
    ///
    /// A stepped token yields one point pair per value, except for a step of
    /// one over an ascending span, which yields the span as a single pair.
    pub fn pairs(&self) -> TokenPairs {
        match *self {
            Self::Single(n) => TokenPairs::Once(Some((n, n))),
            Self::Span(a, b) => TokenPairs::Once(Some((a, b))),
            Self::Stepped {
                start,
                end,
                step: 1,
            } => TokenPairs::Once((start <= end).then_some((start, end))),
            Self::Stepped { start, end, step } => TokenPairs::Stepped {
                next: i128::from(start),
                stop: i128::from(end) + 1,
                step: i128::from(step),
            },
        }
    }
}

/// Разбирает один токен.
pub fn parse_token(raw: &str) -> Result<RangeToken, SequenceError> {
    let caps = TOKEN_RE
        .captures(raw)
        .ok_or_else(|| SequenceError::malformed(raw, TokenFault::Syntax))?;

    let int = |idx: usize| -> Result<Option<i64>, SequenceError> {
        caps.get(idx)
            .map(|m| {
                m.as_str()
                    .parse::<i64>()
                    .map_err(|_| SequenceError::malformed(raw, TokenFault::IntegerOverflow))
            })
            .transpose()
    };

    // Group 1 always participates in a match.
    let a = int(1)?.unwrap_or_default();
    match (int(2)?, int(3)?) {
        (None, None) => Ok(RangeToken::Single(a)),
        (Some(b), None) => Ok(RangeToken::Span(a, b)),
        (Some(_), Some(0)) => Err(SequenceError::malformed(raw, TokenFault::ZeroStep)),
        (Some(b), Some(step)) => Ok(RangeToken::Stepped {
            start: a,
            end: b,
            step,
        }),
        // `1:5`: the regex lets the step through, the grammar needs an end bound.
        (None, Some(_)) => Err(SequenceError::malformed(raw, TokenFault::Syntax)),
    }
}

/// Разбирает всю строку сразу: либо все токены, либо первая ошибка.
///
/// Пустая строка даёт пустой список. Пустой токен (`"1,,2"`, завершающая
/// запятая) считается некорректным.
pub fn parse_tokens(spec: &str) -> Result<Vec<RangeToken>, SequenceError> {
    if spec.is_empty() {
        return Ok(Vec::new());
    }
    spec.split(',')
        .map(parse_token)
        .collect::<Result<Vec<_>, _>>()
        .inspect_err(|e| debug!(spec, error = %e, "rejected range spec"))
}

/// Ленивый разбор строки в пары `(lo, hi)`.
pub fn ranges_in_str(spec: &str) -> RangesInStr<'_> {
    RangesInStr {
        tokens: (!spec.is_empty()).then(|| spec.split(',')),
        current: None,
    }
}

////////////////////////////////////////////////////////////////////////////////
// Общие реализации трейтов
////////////////////////////////////////////////////////////////////////////////

impl Iterator for TokenPairs {
    type Item = Interval;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::Once(pair) => pair.take(),
            Self::Stepped { next, stop, step } => {
                let in_bounds = if *step > 0 {
                    *next < *stop
                } else {
                    *next > *stop
                };
                if !in_bounds {
                    return None;
                }
                // `next` lies between `start` and `end`, so it fits in i64.
                let n = *next as i64;
                *next += *step;
                Some((n, n))
            }
        }
    }
}

impl FusedIterator for TokenPairs {}

impl Iterator for RangesInStr<'_> {
    type Item = Result<Interval, SequenceError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(pair) = self.current.as_mut().and_then(|p| p.next()) {
                return Some(Ok(pair));
            }
            let raw = self.tokens.as_mut()?.next()?;
            match parse_token(raw) {
                Ok(token) => self.current = Some(token.pairs()),
                Err(e) => {
                    self.tokens = None;
                    self.current = None;
                    return Some(Err(e));
                }
            }
        }
    }
}

impl FusedIterator for RangesInStr<'_> {}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////
