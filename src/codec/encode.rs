//! Компактное строковое представление упакованных интервалов.

use std::fmt::Write;

use crate::sequence::Interval;

/// Дополняет число нулями до `width` символов, знак остаётся впереди
/// (`-5` при ширине 3 даёт `-05`).
pub fn zero_pad(
    n: i64,
    width: usize,
) -> String {
    format!("{n:0width$}")
}

/// Полная строка без усечения: `"1-10,13,15-30"`.
pub fn render_ranges(
    ranges: &[Interval],
    padding: usize,
) -> String {
    let mut out = String::new();
    for (i, &(lo, hi)) in ranges.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        // Writing into a String cannot fail.
        let _ = if lo == hi {
            write!(out, "{lo:0padding$}")
        } else {
            write!(out, "{lo:0padding$}-{hi:0padding$}")
        };
    }
    out
}

/// Строка для отображения, при необходимости усечённая до `max_length`.
///
/// `max_length == 0` отключает усечение. Более длинная строка из двух и более
/// интервалов сохраняет столько начальных токенов, сколько помещается, затем
/// `...` и последний токен, и никогда не превышает `max_length`. Если не
/// помещается ни один начальный токен, результат схлопывается в
/// `{min}...{max}`, который сам может быть длиннее `max_length`.
pub fn integer_string(
    ranges: &[Interval],
    max_length: usize,
    padding: usize,
) -> String {
    let full = render_ranges(ranges, padding);
    if max_length == 0 || full.len() <= max_length || ranges.len() < 2 {
        return full;
    }

    let (Some(&(min, _)), Some(&(_, max))) = (ranges.first(), ranges.last()) else {
        return full;
    };
    let collapsed = || format!("{}...{}", zero_pad(min, padding), zero_pad(max, padding));

    let Some(last_comma) = full.rfind(',') else {
        return collapsed();
    };
    let tail = &full[last_comma + 1..];

    // Keep tokens ending before the last comma that lies strictly before
    // `budget_end`; head + "..." + tail then fits in `max_length`.
    let budget_end = match max_length.checked_sub(tail.len() + 2) {
        Some(end) if end > 0 => end,
        _ => return collapsed(),
    };
    match full[..budget_end].rfind(',') {
        Some(cut) => format!("{}...{}", &full[..cut], tail),
        None => collapsed(),
    }
}
