//! Перевод синтаксиса кадров Deadline в канонический формат.
//!
//! Deadline принимает списки вида `"1-100x5 200 300-310 step 2"`: записи
//! разделены пробелами, а шаг пишется как `x`, `step`, `by` или `every`.
//! Основной разборщик знает только `lo-hi:step`, поэтому здесь лишь
//! переписывается строка перед [`IntegerSequence::from_string`].

use frameseq_error::{ensure, FrameseqResult, ResultExt, StatusCode};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::IntegerSequence;

static STEP_WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new("x|step|by|every").expect("step word pattern must compile"));

static COMMA_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(",+").expect("comma run pattern must compile"));

/// Наибольший модуль кадра `f64`, который ещё округляется в `i64`.
const MAX_FRAME_MAGNITUDE: f64 = 9.0e18;

/// Приводит строку кадров Deadline к виду `"1,2,3,4-10,13,15-30:5"`.
///
/// 1. пробелы становятся запятыми, серии запятых схлопываются в одну;
/// 2. каждое слово шага становится `:`;
/// 3. в токене с несколькими `:` (`1:10:2`) первое `:` становится дефисом
///    диапазона (`1-10:2`).
pub fn normalize_frame_spec(spec: &str) -> String {
    let spaced = spec.trim().replace(' ', ",");
    let collapsed = COMMA_RUN_RE.replace_all(&spaced, ",");
    let stepped = STEP_WORD_RE.replace_all(&collapsed, ":");

    let normalized = stepped
        .split(',')
        .map(|token| {
            if token.matches(':').count() > 1 {
                token.replacen(':', "-", 1)
            } else {
                token.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(",");

    if normalized != spec {
        debug!(input = spec, normalized = %normalized, "normalized Deadline frame list");
    }
    normalized
}

/// Разбирает строку кадров Deadline в `IntegerSequence`.
pub fn sequence_from_frame_spec(spec: &str) -> FrameseqResult<IntegerSequence> {
    let normalized = normalize_frame_spec(spec);
    IntegerSequence::from_string(&normalized)
        .with_context(|| format!("parsing Deadline frame list '{spec}'"))
}

/// Значение `Frames` для диапазона кадров хост-приложения.
///
/// Параметры кадров хоста приходят как `f64`, каждый округляется от нуля.
pub fn format_frame_range(
    start: f64,
    end: f64,
    step: f64,
) -> FrameseqResult<String> {
    for (name, value) in [("start", start), ("end", end), ("step", step)] {
        ensure!(
            value.is_finite(),
            StatusCode::InvalidArgs,
            "frame {} must be a finite number, got {}",
            name,
            value
        );
        ensure!(
            value.abs() < MAX_FRAME_MAGNITUDE,
            StatusCode::ValueOutOfRange,
            "frame {} {} is out of range",
            name,
            value
        );
    }

    Ok(format!(
        "{}-{}:{}",
        start.round() as i64,
        end.round() as i64,
        step.round() as i64
    ))
}
