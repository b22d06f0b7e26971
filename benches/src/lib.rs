//! Общие входные данные для бенчмарков.

use rand::{rngs::SmallRng, seq::SliceRandom, SeedableRng};

/// Перемешанные кадры `0..n` с дырами через каждые 7.
pub fn shuffled_frames(n: i64) -> Vec<i64> {
    let mut frames: Vec<i64> = (0..n).filter(|f| f % 7 != 0).collect();
    frames.shuffle(&mut SmallRng::seed_from_u64(42));
    frames
}

/// Упакованные интервалы `[i*10, i*10+3]`.
pub fn spaced_ranges(n: i64) -> Vec<(i64, i64)> {
    (0..n).map(|i| (i * 10, i * 10 + 3)).collect()
}
