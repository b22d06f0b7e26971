pub mod integer_sequence;
pub mod iter;
pub mod merge;

pub use integer_sequence::IntegerSequence;
pub use iter::{Integers, Ranges};

/// Замкнутый интервал `(lo, hi)`, `lo <= hi`.
pub type Interval = (i64, i64);
