pub mod decode;
pub mod encode;

pub use decode::{parse_token, parse_tokens, ranges_in_str, RangeToken, RangesInStr, TokenPairs};
pub use encode::{integer_string, render_ranges, zero_pad};
