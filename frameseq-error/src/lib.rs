pub mod ext;
pub mod macros;
pub mod stack;
pub mod status_code;
pub mod types;

// Publicly re-export all error types and helpers from the submodules so that
// callers only need `frameseq_error::*`.
pub use ext::*;
pub use macros::*;
pub use stack::*;
pub use status_code::*;
pub use types::*;

pub type FrameseqResult<T> = Result<T, StackError>;
