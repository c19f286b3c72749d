//! Reverse the bytes of every line in a stream.
//!
//! The engine reads one line at a time into a [`LineBuffer`]. When a line
//! does not fit, a growable buffer roughly doubles and keeps reading where it
//! left off, so lines of any length are handled without copying what is
//! already buffered. A bounded buffer refuses such lines with
//! [`ReverseError::LineTooLong`] instead.
//!
//! Each payload is reversed byte by byte; the line terminator stays at the
//! end. A last line without terminator is reversed and written without one.
//!
//! ```rust
//! use linerev::{GrowthMode, ReverseOptions, reverse_bytes};
//!
//! let options = ReverseOptions { line_max: 2, ..Default::default() };
//! assert_eq!(reverse_bytes(b"abcde\n\n12", options).unwrap(), b"edcba\n\n21");
//!
//! let bounded = ReverseOptions { growth: GrowthMode::Bounded, ..options };
//! let err = reverse_bytes(b"abcde\n", bounded).unwrap_err();
//! assert_eq!(err.to_string(), "line is longer than 2 bytes");
//! ```

mod engine;
mod error;
mod line_buffer;
mod options;
mod reverse;
mod source;

#[cfg(test)]
mod tests;

pub use engine::{EngineState, LineReverser, ReversedLine, RunSummary, reverse_bytes};
pub use error::{BufferError, ReverseError};
pub use line_buffer::{
    FillResult, LineBuffer, MIN_CAPACITY, RESERVED_BYTES, SENTINEL, STRING_TERMINATOR,
};
pub use options::{DEFAULT_LINE_MAX, GrowthMode, ReverseOptions};
pub use reverse::reverse_in_place;
pub use source::LineSource;
