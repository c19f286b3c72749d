use std::io;

use thiserror::Error;

/// Failure to size or resize the storage of a [`LineBuffer`](crate::LineBuffer).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BufferError {
    /// The allocator refused to provide `requested` bytes of storage, or the
    /// next capacity does not fit in `usize`.
    #[error("cannot allocate a line buffer of {requested} bytes")]
    AllocationFailed {
        /// Total capacity, in bytes, that was being requested.
        requested: usize,
    },

    /// `grow` was called on a buffer created in bounded mode.
    #[error("line buffer is fixed at {line_max} bytes and cannot grow")]
    FixedCapacity {
        /// Usable payload length of the fixed buffer.
        line_max: usize,
    },
}

/// Fatal error raised while reversing a stream.
///
/// Every variant stops the run. Output already written for earlier lines is
/// flushed and left in place.
#[derive(Debug, Error)]
pub enum ReverseError {
    /// Reading from the source failed.
    #[error("error reading input")]
    Read(#[source] io::Error),

    /// Writing to or flushing the sink failed.
    #[error("error writing output")]
    Write(#[source] io::Error),

    /// A line did not fit into a bounded buffer.
    ///
    /// `max` is the longest payload, terminator excluded, that the buffer
    /// accepts.
    #[error("line is longer than {max} bytes")]
    LineTooLong {
        /// Usable payload length of the bounded buffer.
        max: usize,
    },

    /// The line buffer could not be allocated or grown.
    #[error(transparent)]
    Buffer(#[from] BufferError),
}

impl ReverseError {
    /// Returns `true` for errors raised by the source or sink rather than by
    /// the buffer itself.
    #[must_use]
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Read(_) | Self::Write(_))
    }
}
