//! Line buffer with sentinel-based truncation detection.
//!
//! Layout
//! - `storage` is one contiguous `Vec<u8>` of `capacity` bytes. Two bytes are
//!   always held in reserve: the last byte of the storage is only ever written
//!   by the string terminator that closes a fill, and the byte before it is
//!   room for the line terminator of a payload of exactly `line_max` bytes.
//!   Hence `line_max == capacity - 2`.
//! - `fill_start` is where the next fill begins writing. It is zero for a fresh
//!   line and points into the middle of the storage while a long line is being
//!   continued after a [`LineBuffer::grow`].
//!
//! Truncation
//! - Before each fill the last byte of the storage is set to [`SENTINEL`].
//!   After the read a [`STRING_TERMINATOR`] is written right after the data. If
//!   that terminator landed on the sentinel slot and the byte before it is not
//!   the line terminator, the read ran out of room mid-line.
//! - This never looks at how many bytes a single read returned, so sources
//!   that coalesce or split reads behave the same.
//!
//! Growth
//! - `capacity' = 2 * capacity - 2` keeps the two reserve bytes fixed while the
//!   usable payload length doubles.
//! - `fill_start' = capacity - 1` (old capacity) lands the continuation exactly
//!   on the string terminator of the truncated fill, so the next fill
//!   overwrites nothing but that terminator. Buffered bytes are never copied,
//!   moved or duplicated by the engine.

use std::io;

use crate::{BufferError, GrowthMode, LineSource};


/// Marker placed in the last byte of the storage before each fill.
pub const SENTINEL: u8 = 0x7f;

/// Byte written right after the data of every fill.
pub const STRING_TERMINATOR: u8 = 0x00;

/// Bytes of every buffer that never hold payload.
pub const RESERVED_BYTES: usize = 2;

/// Smallest capacity a buffer can have: one data byte plus the reserve.
pub const MIN_CAPACITY: usize = RESERVED_BYTES + 1;

/// Largest storage a `Vec<u8>` can hold.
const MAX_CAPACITY: usize = isize::MAX.unsigned_abs();

/// Outcome of a single [`LineBuffer::fill`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillResult {
    /// A full line, or the last unterminated line of the stream, is buffered.
    ///
    /// Contains the length of the line from offset 0, terminator included.
    Complete(usize),

    /// The buffer filled up before the line terminator was seen.
    Truncated,

    /// The stream ended and no partial line is pending.
    EndOfStream,
}

/// Owned byte storage for one line at a time.
///
/// # Examples
///
/// ```rust
/// use linerev::{FillResult, GrowthMode, LineBuffer};
///
/// let mut src: &[u8] = b"abcdef\n";
/// let mut buffer = LineBuffer::new(4, GrowthMode::Growable, b'\n').unwrap();
///
/// assert_eq!(buffer.fill(&mut src).unwrap(), FillResult::Truncated);
/// buffer.grow().unwrap();
/// assert_eq!(buffer.fill(&mut src).unwrap(), FillResult::Complete(7));
/// assert_eq!(buffer.line(7), b"abcdef\n");
/// ```
#[derive(Debug)]
pub struct LineBuffer {
    storage: Vec<u8>,
    fill_start: usize,
    mode: GrowthMode,
    terminator: u8,
    growths: u32,
    max_capacity: usize,
}

impl LineBuffer {
    /// Allocates a buffer that holds `line_max` payload bytes plus the
    /// reserve. `line_max` is raised to 1 if it is zero.
    ///
    /// # Errors
    ///
    /// [`BufferError::AllocationFailed`] if the storage cannot be allocated.
    pub fn new(line_max: usize, mode: GrowthMode, terminator: u8) -> Result<Self, BufferError> {
        Self::with_max_capacity(line_max, mode, terminator, MAX_CAPACITY)
    }

    pub(crate) fn with_max_capacity(
        line_max: usize,
        mode: GrowthMode,
        terminator: u8,
        max_capacity: usize,
    ) -> Result<Self, BufferError> {
        let capacity = line_max
            .max(1)
            .checked_add(RESERVED_BYTES)
            .ok_or(BufferError::AllocationFailed {
                requested: usize::MAX,
            })?;

        let mut storage = Vec::new();
        storage
            .try_reserve_exact(capacity)
            .map_err(|_| BufferError::AllocationFailed {
                requested: capacity,
            })?;
        storage.resize(capacity, 0);

        Ok(Self {
            storage,
            fill_start: 0,
            mode,
            terminator,
            growths: 0,
            max_capacity,
        })
    }

    /// Total length of the storage, reserve included.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Longest payload, terminator excluded, that fits without growing.
    #[must_use]
    pub fn line_max(&self) -> usize {
        self.storage.len() - RESERVED_BYTES
    }

    /// Offset at which the next fill starts writing.
    #[must_use]
    pub fn fill_start(&self) -> usize {
        self.fill_start
    }

    /// Whether [`grow`](Self::grow) is allowed.
    #[must_use]
    pub fn mode(&self) -> GrowthMode {
        self.mode
    }

    /// Byte that ends a line.
    #[must_use]
    pub fn terminator(&self) -> u8 {
        self.terminator
    }

    /// Number of successful [`grow`](Self::grow) calls so far.
    #[must_use]
    pub fn growths(&self) -> u32 {
        self.growths
    }

    /// Reads the next stretch of the current line from `source`.
    ///
    /// Bytes go to `storage[fill_start .. capacity - 1)`; whatever was
    /// buffered before `fill_start` is left untouched.
    ///
    /// # Errors
    ///
    /// Any I/O error reported by `source`.
    pub fn fill<S: LineSource + ?Sized>(&mut self, source: &mut S) -> io::Result<FillResult> {
        let last = self.storage.len() - 1;
        self.storage[last] = SENTINEL;

        let region = &mut self.storage[self.fill_start..last];
        let read = source.read_line_into(region, self.terminator)?;
        let len = self.fill_start + read;
        self.storage[len] = STRING_TERMINATOR;

        if read == 0 && self.fill_start == 0 {
            return Ok(FillResult::EndOfStream);
        }

        if self.storage[last] == STRING_TERMINATOR && self.storage[last - 1] != self.terminator {
            return Ok(FillResult::Truncated);
        }

        Ok(FillResult::Complete(len))
    }

    /// Doubles the usable payload length and points the next fill at the
    /// string terminator of the truncated one.
    ///
    /// # Errors
    ///
    /// - [`BufferError::FixedCapacity`] in bounded mode. Nothing changes.
    /// - [`BufferError::AllocationFailed`] if the larger storage cannot be
    ///   reserved. The buffer is left as it was.
    pub fn grow(&mut self) -> Result<(), BufferError> {
        if self.mode == GrowthMode::Bounded {
            return Err(BufferError::FixedCapacity {
                line_max: self.line_max(),
            });
        }

        let old = self.storage.len();
        let new = grown_capacity(old).ok_or(BufferError::AllocationFailed {
            requested: usize::MAX,
        })?;
        if new > self.max_capacity {
            return Err(BufferError::AllocationFailed { requested: new });
        }

        self.storage
            .try_reserve_exact(new - old)
            .map_err(|_| BufferError::AllocationFailed { requested: new })?;
        self.storage.resize(new, 0);
        self.fill_start = old - 1;
        self.growths += 1;

        tracing::debug!(from = old, to = new, "grew line buffer");
        Ok(())
    }

    /// Starts a new line. Buffered content is logically discarded.
    pub fn reset(&mut self) {
        self.fill_start = 0;
    }

    /// The first `len` bytes, as reported by [`FillResult::Complete`].
    ///
    /// # Panics
    ///
    /// If `len` exceeds the capacity.
    #[must_use]
    pub fn line(&self, len: usize) -> &[u8] {
        &self.storage[..len]
    }

    pub(crate) fn line_mut(&mut self, len: usize) -> &mut [u8] {
        &mut self.storage[..len]
    }
}

/// `2 * capacity - 2`, or `None` on overflow.
fn grown_capacity(capacity: usize) -> Option<usize> {
    capacity
        .checked_mul(2)
        .map(|doubled| doubled - RESERVED_BYTES)
}
