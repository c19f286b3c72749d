//! Line reversal engine.
//!
//! The engine owns one [`LineBuffer`] for the lifetime of a stream and runs a
//! small state machine over it:
//!
//! - `ReadingLine`: fill the buffer. A truncated fill grows the buffer and
//!   fills again from the continuation offset (growable mode) or fails with
//!   [`ReverseError::LineTooLong`] (bounded mode).
//! - `GotLine`: a complete line sits at the front of the buffer. Its payload
//!   is reversed in place, the terminator stays last, and the line is handed
//!   out. The next call resets the buffer and goes back to `ReadingLine`.
//! - `EndOfInput` / `Failed`: terminal. Both yield `Ok(None)` from then on;
//!   the error that caused `Failed` is returned exactly once.

use std::io::{self, Write};

use bstr::ByteSlice;

use crate::{
    BufferError, FillResult, GrowthMode, LineBuffer, LineSource, ReverseError, ReverseOptions,
    reverse::reverse_line,
};


/// Where the engine is in its read/reverse cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Waiting to read the next line.
    ReadingLine,
    /// A reversed line of the given length is buffered.
    GotLine(usize),
    /// The stream ended cleanly.
    EndOfInput,
    /// A fatal error stopped the run.
    Failed,
}

impl EngineState {
    /// `true` for [`EndOfInput`](Self::EndOfInput) and [`Failed`](Self::Failed).
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::EndOfInput | Self::Failed)
    }
}

/// One reversed line, borrowed from the engine's buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReversedLine<'a> {
    bytes: &'a [u8],
    terminated: bool,
}

impl<'a> ReversedLine<'a> {
    /// Reversed payload followed by the terminator, if the input line had one.
    #[must_use]
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Reversed payload without the terminator.
    #[must_use]
    pub fn payload(&self) -> &'a [u8] {
        if self.terminated {
            &self.bytes[..self.bytes.len() - 1]
        } else {
            self.bytes
        }
    }

    /// Whether the input line ended with the terminator. Only the last line
    /// of a stream can be unterminated.
    #[must_use]
    pub fn is_terminated(&self) -> bool {
        self.terminated
    }
}

/// Counters for a finished [`LineReverser::run`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Lines written to the sink.
    pub lines: u64,
    /// Bytes written to the sink.
    pub bytes: u64,
    /// Times the buffer had to grow.
    pub growths: u32,
}

/// Reads lines from a [`LineSource`], reverses each one in place and hands
/// them out one at a time.
///
/// # Examples
///
/// ```rust
/// use linerev::{LineReverser, ReverseOptions};
///
/// let mut src: &[u8] = b"abcde\n12";
/// let mut out = Vec::new();
/// let mut reverser = LineReverser::new(ReverseOptions::default()).unwrap();
/// reverser.run(&mut src, &mut out).unwrap();
/// assert_eq!(out, b"edcba\n21");
/// ```
#[derive(Debug)]
pub struct LineReverser {
    buffer: LineBuffer,
    state: EngineState,
}

impl LineReverser {
    /// Allocates the line buffer described by `options`.
    ///
    /// # Errors
    ///
    /// [`ReverseError::Buffer`] if the buffer cannot be allocated.
    pub fn new(options: ReverseOptions) -> Result<Self, ReverseError> {
        let buffer = LineBuffer::new(options.line_max, options.growth, options.terminator)?;
        Ok(Self {
            buffer,
            state: EngineState::ReadingLine,
        })
    }

    /// Current position in the read/reverse cycle.
    #[must_use]
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// The buffer driven by this engine.
    #[must_use]
    pub fn buffer(&self) -> &LineBuffer {
        &self.buffer
    }

    /// Reads and reverses the next line.
    ///
    /// Returns `Ok(None)` once the stream has ended, and on every call after
    /// an error has been returned.
    ///
    /// # Errors
    ///
    /// - [`ReverseError::Read`] if the source fails.
    /// - [`ReverseError::LineTooLong`] if a line does not fit a bounded buffer.
    /// - [`ReverseError::Buffer`] if the buffer cannot grow.
    pub fn next_line<S: LineSource + ?Sized>(
        &mut self,
        source: &mut S,
    ) -> Result<Option<ReversedLine<'_>>, ReverseError> {
        if self.state.is_terminal() {
            return Ok(None);
        }

        self.buffer.reset();
        self.state = EngineState::ReadingLine;

        let len = loop {
            match self.buffer.fill(source) {
                Ok(FillResult::Complete(len)) => break len,
                Ok(FillResult::EndOfStream) => {
                    self.state = EngineState::EndOfInput;
                    return Ok(None);
                }
                Ok(FillResult::Truncated) => self.on_truncated()?,
                Err(e) => return Err(self.fail(ReverseError::Read(e))),
            }
        };

        let terminator = self.buffer.terminator();
        let terminated = reverse_line(self.buffer.line_mut(len), terminator);
        self.state = EngineState::GotLine(len);

        let bytes = self.buffer.line(len);
        tracing::trace!(len, line = ?bytes.as_bstr(), "reversed line");
        Ok(Some(ReversedLine { bytes, terminated }))
    }

    /// Reverses every remaining line of `source` into `sink`, then flushes it.
    ///
    /// On a fatal error the sink is still flushed, so every line reversed
    /// before the failure reaches it.
    ///
    /// # Errors
    ///
    /// Everything [`next_line`](Self::next_line) reports, plus
    /// [`ReverseError::Write`] if the sink fails.
    pub fn run<S, W>(&mut self, source: &mut S, sink: &mut W) -> Result<RunSummary, ReverseError>
    where
        S: LineSource + ?Sized,
        W: Write + ?Sized,
    {
        let mut summary = RunSummary::default();

        if let Err(e) = self.pump(source, sink, &mut summary) {
            if let Err(flush) = sink.flush() {
                tracing::warn!(error = %flush, "could not flush output after failure");
            }
            return Err(e);
        }

        sink.flush().map_err(|e| self.fail(ReverseError::Write(e)))?;
        summary.growths = self.buffer.growths();

        tracing::debug!(
            lines = summary.lines,
            bytes = summary.bytes,
            growths = summary.growths,
            capacity = self.buffer.capacity(),
            "finished reversing stream"
        );
        Ok(summary)
    }

    fn pump<S, W>(
        &mut self,
        source: &mut S,
        sink: &mut W,
        summary: &mut RunSummary,
    ) -> Result<(), ReverseError>
    where
        S: LineSource + ?Sized,
        W: Write + ?Sized,
    {
        loop {
            let written = match self.next_line(source)? {
                Some(line) => write_line(sink, line.as_bytes()),
                None => return Ok(()),
            };
            match written {
                Ok(n) => {
                    summary.lines += 1;
                    summary.bytes += n as u64;
                }
                Err(e) => return Err(self.fail(ReverseError::Write(e))),
            }
        }
    }

    fn on_truncated(&mut self) -> Result<(), ReverseError> {
        match self.buffer.mode() {
            GrowthMode::Growable => self
                .buffer
                .grow()
                .map_err(|e: BufferError| self.fail(e.into())),
            GrowthMode::Bounded => {
                let max = self.buffer.line_max();
                Err(self.fail(ReverseError::LineTooLong { max }))
            }
        }
    }

    fn fail(&mut self, error: ReverseError) -> ReverseError {
        tracing::debug!(%error, "line reversal failed");
        self.state = EngineState::Failed;
        error
    }
}

fn write_line<W: Write + ?Sized>(sink: &mut W, bytes: &[u8]) -> io::Result<usize> {
    sink.write_all(bytes)?;
    Ok(bytes.len())
}

/// Reverses every line of `input` with the given options.
///
/// # Errors
///
/// [`ReverseError::LineTooLong`] in bounded mode, or
/// [`ReverseError::Buffer`] if the buffer cannot be allocated.
///
/// ```rust
/// use linerev::{ReverseOptions, reverse_bytes};
///
/// let out = reverse_bytes(b"abcde\n12\n", ReverseOptions::default()).unwrap();
/// assert_eq!(out, b"edcba\n21\n");
/// ```
pub fn reverse_bytes(input: &[u8], options: ReverseOptions) -> Result<Vec<u8>, ReverseError> {
    let mut source = input;
    let mut out = Vec::with_capacity(input.len());
    LineReverser::new(options)?.run(&mut source, &mut out)?;
    Ok(out)
}
