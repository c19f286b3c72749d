use std::io::{self, BufRead};

use bstr::ByteSlice;

/// A byte stream that can hand out at most one line per call.
///
/// This is the only thing the engine needs from its input. Every
/// [`BufRead`] implements it, so `&[u8]`, `BufReader<File>` and `StdinLock`
/// work out of the box.
pub trait LineSource {
    /// Copies bytes into `dst` until `terminator` has been copied, `dst` is
    /// full, or the stream ends, whichever comes first.
    ///
    /// Returns the number of bytes written to the front of `dst`. `0` with a
    /// non-empty `dst` means end of stream.
    ///
    /// # Errors
    ///
    /// Any I/O error from the underlying stream, except
    /// [`io::ErrorKind::Interrupted`], which is retried.
    fn read_line_into(&mut self, dst: &mut [u8], terminator: u8) -> io::Result<usize>;
}

impl<R: BufRead + ?Sized> LineSource for R {
    fn read_line_into(&mut self, dst: &mut [u8], terminator: u8) -> io::Result<usize> {
        let mut written = 0;

        while written < dst.len() {
            let available = match self.fill_buf() {
                Ok(available) => available,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if available.is_empty() {
                break;
            }

            let room = dst.len() - written;
            let window = &available[..available.len().min(room)];
            let (take, found) = match window.find_byte(terminator) {
                Some(at) => (at + 1, true),
                None => (window.len(), false),
            };

            dst[written..written + take].copy_from_slice(&window[..take]);
            self.consume(take);
            written += take;

            if found {
                break;
            }
        }

        Ok(written)
    }
}
