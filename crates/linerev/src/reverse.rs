/// Reverses `bytes` in place by swapping from both ends towards the middle.
///
/// Works on raw bytes: multi-byte UTF-8 sequences come out reversed too.
///
/// ```rust
/// let mut line = *b"abcde";
/// linerev::reverse_in_place(&mut line);
/// assert_eq!(&line, b"edcba");
/// ```
pub fn reverse_in_place(bytes: &mut [u8]) {
    if bytes.len() < 2 {
        return;
    }

    let mut front = 0;
    let mut back = bytes.len() - 1;
    while front < back {
        bytes.swap(front, back);
        front += 1;
        back -= 1;
    }
}

/// Reverses the payload of one buffered line, leaving a trailing
/// `terminator` where it is.
///
/// Returns whether the line ended with `terminator`.
pub(crate) fn reverse_line(line: &mut [u8], terminator: u8) -> bool {
    match line.split_last_mut() {
        Some((last, payload)) if *last == terminator => {
            reverse_in_place(payload);
            true
        }
        _ => {
            reverse_in_place(line);
            false
        }
    }
}
