use std::io::{self, BufRead, Write};

/// Default indentation width of `shift-text`
pub const DEFAULT_SHIFT: usize = 4;

/// Write every input line prefixed with `width` spaces.
///
/// Lines are copied byte for byte, terminator included, so non-UTF-8 text and
/// a final line without newline come out unchanged apart from the prefix.
/// Returns the number of lines written.
pub fn shift<R: BufRead, W: Write>(mut input: R, mut output: W, width: usize) -> io::Result<usize> {
    let prefix = vec![b' '; width];
    let mut line = Vec::new();
    let mut lines = 0;

    loop {
        line.clear();
        if input.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        output.write_all(&prefix)?;
        output.write_all(&line)?;
        lines += 1;
    }

    output.flush()?;
    Ok(lines)
}
