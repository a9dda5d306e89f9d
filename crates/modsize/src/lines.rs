//! Line counting.

use std::fs::File;
use std::io::{BufRead, BufReader};

use camino::Utf8Path;

use crate::error::ScanError;
use crate::walk;

/// Count the lines of a file.
///
/// A line ends at `\n`, at `\r`, or at `\r\n` (counted once), and a trailing
/// line without a terminator still counts. Content is not decoded, so any
/// byte sequence can be counted.
pub fn count_lines(path: &Utf8Path) -> Result<usize, ScanError> {
    let read_error = |source| ScanError::ReadFile {
        path: walk::absolute(path),
        source,
    };
    let file = File::open(path).map_err(read_error)?;
    count_reader_lines(BufReader::new(file)).map_err(read_error)
}

fn count_reader_lines<R: BufRead>(mut reader: R) -> std::io::Result<usize> {
    let mut count = 0;
    let mut after_cr = false;
    let mut open_line = false;
    loop {
        let buf = reader.fill_buf()?;
        if buf.is_empty() {
            break;
        }
        for &byte in buf {
            match byte {
                b'\n' if after_cr => after_cr = false,
                b'\n' => {
                    count += 1;
                    open_line = false;
                }
                b'\r' => {
                    count += 1;
                    after_cr = true;
                    open_line = false;
                }
                _ => {
                    after_cr = false;
                    open_line = true;
                }
            }
        }
        let len = buf.len();
        reader.consume(len);
    }
    Ok(count + usize::from(open_line))
}
