//! Line reader tolerant of undecodable bytes.
//!
//! Parser traces are captured from live processes and regularly contain
//! truncated or non-UTF-8 output. Lines are split on `\n` at the byte level and
//! decoded lossily, so a bad byte costs a replacement character instead of
//! the run.

use crate::utils::error::TraceError;
use log::debug;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Where trace lines come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceSource {
    Stdin,
    File(PathBuf),
}

impl TraceSource {
    /// Open the source as a buffered reader
    ///
    /// # Errors
    /// * `TraceError::Open` - File missing or unreadable
    pub fn open(&self) -> Result<Box<dyn BufRead>, TraceError> {
        match self {
            Self::Stdin => {
                debug!("Reading trace from standard input");
                Ok(Box::new(io::stdin().lock()))
            }
            Self::File(path) => Ok(Box::new(open_trace(path)?)),
        }
    }
}

impl fmt::Display for TraceSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdin => write!(f, "<stdin>"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Open a trace file for buffered reading
pub fn open_trace(path: impl AsRef<Path>) -> Result<BufReader<File>, TraceError> {
    let path = path.as_ref();
    debug!("Opening trace file: {}", path.display());

    let file = File::open(path).map_err(|source| TraceError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(BufReader::new(file))
}

/// Iterator over the decoded lines of a reader
///
/// Yields one `String` per line with the line terminator removed. The final
/// line is yielded even without a trailing newline.
pub struct TraceLines<R> {
    reader: R,
    buf: Vec<u8>,
}

impl<R: BufRead> TraceLines<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::with_capacity(256),
        }
    }
}

impl<R: BufRead> Iterator for TraceLines<R> {
    type Item = Result<String, TraceError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();

        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => None,
            Ok(_) => {
                if self.buf.last() == Some(&b'\n') {
                    self.buf.pop();
                    if self.buf.last() == Some(&b'\r') {
                        self.buf.pop();
                    }
                }
                Some(Ok(String::from_utf8_lossy(&self.buf).into_owned()))
            }
            Err(e) => Some(Err(TraceError::Read(e))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn lines(bytes: &[u8]) -> Vec<String> {
        TraceLines::new(Cursor::new(bytes.to_vec()))
            .map(|l| l.unwrap())
            .collect()
    }

    #[test]
    fn test_strips_line_endings() {
        assert_eq!(lines(b"a\r\nb\nc"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let decoded = lines(b"Stack 3 \xff dies\nnext");
        assert_eq!(decoded.len(), 2);
        assert!(decoded[0].starts_with("Stack 3 "));
        assert!(decoded[0].ends_with(" dies"));
        assert!(decoded[0].contains('\u{FFFD}'));
    }

    #[test]
    fn test_empty_input() {
        assert!(lines(b"").is_empty());
    }

    #[test]
    fn test_open_missing_file() {
        let result = open_trace("/definitely/not/here.trace");
        assert!(matches!(result, Err(TraceError::Open { .. })));
    }

    #[test]
    fn test_source_display() {
        assert_eq!(TraceSource::Stdin.to_string(), "<stdin>");
        assert_eq!(
            TraceSource::File(PathBuf::from("runs/a.log")).to_string(),
            "runs/a.log"
        );
    }
}
