//! Line reader for atlas descriptors
//!
//! Splits descriptor text into lines and decodes the two structured line
//! shapes the format uses: `label: value` and `label: v1, v2[, v3[, v4]]`.
//! Labels are never inspected, only the position of a line matters.

use thiserror::Error;

/// Maximum number of fields a tuple line is split into.
pub const TUPLE_SIZE: usize = 4;

/// Error type for malformed atlas descriptors.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("line {line}: {message}")]
pub struct FormatError {
    pub message: String,
    /// 1-based line number, 0 when no line has been read yet
    pub line: usize,
}

impl FormatError {
    pub fn new(message: impl Into<String>, line: usize) -> Self {
        Self { message: message.into(), line }
    }
}

/// Forward-only cursor over the lines of a descriptor.
#[derive(Debug, Clone)]
pub struct AtlasReader<'a> {
    lines: Vec<&'a str>,
    index: usize,
}

impl<'a> AtlasReader<'a> {
    /// Create a reader over `text`, splitting on `\r\n`, `\r` and `\n`.
    pub fn new(text: &'a str) -> Self {
        Self { lines: split_lines(text), index: 0 }
    }

    /// Returns the next raw line, or `None` once every line has been read.
    ///
    /// The line is not trimmed.
    pub fn read_line(&mut self) -> Option<&'a str> {
        let line = self.lines.get(self.index).copied()?;
        self.index += 1;
        log::trace!("atlas line {}: {:?}", self.index, line);
        Some(line)
    }

    /// 1-based number of the line most recently returned.
    pub fn line_number(&self) -> usize {
        self.index
    }

    /// Reads a `label: value` line and returns the trimmed value.
    pub fn read_value(&mut self) -> Result<String, FormatError> {
        let (line, colon) = self.read_structured()?;
        Ok(line[colon + 1..].trim().to_string())
    }

    /// Reads a `label: v1, v2, ...` line into `tuple` and returns the number
    /// of fields written.
    ///
    /// Splitting stops after the third comma, so the fourth field keeps any
    /// remaining commas. Slots past the returned count are left untouched.
    ///
    /// ```
    /// use texatlas::reader::AtlasReader;
    ///
    /// let mut reader = AtlasReader::new("split: 1, 2, 3, 4, 5\nxy: 7, 8");
    /// let mut tuple: [String; 4] = Default::default();
    /// assert_eq!(reader.read_tuple(&mut tuple).unwrap(), 4);
    /// assert_eq!(tuple[3], "4, 5");
    /// assert_eq!(reader.read_tuple(&mut tuple).unwrap(), 2);
    /// assert_eq!(tuple, ["7", "8", "3", "4, 5"]);
    /// ```
    pub fn read_tuple(&mut self, tuple: &mut [String; TUPLE_SIZE]) -> Result<usize, FormatError> {
        let (line, colon) = self.read_structured()?;
        let mut rest = &line[colon + 1..];
        let mut count = 0;
        while count < TUPLE_SIZE - 1 {
            let Some(comma) = rest.find(',') else {
                break;
            };
            tuple[count] = rest[..comma].trim().to_string();
            rest = &rest[comma + 1..];
            count += 1;
        }
        tuple[count] = rest.trim().to_string();
        Ok(count + 1)
    }

    /// Reads a line that must contain a colon, returning it with the colon's
    /// byte offset.
    fn read_structured(&mut self) -> Result<(&'a str, usize), FormatError> {
        let Some(line) = self.read_line() else {
            return Err(FormatError::new("unexpected end of atlas data", self.index));
        };
        match line.find(':') {
            Some(colon) => Ok((line, colon)),
            None => Err(FormatError::new(format!("Invalid line: {}", line), self.index)),
        }
    }
}

fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let bytes = text.as_bytes();
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                lines.push(&text[start..i]);
                start = i + 1;
            }
            b'\r' => {
                lines.push(&text[start..i]);
                if bytes.get(i + 1) == Some(&b'\n') {
                    i += 1;
                }
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }
    lines.push(&text[start..]);
    lines
}
