use std::io::{BufRead, Write};

/// Newline framed text over any reader and writer pair.
pub struct LineStream<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> LineStream<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// The next non-blank line with surrounding whitespace trimmed, or `None`
    /// once the reader is exhausted or fails.
    pub fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        loop {
            if let Err(_) | Ok(0) = self.reader.read_line(&mut line) {
                return None;
            }

            let result = line.trim();
            if !result.is_empty() {
                return Some(result.to_string());
            }
            line.clear();
        }
    }

    pub fn write_line(&mut self, line: &str) -> Result<(), std::io::Error> {
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()
    }

    pub fn into_inner(self) -> (R, W) {
        (self.reader, self.writer)
    }
}
