//! Output of processed lines

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Writes one output record per line
pub struct LineWriter<W: Write> {
    writer: W,
    written: usize,
}

impl<W: Write> LineWriter<W> {
    /// Create a line writer
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    /// Write every line followed by a newline
    pub fn write_lines<I, S>(&mut self, lines: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            writeln!(self.writer, "{}", line.as_ref())?;
            self.written += 1;
        }
        Ok(())
    }

    /// Lines written so far
    pub fn written(&self) -> usize {
        self.written
    }

    /// Flush and return the inner writer
    pub fn finish(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

/// Buffered writer on `path`, or stdout when no path is given
pub fn open_output(path: Option<&Path>) -> Result<LineWriter<Box<dyn Write>>> {
    let writer: Box<dyn Write> = match path {
        Some(path) => Box::new(BufWriter::new(
            File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };
    Ok(LineWriter::new(writer))
}
