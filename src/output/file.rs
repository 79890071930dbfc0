//! Verbatim file output of duplicate rows.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::duplicates::{DupeError, RowSink};
use crate::scanner::RawRow;

/// Writes duplicate rows byte-for-byte into a new file.
///
/// The file is created with `create_new`, so an existing file is never
/// overwritten or appended to.
pub struct FileSink {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl FileSink {
    /// Create the output file.
    ///
    /// # Errors
    ///
    /// Returns [`DupeError::OutputAlreadyExists`] if `path` exists, or
    /// [`DupeError::Open`] for any other creation failure.
    pub fn create(path: &Path) -> Result<Self, DupeError> {
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map_err(|source| {
                if source.kind() == io::ErrorKind::AlreadyExists {
                    DupeError::OutputAlreadyExists(path.to_path_buf())
                } else {
                    DupeError::Open {
                        path: path.to_path_buf(),
                        source,
                    }
                }
            })?;
        log::debug!("Created output file {}", path.display());

        Ok(Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
        })
    }
}

impl RowSink for FileSink {
    fn begin(&mut self, header: Option<&RawRow>) -> io::Result<()> {
        if let Some(header) = header {
            self.writer.write_all(&header.bytes)?;
        }
        Ok(())
    }

    fn emit(&mut self, row: &RawRow) -> io::Result<()> {
        self.writer.write_all(&row.bytes)
    }

    fn finish(&mut self) -> io::Result<()> {
        self.writer.flush()?;
        log::debug!("Flushed duplicate rows to {}", self.path.display());
        Ok(())
    }
}
