//! In-memory ZIP archive of exported notes.

use std::io::{Cursor, Write};

use chrono::{DateTime, Datelike, Timelike, Utc};
use zip::result::ZipResult;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Builds a deflated ZIP archive in memory.
pub(crate) struct Archive {
    writer: ZipWriter<Cursor<Vec<u8>>>,
    entries: usize,
}

impl Archive {
    pub(crate) fn new() -> Self {
        Self {
            writer: ZipWriter::new(Cursor::new(Vec::new())),
            entries: 0,
        }
    }

    /// Adds one file. Entry names must be unique within the archive.
    pub(crate) fn add(&mut self, name: &str, modified: DateTime<Utc>, bytes: &[u8]) -> ZipResult<()> {
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(zip_timestamp(modified));

        self.writer.start_file(name, options)?;
        self.writer.write_all(bytes)?;
        self.entries += 1;
        Ok(())
    }

    /// Number of entries added so far.
    pub(crate) fn len(&self) -> usize {
        self.entries
    }

    /// Writes the central directory and returns the archive bytes.
    pub(crate) fn finish(self) -> ZipResult<Vec<u8>> {
        Ok(self.writer.finish()?.into_inner())
    }
}

/// ZIP timestamps cover 1980–2107 at two-second resolution; anything outside
/// that range gets the format's default timestamp.
fn zip_timestamp(at: DateTime<Utc>) -> zip::DateTime {
    let (Ok(year), Ok(month), Ok(day), Ok(hour), Ok(minute), Ok(second)) = (
        u16::try_from(at.year()),
        u8::try_from(at.month()),
        u8::try_from(at.day()),
        u8::try_from(at.hour()),
        u8::try_from(at.minute()),
        u8::try_from(at.second()),
    ) else {
        return zip::DateTime::default();
    };

    zip::DateTime::from_date_and_time(year, month, day, hour, minute, second).unwrap_or_default()
}
