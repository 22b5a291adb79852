//! File I/O, filename sanitizing, LaTeX unescaping

mod filename;
mod fs;
mod latex;

pub use filename::{archive_entry_name, export_filename, sanitize};
pub use fs::{FsError, read_notes, write_export};
pub use latex::unescape;
