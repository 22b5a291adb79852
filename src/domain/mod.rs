//! Core types: Note

mod note;

pub use note::Note;
