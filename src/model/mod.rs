pub mod entry;
pub mod language;
