pub mod format;
pub mod preview;
