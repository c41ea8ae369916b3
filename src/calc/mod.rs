//! Pure money calculations behind the document editor.

#[cfg(feature = "client")]
pub mod debounce;
pub mod format;
pub mod row;
pub mod scan;
pub mod summary;
