//! Cross-platform utilities.
//!
//! - [`fs`] - Directory creation and atomic writes for build output

pub mod fs;

pub use fs::{atomic_write, atomic_write_async, ensure_dir, normalize_path_for_storage};
