//! Shared helpers for the palmline CLI
//!
//! Keeps the file-handling and preset-resolution logic out of main so
//! it can be tested directly.

pub mod processing;

pub use processing::{
    analyze_file, builtin_preset, is_supported_extension, resolve_preset, write_report_images,
    SUPPORTED_EXTENSIONS,
};
