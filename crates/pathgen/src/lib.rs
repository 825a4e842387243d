//! Destination path generator for queued downloads
//!
//! Downloads are grouped under a prefix by the lowercased initial of the series name,
//! then by the lowercased series name itself:
//!
//! ```text
//! <prefix><initial>/<name>/
//! ```
//!
//! # Examples
//!
//! ```
//! use pathgen::PathBuilder;
//!
//! let dir = PathBuilder::new()
//!     .with_prefix("/media/anime/")
//!     .build_directory("Kimetsu no Yaiba")
//!     .unwrap();
//!
//! assert_eq!(dir, "/media/anime/k/kimetsu no yaiba/");
//! ```

mod builder;
mod error;
mod sanitizer;

pub use builder::PathBuilder;
pub use error::{PathGenError, Result};
pub use sanitizer::PathSanitizer;
