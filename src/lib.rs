//! PDF Horizontal Split Library
//!
//! Splits wide PDF pages (landscape spreads, scanned double pages) into
//! narrower pages, each holding a horizontal strip of the original.
//! This library provides functionality to:
//! - Parse per-page split configurations such as `"h1:1,1,h35:36:37"`
//! - Calculate strip geometry for a page
//! - Build and save the split document with lopdf
//!
//! # Example
//!
//! ```no_run
//! use pdf_hsplit::pdf::{split_pdf, SplitOptions};
//! use std::path::PathBuf;
//!
//! let options = SplitOptions {
//!     input_path: PathBuf::from("spreads.pdf"),
//!     output_path: PathBuf::from("pages.pdf"),
//!     split_config: "h1:1".to_string(),
//!     ..Default::default()
//! };
//!
//! split_pdf(&options).expect("Failed to split PDF");
//! ```

pub mod error;
pub mod layout;
pub mod pdf;
pub mod ratio;

// Re-export commonly used items
pub use error::{Error, ErrorKind, Result};
pub use ratio::{parse_page_rule, parse_split_spec, PageRule, SplitSpec};
