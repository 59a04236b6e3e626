//! PDF reading and page composition

pub mod metadata;
pub mod split;

// Re-export commonly used items
pub use metadata::{count_pages, page_box, PageBox};
pub use split::{split_document, split_pdf, SplitOptions, SplitSummary};
