//! Output generation for a finished [`Report`](crate::models::Report).
//!
//! # Submodules
//!
//! - [`terminal`]: KPI lines, a per-label bar chart, and the score-sorted table
//! - [`json`]: writes the report as JSON for API consumption
//! - [`markdown`]: renders the report as Markdown tables
//!
//! # Output Structure
//!
//! ```text
//! json_output_dir/
//! └── 2026-10-16/
//!     └── books.toscrape.com.json
//!
//! markdown_output_dir/
//! └── 2026-10-16_books.toscrape.com.md
//! ```

pub mod json;
pub mod markdown;
pub mod terminal;
