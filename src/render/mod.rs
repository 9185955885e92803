//! Payload → text. Nothing is diffed: each render builds the full frame from
//! the current snapshot, so what is shown always matches the last server read.

pub mod achievements;
pub mod filter;
pub mod format;
pub mod table;
pub mod views;

pub use filter::{filter_items, Searchable};
pub use format::{format_brl, format_date};
pub use table::TextTable;
