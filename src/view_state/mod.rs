//! View-model layer (pure): derived display values for the table renderer.

pub mod table;

pub use table::{PageInfo, PageWindow, TableContent, PAGE_WINDOW};
