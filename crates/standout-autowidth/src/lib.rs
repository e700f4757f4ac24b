//! # Standout Autowidth - Content-Driven Column Widths
//!
//! `standout-autowidth` sizes data grid columns from the data they will show.
//! For every column it resolves the text each row would display, takes the
//! longest one (or the header, if longer) and converts that length into a
//! pixel width. The result is written back onto a copy of the column
//! definition.
//!
//! It does no font measurement: every character is assumed to be the same
//! width. The constants live in [`WidthConfig`].
//!
//! ## Quick Start
//!
//! ```rust
//! use standout_autowidth::{process_columns_with_dynamic_widths, CellValue, Column};
//! use serde_json::json;
//!
//! let rows: Vec<CellValue> = serde_json::from_value(json!([
//!     {"id": 1, "amount": 100},
//!     {"id": 2, "amount": 25000},
//! ]))
//! .unwrap();
//!
//! let columns = vec![
//!     Column::new("amount"),
//!     Column::new("notes").disable_dynamic_width(true),
//! ];
//!
//! let sized = process_columns_with_dynamic_widths(&columns, &rows);
//! assert_eq!(sized[0].width, Some(83));
//! assert_eq!(sized[0].flex, Some(0.0));
//! assert_eq!(sized[1].width, None);
//! ```
//!
//! ## Cell Text Resolution
//!
//! Columns may carry hooks mirroring the grid's own: `auto_width_value_getter`,
//! `value_getter`, `value_formatter` and `render_cell`. They are consulted in
//! that order and the first non-empty text wins. Hooks that return an error
//! or panic are skipped, so a broken column definition never stops the rest
//! of the table from being sized.
//!
//! ## Value Normalization
//!
//! | Value | Text |
//! |-------|------|
//! | `null` | `""` |
//! | string, number, bool | as printed |
//! | date | `date_format` (en-US style by default) |
//! | `[1, 2, 3]` | `"1, 2, 3"` |
//! | `[{qty: 2}, {qty: 3}]` | `"5"` |
//! | `[{qtyRolls: 2}, {qtyRolls: 4}]` | `"6 rolls"` |
//! | `[{}, {}]` | `"2 items"` |
//! | `{status: "OK", name: "x"}` | `"x"` |

mod column;
mod config;
mod error;
mod node;
mod normalize;
mod resolve;
mod value;
mod width;

pub use column::{CellParams, Column, RenderHook, ValueHook};
pub use config::{WidthConfig, DEFAULT_AGGREGATABLE_KEYS, DEFAULT_DESCRIPTIVE_KEYS};
pub use error::{ConfigError, HookError, Result};
pub use node::{extract_text, RenderNode};
pub use value::{format_number, CellValue, Fields};
pub use width::AutoWidth;

use width::DEFAULT_ENGINE;

/// Pixel width for one column using the default configuration.
///
/// # Example
///
/// ```rust
/// use standout_autowidth::{get_dynamic_column_width, Column};
///
/// // No rows: only the header counts, and the 80px floor applies.
/// assert_eq!(get_dynamic_column_width(&Column::new("id"), &[]), 80);
/// ```
pub fn get_dynamic_column_width(column: &Column, rows: &[CellValue]) -> u32 {
    DEFAULT_ENGINE.column_width(column, rows)
}

/// Apply content-based widths to every column using the default configuration.
///
/// See [`AutoWidth::process_columns`].
pub fn process_columns_with_dynamic_widths(columns: &[Column], rows: &[CellValue]) -> Vec<Column> {
    DEFAULT_ENGINE.process_columns(columns, rows)
}
