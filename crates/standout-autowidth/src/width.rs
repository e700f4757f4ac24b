//! Width estimation and column processing.
//!
//! Width is a linear function of the longest text in the column:
//!
//! ```text
//! width = max(ceil(max_len * char_width + padding), floor)
//! floor = max(column.min_width, config.min_width)
//! ```
//!
//! where `max_len` covers the header and every resolved cell.

use once_cell::sync::Lazy;
use tracing::trace;

use crate::column::Column;
use crate::config::WidthConfig;
use crate::value::CellValue;

pub(crate) static DEFAULT_ENGINE: Lazy<AutoWidth> = Lazy::new(AutoWidth::default);

/// Content-driven column sizing with a fixed configuration.
///
/// # Example
///
/// ```rust
/// use standout_autowidth::{AutoWidth, CellValue, Column, WidthConfig};
/// use serde_json::json;
///
/// let engine = AutoWidth::new(WidthConfig { min_width: 60, ..Default::default() });
/// let rows: Vec<CellValue> = vec![json!({"sku": "A-1"}).into()];
///
/// let columns = engine.process_columns(&[Column::new("sku")], &rows);
/// assert_eq!(columns[0].width, Some(60));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AutoWidth {
    config: WidthConfig,
}

impl AutoWidth {
    pub fn new(config: WidthConfig) -> Self {
        AutoWidth { config }
    }

    pub fn config(&self) -> &WidthConfig {
        &self.config
    }

    /// Pixel width for a text of `len` characters, before any floor.
    pub fn estimate_text_width(&self, len: usize) -> u32 {
        let width = (len as f64 * self.config.char_width + self.config.padding).ceil();
        // Float to int casts saturate.
        width as u32
    }

    /// Width in pixels that fits the header and every cell of `column`.
    pub fn column_width(&self, column: &Column, rows: &[CellValue]) -> u32 {
        let header_len = text_len(column.header_text()).max(1);

        let max_len = rows
            .iter()
            .enumerate()
            .map(|(index, row)| text_len(&self.resolve_cell_text(column, row, index)))
            .fold(header_len, usize::max);

        let floor = column
            .min_width
            .map_or(self.config.min_width, |min| min.max(self.config.min_width));
        let width = self.estimate_text_width(max_len).max(floor);

        trace!(field = ?column.field, max_len, width, "Estimated column width");
        width
    }

    /// New column list with content-based widths applied.
    ///
    /// Columns with `disable_dynamic_width` are returned as they are; all
    /// others are pinned via [`Column::with_width`].
    pub fn process_columns(&self, columns: &[Column], rows: &[CellValue]) -> Vec<Column> {
        columns
            .iter()
            .map(|column| {
                if column.disable_dynamic_width {
                    column.clone()
                } else {
                    column.with_width(self.column_width(column, rows))
                }
            })
            .collect()
    }
}

fn text_len(text: &str) -> usize {
    text.chars().count()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn width_never_below_floor(
            header in "[a-zA-Z ]{0,30}",
            min_width in proptest::option::of(0u32..400),
            cells in proptest::collection::vec("[a-z0-9 ]{0,40}", 0..8),
        ) {
            let mut column = Column::new("f").header_name(header);
            column.min_width = min_width;
            let rows: Vec<CellValue> = cells
                .iter()
                .map(|c| serde_json::json!({"f": c}).into())
                .collect();

            let width = AutoWidth::default().column_width(&column, &rows);
            prop_assert!(width >= 80);
            prop_assert!(width >= min_width.unwrap_or(0));
        }

        #[test]
        fn width_without_rows_depends_only_on_header(header in "[a-zA-Z]{0,40}") {
            let engine = AutoWidth::default();
            let column = Column::new("f").header_name(header.clone());
            let len = if header.is_empty() { 1 } else { header.chars().count() };
            let expected = ((len as f64 * 8.5 + 32.0).ceil() as u32).max(80);
            prop_assert_eq!(engine.column_width(&column, &[]), expected);
        }

        #[test]
        fn processing_twice_changes_nothing(
            cells in proptest::collection::vec("[a-z ]{0,60}", 0..6),
        ) {
            let rows: Vec<CellValue> = cells
                .iter()
                .map(|c| serde_json::json!({"f": c}).into())
                .collect();
            let engine = AutoWidth::default();
            let once = engine.process_columns(&[Column::new("f")], &rows);
            let twice = engine.process_columns(&once, &rows);
            prop_assert_eq!(once, twice);
        }
    }
}
