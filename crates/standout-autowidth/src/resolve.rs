//! Cell text resolution.
//!
//! Turns a (column, row) pair into the text the grid would most likely show,
//! consulting the column's hooks in this order:
//!
//! 1. `auto_width_value_getter`
//! 2. `value_getter` (replaces the working value, never final on its own)
//! 3. `value_formatter`
//! 4. `render_cell`
//! 5. the working value itself
//!
//! The first step producing non-empty text wins. A hook that errors or
//! panics counts as producing nothing.

use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, warn};

use crate::column::{CellParams, Column};
use crate::error::HookError;
use crate::node::extract_text;
use crate::value::CellValue;
use crate::width::AutoWidth;

impl AutoWidth {
    /// Best guess at the displayed text of `column` for `row`.
    pub fn resolve_cell_text(&self, column: &Column, row: &CellValue, row_index: usize) -> String {
        let params = CellParams::new(column, row, row_index);

        if let Some(getter) = &column.auto_width_value_getter {
            let text = attempt(column, "auto_width_value_getter", || getter(&params))
                .map(|value| self.normalize(&value));
            if let Some(text) = non_empty(text) {
                return text;
            }
        }

        let mut working = params.value.clone();
        if let Some(getter) = &column.value_getter {
            if let Some(value) = attempt(column, "value_getter", || getter(&params)) {
                working = value;
            }
        }
        let params = params.with_value(working);

        if let Some(formatter) = &column.value_formatter {
            let text = attempt(column, "value_formatter", || formatter(&params))
                .map(|value| self.normalize(&value));
            if let Some(text) = non_empty(text) {
                return text;
            }
        }

        if let Some(render) = &column.render_cell {
            let text =
                attempt(column, "render_cell", || render(&params)).map(|node| extract_text(&node));
            if let Some(text) = non_empty(text) {
                return text;
            }
        }

        self.normalize(&params.value)
    }
}

/// Run one hook, turning errors and panics into `None`.
fn attempt<T>(
    column: &Column,
    hook: &'static str,
    call: impl FnOnce() -> Result<T, HookError>,
) -> Option<T> {
    match panic::catch_unwind(AssertUnwindSafe(call)) {
        Ok(Ok(value)) => Some(value),
        Ok(Err(err)) => {
            debug!(field = ?column.field, hook, error = %err, "Column hook failed, falling through");
            None
        }
        Err(_) => {
            warn!(field = ?column.field, hook, "Column hook panicked, falling through");
            None
        }
    }
}

fn non_empty(text: Option<String>) -> Option<String> {
    text.filter(|t| !t.is_empty())
}
