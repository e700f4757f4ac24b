//! Conversion of arbitrary cell values into a single display string.
//!
//! Scalars print as-is. Lists of line items collapse to a summed quantity
//! when they share a quantity-like field (`[{qty: 2}, {qty: 3}]` → `"5"`),
//! and objects are summarized by their most descriptive field.

use std::fmt::Write;

use chrono::NaiveDateTime;

use crate::value::{format_number, CellValue};
use crate::width::AutoWidth;

impl AutoWidth {
    /// Display text for any value. Never fails; unknown shapes give `""`.
    pub fn normalize(&self, value: &CellValue) -> String {
        match value {
            CellValue::Null => String::new(),
            CellValue::String(s) => s.clone(),
            CellValue::Number(n) => format_number(*n),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Date(dt) => self.format_date(dt),
            CellValue::Array(items) => self.aggregate_array(items),
            CellValue::Object(_) => self.summarize_object(value),
        }
    }

    /// Display text for a list of values.
    ///
    /// - scalar lists join with `", "`
    /// - lists of objects sharing an aggregatable numeric key sum that key,
    ///   with the roll suffix for roll-counting keys
    /// - anything else joins the non-empty item texts, or reports
    ///   `"<n> items"` when none have text
    pub fn aggregate_array(&self, items: &[CellValue]) -> String {
        if items.is_empty() {
            return String::new();
        }

        if items.iter().all(CellValue::is_scalar) {
            return items
                .iter()
                .filter_map(CellValue::scalar_text)
                .collect::<Vec<_>>()
                .join(", ");
        }

        if let Some(key) = self.aggregation_key(items) {
            let total: f64 = items
                .iter()
                .filter_map(|item| item.get(key).and_then(CellValue::as_f64))
                .sum();
            return format!("{}{}", format_number(total), self.aggregate_suffix(key));
        }

        let parts: Vec<String> = items
            .iter()
            .map(|item| match item {
                CellValue::String(_) | CellValue::Number(_) => {
                    item.scalar_text().unwrap_or_default()
                }
                CellValue::Array(inner) => self.aggregate_array(inner),
                CellValue::Object(_) => self.summarize_object(item),
                _ => String::new(),
            })
            .filter(|part| !part.is_empty())
            .collect();

        if parts.is_empty() {
            format!("{} items", items.len())
        } else {
            parts.join(", ")
        }
    }

    /// Short description of an object.
    ///
    /// Uses the first descriptive key holding a non-null value, else the
    /// first scalar fields joined by a space. Non-objects give `""`.
    pub fn summarize_object(&self, value: &CellValue) -> String {
        let Some(fields) = value.as_object() else {
            return String::new();
        };

        let descriptive = self
            .config()
            .descriptive_keys
            .iter()
            .filter_map(|key| fields.get(key))
            .find(|v| !v.is_null());
        if let Some(v) = descriptive {
            return self.display_form(v);
        }

        fields
            .values()
            .filter(|v| v.is_scalar())
            .take(self.config().summary_field_limit)
            .filter_map(CellValue::scalar_text)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// First configured key for which any item holds a number.
    fn aggregation_key<'k>(&'k self, items: &[CellValue]) -> Option<&'k str> {
        self.config()
            .aggregatable_keys
            .iter()
            .map(String::as_str)
            .find(|key| {
                items
                    .iter()
                    .any(|item| item.get(key).and_then(CellValue::as_f64).is_some())
            })
    }

    fn aggregate_suffix(&self, key: &str) -> &str {
        let config = self.config();
        let marker = config.roll_marker.to_lowercase();
        if !marker.is_empty() && key.to_lowercase().contains(&marker) {
            &config.roll_suffix
        } else {
            ""
        }
    }

    /// Plain string form of a descriptive field.
    fn display_form(&self, value: &CellValue) -> String {
        match value {
            CellValue::Array(items) => items
                .iter()
                .map(|item| self.display_form(item))
                .collect::<Vec<_>>()
                .join(","),
            CellValue::Object(_) => self.summarize_object(value),
            other => self.normalize(other),
        }
    }

    fn format_date(&self, dt: &NaiveDateTime) -> String {
        let mut out = String::new();
        // An unsupported specifier makes chrono report a formatting error.
        match write!(out, "{}", dt.format(&self.config().date_format)) {
            Ok(()) => out,
            Err(_) => dt.to_string(),
        }
    }
}
