//! Column descriptors and the hooks they carry.
//!
//! A [`Column`] mirrors the column definition a data grid consumes: the
//! data fields serialize in camelCase so definitions can round-trip through
//! the grid's JSON config, while hooks are Rust closures that only exist in
//! process.
//!
//! ```rust
//! use standout_autowidth::{CellValue, Column};
//!
//! let column = Column::new("price")
//!     .header_name("Unit price")
//!     .value_formatter(|params| {
//!         let amount = params.value.as_f64().unwrap_or_default();
//!         Ok(CellValue::from(format!("${:.2}", amount)))
//!     });
//! assert!(column.value_formatter.is_some());
//! ```

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::HookError;
use crate::node::RenderNode;
use crate::value::CellValue;

/// Hook producing a value for a cell.
pub type ValueHook =
    Arc<dyn Fn(&CellParams<'_>) -> Result<CellValue, HookError> + Send + Sync + 'static>;

/// Hook producing a virtual UI tree for a cell.
pub type RenderHook =
    Arc<dyn Fn(&CellParams<'_>) -> Result<RenderNode, HookError> + Send + Sync + 'static>;

/// Everything a hook gets to know about the cell it is asked about.
///
/// Built fresh for every hook call chain and dropped right after.
#[derive(Clone, Debug, PartialEq)]
pub struct CellParams<'a> {
    /// Row identity: the row's `_id` or `id`, else `<field>-<index>`.
    pub id: String,
    /// The whole row.
    pub row: &'a CellValue,
    /// The column's field, if it has one.
    pub field: Option<&'a str>,
    /// The current value: the raw field value, or the derived value once a
    /// `value_getter` has run.
    pub value: CellValue,
    /// Same as `value`; kept separate so hooks can read the name they expect.
    pub formatted_value: CellValue,
}

impl<'a> CellParams<'a> {
    /// Build the parameters for `column` at `row_index`.
    pub fn new(column: &'a Column, row: &'a CellValue, row_index: usize) -> Self {
        let field = column.field.as_deref();
        let value = field
            .and_then(|f| row.get(f))
            .cloned()
            .unwrap_or_default();

        CellParams {
            id: row_identity(row, field, row_index),
            row,
            field,
            formatted_value: value.clone(),
            value,
        }
    }

    /// Copy of these parameters carrying a different working value.
    pub fn with_value(&self, value: CellValue) -> Self {
        CellParams {
            id: self.id.clone(),
            row: self.row,
            field: self.field,
            formatted_value: value.clone(),
            value,
        }
    }
}

fn row_identity(row: &CellValue, field: Option<&str>, row_index: usize) -> String {
    ["_id", "id"]
        .iter()
        .filter_map(|key| row.get(key))
        .find_map(|id| match id {
            CellValue::Null => None,
            CellValue::Bool(b) => Some(b.to_string()),
            other => other.scalar_text(),
        })
        .unwrap_or_else(|| format!("{}-{}", field.unwrap_or("col"), row_index))
}

/// A table column definition.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    /// Key into the row.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Display label of the header.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_name: Option<String>,
    /// Smallest width the column may take.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_width: Option<u32>,
    /// Fixed width, set by the processor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// Proportional sizing weight. The processor sets it to `0`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flex: Option<f64>,
    /// Opt out of content-based sizing.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub disable_dynamic_width: bool,
    /// Attributes owned by the grid, carried through untouched.
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,

    /// Value used only for width estimation.
    #[serde(skip)]
    pub auto_width_value_getter: Option<ValueHook>,
    /// Derives the cell value from the row.
    #[serde(skip)]
    pub value_getter: Option<ValueHook>,
    /// Turns the cell value into display text.
    #[serde(skip)]
    pub value_formatter: Option<ValueHook>,
    /// Renders the cell as a virtual UI tree.
    #[serde(skip)]
    pub render_cell: Option<RenderHook>,
}

impl Column {
    /// Create a column bound to `field`.
    pub fn new(field: impl Into<String>) -> Self {
        Column {
            field: Some(field.into()),
            ..Default::default()
        }
    }

    /// Create a column with no backing field, such as an actions column.
    pub fn unbound() -> Self {
        Column::default()
    }

    pub fn header_name(mut self, name: impl Into<String>) -> Self {
        self.header_name = Some(name.into());
        self
    }

    pub fn min_width(mut self, width: u32) -> Self {
        self.min_width = Some(width);
        self
    }

    pub fn flex(mut self, flex: f64) -> Self {
        self.flex = Some(flex);
        self
    }

    pub fn disable_dynamic_width(mut self, disable: bool) -> Self {
        self.disable_dynamic_width = disable;
        self
    }

    /// Attach a grid-specific attribute.
    pub fn attr(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    pub fn auto_width_value_getter<F>(mut self, hook: F) -> Self
    where
        F: Fn(&CellParams<'_>) -> Result<CellValue, HookError> + Send + Sync + 'static,
    {
        self.auto_width_value_getter = Some(Arc::new(hook));
        self
    }

    pub fn value_getter<F>(mut self, hook: F) -> Self
    where
        F: Fn(&CellParams<'_>) -> Result<CellValue, HookError> + Send + Sync + 'static,
    {
        self.value_getter = Some(Arc::new(hook));
        self
    }

    pub fn value_formatter<F>(mut self, hook: F) -> Self
    where
        F: Fn(&CellParams<'_>) -> Result<CellValue, HookError> + Send + Sync + 'static,
    {
        self.value_formatter = Some(Arc::new(hook));
        self
    }

    pub fn render_cell<F>(mut self, hook: F) -> Self
    where
        F: Fn(&CellParams<'_>) -> Result<RenderNode, HookError> + Send + Sync + 'static,
    {
        self.render_cell = Some(Arc::new(hook));
        self
    }

    /// Text measured for the header: the header name, or the field when the
    /// name is missing or empty.
    pub fn header_text(&self) -> &str {
        self.header_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .or(self.field.as_deref())
            .unwrap_or("")
    }

    /// Copy of this column pinned to `width` pixels.
    ///
    /// Sets both `width` and `min_width` and zeroes `flex` so the grid stops
    /// distributing spare space into the column.
    pub fn with_width(&self, width: u32) -> Self {
        Column {
            width: Some(width),
            min_width: Some(width),
            flex: Some(0.0),
            ..self.clone()
        }
    }
}

fn same_hook<T: ?Sized>(a: &Option<Arc<T>>, b: &Option<Arc<T>>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => Arc::ptr_eq(a, b),
        (None, None) => true,
        _ => false,
    }
}

/// Data fields compare by value, hooks by identity.
impl PartialEq for Column {
    fn eq(&self, other: &Self) -> bool {
        self.field == other.field
            && self.header_name == other.header_name
            && self.min_width == other.min_width
            && self.width == other.width
            && self.flex == other.flex
            && self.disable_dynamic_width == other.disable_dynamic_width
            && self.extra == other.extra
            && same_hook(&self.auto_width_value_getter, &other.auto_width_value_getter)
            && same_hook(&self.value_getter, &other.value_getter)
            && same_hook(&self.value_formatter, &other.value_formatter)
            && same_hook(&self.render_cell, &other.render_cell)
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("field", &self.field)
            .field("header_name", &self.header_name)
            .field("min_width", &self.min_width)
            .field("width", &self.width)
            .field("flex", &self.flex)
            .field("disable_dynamic_width", &self.disable_dynamic_width)
            .field("extra", &self.extra)
            .field("auto_width_value_getter", &self.auto_width_value_getter.is_some())
            .field("value_getter", &self.value_getter.is_some())
            .field("value_formatter", &self.value_formatter.is_some())
            .field("render_cell", &self.render_cell.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: serde_json::Value) -> CellValue {
        CellValue::from(value)
    }

    #[test]
    fn params_prefer_underscore_id() {
        let column = Column::new("sku");
        let r = row(json!({"_id": "abc", "id": 7, "sku": "X1"}));
        let params = CellParams::new(&column, &r, 3);
        assert_eq!(params.id, "abc");
        assert_eq!(params.value, CellValue::from("X1"));
        assert_eq!(params.formatted_value, params.value);
    }

    #[test]
    fn params_fall_back_to_numeric_id() {
        let column = Column::new("sku");
        let r = row(json!({"id": 7}));
        assert_eq!(CellParams::new(&column, &r, 0).id, "7");
    }

    #[test]
    fn params_synthesize_identity() {
        let r = row(json!({"sku": "X1", "id": null}));
        let bound = Column::new("sku");
        assert_eq!(CellParams::new(&bound, &r, 4).id, "sku-4");

        let unbound = Column::unbound();
        let params = CellParams::new(&unbound, &r, 2);
        assert_eq!(params.id, "col-2");
        assert_eq!(params.value, CellValue::Null);
    }

    #[test]
    fn header_text_falls_back_to_field() {
        assert_eq!(Column::new("qty").header_text(), "qty");
        assert_eq!(Column::new("qty").header_name("").header_text(), "qty");
        assert_eq!(Column::new("qty").header_name("Quantity").header_text(), "Quantity");
        assert_eq!(Column::unbound().header_text(), "");
    }

    #[test]
    fn with_width_pins_column() {
        let column = Column::new("qty").flex(1.0).min_width(40).attr("sortable", json!(false));
        let sized = column.with_width(120);
        assert_eq!(sized.width, Some(120));
        assert_eq!(sized.min_width, Some(120));
        assert_eq!(sized.flex, Some(0.0));
        assert_eq!(sized.extra.get("sortable"), Some(&json!(false)));
        assert_eq!(column.width, None);
    }

    #[test]
    fn clones_share_hooks() {
        let column = Column::new("qty").value_getter(|_| Ok(CellValue::Null));
        assert_eq!(column.clone(), column);

        let other = Column::new("qty").value_getter(|_| Ok(CellValue::Null));
        assert_ne!(other, column);
    }

    #[test]
    fn deserializes_grid_definition() {
        let column: Column = serde_json::from_value(json!({
            "field": "customer",
            "headerName": "Customer",
            "minWidth": 150,
            "disableDynamicWidth": true,
            "sortable": false
        }))
        .unwrap();
        assert_eq!(column.field.as_deref(), Some("customer"));
        assert_eq!(column.header_name.as_deref(), Some("Customer"));
        assert_eq!(column.min_width, Some(150));
        assert!(column.disable_dynamic_width);
        assert_eq!(column.extra.get("sortable"), Some(&json!(false)));
    }

    #[test]
    fn serializes_processed_fields() {
        let value = serde_json::to_value(Column::new("qty").with_width(90)).unwrap();
        assert_eq!(
            value,
            json!({"field": "qty", "minWidth": 90, "width": 90, "flex": 0.0})
        );
    }
}
