use serde::{Deserialize, Serialize};

/// A single report cell.
///
/// Most cells are plain text; the "On Draft Invoice" column is a flagged
/// boolean the renderer shows as blocked. A tagged variant keeps the shape
/// explicit instead of sniffing heterogeneous values at render time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnValue {
    Blank,
    Text(String),
    Flag { value: bool, blocked: bool },
}

impl ColumnValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }
}

/// Action hint for a detail row: which originating document it opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowAction {
    /// Expense created from a standalone supplier bill.
    OpenBill,
    /// Expense created from another originating document type.
    OpenPurchase,
}

/// One display row of the report tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportLine {
    pub id: String,
    pub parent_id: Option<String>,
    pub name: String,
    pub columns: Vec<ColumnValue>,
    pub level: u8,
    pub unfoldable: bool,
    pub unfolded: bool,
    pub colspan: u8,
    pub action: Option<RowAction>,
}

/// Rendering options supplied by the report shell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportOptions {
    /// Row ids the shell currently shows unfolded.
    pub unfolded_lines: Vec<String>,
}

/// Column header descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    /// Numeric columns are right-aligned by the renderer.
    pub numeric: bool,
}

impl Column {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            numeric: false,
        }
    }

    pub fn numeric(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            numeric: true,
        }
    }
}
