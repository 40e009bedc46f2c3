//! Cell types for the table model

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Line breaks that do not count as content
    static ref LINE_BREAK: Regex = Regex::new(r"(?i)<br\s*/?>").unwrap();
}

/// Handle of a cell inside its owning [`Table`](super::Table)
///
/// Handles stay valid while the cell is attached; a removed cell's handle is
/// never reused by the same table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(usize);

impl CellId {
    /// Build a handle from a raw arena index
    pub fn from_index(index: usize) -> Self {
        CellId(index)
    }

    /// Raw arena index
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single table cell
///
/// `colspan` and `rowspan` hold the raw attributes as the host stores them:
/// `None` means the attribute is absent. The effective spans are read with
/// [`Cell::col_span`] and [`Cell::row_span`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cell {
    /// Cell content (opaque markup)
    pub content: String,
    /// Raw `colspan` attribute
    pub colspan: Option<usize>,
    /// Raw `rowspan` attribute
    pub rowspan: Option<usize>,
    /// Explicit width, e.g. `"25.5%"`
    pub width: Option<String>,
    /// Raw `class` attribute
    pub class: Option<String>,
    /// Selection marker set by the selection layer
    pub selected: bool,
}

impl Cell {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Default::default()
        }
    }

    /// Create an empty cell
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_span(content: impl Into<String>, colspan: usize, rowspan: usize) -> Self {
        let mut cell = Self::new(content);
        cell.set_col_span(colspan);
        cell.set_row_span(rowspan);
        cell
    }

    pub fn with_width(mut self, width: impl Into<String>) -> Self {
        self.width = Some(width.into());
        self
    }

    /// Effective column span (always at least 1)
    pub fn col_span(&self) -> usize {
        self.colspan.unwrap_or(1).max(1)
    }

    /// Effective row span (always at least 1)
    pub fn row_span(&self) -> usize {
        self.rowspan.unwrap_or(1).max(1)
    }

    /// Set the column span; a span of 1 removes the attribute
    pub fn set_col_span(&mut self, span: usize) {
        self.colspan = (span > 1).then_some(span);
    }

    /// Set the row span; a span of 1 removes the attribute
    pub fn set_row_span(&mut self, span: usize) {
        self.rowspan = (span > 1).then_some(span);
    }

    /// Explicit width as a percentage, when it is one
    pub fn width_percent(&self) -> Option<f64> {
        let width = self.width.as_deref()?.trim();
        let number = width.strip_suffix('%')?.trim();
        number.parse::<f64>().ok().filter(|n| n.is_finite())
    }

    /// Whether the content is empty once line breaks and whitespace are removed
    pub fn is_blank(&self) -> bool {
        LINE_BREAK.replace_all(&self.content, "").trim().is_empty()
    }
}
