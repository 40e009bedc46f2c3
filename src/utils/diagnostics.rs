//! Structural diagnostics for tables
//!
//! Every operation tolerates malformed spans, but the results are rarely
//! what the author meant. This module reports those anomalies:
//!
//! - Holes (matrix positions no cell covers)
//! - Ragged rows (rows covering fewer columns than the table has)
//! - Row spans running past the last physical row
//! - Overlapping spans, and cells they hide entirely
//! - Empty physical rows and unit span attributes
//!
//! ## Example
//!
//! ```rust
//! use tablegrid::core::table::{Cell, Table};
//! use tablegrid::utils::diagnostics::check_table;
//!
//! let table = Table::from_rows(vec![vec![Cell::with_span("x", 1, 3)]]);
//! let report = check_table(&table);
//! assert!(!report.is_empty());
//! ```

use std::fmt;

use fxhash::{FxHashMap, FxHashSet};

use crate::core::table::{build_matrix_with, CellId, Table, Visit};

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DiagnosticLevel {
    /// Informational note
    Info,
    /// Warning - edits will work but the layout is probably not intended
    Warning,
    /// Error - part of the table cannot be displayed
    Error,
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticLevel::Info => write!(f, "info"),
            DiagnosticLevel::Warning => write!(f, "warning"),
            DiagnosticLevel::Error => write!(f, "error"),
        }
    }
}

/// A single diagnostic message
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// Severity level
    pub level: DiagnosticLevel,
    /// Human-readable message
    pub message: String,
    /// Matrix row (0-indexed)
    pub row: Option<usize>,
    /// Matrix column (0-indexed)
    pub col: Option<usize>,
    /// Cell the finding is about
    pub cell: Option<CellId>,
    /// Suggested fix
    pub suggestion: Option<String>,
}

impl Diagnostic {
    pub fn new(level: DiagnosticLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            row: None,
            col: None,
            cell: None,
            suggestion: None,
        }
    }

    /// Add a matrix position
    pub fn at(mut self, row: usize, col: usize) -> Self {
        self.row = Some(row);
        self.col = Some(col);
        self
    }

    /// Add a row without a column
    pub fn in_row(mut self, row: usize) -> Self {
        self.row = Some(row);
        self
    }

    pub fn with_cell(mut self, cell: CellId) -> Self {
        self.cell = Some(cell);
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.level, self.message)?;

        match (self.row, self.col) {
            (Some(row), Some(col)) => write!(f, "\n  --> row {}, column {}", row, col)?,
            (Some(row), None) => write!(f, "\n  --> row {}", row)?,
            _ => {}
        }

        if let Some(ref suggestion) = self.suggestion {
            write!(f, "\n  = help: {}", suggestion)?;
        }

        Ok(())
    }
}

/// Check result with summary
#[derive(Debug, Default)]
pub struct TableReport {
    pub diagnostics: Vec<Diagnostic>,
    pub errors: usize,
    pub warnings: usize,
    pub infos: usize,
}

impl TableReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, diag: Diagnostic) {
        match diag.level {
            DiagnosticLevel::Error => self.errors += 1,
            DiagnosticLevel::Warning => self.warnings += 1,
            DiagnosticLevel::Info => self.infos += 1,
        }
        self.diagnostics.push(diag);
    }

    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }

    /// Check if there are any issues at all
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        for (count, noun) in [
            (self.errors, "error"),
            (self.warnings, "warning"),
            (self.infos, "note"),
        ] {
            if count > 0 {
                parts.push(format!("{} {}{}", count, noun, if count == 1 { "" } else { "s" }));
            }
        }
        if parts.is_empty() {
            "no issues found".to_string()
        } else {
            parts.join(", ")
        }
    }
}

/// Check a table for structural anomalies
pub fn check_table(table: &Table) -> TableReport {
    let mut report = TableReport::new();

    let mut owners: FxHashMap<(usize, usize), CellId> = FxHashMap::default();
    let mut overlaps = Vec::new();
    let matrix = build_matrix_with(table, |p| {
        if let Some(previous) = owners.insert((p.row, p.col), p.cell) {
            if previous != p.cell {
                overlaps.push((p.row, p.col, previous, p.cell));
            }
        }
        Visit::Continue
    });

    for (row, col, hidden, by) in overlaps {
        report.add(
            Diagnostic::new(
                DiagnosticLevel::Error,
                format!("cell {} overlaps cell {}", by, hidden),
            )
            .at(row, col)
            .with_cell(by),
        );
    }

    let visible: FxHashSet<CellId> = matrix.positions().map(|(_, _, cell)| cell).collect();
    for id in table.cell_ids() {
        if !visible.contains(&id) {
            report.add(
                Diagnostic::new(
                    DiagnosticLevel::Error,
                    format!("cell {} is hidden by overlapping spans", id),
                )
                .with_cell(id),
            );
        }
    }

    let width = matrix.width();
    for row in 0..matrix.row_count() {
        let slots = matrix.row(row);
        for (col, slot) in slots.iter().enumerate() {
            if slot.is_none() {
                report.add(
                    Diagnostic::new(DiagnosticLevel::Warning, "no cell covers this position")
                        .at(row, col),
                );
            }
        }
        if row < table.row_count() && !slots.is_empty() && slots.len() < width {
            report.add(
                Diagnostic::new(
                    DiagnosticLevel::Warning,
                    format!("row covers {} of {} columns", slots.len(), width),
                )
                .in_row(row)
                .with_suggestion("add cells or widen a cell of this row"),
            );
        }
    }

    for (id, coord_row) in first_rows(table) {
        let Some(cell) = table.cell(id) else {
            continue;
        };
        if coord_row + cell.row_span() > table.row_count() {
            report.add(
                Diagnostic::new(
                    DiagnosticLevel::Warning,
                    format!(
                        "rowspan {} of cell {} runs past the last row",
                        cell.row_span(),
                        id
                    ),
                )
                .in_row(coord_row)
                .with_cell(id)
                .with_suggestion(format!(
                    "use rowspan {}",
                    table.row_count().saturating_sub(coord_row).max(1)
                )),
            );
        }
        if cell.colspan == Some(1) || cell.rowspan == Some(1) {
            report.add(
                Diagnostic::new(
                    DiagnosticLevel::Info,
                    format!("cell {} has a unit span attribute", id),
                )
                .in_row(coord_row)
                .with_cell(id),
            );
        }
    }

    for (index, row) in table.rows().iter().enumerate() {
        if row.is_empty() && matrix.row(index).iter().all(Option::is_none) {
            report.add(
                Diagnostic::new(DiagnosticLevel::Warning, "row has no cells").in_row(index),
            );
        }
    }

    report
}

/// Attached cells with the physical row they start in
fn first_rows(table: &Table) -> impl Iterator<Item = (CellId, usize)> + '_ {
    table
        .rows()
        .iter()
        .enumerate()
        .flat_map(|(r, row)| row.cells().iter().map(move |&id| (id, r)))
}

/// Format a report for display
pub fn format_diagnostics(report: &TableReport, use_color: bool) -> String {
    let mut output = String::new();

    for diag in &report.diagnostics {
        if use_color {
            let color = match diag.level {
                DiagnosticLevel::Error => "\x1b[31m",
                DiagnosticLevel::Warning => "\x1b[33m",
                DiagnosticLevel::Info => "\x1b[34m",
            };
            output.push_str(color);
            output.push_str(&format!("{}", diag));
            output.push_str("\x1b[0m\n\n");
        } else {
            output.push_str(&format!("{}\n\n", diag));
        }
    }

    if use_color {
        if report.has_errors() {
            output.push_str("\x1b[31m");
        } else if report.warnings > 0 {
            output.push_str("\x1b[33m");
        } else {
            output.push_str("\x1b[32m");
        }
    }

    output.push_str(&format!("Summary: {}", report.summary()));

    if use_color {
        output.push_str("\x1b[0m");
    }

    output
}
