//! Deferred-apply buffer
//!
//! Matrix walks only read the table. Everything they decide to change is
//! queued here and committed in one pass once the walk is over, so the
//! coordinates a walk relies on never move underneath it.

use indexmap::IndexMap;
use tracing::trace;

use super::cell::CellId;
use super::model::Table;

/// A queued change to one cell
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    /// New column span; 1 drops the attribute
    ColSpan(usize),
    /// New row span; 1 drops the attribute
    RowSpan(usize),
    /// New explicit width
    Width(String),
    /// Drop unit span attributes and an empty class
    Tidy,
    /// Detach and drop the cell
    Remove,
}

/// A queued change together with its target
#[derive(Debug, Clone, PartialEq)]
pub struct PendingMutation {
    pub target: CellId,
    pub mutation: Mutation,
}

#[derive(Debug, Clone, Default, PartialEq)]
struct PendingChanges {
    col_span: Option<usize>,
    row_span: Option<usize>,
    width: Option<String>,
    tidy: bool,
    remove: bool,
}

/// Changes keyed by target cell, in first-mark order
///
/// Marking the same kind of change twice on one cell keeps the last value.
#[derive(Debug, Clone, Default)]
pub struct PendingBuffer {
    entries: IndexMap<CellId, PendingChanges>,
}

impl PendingBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a change for `target`
    pub fn mark(&mut self, target: CellId, mutation: Mutation) {
        let entry = self.entries.entry(target).or_default();
        match mutation {
            Mutation::ColSpan(span) => entry.col_span = Some(span),
            Mutation::RowSpan(span) => entry.row_span = Some(span),
            Mutation::Width(width) => entry.width = Some(width),
            Mutation::Tidy => entry.tidy = true,
            Mutation::Remove => entry.remove = true,
        }
    }

    /// Whether a removal is queued for `target`
    pub fn is_removed(&self, target: CellId) -> bool {
        self.entries.get(&target).is_some_and(|e| e.remove)
    }

    /// Number of cells with queued changes
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Flattened view of the queued changes, in commit order
    pub fn mutations(&self) -> Vec<PendingMutation> {
        let mut out = Vec::new();
        for (&target, changes) in &self.entries {
            let mut push = |mutation| out.push(PendingMutation { target, mutation });
            if changes.remove {
                push(Mutation::Remove);
                continue;
            }
            if let Some(span) = changes.col_span {
                push(Mutation::ColSpan(span));
            }
            if let Some(span) = changes.row_span {
                push(Mutation::RowSpan(span));
            }
            if let Some(width) = &changes.width {
                push(Mutation::Width(width.clone()));
            }
            if changes.tidy {
                push(Mutation::Tidy);
            }
        }
        out
    }

    /// Apply every queued change to `table`; returns the number of cells touched
    pub fn commit(self, table: &mut Table) -> usize {
        let mut touched = 0;

        for (target, changes) in self.entries {
            if changes.remove {
                trace!(%target, "remove cell");
                if table.remove_cell(target).is_some() {
                    touched += 1;
                }
                continue;
            }

            let Some(cell) = table.cell_mut(target) else {
                trace!(%target, "skip changes for missing cell");
                continue;
            };

            if let Some(span) = changes.col_span {
                trace!(%target, span, "set colspan");
                cell.set_col_span(span);
            }
            if let Some(span) = changes.row_span {
                trace!(%target, span, "set rowspan");
                cell.set_row_span(span);
            }
            if let Some(width) = changes.width {
                trace!(%target, %width, "set width");
                cell.width = Some(width);
            }
            if changes.tidy {
                if cell.colspan.is_some() && cell.col_span() == 1 {
                    cell.colspan = None;
                }
                if cell.rowspan.is_some() && cell.row_span() == 1 {
                    cell.rowspan = None;
                }
                if cell.class.as_deref().is_some_and(str::is_empty) {
                    cell.class = None;
                }
            }
            touched += 1;
        }

        touched
    }
}
