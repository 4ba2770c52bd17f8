// crates/certmap-core/src/filter.rs

//! # Filter engine
//!
//! Pure conjunctive filter: every active criterion must match, an
//! inactive criterion matches all rows. No ranking, no fuzzy matching.
//! Always applied to the full cached row set, never a previous subset.

use crate::model::Row;
use crate::sheet::Cell;

/// Current value of the seven facet controls plus the free-text search
/// term. Transient UI state; `None` (or an empty string) means the
/// criterion is inactive.
#[derive(Debug, Clone, Default)]
pub struct FilterSelection {
    pub status: Option<String>,
    pub category: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub poc: Option<String>,
    pub gp_team: Option<String>,
    pub year: Option<String>,
    pub search: String,
}

impl FilterSelection {
    /// True when no criterion is active: filtering with this selection
    /// is the identity.
    pub fn is_empty(&self) -> bool {
        [
            &self.status,
            &self.category,
            &self.city,
            &self.state,
            &self.poc,
            &self.gp_team,
            &self.year,
        ]
        .iter()
        .all(|c| active(c).is_none())
            && self.search.trim().is_empty()
    }
}

/// An empty-string criterion is treated the same as an unset one: the
/// facet controls report "All" as the empty value.
fn active(criterion: &Option<String>) -> Option<&str> {
    criterion.as_deref().filter(|s| !s.is_empty())
}

/// Exact equality against the cell's text form. A null cell matches
/// nothing.
fn cell_eq(cell: Option<&Cell>, wanted: &str) -> bool {
    cell.is_some_and(|c| c.as_text() == wanted)
}

/// Exact equality with the null sentinel coalesced to the empty string,
/// used for fields whose source data is patchy (state, PoC, GP team).
fn cell_eq_or_blank(cell: Option<&Cell>, wanted: &str) -> bool {
    match cell {
        Some(c) => c.as_text() == wanted,
        None => wanted.is_empty(),
    }
}

fn row_matches(row: &Row, selection: &FilterSelection) -> bool {
    if let Some(wanted) = active(&selection.status) {
        if !cell_eq(row.status.as_ref(), wanted) {
            return false;
        }
    }
    if let Some(wanted) = active(&selection.category) {
        if !cell_eq(row.category.as_ref(), wanted) {
            return false;
        }
    }
    if let Some(wanted) = active(&selection.city) {
        if !cell_eq(row.city.as_ref(), wanted) {
            return false;
        }
    }
    if let Some(wanted) = active(&selection.state) {
        if !cell_eq_or_blank(row.state.as_ref(), wanted) {
            return false;
        }
    }
    if let Some(wanted) = active(&selection.poc) {
        if !cell_eq_or_blank(row.poc.as_ref(), wanted) {
            return false;
        }
    }
    if let Some(wanted) = active(&selection.gp_team) {
        if !cell_eq_or_blank(row.gp_team.as_ref(), wanted) {
            return false;
        }
    }
    // Year compared as strings; the sheet mixes numeric and text cells.
    if let Some(wanted) = active(&selection.year) {
        if !cell_eq(row.year.as_ref(), wanted) {
            return false;
        }
    }
    let term = selection.search.trim();
    if !term.is_empty() {
        let Some(company) = row.company.as_ref() else {
            return false;
        };
        if !company
            .as_text()
            .to_lowercase()
            .contains(&term.to_lowercase())
        {
            return false;
        }
    }
    true
}

/// Return the rows satisfying every active criterion, in original
/// order. Borrowed, not cloned: the cached row set stays the single
/// owner.
pub fn apply_filters<'a>(rows: &'a [Row], selection: &FilterSelection) -> Vec<&'a Row> {
    rows.iter().filter(|r| row_matches(r, selection)).collect()
}
