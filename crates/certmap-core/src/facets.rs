// crates/certmap-core/src/facets.rs

//! # Facet builder
//!
//! One pass over the loaded rows derives, per filterable field, the set
//! of distinct observed values that populates the filter controls.
//! Facets are recomputed only at load time, never on filter change.

use std::collections::{BTreeSet, HashMap};

use crate::model::{FacetField, Row};

/// The "All" option every filter control starts with.
pub const ALL_OPTION: &str = "All";

/// Distinct observed values per filterable field, lexicographically
/// sorted for presentation. Never contains the null sentinel or the
/// empty string.
#[derive(Debug, Clone, Default)]
pub struct FacetSet {
    values: HashMap<FacetField, BTreeSet<String>>,
}

impl FacetSet {
    /// Single pass over all rows; duplicates collapse in the set.
    pub fn build(rows: &[Row]) -> Self {
        let mut values: HashMap<FacetField, BTreeSet<String>> = HashMap::new();
        for field in FacetField::ALL {
            values.insert(field, BTreeSet::new());
        }
        for row in rows {
            for field in FacetField::ALL {
                let Some(cell) = row.field(field) else { continue };
                let text = cell.to_string();
                if text.is_empty() {
                    continue;
                }
                values.get_mut(&field).expect("all facets seeded").insert(text);
            }
        }
        FacetSet { values }
    }

    /// Sorted distinct values for one field.
    pub fn values(&self, field: FacetField) -> &BTreeSet<String> {
        self.values.get(&field).expect("all facets seeded")
    }

    /// Control population: the "All" sentinel followed by the sorted
    /// observed values.
    pub fn options(&self, field: FacetField) -> Vec<String> {
        std::iter::once(ALL_OPTION.to_string())
            .chain(self.values(field).iter().cloned())
            .collect()
    }

    /// Total number of distinct values across all fields.
    pub fn total_values(&self) -> usize {
        FacetField::ALL.iter().map(|f| self.values(*f).len()).sum()
    }
}
