// crates/certmap-core/src/session.rs

//! # Map session
//!
//! Explicit session-state object holding the cached rows, the built
//! city index, and the facets derived at load time. The UI event layer
//! stays a thin adapter: a control change becomes one [`MapSession::refresh`]
//! call with the latest selection.
//!
//! Every refresh is a full filter+render pass over the cached rows; no
//! debounce, no diffing. Fine for hundreds of rows, a documented
//! ceiling beyond that.

use std::path::Path;

use tracing::info;

use crate::city_index::{CityIndex, IndexSource};
use crate::dataset;
use crate::error::Result;
use crate::facets::FacetSet;
use crate::filter::{apply_filters, FilterSelection};
use crate::marker::{render, MarkerSink, RenderStats};
use crate::model::Row;
use crate::sheet::SheetParser;

/// Aggregate counts for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionStats {
    /// Rows in the cached dataset.
    pub rows: usize,
    /// Rows whose city resolves against the index.
    pub resolvable: usize,
    /// Distinct facet values across all fields.
    pub facet_values: usize,
}

/// Read-only after construction; rows are never mutated in place.
#[derive(Debug, Clone)]
pub struct MapSession {
    rows: Vec<Row>,
    city_index: CityIndex,
    facets: FacetSet,
}

impl MapSession {
    /// Load both source resources and derive the facets.
    ///
    /// The dataset is fatal on failure; the city index degrades to its
    /// fallback table internally. The two loads are independent, so
    /// order does not matter.
    pub fn open(
        dataset_path: impl AsRef<Path>,
        cities_path: Option<&Path>,
        parser: &dyn SheetParser,
    ) -> Result<Self> {
        let rows = dataset::load_rows_from_path(dataset_path, parser)?;
        let city_index = CityIndex::load_or_fallback(cities_path);
        Ok(Self::from_parts(rows, city_index))
    }

    /// Assemble a session from already-loaded parts.
    pub fn from_parts(rows: Vec<Row>, city_index: CityIndex) -> Self {
        let facets = FacetSet::build(&rows);
        info!(
            rows = rows.len(),
            cities = city_index.len(),
            primary = city_index.source() == IndexSource::Primary,
            "session ready"
        );
        MapSession {
            rows,
            city_index,
            facets,
        }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn city_index(&self) -> &CityIndex {
        &self.city_index
    }

    pub fn facets(&self) -> &FacetSet {
        &self.facets
    }

    /// One filter+render cycle against the full cached row set.
    pub fn refresh<S: MarkerSink>(
        &self,
        selection: &FilterSelection,
        sink: &mut S,
    ) -> RenderStats {
        let filtered = apply_filters(&self.rows, selection);
        render(&filtered, &self.city_index, sink)
    }

    pub fn stats(&self) -> SessionStats {
        let resolvable = self
            .rows
            .iter()
            .filter(|r| {
                self.city_index
                    .resolve(&crate::text::city_key(r.city.as_ref()))
                    .is_some()
            })
            .count();
        SessionStats {
            rows: self.rows.len(),
            resolvable,
            facet_values: self.facets.total_values(),
        }
    }
}
