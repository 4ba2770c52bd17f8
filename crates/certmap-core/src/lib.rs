// crates/certmap-core/src/lib.rs

//! # certmap-core
//!
//! City-resolution and filter/render pipeline for a roster of
//! certified-company records. The crate loads a tabular dataset and a
//! city→coordinate lookup table from two independently-shaped sources,
//! derives filter facets, applies a conjunctive multi-field filter, and
//! maps the filtered rows to colored map markers with popup payloads.
//!
//! The map widget, the spreadsheet library, and the presentation layer
//! are collaborators behind seams: [`marker::MarkerSink`],
//! [`sheet::SheetParser`], and structured values (facet option lists,
//! legend entries) respectively.

pub mod city_index;
pub mod dataset;
pub mod error;
pub mod facets;
pub mod filter;
pub mod marker;
pub mod model;
pub mod session;
pub mod sheet;
pub mod text;

// Re-exports
pub use crate::city_index::{CityIndex, CityIndexEntry, IndexSource};
pub use crate::error::{MapError, Result};
pub use crate::facets::{FacetSet, ALL_OPTION};
pub use crate::filter::{apply_filters, FilterSelection};
pub use crate::marker::{
    legend, render, status_color, LegendEntry, Marker, MarkerBuffer, MarkerSink, Popup,
    RenderStats,
};
pub use crate::model::{FacetField, Row};
pub use crate::session::{MapSession, SessionStats};
pub use crate::sheet::{Cell, CsvSheetParser, SheetParser, SheetRecord};
pub use crate::text::{city_key, equals_folded, fold_key};
