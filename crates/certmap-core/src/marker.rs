// crates/certmap-core/src/marker.rs

//! # Marker renderer
//!
//! Maps filtered rows to map points via the city index. The map widget
//! itself is a collaborator behind [`MarkerSink`]: every render pass
//! clears the whole layer and rebuilds it from scratch. Rows whose city
//! cannot be resolved are counted and skipped, never plotted at an
//! approximate location.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::city_index::CityIndex;
use crate::model::Row;
use crate::sheet::Cell;
use crate::text::city_key;

/// Label used for statuses absent from the color table.
pub const UNKNOWN_STATUS: &str = "Unknown";

/// Placeholder shown for a company without a name.
pub const NO_COMPANY: &str = "\u{2014}";

/// Fixed status → color table. The `Unknown` entry doubles as the
/// default for unmapped or blank statuses.
const STATUS_COLORS: &[(&str, &str)] = &[
    ("Completed", "#2e7d32"),
    ("In Progress", "#f9a825"),
    ("Hold", "#c62828"),
    (UNKNOWN_STATUS, "#9e9e9e"),
];

static COLOR_TABLE: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| STATUS_COLORS.iter().copied().collect());

/// Color for a status cell; blank and unmapped statuses get the
/// `Unknown` color.
pub fn status_color(status: Option<&Cell>) -> &'static str {
    let color = status
        .map(|c| c.as_text().into_owned())
        .and_then(|label| COLOR_TABLE.get(label.as_str()).copied());
    color.unwrap_or(COLOR_TABLE[UNKNOWN_STATUS])
}

/// One legend line. Static, derived from the color table alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegendEntry {
    pub status: &'static str,
    pub color: &'static str,
}

/// Status-color pairs in table order, independent of loaded data.
pub fn legend() -> Vec<LegendEntry> {
    STATUS_COLORS
        .iter()
        .map(|&(status, color)| LegendEntry { status, color })
        .collect()
}

/// Structured popup payload. Text, not markup: the presentation layer
/// owns the rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct Popup {
    /// Company name, or the em-dash placeholder when null.
    pub company: String,
    pub category: Option<String>,
    /// Status pill label; blank statuses show as `Unknown`.
    pub status: String,
    /// Pill color, always matching the marker color.
    pub status_color: &'static str,
    /// "City, State" line. State prefers the index entry's value over
    /// the row's own field; omitted entirely only if the city is blank.
    pub location: Option<String>,
    pub poc: Option<String>,
    pub gp_team: Option<String>,
    pub year: Option<String>,
}

/// One map point with its popup payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub latitude: f64,
    pub longitude: f64,
    pub color: &'static str,
    pub fill_color: &'static str,
    pub popup: Popup,
}

/// Capability interface of the map widget: replace-all semantics, no
/// incremental diffing.
pub trait MarkerSink {
    fn clear(&mut self);
    fn add(&mut self, marker: Marker);
}

/// In-memory sink. Backs the CLI output and the tests.
#[derive(Debug, Default, Clone)]
pub struct MarkerBuffer {
    pub markers: Vec<Marker>,
}

impl MarkerSink for MarkerBuffer {
    fn clear(&mut self) {
        self.markers.clear();
    }

    fn add(&mut self, marker: Marker) {
        self.markers.push(marker);
    }
}

/// Plotted vs. unresolved counts for one render pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub plotted: usize,
    pub missing: usize,
}

/// Rebuild the marker layer from the filtered rows.
///
/// Unresolved cities are an expected outcome: they are skipped and
/// surfaced only through `missing`.
pub fn render<S: MarkerSink>(rows: &[&Row], index: &CityIndex, sink: &mut S) -> RenderStats {
    sink.clear();
    let mut stats = RenderStats::default();

    for row in rows {
        // A null city folds to the empty key, which never resolves.
        let Some(entry) = index.resolve(&city_key(row.city.as_ref())) else {
            stats.missing += 1;
            continue;
        };
        let city = row.city.as_ref().map(|c| c.as_text().into_owned());

        let color = status_color(row.status.as_ref());
        let state = entry
            .state
            .clone()
            .or_else(|| row.state.as_ref().map(|c| c.as_text().into_owned()));
        let location = city.map(|city| match state {
            Some(state) => format!("{city}, {state}"),
            None => city,
        });

        let text = |cell: &Option<Cell>| cell.as_ref().map(|c| c.as_text().into_owned());
        sink.add(Marker {
            latitude: entry.latitude,
            longitude: entry.longitude,
            color,
            fill_color: color,
            popup: Popup {
                company: text(&row.company).unwrap_or_else(|| NO_COMPANY.to_string()),
                category: text(&row.category),
                status: text(&row.status).unwrap_or_else(|| UNKNOWN_STATUS.to_string()),
                status_color: color,
                location,
                poc: text(&row.poc),
                gp_team: text(&row.gp_team),
                year: text(&row.year),
            },
        });
        stats.plotted += 1;
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::load_rows;
    use crate::sheet::CsvSheetParser;

    fn index() -> CityIndex {
        CityIndex::from_json_slice(
            br#"[{"city": "Pune", "lat": 18.5204, "lng": 73.8567, "admin_name": "Maharashtra"}]"#,
        )
        .unwrap()
    }

    fn rows() -> Vec<Row> {
        let bytes = b"City,Status,Company Name,Year of Certification\n\
                      Pune,Completed,Pune Traders,2021\n\
                      Unknownville,Hold,Surat Mills,\n";
        load_rows(bytes, &CsvSheetParser).unwrap()
    }

    #[test]
    fn counts_plotted_and_missing() {
        let rows = rows();
        let all: Vec<&Row> = rows.iter().collect();
        let mut sink = MarkerBuffer::default();
        let stats = render(&all, &index(), &mut sink);
        assert_eq!(stats, RenderStats { plotted: 1, missing: 1 });
        assert_eq!(sink.markers.len(), 1);
    }

    #[test]
    fn render_clears_previous_markers() {
        let rows = rows();
        let all: Vec<&Row> = rows.iter().collect();
        let mut sink = MarkerBuffer::default();
        render(&all, &index(), &mut sink);
        render(&all, &index(), &mut sink);
        assert_eq!(sink.markers.len(), 1);
    }

    #[test]
    fn marker_carries_status_color_and_popup() {
        let rows = rows();
        let all: Vec<&Row> = rows.iter().collect();
        let mut sink = MarkerBuffer::default();
        render(&all, &index(), &mut sink);
        let marker = &sink.markers[0];
        assert_eq!(marker.color, "#2e7d32");
        assert_eq!(marker.fill_color, marker.color);
        assert_eq!(marker.popup.company, "Pune Traders");
        assert_eq!(marker.popup.status, "Completed");
        assert_eq!(marker.popup.status_color, marker.color);
        assert_eq!(marker.popup.location.as_deref(), Some("Pune, Maharashtra"));
        assert_eq!(marker.popup.year.as_deref(), Some("2021"));
        assert_eq!(marker.popup.poc, None);
    }

    #[test]
    fn index_state_wins_over_row_state() {
        let bytes = b"City,State\nPune,Elsewhere\n";
        let rows = load_rows(bytes, &CsvSheetParser).unwrap();
        let all: Vec<&Row> = rows.iter().collect();
        let mut sink = MarkerBuffer::default();
        render(&all, &index(), &mut sink);
        assert_eq!(
            sink.markers[0].popup.location.as_deref(),
            Some("Pune, Maharashtra")
        );
    }

    #[test]
    fn null_company_shows_placeholder() {
        let bytes = b"City,Status\nPune,Completed\n";
        let rows = load_rows(bytes, &CsvSheetParser).unwrap();
        let all: Vec<&Row> = rows.iter().collect();
        let mut sink = MarkerBuffer::default();
        render(&all, &index(), &mut sink);
        assert_eq!(sink.markers[0].popup.company, NO_COMPANY);
    }

    #[test]
    fn unknown_and_blank_status_use_default_color() {
        assert_eq!(status_color(None), "#9e9e9e");
        assert_eq!(
            status_color(Some(&Cell::Text("Something Else".into()))),
            "#9e9e9e"
        );
        assert_eq!(
            status_color(Some(&Cell::Text(UNKNOWN_STATUS.into()))),
            "#9e9e9e"
        );
    }

    #[test]
    fn legend_mirrors_the_color_table() {
        let legend = legend();
        assert_eq!(legend.len(), 4);
        assert_eq!(legend[0].status, "Completed");
        assert_eq!(legend[0].color, "#2e7d32");
        assert!(legend.iter().any(|e| e.status == UNKNOWN_STATUS));
    }
}
