//! End-to-end pipeline scenarios: load, facet, filter, render.

use certmap_core::{
    apply_filters, render, CityIndex, CsvSheetParser, FacetField, FacetSet, FilterSelection,
    IndexSource, MapSession, MarkerBuffer, RenderStats, Row,
};

const DATASET: &[u8] = b"City,State,Company Name,Category,Status,Year of Certification,PoC,GP Team\n\
Pune,Maharashtra,Pune Traders,Textiles,Completed,2021,Asha,West\n\
Unknownville,,Surat Mills,Chemicals,Hold,2020,,East\n";

const CITIES_JSON: &[u8] =
    br#"[{"city": "Pune", "lat": 18.5204, "lng": 73.8567, "admin_name": "Maharashtra"}]"#;

fn session() -> MapSession {
    let rows = certmap_core::dataset::load_rows(DATASET, &CsvSheetParser).unwrap();
    let index = CityIndex::from_json_slice(CITIES_JSON).unwrap();
    MapSession::from_parts(rows, index)
}

#[test]
fn unfiltered_render_counts_plotted_and_missing() {
    let session = session();
    let mut sink = MarkerBuffer::default();
    let stats = session.refresh(&FilterSelection::default(), &mut sink);
    assert_eq!(stats, RenderStats { plotted: 1, missing: 1 });
    assert_eq!(sink.markers[0].popup.company, "Pune Traders");
}

#[test]
fn status_filter_then_render() {
    let session = session();
    let selection = FilterSelection {
        status: Some("Hold".into()),
        ..Default::default()
    };
    let filtered = apply_filters(session.rows(), &selection);
    assert_eq!(filtered.len(), 1);
    assert_eq!(
        filtered[0].city.as_ref().unwrap().to_string(),
        "Unknownville"
    );

    let mut sink = MarkerBuffer::default();
    let stats = render(&filtered, session.city_index(), &mut sink);
    assert_eq!(stats, RenderStats { plotted: 0, missing: 1 });
    assert!(sink.markers.is_empty());
}

#[test]
fn search_matches_company_case_insensitively() {
    let session = session();
    let selection = FilterSelection {
        search: "PUN".into(),
        ..Default::default()
    };
    let filtered = apply_filters(session.rows(), &selection);
    let companies: Vec<String> = filtered
        .iter()
        .map(|r| r.company.as_ref().unwrap().to_string())
        .collect();
    assert_eq!(companies, ["Pune Traders"]);
}

#[test]
fn primary_failure_degrades_to_fallback_table() {
    let index = CityIndex::from_json_slice(b"not json at all");
    assert!(index.is_err());

    let index = CityIndex::load_or_fallback(Some(std::path::Path::new("/no/such/file.json")));
    assert_eq!(index.source(), IndexSource::Fallback);
    assert!(index.resolve("HYDERABAD").is_some());
}

#[test]
fn facets_feed_the_filter_controls() {
    let session = session();
    let facets: &FacetSet = session.facets();
    assert_eq!(
        facets.options(FacetField::Status),
        ["All", "Completed", "Hold"]
    );
    // The blank state cell never becomes a facet value.
    assert_eq!(facets.options(FacetField::State), ["All", "Maharashtra"]);
}

#[test]
fn unresolved_rows_are_excluded_and_counted() {
    let session = session();
    let unresolved: Vec<&Row> = session
        .rows()
        .iter()
        .filter(|r| {
            r.city
                .as_ref()
                .map(|c| session.city_index().resolve(&c.as_text()).is_none())
                .unwrap_or(true)
        })
        .collect();
    assert_eq!(unresolved.len(), 1);

    let mut sink = MarkerBuffer::default();
    let stats = session.refresh(&FilterSelection::default(), &mut sink);
    assert_eq!(stats.missing, unresolved.len());
}
