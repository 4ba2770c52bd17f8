// crates/certmap-core/src/city_index.rs

//! # City index
//!
//! Lookup table from folded city name to coordinates and state, built
//! once at startup. Two construction sources are mutually exclusive:
//! the primary JSON resource, or (only when the primary is unavailable
//! or unusable) a fixed in-memory fallback table of well-known cities.
//! The index never merges both.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use serde::Deserialize;
use tracing::{info, warn};

use crate::error::Result;
use crate::text::fold_key;

/// Coordinates and state for one resolvable city, keyed externally by
/// the folded city name.
#[derive(Debug, Clone, PartialEq)]
pub struct CityIndexEntry {
    pub latitude: f64,
    pub longitude: f64,
    pub state: Option<String>,
}

/// Which source populated the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexSource {
    Primary,
    Fallback,
}

/// The built index. Never mutated after construction.
#[derive(Debug, Clone)]
pub struct CityIndex {
    entries: HashMap<String, CityIndexEntry>,
    source: IndexSource,
}

// ---------------------------------------------------------------------------
// Primary source shape
// ---------------------------------------------------------------------------

/// The primary resource is either a bare array of city records or a
/// wrapper object exposing a `cities` array.
#[derive(Deserialize)]
#[serde(untagged)]
enum CityDoc {
    Wrapped { cities: Vec<RawCity> },
    Bare(Vec<RawCity>),
}

#[derive(Deserialize)]
struct RawCity {
    city: Option<String>,
    lat: Option<Coord>,
    lng: Option<Coord>,
    admin_name: Option<String>,
    state: Option<String>,
}

/// Source files carry lat/lng as JSON numbers or numeric strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum Coord {
    Num(f64),
    Text(String),
}

impl Coord {
    /// Numeric coercion. Trims before parsing; anything non-finite is
    /// rejected so a malformed record is dropped instead of stored as
    /// a NaN coordinate.
    fn as_f64(&self) -> Option<f64> {
        let n = match self {
            Coord::Num(n) => *n,
            Coord::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        n.is_finite().then_some(n)
    }
}

// ---------------------------------------------------------------------------
// Fallback table
// ---------------------------------------------------------------------------

/// Fixed set of well-known cities used when the primary resource is
/// unavailable. (city, lat, lng, state)
const FALLBACK_CITIES: &[(&str, f64, f64, &str)] = &[
    ("Ahmedabad", 23.0225, 72.5714, "Gujarat"),
    ("Bengaluru", 12.9716, 77.5946, "Karnataka"),
    ("Chennai", 13.0827, 80.2707, "Tamil Nadu"),
    ("Coimbatore", 11.0168, 76.9558, "Tamil Nadu"),
    ("Delhi", 28.7041, 77.1025, "Delhi"),
    ("Gurugram", 28.4595, 77.0266, "Haryana"),
    ("Hyderabad", 17.3850, 78.4867, "Telangana"),
    ("Indore", 22.7196, 75.8577, "Madhya Pradesh"),
    ("Jaipur", 26.9124, 75.7873, "Rajasthan"),
    ("Kochi", 9.9312, 76.2673, "Kerala"),
    ("Kolkata", 22.5726, 88.3639, "West Bengal"),
    ("Lucknow", 26.8467, 80.9462, "Uttar Pradesh"),
    ("Mumbai", 19.0760, 72.8777, "Maharashtra"),
    ("Nagpur", 21.1458, 79.0882, "Maharashtra"),
    ("Navi Mumbai", 19.0330, 73.0297, "Maharashtra"),
    ("Noida", 28.5355, 77.3910, "Uttar Pradesh"),
    ("Pune", 18.5204, 73.8567, "Maharashtra"),
    ("Surat", 21.1702, 72.8311, "Gujarat"),
    ("Vadodara", 22.3072, 73.1812, "Gujarat"),
    ("Visakhapatnam", 17.6868, 83.2185, "Andhra Pradesh"),
];

static FALLBACK_INDEX: Lazy<HashMap<String, CityIndexEntry>> = Lazy::new(|| {
    FALLBACK_CITIES
        .iter()
        .map(|&(city, lat, lng, state)| {
            (
                fold_key(city),
                CityIndexEntry {
                    latitude: lat,
                    longitude: lng,
                    state: Some(state.to_string()),
                },
            )
        })
        .collect()
});

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

impl CityIndex {
    /// Build from the primary JSON resource bytes.
    ///
    /// Records without a usable city name, and records whose lat/lng do
    /// not coerce to a finite number, are skipped with a warning.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self> {
        let doc: CityDoc = serde_json::from_slice(bytes)?;
        let records = match doc {
            CityDoc::Wrapped { cities } => cities,
            CityDoc::Bare(cities) => cities,
        };

        let mut entries = HashMap::with_capacity(records.len());
        let mut dropped = 0usize;
        for record in records {
            let key = record
                .city
                .as_deref()
                .map(fold_key)
                .unwrap_or_default();
            if key.is_empty() {
                dropped += 1;
                continue;
            }
            let coords = record
                .lat
                .as_ref()
                .and_then(Coord::as_f64)
                .zip(record.lng.as_ref().and_then(Coord::as_f64));
            let Some((latitude, longitude)) = coords else {
                warn!(city = record.city.as_deref(), "dropping city record with malformed coordinates");
                dropped += 1;
                continue;
            };
            // admin_name is the common field in the primary source;
            // some exports call it state.
            let state = record.admin_name.or(record.state);
            entries.insert(
                key,
                CityIndexEntry {
                    latitude,
                    longitude,
                    state,
                },
            );
        }

        info!(cities = entries.len(), dropped, "city index built from primary source");
        Ok(CityIndex {
            entries,
            source: IndexSource::Primary,
        })
    }

    /// The all-or-nothing secondary table.
    pub fn fallback() -> Self {
        CityIndex {
            entries: FALLBACK_INDEX.clone(),
            source: IndexSource::Fallback,
        }
    }

    /// Load the primary resource from disk, degrading to the fallback
    /// table on any failure. Degradation is a diagnostic, not an error.
    pub fn load_or_fallback(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::fallback();
        };
        let built = fs::read(path)
            .map_err(crate::error::MapError::from)
            .and_then(|bytes| Self::from_json_slice(&bytes));
        match built {
            Ok(index) if index.ready() => index,
            Ok(_) => {
                warn!(path = %path.display(), "primary city resource is empty, using fallback table");
                Self::fallback()
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "primary city resource unavailable, using fallback table");
                Self::fallback()
            }
        }
    }

    /// Fetch the primary resource over HTTP, degrading to the fallback
    /// table on transport failure, non-success status, or a parse error.
    #[cfg(feature = "fetch")]
    pub fn fetch_or_fallback(url: &str) -> Self {
        let built = reqwest::blocking::get(url)
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.bytes())
            .map_err(|e| crate::error::MapError::Http(e.to_string()))
            .and_then(|bytes| Self::from_json_slice(&bytes));
        match built {
            Ok(index) if index.ready() => index,
            Ok(_) => {
                warn!(url, "primary city resource is empty, using fallback table");
                Self::fallback()
            }
            Err(e) => {
                warn!(url, error = %e, "primary city resource unavailable, using fallback table");
                Self::fallback()
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

impl CityIndex {
    /// True iff the index holds at least one city, regardless of which
    /// source populated it.
    pub fn ready(&self) -> bool {
        !self.entries.is_empty()
    }

    pub fn source(&self) -> IndexSource {
        self.source
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pure lookup by folded key. Absent cities (and the empty key)
    /// resolve to `None`.
    pub fn resolve(&self, city: &str) -> Option<&CityIndexEntry> {
        let key = fold_key(city);
        if key.is_empty() {
            return None;
        }
        self.entries.get(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_from_bare_array() {
        let json = br#"[
            {"city": "Pune", "lat": 18.5204, "lng": 73.8567, "admin_name": "Maharashtra"},
            {"city": "Surat", "lat": "21.1702", "lng": "72.8311", "state": "Gujarat"}
        ]"#;
        let index = CityIndex::from_json_slice(json).unwrap();
        assert!(index.ready());
        assert_eq!(index.source(), IndexSource::Primary);
        let pune = index.resolve("  pune ").unwrap();
        assert_eq!(pune.state.as_deref(), Some("Maharashtra"));
        let surat = index.resolve("SURAT").unwrap();
        assert!((surat.latitude - 21.1702).abs() < 1e-9);
    }

    #[test]
    fn builds_from_wrapped_object() {
        let json = br#"{"cities": [{"city": "Mumbai", "lat": 19.076, "lng": 72.8777}]}"#;
        let index = CityIndex::from_json_slice(json).unwrap();
        assert!(index.resolve("Mumbai").is_some());
    }

    #[test]
    fn drops_records_with_malformed_coordinates() {
        let json = br#"[
            {"city": "Pune", "lat": 18.5204, "lng": 73.8567},
            {"city": "Broken", "lat": "not-a-number", "lng": 10.0},
            {"city": "Missing"}
        ]"#;
        let index = CityIndex::from_json_slice(json).unwrap();
        assert_eq!(index.len(), 1);
        assert!(index.resolve("Broken").is_none());
        assert!(index.resolve("Missing").is_none());
    }

    #[test]
    fn empty_city_name_never_indexed() {
        let json = br#"[{"city": "   ", "lat": 1.0, "lng": 2.0}]"#;
        let index = CityIndex::from_json_slice(json).unwrap();
        assert!(index.is_empty());
        assert!(!index.ready());
        assert!(index.resolve("").is_none());
    }

    #[test]
    fn fallback_resolves_well_known_cities() {
        let index = CityIndex::fallback();
        assert_eq!(index.source(), IndexSource::Fallback);
        let hyd = index.resolve("HYDERABAD").unwrap();
        assert_eq!(hyd.state.as_deref(), Some("Telangana"));
        assert!(index.resolve("Navi Mumbai").is_some());
        assert!(index.resolve("navimumbai").is_some());
    }

    #[test]
    fn missing_primary_degrades_to_fallback() {
        let index = CityIndex::load_or_fallback(Some(Path::new("/no/such/cities.json")));
        assert_eq!(index.source(), IndexSource::Fallback);
        assert!(index.resolve("Hyderabad").is_some());
    }

    #[test]
    fn no_primary_path_uses_fallback() {
        let index = CityIndex::load_or_fallback(None);
        assert_eq!(index.source(), IndexSource::Fallback);
    }
}
