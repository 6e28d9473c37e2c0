// Fixed reference dataset of candidate renewable deployment sites.
//
// Coordinates are approximate cluster centres; scores are on a 0-10 scale.
use crate::types::GeoSite;
use once_cell::sync::Lazy;

// (name, lat, lon, type, potential, deployment)
const SITE_TABLE: &[(&str, f64, f64, &str, f64, f64)] = &[
    ("Germany", 48.5, 10.0, "Solar", 8.7, 9.2),
    ("Spain", 41.3, 2.1, "Solar", 9.1, 8.1),
    ("India (North)", 28.5, 77.2, "Solar", 8.5, 6.4),
    ("India (West)", 22.3, 70.8, "Wind", 8.2, 7.0),
    ("India (West Coast)", 19.1, 72.8, "Wind", 7.9, 5.8),
    ("UK", 51.0, 0.1, "Offshore Wind", 8.9, 8.8),
    ("Greece", 37.9, 23.7, "Solar", 9.0, 7.0),
    ("USA (Texas)", 31.0, -100.0, "Wind", 9.2, 8.6),
    ("USA (California)", 36.8, -119.4, "Solar", 9.4, 8.9),
];

static REFERENCE_SITES: Lazy<Vec<GeoSite>> = Lazy::new(|| {
    SITE_TABLE
        .iter()
        .map(
            |&(name, latitude, longitude, energy_type, potential_score, deployment_index)| GeoSite {
                name: name.to_string(),
                latitude,
                longitude,
                energy_type: energy_type.to_string(),
                potential_score,
                deployment_index,
                composite_score: None,
            },
        )
        .collect()
});

/// The built-in site dataset, unscored.
pub fn reference_sites() -> &'static [GeoSite] {
    &REFERENCE_SITES
}
