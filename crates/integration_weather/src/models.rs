//! Open-Meteo geocoding response types

use serde::{Deserialize, Serialize};

/// Response envelope of the Open-Meteo geocoding search
///
/// The provider omits the `results` field entirely when nothing matched,
/// so it must stay optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingResponse {
    /// Matching places, best match first; absent on a miss
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<GeocodingPlace>>,
}

impl GeocodingResponse {
    /// The best match, if the search produced any
    #[must_use]
    pub fn best_match(self) -> Option<GeocodingPlace> {
        self.results.and_then(|places| places.into_iter().next())
    }
}

/// One geocoding match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingPlace {
    /// Resolved place name
    pub name: String,

    /// Latitude in decimal degrees
    pub latitude: f64,

    /// Longitude in decimal degrees
    pub longitude: f64,

    /// Country name, when the provider knows it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    /// First-level administrative area (state, province)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin1: Option<String>,

    /// IANA timezone of the place
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}
