//! Geographic coordinates resolved by geocoding
//!
//! Weather providers and the dashboard map both consume these, so the
//! type enforces the WGS84 ranges once at the boundary instead of at
//! every call site.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A geocoded point: latitude and longitude in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    /// Latitude in degrees, -90 to 90
    latitude: f64,
    /// Longitude in degrees, -180 to 180
    longitude: f64,
}

/// Coordinates outside the valid WGS84 ranges
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidCoordinates;

impl fmt::Display for InvalidCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid coordinates: latitude must be -90 to 90, longitude must be -180 to 180"
        )
    }
}

impl std::error::Error for InvalidCoordinates {}

impl GeoLocation {
    /// Validate and construct a location
    ///
    /// # Errors
    ///
    /// Returns `InvalidCoordinates` when either axis is outside its
    /// range. Non-finite values fail the range check as well.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, InvalidCoordinates> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(InvalidCoordinates);
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Construct without validation, for compile-time constants and
    /// coordinates a provider already validated
    #[must_use]
    pub const fn new_unchecked(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Fallback coordinate used when geocoding fails: Lahore, Pakistan
    #[must_use]
    pub const fn lahore() -> Self {
        Self::new_unchecked(31.5497, 74.3436)
    }
}

impl fmt::Display for GeoLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}
