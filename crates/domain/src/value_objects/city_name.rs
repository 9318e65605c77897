//! City name value object with validation
//!
//! City names are passed verbatim to the weather providers, so no
//! normalization beyond trimming is applied: "New York" stays "New York".
//!
//! # Examples
//!
//! ```
//! use domain::CityName;
//!
//! let city = CityName::new("Lahore").unwrap();
//! assert_eq!(city.as_str(), "Lahore");
//!
//! // Surrounding whitespace is trimmed
//! let city = CityName::new("  Berlin  ").unwrap();
//! assert_eq!(city.as_str(), "Berlin");
//!
//! // Empty names are rejected
//! assert!(CityName::new("   ").is_err());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::errors::DomainError;

/// Maximum accepted city-name length in characters
const MAX_CITY_NAME_LEN: u64 = 120;

/// A validated, trimmed city name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Validate)]
#[serde(transparent)]
pub struct CityName {
    #[validate(length(min = 1, max = 120))]
    value: String,
}

impl CityName {
    /// Create a new city name, trimming whitespace and validating length
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed name is empty or exceeds 120
    /// characters.
    pub fn new(city: impl Into<String>) -> Result<Self, DomainError> {
        let value = city.into().trim().to_string();
        if value.is_empty() {
            return Err(DomainError::InvalidCityName(
                "must not be empty".to_string(),
            ));
        }

        let candidate = Self { value };
        candidate.validate().map_err(|_| {
            DomainError::InvalidCityName(format!(
                "must be at most {MAX_CITY_NAME_LEN} characters"
            ))
        })?;

        Ok(candidate)
    }

    /// Get the city name as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Consume the value object and return the inner string
    #[must_use]
    pub fn into_inner(self) -> String {
        self.value
    }
}

impl fmt::Display for CityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl AsRef<str> for CityName {
    fn as_ref(&self) -> &str {
        &self.value
    }
}
