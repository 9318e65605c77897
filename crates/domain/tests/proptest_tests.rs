//! Property-based tests for domain value objects
//!
//! These tests use proptest to verify invariants across many random inputs.

use domain::{CityName, GeoLocation, PolicyParams, WeatherBundle};
use proptest::prelude::*;

// ============================================================================
// GeoLocation Property Tests
// ============================================================================

mod geo_location_tests {
    use super::*;

    proptest! {
        #[test]
        fn valid_coordinates_create_location(
            lat in -90.0f64..=90.0f64,
            lon in -180.0f64..=180.0f64
        ) {
            let result = GeoLocation::new(lat, lon);
            prop_assert!(result.is_ok());

            let loc = result.unwrap();
            prop_assert!((loc.latitude() - lat).abs() < f64::EPSILON);
            prop_assert!((loc.longitude() - lon).abs() < f64::EPSILON);
        }

        #[test]
        fn invalid_latitude_rejected(
            lat in prop_oneof![
                (-1000.0f64..-90.1f64),
                (90.1f64..1000.0f64)
            ],
            lon in -180.0f64..=180.0f64
        ) {
            let result = GeoLocation::new(lat, lon);
            prop_assert!(result.is_err());
        }

        #[test]
        fn invalid_longitude_rejected(
            lat in -90.0f64..=90.0f64,
            lon in prop_oneof![
                (-1000.0f64..-180.1f64),
                (180.1f64..1000.0f64)
            ]
        ) {
            let result = GeoLocation::new(lat, lon);
            prop_assert!(result.is_err());
        }

        #[test]
        fn unchecked_matches_validated_for_valid_input(
            lat in -90.0f64..=90.0f64,
            lon in -180.0f64..=180.0f64
        ) {
            let validated = GeoLocation::new(lat, lon).unwrap();
            let unchecked = GeoLocation::new_unchecked(lat, lon);
            prop_assert_eq!(validated, unchecked);
        }

        #[test]
        fn serialization_roundtrip(
            lat in -90.0f64..=90.0f64,
            lon in -180.0f64..=180.0f64
        ) {
            if let Ok(loc) = GeoLocation::new(lat, lon) {
                let json = serde_json::to_string(&loc).unwrap();
                let deserialized: GeoLocation = serde_json::from_str(&json).unwrap();
                // Use approximate comparison due to floating-point precision
                let lat_diff = (loc.latitude() - deserialized.latitude()).abs();
                let lon_diff = (loc.longitude() - deserialized.longitude()).abs();
                prop_assert!(lat_diff < 1e-10, "Latitude difference too large: {}", lat_diff);
                prop_assert!(lon_diff < 1e-10, "Longitude difference too large: {}", lon_diff);
            }
        }

        #[test]
        fn display_always_has_two_axes(
            lat in -90.0f64..=90.0f64,
            lon in -180.0f64..=180.0f64
        ) {
            let loc = GeoLocation::new_unchecked(lat, lon);
            let display = format!("{loc}");
            prop_assert_eq!(display.matches(", ").count(), 1);
        }
    }

    #[test]
    fn non_finite_coordinates_rejected() {
        assert!(GeoLocation::new(f64::NAN, 0.0).is_err());
        assert!(GeoLocation::new(0.0, f64::NAN).is_err());
        assert!(GeoLocation::new(f64::INFINITY, 0.0).is_err());
    }
}

// ============================================================================
// CityName Property Tests
// ============================================================================

mod city_name_tests {
    use super::*;

    proptest! {
        #[test]
        fn plain_names_accepted(name in "[A-Za-z][A-Za-z ]{0,80}[A-Za-z]") {
            let result = CityName::new(&name);
            prop_assert!(result.is_ok());
            let city = result.unwrap();
            prop_assert_eq!(city.as_str(), name.as_str());
        }

        #[test]
        fn surrounding_whitespace_never_survives(
            pad_left in "[ \t]{0,5}",
            name in "[A-Za-z]{1,40}",
            pad_right in "[ \t]{0,5}"
        ) {
            let city = CityName::new(format!("{pad_left}{name}{pad_right}")).unwrap();
            prop_assert_eq!(city.as_str(), name.as_str());
        }

        #[test]
        fn whitespace_only_rejected(blank in "[ \t\n]{0,30}") {
            let result = CityName::new(&blank);
            prop_assert!(result.is_err());
        }

        #[test]
        fn length_bound_is_exact(len in 1usize..=200usize) {
            let name = "a".repeat(len);
            let result = CityName::new(&name);
            if len <= 120 {
                prop_assert!(result.is_ok());
            } else {
                prop_assert!(result.is_err());
            }
        }

        #[test]
        fn serializes_as_bare_string(name in "[A-Za-z]{1,40}") {
            let city = CityName::new(&name).unwrap();
            let json = serde_json::to_string(&city).unwrap();
            prop_assert_eq!(json, format!("\"{name}\""));

            let back: CityName = serde_json::from_str(&format!("\"{name}\"")).unwrap();
            prop_assert_eq!(back.as_str(), name.as_str());
        }

        #[test]
        fn display_matches_as_str(name in "[A-Za-z ]{1,40}") {
            if let Ok(city) = CityName::new(&name) {
                prop_assert_eq!(city.to_string(), city.as_str());
            }
        }
    }
}

// ============================================================================
// PolicyParams Property Tests
// ============================================================================

mod policy_params_tests {
    use super::*;

    fn lahore() -> CityName {
        CityName::new("Lahore").unwrap()
    }

    proptest! {
        #[test]
        fn unit_interval_temperatures_accepted(temp in 0.0f32..=1.0f32) {
            let result = PolicyParams::new(lahore(), "prompt", "gpt-4o-mini", temp);
            prop_assert!(result.is_ok());
            prop_assert!((result.unwrap().temperature - temp).abs() < f32::EPSILON);
        }

        #[test]
        fn out_of_range_temperatures_rejected(
            temp in prop_oneof![
                (-100.0f32..-0.001f32),
                (1.001f32..100.0f32)
            ]
        ) {
            let result = PolicyParams::new(lahore(), "prompt", "gpt-4o-mini", temp);
            prop_assert!(result.is_err());
        }

        #[test]
        fn model_name_is_trimmed(model in "[a-z0-9-]{1,20}") {
            let params =
                PolicyParams::new(lahore(), "prompt", format!("  {model}  "), 0.4).unwrap();
            prop_assert_eq!(params.model, model);
        }

        #[test]
        fn blank_models_rejected(blank in "[ \t]{0,10}") {
            let result = PolicyParams::new(lahore(), "prompt", &blank, 0.4);
            prop_assert!(result.is_err());
        }

        #[test]
        fn user_prompt_passes_through_verbatim(prompt in ".{0,200}") {
            let params = PolicyParams::new(lahore(), &prompt, "gpt-4o-mini", 0.4).unwrap();
            prop_assert_eq!(params.user_prompt, prompt);
        }
    }

    #[test]
    fn non_finite_temperatures_rejected() {
        assert!(PolicyParams::new(lahore(), "p", "m", f32::NAN).is_err());
        assert!(PolicyParams::new(lahore(), "p", "m", f32::INFINITY).is_err());
    }

    #[test]
    fn defaults_are_valid() {
        let params = PolicyParams::with_defaults(lahore()).unwrap();
        assert!((0.0..=1.0).contains(&params.temperature));
        assert!(!params.model.is_empty());
    }
}

// ============================================================================
// WeatherBundle Property Tests
// ============================================================================

mod weather_bundle_tests {
    use super::*;

    proptest! {
        #[test]
        fn every_pushed_error_is_retained(
            messages in prop::collection::vec("[a-z ]{1,30}", 1..5)
        ) {
            let mut bundle = WeatherBundle::new("Lahore");
            for message in &messages {
                bundle.push_error(message);
            }

            prop_assert!(bundle.has_error());
            let combined = bundle.error.unwrap();
            for message in &messages {
                prop_assert!(combined.contains(message.as_str()));
            }
            // One separator per appended message
            prop_assert_eq!(combined.matches("; ").count(), messages.len() - 1);
        }

        #[test]
        fn fresh_bundles_carry_no_error(city in "[A-Za-z]{1,30}") {
            let bundle = WeatherBundle::new(&city);
            prop_assert!(!bundle.has_error());
            prop_assert_eq!(&bundle.city, &city);
            prop_assert_eq!(bundle.forecast_days(), 0);
        }

        #[test]
        fn serialization_preserves_error_state(city in "[A-Za-z]{1,20}") {
            let bundle = WeatherBundle::city_not_found(&city);
            let json = serde_json::to_string(&bundle).unwrap();
            let back: WeatherBundle = serde_json::from_str(&json).unwrap();
            prop_assert_eq!(back.error.as_deref(), Some("City not found"));
            prop_assert_eq!(back.city, city);
        }
    }
}
