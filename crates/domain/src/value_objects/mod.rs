//! Value objects for the domain layer

mod city_name;
mod geo_location;

pub use city_name::CityName;
pub use geo_location::{GeoLocation, InvalidCoordinates};
