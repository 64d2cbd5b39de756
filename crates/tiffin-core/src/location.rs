//! # Delivery Location
//!
//! The delivery destination selected by the customer, and the codec for its
//! durable-storage record.
//!
//! ## Storage Record
//! One key holds the JSON form of [`Location`]:
//! ```json
//! { "address": "12 MG Road", "city": "Pune", "area": "Camp",
//!   "latitude": 18.52, "longitude": 73.87 }
//! ```
//! `latitude`/`longitude` are optional. There is no version field: a record
//! that decodes is accepted as-is, one that does not is treated as absent.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::validation::{validate_latitude, validate_longitude, validate_required_text};

/// Durable-storage key holding the selected location.
pub const LOCATION_STORAGE_KEY: &str = "tiffin.location";

/// A single delivery destination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Location {
    /// Street address line.
    pub address: String,

    /// City name.
    pub city: String,

    /// Locality / neighbourhood within the city.
    pub area: String,

    /// Latitude in degrees, when geocoded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub latitude: Option<f64>,

    /// Longitude in degrees, when geocoded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub longitude: Option<f64>,
}

impl Location {
    /// Builds a location from address form input.
    ///
    /// Every field is trimmed and must be non-empty.
    ///
    /// ## Example
    /// ```rust
    /// use tiffin_core::Location;
    ///
    /// let loc = Location::new("12 MG Road", " Pune", "Camp").unwrap();
    /// assert_eq!(loc.city, "Pune");
    /// assert!(Location::new("", "Pune", "Camp").is_err());
    /// ```
    pub fn new(
        address: impl AsRef<str>,
        city: impl AsRef<str>,
        area: impl AsRef<str>,
    ) -> CoreResult<Self> {
        Ok(Location {
            address: validate_required_text("address", address.as_ref())?,
            city: validate_required_text("city", city.as_ref())?,
            area: validate_required_text("area", area.as_ref())?,
            latitude: None,
            longitude: None,
        })
    }

    /// Attaches geocoordinates, checking their ranges.
    pub fn with_coordinates(mut self, latitude: f64, longitude: f64) -> CoreResult<Self> {
        validate_latitude(latitude)?;
        validate_longitude(longitude)?;
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        Ok(self)
    }

    /// Returns true if both coordinates are present.
    pub fn has_coordinates(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }

    /// One-line label for headers and the location picker.
    ///
    /// ```rust
    /// use tiffin_core::Location;
    ///
    /// let loc = Location::new("12 MG Road", "Pune", "Camp").unwrap();
    /// assert_eq!(loc.display_line(), "12 MG Road, Camp, Pune");
    /// ```
    pub fn display_line(&self) -> String {
        format!("{}, {}, {}", self.address, self.area, self.city)
    }

    /// Encodes the storage record.
    pub fn to_record(&self) -> CoreResult<String> {
        serde_json::to_string(self).map_err(|source| CoreError::InvalidRecord {
            record: "location",
            source,
        })
    }

    /// Decodes a storage record.
    ///
    /// Only JSON decoding is checked; field contents are not re-validated.
    pub fn from_record(raw: &str) -> CoreResult<Self> {
        serde_json::from_str(raw).map_err(|source| CoreError::InvalidRecord {
            record: "location",
            source,
        })
    }
}
