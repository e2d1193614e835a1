//! Parcel domain model.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A plot of land belonging to one farm, optionally planted with one crop.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Parcel {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    /// Area in hectares.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_irrigated_at: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_fertilized_at: Option<NaiveDateTime>,
    pub farm_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub farm_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crop_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crop_name: Option<String>,
}

impl Parcel {
    /// Both coordinates, when the parcel has been placed on the map.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ParcelRequest {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<f64>,
    pub farm_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crop_id: Option<i64>,
}

/// Current weather at a parcel's coordinates, as reported by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ParcelWeather {
    pub parcel_id: i64,
    pub parcel_name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub weather_condition: String,
    pub weather_description: String,
    pub weather_icon: String,
    /// Celsius.
    pub temperature: f64,
    pub feels_like: f64,
    /// Percent.
    pub humidity: f64,
    /// hPa.
    pub pressure: f64,
    /// m/s.
    pub wind_speed: f64,
    /// Millimetres expected within the next hour.
    pub rain_expected_in_one_hour: f64,
    pub cloudiness: f64,
    /// Metres.
    pub visibility: f64,
    pub location_name: String,
    pub country: String,
}
