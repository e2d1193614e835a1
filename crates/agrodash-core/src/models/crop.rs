//! Crop domain model.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Crop {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub irrigation_frequency_days: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fertilization_frequency_days: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fertilizer_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub irrigation_duration_minutes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub water_requirement_liters_per_sqm: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CropRequest {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub irrigation_frequency_days: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fertilization_frequency_days: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fertilizer_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub irrigation_duration_minutes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub water_requirement_liters_per_sqm: Option<f64>,
}
