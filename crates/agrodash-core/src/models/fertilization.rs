//! Fertilization domain model.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FertilizationStatus {
    Scheduled,
    Pending,
    Completed,
    Cancelled,
}

impl FertilizationStatus {
    pub const ALL: [FertilizationStatus; 4] = [
        FertilizationStatus::Scheduled,
        FertilizationStatus::Pending,
        FertilizationStatus::Completed,
        FertilizationStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FertilizationStatus::Scheduled => "SCHEDULED",
            FertilizationStatus::Pending => "PENDING",
            FertilizationStatus::Completed => "COMPLETED",
            FertilizationStatus::Cancelled => "CANCELLED",
        }
    }

    /// Still awaiting completion or cancellation.
    pub fn is_open(&self) -> bool {
        matches!(
            self,
            FertilizationStatus::Scheduled | FertilizationStatus::Pending
        )
    }
}

impl fmt::Display for FertilizationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FertilizationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown fertilization status: {s}"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Fertilization {
    pub id: i64,
    pub parcel_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parcel_name: Option<String>,
    pub scheduled_datetime: NaiveDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fertilizer_type: Option<String>,
    pub status: FertilizationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_datetime: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FertilizationRequest {
    pub parcel_id: i64,
    pub scheduled_datetime: NaiveDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fertilizer_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<FertilizationStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Quick-schedule input; sent as query parameters rather than a body.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleFertilization {
    pub parcel_id: i64,
    pub scheduled_datetime: NaiveDateTime,
    pub fertilizer_type: String,
}
