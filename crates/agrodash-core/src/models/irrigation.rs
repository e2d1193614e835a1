//! Irrigation domain model.
//!
//! Status transitions are server-authoritative. The predicates on
//! [`IrrigationStatus`] only decide which actions the client offers.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IrrigationStatus {
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
    Failed,
    Retrying,
    Stopped,
}

impl IrrigationStatus {
    pub const ALL: [IrrigationStatus; 7] = [
        IrrigationStatus::Scheduled,
        IrrigationStatus::InProgress,
        IrrigationStatus::Completed,
        IrrigationStatus::Cancelled,
        IrrigationStatus::Failed,
        IrrigationStatus::Retrying,
        IrrigationStatus::Stopped,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IrrigationStatus::Scheduled => "SCHEDULED",
            IrrigationStatus::InProgress => "IN_PROGRESS",
            IrrigationStatus::Completed => "COMPLETED",
            IrrigationStatus::Cancelled => "CANCELLED",
            IrrigationStatus::Failed => "FAILED",
            IrrigationStatus::Retrying => "RETRYING",
            IrrigationStatus::Stopped => "STOPPED",
        }
    }

    pub fn can_execute(&self) -> bool {
        matches!(
            self,
            IrrigationStatus::Scheduled | IrrigationStatus::Failed | IrrigationStatus::Stopped
        )
    }

    pub fn can_stop(&self) -> bool {
        matches!(
            self,
            IrrigationStatus::InProgress | IrrigationStatus::Retrying
        )
    }
}

impl fmt::Display for IrrigationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IrrigationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown irrigation status: {s}"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Irrigation {
    pub id: i64,
    pub parcel_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parcel_name: Option<String>,
    pub scheduled_datetime: NaiveDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub water_amount_liters: Option<f64>,
    pub status: IrrigationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_datetime: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_datetime: Option<NaiveDateTime>,
    #[serde(default)]
    pub retry_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_retry_at: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_description: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IrrigationRequest {
    pub parcel_id: i64,
    pub scheduled_datetime: NaiveDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub water_amount_liters: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<IrrigationStatus>,
}
