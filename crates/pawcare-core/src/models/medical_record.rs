//! Medical record models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Visit record attached to a completed appointment (at most one per appointment).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MedicalRecord {
    pub id: i64,
    pub appointment_id: i64,
    pub diagnosis: String,
    pub treatment: String,
    #[serde(default)]
    pub notes: Option<String>,
    pub record_date: NaiveDateTime,
    #[serde(default)]
    pub doctor_name: Option<String>,
}

/// Body for creating a medical record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewMedicalRecord {
    pub appointment_id: i64,
    pub diagnosis: String,
    pub treatment: String,
    pub notes: Option<String>,
}
