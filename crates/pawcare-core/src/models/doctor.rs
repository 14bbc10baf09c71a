//! Doctor models.

use serde::{Deserialize, Serialize};

/// A doctor profile, one-to-one with a Doctor session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub id: i64,
    pub specialty: String,
    /// Clinic the doctor works at, if assigned
    #[serde(default)]
    pub clinic_id: Option<i64>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Body for the one-time doctor registration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DoctorRegistration {
    pub specialty: String,
    pub clinic_id: Option<i64>,
}

/// Body for attaching an existing doctor to a clinic.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClinicDoctor {
    pub doctor_email: String,
    pub specialty: String,
}
