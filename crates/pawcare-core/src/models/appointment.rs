//! Appointment models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

coded_enum! {
    /// Appointment lifecycle status.
    pub enum AppointmentStatus {
        /// Booked by the owner, awaiting the doctor
        Pending = 0,
        /// Accepted by the doctor
        Approved = 1,
        /// Declined by the doctor
        Rejected = 2,
        /// Visit took place
        Completed = 3,
        /// Withdrawn before the visit
        Cancelled = 4,
    }
}

impl AppointmentStatus {
    /// Terminal statuses accept no further status changes.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            AppointmentStatus::Completed
                | AppointmentStatus::Rejected
                | AppointmentStatus::Cancelled
        )
    }
}

/// A clinic appointment for a pet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: i64,
    pub pet_id: i64,
    pub clinic_id: i64,
    #[serde(default)]
    pub doctor_id: Option<i64>,
    pub appointment_date: NaiveDateTime,
    pub status: AppointmentStatus,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub pet_name: Option<String>,
    #[serde(default)]
    pub clinic_name: Option<String>,
}

/// Body for booking an appointment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewAppointment {
    pub pet_id: i64,
    pub clinic_id: i64,
    pub doctor_id: Option<i64>,
    pub appointment_date: NaiveDateTime,
    pub notes: Option<String>,
}

/// Body for a status change.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AppointmentStatusUpdate {
    pub status: AppointmentStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_statuses() {
        assert!(!AppointmentStatus::Pending.is_terminal());
        assert!(!AppointmentStatus::Approved.is_terminal());
        assert!(AppointmentStatus::Rejected.is_terminal());
        assert!(AppointmentStatus::Completed.is_terminal());
        assert!(AppointmentStatus::Cancelled.is_terminal());
    }

    #[test]
    fn test_decode_with_string_status() {
        let json = r#"{
            "id": 10, "petId": 1, "clinicId": 2,
            "appointmentDate": "2024-05-01T10:00:00",
            "status": "Completed"
        }"#;
        let appointment: Appointment = serde_json::from_str(json).unwrap();
        assert_eq!(appointment.status, AppointmentStatus::Completed);
        assert!(appointment.doctor_id.is_none());
    }
}
