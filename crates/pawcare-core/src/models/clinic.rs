//! Clinic models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

coded_enum! {
    /// Moderation status of a clinic. Changed by admins only.
    pub enum ClinicStatus {
        Pending = 0,
        Approved = 1,
        Rejected = 2,
    }
}

/// Postal address of a clinic.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// Building or place name
    pub name: String,
    pub street: String,
    pub city: String,
    pub country: String,
}

/// A veterinary clinic.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Clinic {
    pub id: i64,
    pub name: String,
    pub address: Address,
    /// Average rating (0.0 - 5.0)
    #[serde(default)]
    pub rating: f64,
    pub status: ClinicStatus,
    /// Owning doctor's user ID
    #[serde(default)]
    pub owner_id: Option<String>,
    #[serde(default)]
    pub picture_url: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

impl Clinic {
    /// Check whether the given user owns this clinic.
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.owner_id.as_deref() == Some(user_id)
    }
}

/// Body for creating or editing a clinic.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewClinic {
    pub name: String,
    pub address: Address,
    pub picture_url: Option<String>,
    pub phone_number: Option<String>,
}

/// Body for an admin status change.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ClinicStatusUpdate {
    pub status: ClinicStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_backend_clinic() {
        let json = r#"{
            "id": 4,
            "name": "A Vet",
            "address": {"name": "Main", "street": "1 Road", "city": "Cairo", "country": "EG"},
            "rating": 4.8,
            "status": 1,
            "ownerId": "u-1",
            "createdAt": "2024-03-01T09:30:00"
        }"#;

        let clinic: Clinic = serde_json::from_str(json).unwrap();
        assert_eq!(clinic.status, ClinicStatus::Approved);
        assert_eq!(clinic.address.city, "Cairo");
        assert!(clinic.is_owned_by("u-1"));
        assert!(!clinic.is_owned_by("u-2"));
    }

    #[test]
    fn test_status_serializes_as_code() {
        let body = ClinicStatusUpdate {
            status: ClinicStatus::Rejected,
        };
        assert_eq!(serde_json::to_string(&body).unwrap(), r#"{"status":2}"#);
    }
}
