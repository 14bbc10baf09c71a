//! Status workflows and role gating.
//!
//! These rules decide which mutations the client offers. The backend remains
//! the authority; a request the client lets through can still be refused.

use thiserror::Error;

use crate::models::{
    Appointment, AppointmentStatus, Clinic, ClinicStatus, MedicalRecord, Rating, Role, Session,
};

/// A mutation the client refuses to send.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WorkflowError {
    #[error("Sign in required")]
    NotSignedIn,

    #[error("Not allowed for role {0}")]
    RoleNotAllowed(Role),

    #[error("Cannot change appointment status from {from} to {to}")]
    InvalidAppointmentTransition {
        from: AppointmentStatus,
        to: AppointmentStatus,
    },

    #[error("Cannot change clinic status from {from} to {to}")]
    InvalidClinicTransition { from: ClinicStatus, to: ClinicStatus },

    #[error("Appointment {0} is not loaded")]
    UnknownAppointment(i64),

    #[error("Clinic {0} is not loaded")]
    UnknownClinic(i64),

    #[error("Medical records need a completed appointment (status is {0})")]
    AppointmentNotCompleted(AppointmentStatus),

    #[error("Appointment {0} already has a medical record")]
    MedicalRecordExists(i64),

    #[error("Clinic {0} has already been rated by this user")]
    AlreadyRated(i64),

    #[error("Rating must be between 1 and 5, got {0}")]
    InvalidRating(u8),

    #[error("Doctor profile already registered")]
    DoctorAlreadyRegistered,

    #[error("Basket is empty")]
    EmptyBasket,
}

pub type WorkflowResult<T> = Result<T, WorkflowError>;

// =========================================================================
// Role gating
// =========================================================================

/// Require a session whose role is one of `roles`.
pub fn require_role<'a>(
    session: Option<&'a Session>,
    roles: &[Role],
) -> WorkflowResult<&'a Session> {
    let session = session.ok_or(WorkflowError::NotSignedIn)?;
    if roles.contains(&session.role) {
        Ok(session)
    } else {
        Err(WorkflowError::RoleNotAllowed(session.role))
    }
}

/// Admins may delete any clinic; doctors only the clinics they own.
pub fn can_delete_clinic(session: &Session, clinic: Option<&Clinic>) -> bool {
    match session.role {
        Role::Admin => true,
        Role::Doctor => match (clinic, session.user_id.as_deref()) {
            (Some(clinic), Some(user_id)) => clinic.is_owned_by(user_id),
            _ => false,
        },
        Role::PetOwner => false,
    }
}

/// Admins may remove any review; everyone else only their own.
pub fn can_delete_rating(session: &Session, rating: &Rating) -> bool {
    session.is_admin() || session.user_id.as_deref() == Some(rating.user_id.as_str())
}

// =========================================================================
// Appointment status machine
// =========================================================================

/// Every edge of the appointment machine, regardless of who triggers it.
///
/// Cancellation is server-owned; no client role is offered it.
pub fn appointment_edge_exists(from: AppointmentStatus, to: AppointmentStatus) -> bool {
    use AppointmentStatus::*;
    match (from, to) {
        (Pending, Approved) | (Pending, Rejected) | (Approved, Completed) => true,
        (Pending, Cancelled) | (Approved, Cancelled) => true,
        _ => false,
    }
}

/// Status changes offered to `role` for an appointment in `from`.
pub fn appointment_transitions(from: AppointmentStatus, role: Role) -> Vec<AppointmentStatus> {
    use AppointmentStatus::*;
    if role != Role::Doctor {
        return Vec::new();
    }
    match from {
        Pending => vec![Approved, Rejected],
        Approved => vec![Completed],
        Rejected | Completed | Cancelled => Vec::new(),
    }
}

/// Check a status change before sending it.
pub fn check_appointment_transition(
    from: AppointmentStatus,
    to: AppointmentStatus,
    role: Role,
) -> WorkflowResult<()> {
    if appointment_transitions(from, role).contains(&to) {
        Ok(())
    } else if role != Role::Doctor {
        Err(WorkflowError::RoleNotAllowed(role))
    } else {
        Err(WorkflowError::InvalidAppointmentTransition { from, to })
    }
}

// =========================================================================
// Clinic moderation
// =========================================================================

/// Status changes offered to `role` for a clinic in `from`.
///
/// Admin only. Unlike appointments there is no terminal state: an approved
/// clinic can be rejected and a rejected one approved again.
pub fn clinic_transitions(from: ClinicStatus, role: Role) -> Vec<ClinicStatus> {
    if role != Role::Admin {
        return Vec::new();
    }
    [ClinicStatus::Approved, ClinicStatus::Rejected]
        .into_iter()
        .filter(|to| *to != from)
        .collect()
}

/// Check a clinic status change before sending it.
pub fn check_clinic_transition(
    from: ClinicStatus,
    to: ClinicStatus,
    role: Role,
) -> WorkflowResult<()> {
    if role != Role::Admin {
        return Err(WorkflowError::RoleNotAllowed(role));
    }
    if clinic_transitions(from, role).contains(&to) {
        Ok(())
    } else {
        Err(WorkflowError::InvalidClinicTransition { from, to })
    }
}

// =========================================================================
// Gated creation
// =========================================================================

/// Medical record creation is unlocked by a completed appointment that has no record yet.
pub fn check_medical_record(
    appointment: &Appointment,
    existing: &[MedicalRecord],
) -> WorkflowResult<()> {
    if appointment.status != AppointmentStatus::Completed {
        return Err(WorkflowError::AppointmentNotCompleted(appointment.status));
    }
    if existing
        .iter()
        .any(|record| record.appointment_id == appointment.id)
    {
        return Err(WorkflowError::MedicalRecordExists(appointment.id));
    }
    Ok(())
}

/// Boolean form of [`check_medical_record`] for enabling UI controls.
pub fn can_create_medical_record(appointment: &Appointment, existing: &[MedicalRecord]) -> bool {
    check_medical_record(appointment, existing).is_ok()
}

/// A pet owner may rate a clinic once.
pub fn check_can_rate(session: Option<&Session>, clinic_id: i64, has_rated: bool) -> WorkflowResult<()> {
    require_role(session, &[Role::PetOwner])?;
    if has_rated {
        return Err(WorkflowError::AlreadyRated(clinic_id));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use AppointmentStatus::*;

    fn session(role: Role, user_id: &str) -> Session {
        Session {
            token: "t".into(),
            role,
            user_id: Some(user_id.into()),
            display_name: None,
            email: None,
        }
    }

    fn appointment(id: i64, status: AppointmentStatus) -> Appointment {
        Appointment {
            id,
            pet_id: 1,
            clinic_id: 1,
            doctor_id: Some(1),
            appointment_date: NaiveDate::from_ymd_opt(2024, 5, 1)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
            status,
            notes: None,
            pet_name: None,
            clinic_name: None,
        }
    }

    fn record(appointment_id: i64) -> MedicalRecord {
        MedicalRecord {
            id: 100,
            appointment_id,
            diagnosis: "Otitis".into(),
            treatment: "Drops".into(),
            notes: None,
            record_date: NaiveDate::from_ymd_opt(2024, 5, 1)
                .unwrap()
                .and_hms_opt(11, 0, 0)
                .unwrap(),
            doctor_name: None,
        }
    }

    #[test]
    fn test_doctor_transitions() {
        assert_eq!(appointment_transitions(Pending, Role::Doctor), vec![Approved, Rejected]);
        assert_eq!(appointment_transitions(Approved, Role::Doctor), vec![Completed]);
    }

    #[test]
    fn test_terminal_states_offer_nothing() {
        for from in [Completed, Rejected, Cancelled] {
            assert!(appointment_transitions(from, Role::Doctor).is_empty());
            for to in AppointmentStatus::ALL {
                assert!(!appointment_edge_exists(from, *to));
                assert!(check_appointment_transition(from, *to, Role::Doctor).is_err());
            }
        }
    }

    #[test]
    fn test_cancel_not_offered_to_any_role() {
        for role in Role::ALL {
            for from in AppointmentStatus::ALL {
                assert!(!appointment_transitions(*from, *role).contains(&Cancelled));
            }
        }
        assert!(appointment_edge_exists(Pending, Cancelled));
    }

    #[test]
    fn test_non_doctor_cannot_change_appointment() {
        let err = check_appointment_transition(Pending, Approved, Role::Admin).unwrap_err();
        assert_eq!(err, WorkflowError::RoleNotAllowed(Role::Admin));
    }

    #[test]
    fn test_pending_cannot_complete_directly() {
        let err = check_appointment_transition(Pending, Completed, Role::Doctor).unwrap_err();
        assert_eq!(
            err,
            WorkflowError::InvalidAppointmentTransition {
                from: Pending,
                to: Completed
            }
        );
    }

    #[test]
    fn test_clinic_moderation_has_no_lockout() {
        assert!(check_clinic_transition(ClinicStatus::Pending, ClinicStatus::Approved, Role::Admin).is_ok());
        assert!(check_clinic_transition(ClinicStatus::Approved, ClinicStatus::Rejected, Role::Admin).is_ok());
        assert!(check_clinic_transition(ClinicStatus::Rejected, ClinicStatus::Approved, Role::Admin).is_ok());
        assert!(check_clinic_transition(ClinicStatus::Approved, ClinicStatus::Approved, Role::Admin).is_err());
    }

    #[test]
    fn test_clinic_moderation_admin_only() {
        assert!(clinic_transitions(ClinicStatus::Pending, Role::Doctor).is_empty());
        assert!(clinic_transitions(ClinicStatus::Pending, Role::PetOwner).is_empty());
        assert_eq!(
            check_clinic_transition(ClinicStatus::Pending, ClinicStatus::Approved, Role::Doctor),
            Err(WorkflowError::RoleNotAllowed(Role::Doctor))
        );
    }

    #[test]
    fn test_medical_record_unlock() {
        assert!(can_create_medical_record(&appointment(1, Completed), &[]));
        assert!(can_create_medical_record(&appointment(1, Completed), &[record(2)]));

        for status in [Pending, Approved, Rejected, Cancelled] {
            assert!(!can_create_medical_record(&appointment(1, status), &[]));
        }

        assert_eq!(
            check_medical_record(&appointment(1, Completed), &[record(1)]),
            Err(WorkflowError::MedicalRecordExists(1))
        );
    }

    #[test]
    fn test_delete_clinic_rights() {
        let clinic = Clinic {
            id: 1,
            name: "A Vet".into(),
            address: Default::default(),
            rating: 4.0,
            status: ClinicStatus::Approved,
            owner_id: Some("doc-1".into()),
            picture_url: None,
            phone_number: None,
            created_at: None,
        };

        assert!(can_delete_clinic(&session(Role::Admin, "admin"), None));
        assert!(can_delete_clinic(&session(Role::Doctor, "doc-1"), Some(&clinic)));
        assert!(!can_delete_clinic(&session(Role::Doctor, "doc-2"), Some(&clinic)));
        assert!(!can_delete_clinic(&session(Role::PetOwner, "doc-1"), Some(&clinic)));
    }

    #[test]
    fn test_rating_gate() {
        let owner = session(Role::PetOwner, "u1");
        assert!(check_can_rate(Some(&owner), 3, false).is_ok());
        assert_eq!(check_can_rate(Some(&owner), 3, true), Err(WorkflowError::AlreadyRated(3)));
        assert_eq!(check_can_rate(None, 3, false), Err(WorkflowError::NotSignedIn));
    }

    #[test]
    fn test_delete_rating_rights() {
        let rating = Rating {
            id: 9,
            clinic_id: 3,
            user_id: "u1".into(),
            rating_value: 4,
            comment: None,
            created_at: NaiveDate::from_ymd_opt(2024, 5, 2)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
            user_name: None,
        };
        assert!(can_delete_rating(&session(Role::PetOwner, "u1"), &rating));
        assert!(!can_delete_rating(&session(Role::PetOwner, "u2"), &rating));
        assert!(can_delete_rating(&session(Role::Admin, "root"), &rating));
    }

    #[test]
    fn test_require_role() {
        let doctor = session(Role::Doctor, "d");
        assert!(require_role(Some(&doctor), &[Role::Doctor, Role::Admin]).is_ok());
        assert_eq!(
            require_role(Some(&doctor), &[Role::PetOwner]).unwrap_err(),
            WorkflowError::RoleNotAllowed(Role::Doctor)
        );
    }
}
