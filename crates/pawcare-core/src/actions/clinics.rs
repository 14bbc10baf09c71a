use tracing::warn;

use crate::client::PawcareClient;
use crate::dispatch::{Operation, Outcome};
use crate::models::{Clinic, ClinicStatus, ClinicStatusUpdate, NewClinic, Role};
use crate::store::{self, keep, replace, select};
use crate::workflow::{can_delete_clinic, check_clinic_transition, WorkflowError};

const FETCH_ALL: Operation = Operation::read("clinics/fetch");
const FETCH_ONE: Operation = Operation::read("clinics/fetch_one");
const CREATE: Operation = Operation::write("clinics/create", "Creating clinic...", "Clinic created");
const UPDATE: Operation = Operation::write("clinics/update", "Saving clinic...", "Clinic updated");
const SET_STATUS: Operation =
    Operation::write("clinics/set_status", "Updating status...", "Clinic status updated");
const DELETE: Operation = Operation::write("clinics/delete", "Deleting clinic...", "Clinic deleted");

impl PawcareClient {
    pub async fn fetch_clinics(&self) -> Outcome<Vec<Clinic>> {
        self.dispatcher()
            .run(FETCH_ALL, store::clinics, self.get::<Vec<Clinic>>("api/Clinic"), replace)
            .await
    }

    /// Load one clinic as the selected clinic.
    pub async fn fetch_clinic(&self, id: i64) -> Outcome<Clinic> {
        let path = format!("api/Clinic/{}", id);
        self.dispatcher()
            .run(FETCH_ONE, store::clinic, self.get::<Clinic>(&path), select)
            .await
    }

    /// Register a clinic (doctors). New clinics start out pending review.
    pub async fn create_clinic(&self, clinic: NewClinic) -> Outcome<Clinic> {
        gate!(self, CREATE, self.require(&[Role::Doctor]));

        let outcome = self
            .dispatcher()
            .run(CREATE, store::clinics, self.post::<_, Clinic>("api/Clinic", &clinic), keep)
            .await;
        if outcome.is_fulfilled() {
            self.fetch_clinics().await;
        }
        outcome
    }

    pub async fn update_clinic(&self, id: i64, clinic: NewClinic) -> Outcome<()> {
        let session = gate!(self, UPDATE, self.require(&[Role::Doctor, Role::Admin]));
        let known = gate!(self, UPDATE, self.select(|s| s.find_clinic(id).cloned()));
        if session.role == Role::Doctor && !can_delete_clinic(&session, known.as_ref()) {
            return self.refuse(UPDATE, WorkflowError::RoleNotAllowed(session.role).into());
        }

        let path = format!("api/Clinic/{}", id);
        let outcome = self
            .dispatcher()
            .run(UPDATE, store::clinics, self.put::<_, ()>(&path, &clinic), keep)
            .await;
        if outcome.is_fulfilled() {
            self.refresh_clinic(id).await;
        }
        outcome
    }

    /// Move a clinic through moderation (admins only).
    pub async fn set_clinic_status(&self, id: i64, status: ClinicStatus) -> Outcome<()> {
        let session = gate!(self, SET_STATUS, self.require(&[Role::Admin]));
        let current = gate!(self, SET_STATUS, self.select(|s| s.find_clinic(id).map(|c| c.status)));
        let from = gate!(self, SET_STATUS, current.ok_or(WorkflowError::UnknownClinic(id)));
        gate!(self, SET_STATUS, check_clinic_transition(from, status, session.role));

        let path = format!("api/Clinic/{}/status", id);
        let body = ClinicStatusUpdate { status };
        let outcome = self
            .dispatcher()
            .run(SET_STATUS, store::clinics, self.put::<_, ()>(&path, &body), keep)
            .await;
        if outcome.is_fulfilled() {
            self.refresh_clinic(id).await;
        }
        outcome
    }

    /// Delete a clinic (admins, or the doctor who owns it).
    pub async fn delete_clinic(&self, id: i64) -> Outcome<()> {
        let session = gate!(self, DELETE, self.require(&[Role::Doctor, Role::Admin]));
        let known = gate!(self, DELETE, self.select(|s| s.find_clinic(id).cloned()));
        if !can_delete_clinic(&session, known.as_ref()) {
            return self.refuse(DELETE, WorkflowError::RoleNotAllowed(session.role).into());
        }

        let path = format!("api/Clinic/{}", id);
        let outcome = self
            .dispatcher()
            .run(DELETE, store::clinics, self.delete::<()>(&path), keep)
            .await;
        if outcome.is_fulfilled() {
            let cleared = self.dispatcher().update(|s| {
                if s.clinic.data.as_ref().is_some_and(|c| c.id == id) {
                    s.clinic.reset(None);
                }
            });
            if let Err(err) = cleared {
                warn!(clinic = id, error = %err, "could not drop deleted clinic from the store");
            }
            self.fetch_clinics().await;
        }
        outcome
    }

    /// Refetch the list, and the selected clinic when it is the one that changed.
    async fn refresh_clinic(&self, id: i64) {
        self.fetch_clinics().await;
        let selected = self
            .select(|s| s.clinic.data.as_ref().is_some_and(|c| c.id == id))
            .unwrap_or(false);
        if selected {
            self.fetch_clinic(id).await;
        }
    }
}
