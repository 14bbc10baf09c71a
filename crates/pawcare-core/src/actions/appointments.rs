use crate::client::PawcareClient;
use crate::dispatch::{Operation, Outcome};
use crate::models::{Appointment, AppointmentStatus, AppointmentStatusUpdate, NewAppointment, Role};
use crate::store::{self, keep, replace};
use crate::workflow::{check_appointment_transition, WorkflowError};

const FETCH: Operation = Operation::read("appointments/fetch");
const BOOK: Operation =
    Operation::write("appointments/book", "Booking appointment...", "Appointment booked");
const SET_STATUS: Operation = Operation::write(
    "appointments/set_status",
    "Updating appointment...",
    "Appointment status updated",
);

/// Appointment listing endpoint for a role.
fn appointments_path(role: Role) -> &'static str {
    match role {
        Role::PetOwner => "api/Appointment/owner",
        Role::Doctor => "api/Appointment/doctor",
        Role::Admin => "api/Appointment",
    }
}

impl PawcareClient {
    /// Appointments visible to the signed-in user.
    pub async fn fetch_appointments(&self) -> Outcome<Vec<Appointment>> {
        let session = gate!(
            self,
            FETCH,
            self.require(&[Role::PetOwner, Role::Doctor, Role::Admin])
        );
        self.dispatcher()
            .run(
                FETCH,
                store::appointments,
                self.get::<Vec<Appointment>>(appointments_path(session.role)),
                replace,
            )
            .await
    }

    pub async fn book_appointment(&self, appointment: NewAppointment) -> Outcome<Appointment> {
        gate!(self, BOOK, self.require(&[Role::PetOwner]));
        let outcome = self
            .dispatcher()
            .run(
                BOOK,
                store::appointments,
                self.post::<_, Appointment>("api/Appointment", &appointment),
                keep,
            )
            .await;
        if outcome.is_fulfilled() {
            self.fetch_appointments().await;
        }
        outcome
    }

    /// Advance an appointment through the doctor's status machine.
    pub async fn set_appointment_status(&self, id: i64, status: AppointmentStatus) -> Outcome<()> {
        let session = gate!(self, SET_STATUS, self.require(&[Role::Doctor]));
        let current = gate!(
            self,
            SET_STATUS,
            self.select(|s| s.find_appointment(id).map(|a| a.status))
        );
        let from = gate!(self, SET_STATUS, current.ok_or(WorkflowError::UnknownAppointment(id)));
        gate!(self, SET_STATUS, check_appointment_transition(from, status, session.role));

        let path = format!("api/Appointment/{}/status", id);
        let body = AppointmentStatusUpdate { status };
        let outcome = self
            .dispatcher()
            .run(SET_STATUS, store::appointments, self.put::<_, ()>(&path, &body), keep)
            .await;
        if outcome.is_fulfilled() {
            self.fetch_appointments().await;
        }
        outcome
    }
}
