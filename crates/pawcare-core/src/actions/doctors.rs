use crate::client::PawcareClient;
use crate::dispatch::{Operation, Outcome};
use crate::models::{ClinicDoctor, Doctor, DoctorRegistration, Role};
use crate::store::{self, keep, replace, select};
use crate::workflow::WorkflowError;

const FETCH: Operation = Operation::read("doctors/fetch");
const FETCH_PROFILE: Operation = Operation::read("doctors/fetch_profile");
const REGISTER: Operation =
    Operation::write("doctors/register", "Registering doctor...", "Doctor profile created");
const ADD_TO_CLINIC: Operation =
    Operation::write("doctors/add_to_clinic", "Adding doctor...", "Doctor added to clinic");

impl PawcareClient {
    /// All doctors, or the staff of one clinic.
    pub async fn fetch_doctors(&self, clinic_id: Option<i64>) -> Outcome<Vec<Doctor>> {
        let path = match clinic_id {
            Some(id) => format!("api/Clinic/{}/doctors", id),
            None => "api/Doctor".to_string(),
        };
        self.dispatcher()
            .run(FETCH, store::doctors, self.get::<Vec<Doctor>>(&path), replace)
            .await
    }

    /// The signed-in doctor's profile; `None` until registered.
    pub async fn fetch_doctor_profile(&self) -> Outcome<Option<Doctor>> {
        gate!(self, FETCH_PROFILE, self.require(&[Role::Doctor]));
        self.dispatcher()
            .run(
                FETCH_PROFILE,
                store::doctor_profile,
                self.get_optional::<Doctor>("api/Doctor/me"),
                replace,
            )
            .await
    }

    /// Create the doctor profile. Allowed once per doctor account.
    pub async fn register_doctor(&self, registration: DoctorRegistration) -> Outcome<Doctor> {
        gate!(self, REGISTER, self.require(&[Role::Doctor]));
        let registered = gate!(self, REGISTER, self.select(|s| s.doctor_profile.data.is_some()));
        if registered {
            return self.refuse(REGISTER, WorkflowError::DoctorAlreadyRegistered.into());
        }

        self.dispatcher()
            .run(
                REGISTER,
                store::doctor_profile,
                self.post::<_, Doctor>("api/Doctor", &registration),
                select,
            )
            .await
    }

    pub async fn add_doctor_to_clinic(&self, clinic_id: i64, doctor: ClinicDoctor) -> Outcome<()> {
        gate!(self, ADD_TO_CLINIC, self.require(&[Role::Doctor, Role::Admin]));

        let path = format!("api/Clinic/{}/doctors", clinic_id);
        let outcome = self
            .dispatcher()
            .run(ADD_TO_CLINIC, store::doctors, self.post::<_, ()>(&path, &doctor), keep)
            .await;
        if outcome.is_fulfilled() {
            self.fetch_doctors(Some(clinic_id)).await;
        }
        outcome
    }
}
