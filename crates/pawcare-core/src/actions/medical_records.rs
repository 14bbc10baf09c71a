use crate::client::PawcareClient;
use crate::dispatch::{Operation, Outcome};
use crate::models::{MedicalRecord, NewMedicalRecord, Role};
use crate::store::{self, keep, replace};
use crate::workflow::{check_medical_record, WorkflowError};

const FETCH_ONE: Operation = Operation::read("medical_records/fetch_one");
const FETCH_FOR_PET: Operation = Operation::read("medical_records/fetch_for_pet");
const CREATE: Operation = Operation::write(
    "medical_records/create",
    "Saving medical record...",
    "Medical record created",
);

impl PawcareClient {
    /// Record of one appointment; `None` when it has none yet.
    pub async fn fetch_medical_record(&self, appointment_id: i64) -> Outcome<Option<MedicalRecord>> {
        let path = format!("api/MedicalRecord/appointment/{}", appointment_id);
        self.dispatcher()
            .run(
                FETCH_ONE,
                store::medical_record,
                self.get_optional::<MedicalRecord>(&path),
                replace,
            )
            .await
    }

    pub async fn fetch_pet_medical_records(&self, pet_id: i64) -> Outcome<Vec<MedicalRecord>> {
        let path = format!("api/MedicalRecord/pet/{}", pet_id);
        self.dispatcher()
            .run(
                FETCH_FOR_PET,
                store::medical_records,
                self.get::<Vec<MedicalRecord>>(&path),
                replace,
            )
            .await
    }

    /// Write the record of a completed appointment.
    ///
    /// Looks the appointment's record up first; creation is refused when one
    /// exists or the appointment is not completed.
    pub async fn create_medical_record(&self, record: NewMedicalRecord) -> Outcome<MedicalRecord> {
        gate!(self, CREATE, self.require(&[Role::Doctor]));
        let appointment_id = record.appointment_id;
        let appointment = gate!(
            self,
            CREATE,
            self.select(|s| s.find_appointment(appointment_id).cloned())
        );
        let appointment = gate!(
            self,
            CREATE,
            appointment.ok_or(WorkflowError::UnknownAppointment(appointment_id))
        );

        let existing = gate!(
            self,
            CREATE,
            self.fetch_medical_record(appointment_id).await.into_result()
        );
        let mut known = gate!(self, CREATE, self.select(|s| s.known_medical_records()));
        known.extend(existing);
        gate!(self, CREATE, check_medical_record(&appointment, &known));

        let outcome = self
            .dispatcher()
            .run(
                CREATE,
                store::medical_record,
                self.post::<_, MedicalRecord>("api/MedicalRecord", &record),
                keep,
            )
            .await;
        if outcome.is_fulfilled() {
            self.fetch_medical_record(appointment_id).await;
        }
        outcome
    }
}
