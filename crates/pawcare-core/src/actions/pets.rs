use crate::client::PawcareClient;
use crate::dispatch::{Operation, Outcome};
use crate::models::{NewPet, Pet, Role};
use crate::store::{self, keep, replace};

const FETCH: Operation = Operation::read("pets/fetch");
const CREATE: Operation = Operation::write("pets/create", "Adding pet...", "Pet added");
const UPDATE: Operation = Operation::write("pets/update", "Saving pet...", "Pet updated");
const DELETE: Operation = Operation::write("pets/delete", "Removing pet...", "Pet removed");

impl PawcareClient {
    /// Pets of the signed-in owner.
    pub async fn fetch_pets(&self) -> Outcome<Vec<Pet>> {
        gate!(self, FETCH, self.require(&[Role::PetOwner]));
        self.dispatcher()
            .run(FETCH, store::pets, self.get::<Vec<Pet>>("api/Pet"), replace)
            .await
    }

    pub async fn create_pet(&self, pet: NewPet) -> Outcome<Pet> {
        gate!(self, CREATE, self.require(&[Role::PetOwner]));
        let outcome = self
            .dispatcher()
            .run(CREATE, store::pets, self.post::<_, Pet>("api/Pet", &pet), keep)
            .await;
        if outcome.is_fulfilled() {
            self.fetch_pets().await;
        }
        outcome
    }

    pub async fn update_pet(&self, id: i64, pet: NewPet) -> Outcome<()> {
        gate!(self, UPDATE, self.require(&[Role::PetOwner]));
        let path = format!("api/Pet/{}", id);
        let outcome = self
            .dispatcher()
            .run(UPDATE, store::pets, self.put::<_, ()>(&path, &pet), keep)
            .await;
        if outcome.is_fulfilled() {
            self.fetch_pets().await;
        }
        outcome
    }

    pub async fn delete_pet(&self, id: i64) -> Outcome<()> {
        gate!(self, DELETE, self.require(&[Role::PetOwner]));
        let path = format!("api/Pet/{}", id);
        let outcome = self
            .dispatcher()
            .run(DELETE, store::pets, self.delete::<()>(&path), keep)
            .await;
        if outcome.is_fulfilled() {
            self.fetch_pets().await;
        }
        outcome
    }
}
