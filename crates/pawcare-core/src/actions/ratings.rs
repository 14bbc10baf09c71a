use serde::Serialize;

use crate::client::PawcareClient;
use crate::dispatch::{Operation, Outcome};
use crate::models::{NewRating, Rating, Role};
use crate::store::{self, keep, replace, RatingCheck};
use crate::workflow::{can_delete_rating, check_can_rate, WorkflowError};

const FETCH: Operation = Operation::read("ratings/fetch");
const CHECK: Operation = Operation::read("ratings/check");
const CREATE: Operation = Operation::write("ratings/create", "Posting review...", "Review posted");
const DELETE: Operation = Operation::write("ratings/delete", "Deleting review...", "Review deleted");

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckQuery {
    clinic_id: i64,
}

impl PawcareClient {
    pub async fn fetch_clinic_ratings(&self, clinic_id: i64) -> Outcome<Vec<Rating>> {
        let path = format!("api/Rating/clinic/{}", clinic_id);
        self.dispatcher()
            .run(FETCH, store::ratings, self.get::<Vec<Rating>>(&path), replace)
            .await
    }

    /// Ask the backend whether the signed-in user has rated `clinic_id`.
    pub async fn check_rated(&self, clinic_id: i64) -> Outcome<bool> {
        gate!(self, CHECK, self.require(&[Role::PetOwner]));
        let query = CheckQuery { clinic_id };
        self.dispatcher()
            .run(
                CHECK,
                store::rating_check,
                self.get_query::<_, bool>("api/Rating/check", &query),
                move |data: &mut Option<RatingCheck>, has_rated: &bool| {
                    *data = Some(RatingCheck {
                        clinic_id,
                        has_rated: *has_rated,
                    });
                },
            )
            .await
    }

    /// Post a review. One per user and clinic, checked with the backend first.
    pub async fn create_rating(&self, rating: NewRating) -> Outcome<Rating> {
        if !rating.is_valid() {
            return self.refuse(CREATE, WorkflowError::InvalidRating(rating.rating_value).into());
        }
        let session = gate!(self, CREATE, self.require(&[Role::PetOwner]));

        let has_rated = gate!(self, CREATE, self.check_rated(rating.clinic_id).await.into_result());
        gate!(self, CREATE, check_can_rate(Some(&session), rating.clinic_id, has_rated));

        let outcome = self
            .dispatcher()
            .run(CREATE, store::ratings, self.post::<_, Rating>("api/Rating", &rating), keep)
            .await;
        if outcome.is_fulfilled() {
            self.fetch_clinic_ratings(rating.clinic_id).await;
            self.check_rated(rating.clinic_id).await;
        }
        outcome
    }

    /// Delete a review (its author or an admin).
    pub async fn delete_rating(&self, id: i64) -> Outcome<()> {
        let session = gate!(
            self,
            DELETE,
            self.require(&[Role::PetOwner, Role::Doctor, Role::Admin])
        );
        let rating = gate!(
            self,
            DELETE,
            self.select(|s| s.ratings.data.iter().find(|r| r.id == id).cloned())
        );
        if let Some(rating) = &rating {
            if !can_delete_rating(&session, rating) {
                return self.refuse(DELETE, WorkflowError::RoleNotAllowed(session.role).into());
            }
        }

        let path = format!("api/Rating/{}", id);
        let outcome = self
            .dispatcher()
            .run(DELETE, store::ratings, self.delete::<()>(&path), keep)
            .await;
        if outcome.is_fulfilled() {
            if let Some(rating) = rating {
                self.fetch_clinic_ratings(rating.clinic_id).await;
            }
        }
        outcome
    }
}
