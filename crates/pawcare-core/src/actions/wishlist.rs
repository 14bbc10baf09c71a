use crate::client::PawcareClient;
use crate::dispatch::{Operation, Outcome};
use crate::models::{Role, Wishlist};
use crate::store::{self, keep, replace};

const FETCH: Operation = Operation::read("wishlist/fetch");
const ADD: Operation = Operation::write("wishlist/add", "Saving...", "Added to wishlist");
const REMOVE: Operation = Operation::write("wishlist/remove", "Saving...", "Removed from wishlist");

const SIGNED_IN: &[Role] = &[Role::PetOwner, Role::Doctor, Role::Admin];

impl PawcareClient {
    pub async fn fetch_wishlist(&self) -> Outcome<Wishlist> {
        gate!(self, FETCH, self.require(SIGNED_IN));
        self.dispatcher()
            .run(FETCH, store::wishlist, self.get::<Wishlist>("api/Wishlist"), replace)
            .await
    }

    pub async fn add_to_wishlist(&self, product_id: i64) -> Outcome<()> {
        gate!(self, ADD, self.require(SIGNED_IN));
        let path = format!("api/Wishlist/{}", product_id);
        let outcome = self
            .dispatcher()
            .run(ADD, store::wishlist, self.post::<_, ()>(&path, &()), keep)
            .await;
        if outcome.is_fulfilled() {
            self.fetch_wishlist().await;
        }
        outcome
    }

    pub async fn remove_from_wishlist(&self, product_id: i64) -> Outcome<()> {
        gate!(self, REMOVE, self.require(SIGNED_IN));
        let path = format!("api/Wishlist/{}", product_id);
        let outcome = self
            .dispatcher()
            .run(REMOVE, store::wishlist, self.delete::<()>(&path), keep)
            .await;
        if outcome.is_fulfilled() {
            self.fetch_wishlist().await;
        }
        outcome
    }
}
