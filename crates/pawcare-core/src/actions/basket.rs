//! Basket actions.
//!
//! The basket ID lives in client storage. Whenever the stored basket cannot
//! be found on the server a fresh empty basket replaces it.

use tracing::{info, warn};

use crate::client::PawcareClient;
use crate::dispatch::{Operation, Outcome};
use crate::error::ClientResult;
use crate::models::{Basket, BasketItem};
use crate::store::{self, keep, select};

const LOAD: Operation = Operation::read("basket/load");
const ADD: Operation = Operation::write("basket/add", "Adding to basket...", "Added to basket");
const REMOVE: Operation =
    Operation::write("basket/remove", "Updating basket...", "Removed from basket");
const SET_QUANTITY: Operation =
    Operation::write("basket/set_quantity", "Updating basket...", "Basket updated");
const CLEAR: Operation = Operation::write("basket/clear", "Clearing basket...", "Basket cleared");

fn basket_path(id: &str) -> String {
    format!("api/Basket?id={}", id)
}

impl PawcareClient {
    /// Load the stored basket, creating a new one if it is missing.
    pub async fn load_basket(&self) -> Outcome<Basket> {
        self.dispatcher()
            .run(LOAD, store::basket, self.load_or_create_basket(), select)
            .await
    }

    pub async fn add_to_basket(&self, item: BasketItem) -> Outcome<Basket> {
        self.change_basket(ADD, move |basket| basket.add_item(item))
            .await
    }

    /// Take `quantity` units of a product out of the basket.
    pub async fn remove_from_basket(&self, product_id: i64, quantity: u32) -> Outcome<Basket> {
        self.change_basket(REMOVE, move |basket| {
            basket.remove_item(product_id, quantity);
        })
        .await
    }

    /// Set a line's quantity; zero removes the line.
    pub async fn set_basket_quantity(&self, product_id: i64, quantity: u32) -> Outcome<Basket> {
        self.change_basket(SET_QUANTITY, move |basket| {
            basket.set_quantity(product_id, quantity);
        })
        .await
    }

    /// Delete the basket on the server and forget its ID.
    pub async fn clear_basket(&self) -> Outcome<()> {
        let stored = match self.storage().basket_id() {
            Ok(stored) => stored,
            Err(err) => return self.refuse(CLEAR, err),
        };
        let Some(id) = stored else {
            return match self.dispatcher().update(|s| s.basket.reset(None)) {
                Ok(()) => Outcome::Fulfilled(()),
                Err(err) => self.refuse(CLEAR, err),
            };
        };

        let path = basket_path(&id);
        self.dispatcher()
            .run(
                CLEAR,
                store::basket,
                self.delete_basket(&path),
                |data: &mut Option<Basket>, _: &()| *data = None,
            )
            .await
    }

    /// Drop the local basket after the server consumed it (e.g. checkout).
    pub(crate) fn forget_basket(&self) -> ClientResult<()> {
        self.storage().clear_basket_id()?;
        self.dispatcher().update(|s| s.basket.reset(None))
    }

    async fn change_basket(&self, op: Operation, edit: impl FnOnce(&mut Basket)) -> Outcome<Basket> {
        let current = gate!(self, op, self.select(|s| s.basket.data.clone()));
        let mut basket = match current {
            Some(basket) => basket,
            None => gate!(self, op, self.load_basket().await.into_result()),
        };
        edit(&mut basket);

        let outcome = self
            .dispatcher()
            .run(op, store::basket, self.post::<_, Basket>("api/Basket", &basket), keep)
            .await;
        if outcome.is_fulfilled() {
            self.load_basket().await;
        }
        outcome
    }

    async fn load_or_create_basket(&self) -> ClientResult<Basket> {
        if let Some(id) = self.storage().basket_id()? {
            match self.get_optional::<Basket>(&basket_path(&id)).await? {
                Some(basket) => return Ok(basket),
                None => warn!(basket_id = %id, "stored basket missing; creating a new one"),
            }
        }

        let fresh = Basket::new();
        let created: Basket = self.post("api/Basket", &fresh).await?;
        self.storage().set_basket_id(&created.id)?;
        info!(basket_id = %created.id, "basket created");
        Ok(created)
    }

    async fn delete_basket(&self, path: &str) -> ClientResult<()> {
        match self.delete::<()>(path).await {
            Ok(()) => {}
            Err(err) if err.is_not_found() => {}
            Err(err) => return Err(err),
        }
        self.storage().clear_basket_id()?;
        Ok(())
    }
}
