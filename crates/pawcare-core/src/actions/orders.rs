use tracing::warn;

use crate::client::PawcareClient;
use crate::dispatch::{Operation, Outcome};
use crate::models::{NewOrder, Order, PaymentStatus, PaymentStatusUpdate, Role, ShippingAddress};
use crate::store::{self, keep, replace};
use crate::workflow::WorkflowError;

const FETCH: Operation = Operation::read("orders/fetch");
const PLACE: Operation = Operation::write("orders/place", "Placing order...", "Order placed");
const SET_PAYMENT: Operation = Operation::write(
    "orders/set_payment_status",
    "Updating payment status...",
    "Payment status updated",
);

impl PawcareClient {
    /// Own orders, or every order for admins.
    pub async fn fetch_orders(&self) -> Outcome<Vec<Order>> {
        let session = gate!(
            self,
            FETCH,
            self.require(&[Role::PetOwner, Role::Doctor, Role::Admin])
        );
        let path = if session.is_admin() {
            "api/Orders/all"
        } else {
            "api/Orders"
        };
        self.dispatcher()
            .run(FETCH, store::orders, self.get::<Vec<Order>>(path), replace)
            .await
    }

    /// Check out the current basket. The basket is dropped once the order exists.
    pub async fn place_order(
        &self,
        delivery_method_id: i64,
        shipping_address: ShippingAddress,
        payment_method: Option<String>,
    ) -> Outcome<Order> {
        gate!(
            self,
            PLACE,
            self.require(&[Role::PetOwner, Role::Doctor, Role::Admin])
        );
        let basket = gate!(self, PLACE, self.select(|s| s.basket.data.clone()));
        let basket = match basket {
            Some(basket) if !basket.is_empty() => basket,
            _ => return self.refuse(PLACE, WorkflowError::EmptyBasket.into()),
        };

        let order = NewOrder {
            basket_id: basket.id,
            delivery_method_id,
            shipping_address,
            payment_method,
        };
        let outcome = self
            .dispatcher()
            .run(PLACE, store::orders, self.post::<_, Order>("api/Orders", &order), keep)
            .await;
        if outcome.is_fulfilled() {
            if let Err(err) = self.forget_basket() {
                warn!(error = %err, "could not drop basket after checkout");
            }
            self.fetch_orders().await;
        }
        outcome
    }

    /// Record a payment outcome on an order (admins only).
    pub async fn set_payment_status(&self, order_id: i64, status: PaymentStatus) -> Outcome<()> {
        gate!(self, SET_PAYMENT, self.require(&[Role::Admin]));
        let path = format!("api/Orders/{}/payment-status", order_id);
        let body = PaymentStatusUpdate {
            payment_status: status,
        };
        let outcome = self
            .dispatcher()
            .run(SET_PAYMENT, store::orders, self.put::<_, ()>(&path, &body), keep)
            .await;
        if outcome.is_fulfilled() {
            self.fetch_orders().await;
        }
        outcome
    }
}
