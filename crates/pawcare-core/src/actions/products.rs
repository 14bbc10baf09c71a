use crate::client::PawcareClient;
use crate::dispatch::{Operation, Outcome};
use crate::models::{DeliveryMethod, Product};
use crate::store::{self, replace, select};

const FETCH: Operation = Operation::read("products/fetch");
const FETCH_ONE: Operation = Operation::read("products/fetch_one");
const FETCH_DELIVERY: Operation = Operation::read("products/fetch_delivery_methods");

impl PawcareClient {
    /// Shop catalog. Filtering and sorting happen client-side.
    pub async fn fetch_products(&self) -> Outcome<Vec<Product>> {
        self.dispatcher()
            .run(FETCH, store::products, self.get::<Vec<Product>>("api/Products"), replace)
            .await
    }

    pub async fn fetch_product(&self, id: i64) -> Outcome<Product> {
        let path = format!("api/Products/{}", id);
        self.dispatcher()
            .run(FETCH_ONE, store::product, self.get::<Product>(&path), select)
            .await
    }

    pub async fn fetch_delivery_methods(&self) -> Outcome<Vec<DeliveryMethod>> {
        self.dispatcher()
            .run(
                FETCH_DELIVERY,
                store::delivery_methods,
                self.get::<Vec<DeliveryMethod>>("api/Orders/deliveryMethods"),
                replace,
            )
            .await
    }
}
