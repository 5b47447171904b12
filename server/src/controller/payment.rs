use actix_web::dev::HttpServiceFactory;
use actix_web::{post, web, Responder};

use serde::{Deserialize, Serialize};
use serde_aux::prelude::*;

use url::Url;

use rsvp::client::{CheckoutItem, CheckoutOrder, PaymentClient};

use crate::error::RestResult;

#[derive(Debug, Deserialize)]
pub struct CheckoutForm {
    items: Vec<CheckoutItemForm>,
    name: String,
    email: String,
    note: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutItemForm {
    title: String,
    // The storefront has sent both spellings over time
    #[serde(alias = "unit_price", deserialize_with = "deserialize_number_from_string")]
    unit_price: f64,
    #[serde(default = "default_quantity", deserialize_with = "deserialize_number_from_string")]
    quantity: i64,
}

fn default_quantity() -> i64 {
    1
}

impl From<CheckoutItemForm> for CheckoutItem {
    fn from(form: CheckoutItemForm) -> Self {
        Self {
            title: form.title,
            unit_price: form.unit_price,
            quantity: form.quantity,
        }
    }
}

impl TryFrom<CheckoutForm> for CheckoutOrder {
    type Error = rsvp::error::Error;

    fn try_from(form: CheckoutForm) -> Result<Self, Self::Error> {
        let items = form.items.into_iter().map(CheckoutItem::from).collect();

        CheckoutOrder::new(items, form.name.parse()?, form.email.parse()?, form.note)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckoutResponse {
    redirect_url: Url,
    reference_id: String,
}

#[tracing::instrument(name = "Create a gift checkout", skip(payment_client))]
#[post("/checkout")]
async fn checkout(
    form: web::Json<CheckoutForm>,
    payment_client: web::Data<PaymentClient>,
) -> RestResult<impl Responder> {
    let order: CheckoutOrder = form.into_inner().try_into()?;

    let preference = payment_client.create_preference(&order).await?;

    Ok(web::Json(CheckoutResponse {
        redirect_url: preference.init_point,
        reference_id: preference.id,
    }))
}

/// Gift checkout endpoints
pub fn scope() -> impl HttpServiceFactory {
    web::scope("/payment").service(checkout)
}
