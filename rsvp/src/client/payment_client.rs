use std::time::Duration;

use reqwest::Client;

use serde::{Deserialize, Serialize};

use secrecy::Secret;

use url::Url;

use crate::domain::{EmailAddress, GuestName};
use crate::error::{Error, Result};

/// A single gift line in a checkout cart
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutItem {
    pub title: String,
    pub unit_price: f64,
    pub quantity: i64,
}

/// A validated gift cart plus the payer identity.
/// Construction enforces the cart rules, so a `CheckoutOrder` can always
/// be turned into a preference request.
#[derive(Debug)]
pub struct CheckoutOrder {
    items: Vec<CheckoutItem>,
    payer_name: GuestName,
    payer_email: EmailAddress,
    note: Option<String>,
}

impl CheckoutOrder {
    /// Validate a cart: at least one item, every item titled, positively
    /// priced and positively counted.
    pub fn new(
        items: Vec<CheckoutItem>,
        payer_name: GuestName,
        payer_email: EmailAddress,
        note: Option<String>,
    ) -> Result<Self> {
        if items.is_empty() {
            return Err(Error::ParsingError("Checkout cart cannot be empty".into()));
        }
        for item in &items {
            if item.title.trim().is_empty() {
                return Err(Error::ParsingError(
                    "Checkout item is missing a title".into(),
                ));
            }
            if !item.unit_price.is_finite() || item.unit_price <= 0.0 {
                return Err(Error::ParsingError(format!(
                    "Checkout item '{}' must have a positive unit price",
                    item.title
                )));
            }
            if item.quantity <= 0 {
                return Err(Error::ParsingError(format!(
                    "Checkout item '{}' must have a positive quantity",
                    item.title
                )));
            }
        }

        Ok(Self {
            items,
            payer_name,
            payer_email,
            note,
        })
    }
}

/// A created checkout preference: opaque reference id plus the redirect
/// target the payer should be sent to
#[derive(Debug, Deserialize)]
pub struct PaymentPreference {
    pub id: String,
    pub init_point: Url,
}

/// Checkout-preference client for the payment processor
#[derive(Debug)]
pub struct PaymentClient {
    client: Client,

    api_create_preference_url: Url,
    api_access_token: Secret<String>,
}

impl PaymentClient {
    pub fn new(
        api_timeout: Duration,
        api_base_url: Url,
        api_access_token: Secret<String>,
    ) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(api_timeout).build()?;

        let api_create_preference_url = api_base_url.join("checkout/preferences")?;

        Ok(Self {
            client,
            api_create_preference_url,
            api_access_token,
        })
    }

    #[tracing::instrument(name = "Create a checkout preference", skip(self))]
    pub async fn create_preference(&self, order: &CheckoutOrder) -> Result<PaymentPreference> {
        use secrecy::ExposeSecret;

        let body = CreatePreferenceRequest::from(order);

        let preference = self
            .client
            .post(self.api_create_preference_url.clone())
            .bearer_auth(self.api_access_token.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(Error::PaymentError)?
            .error_for_status()
            .map_err(Error::PaymentError)?
            .json()
            .await
            .map_err(Error::PaymentError)?;

        Ok(preference)
    }
}

#[derive(Debug, Serialize)]
struct CreatePreferenceRequest<'a> {
    items: &'a [CheckoutItem],
    payer: PreferencePayer<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    metadata: Option<PreferenceMetadata<'a>>,
}

#[derive(Debug, Serialize)]
struct PreferencePayer<'a> {
    name: &'a str,
    email: &'a str,
}

#[derive(Debug, Serialize)]
struct PreferenceMetadata<'a> {
    note: &'a str,
}

impl<'a> From<&'a CheckoutOrder> for CreatePreferenceRequest<'a> {
    fn from(order: &'a CheckoutOrder) -> Self {
        Self {
            items: &order.items,
            payer: PreferencePayer {
                name: order.payer_name.as_ref(),
                email: order.payer_email.as_ref(),
            },
            metadata: order
                .note
                .as_deref()
                .map(|note| PreferenceMetadata { note }),
        }
    }
}
