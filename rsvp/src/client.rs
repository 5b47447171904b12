mod email_client;
mod payment_client;

pub use email_client::{Email, EmailClient};
pub use payment_client::{CheckoutItem, CheckoutOrder, PaymentClient, PaymentPreference};
