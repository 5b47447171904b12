/// Administrative endpoints
pub mod admin;
/// Gift checkout endpoints
pub mod payment;
/// Guest RSVP endpoints
pub mod rsvp;
