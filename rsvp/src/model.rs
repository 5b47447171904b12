mod guests;

pub use guests::{GuestResponse, GuestResponseChanges, NewGuestResponse};
