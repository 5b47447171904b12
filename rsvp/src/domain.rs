mod companion_count;
mod email_address;
mod guest_name;

pub use companion_count::CompanionCount;
pub use email_address::EmailAddress;
pub use guest_name::GuestName;
