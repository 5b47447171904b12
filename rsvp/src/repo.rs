mod guests;
mod memory;

pub use guests::{GuestRepo, ListOrder, PgGuestRepo};
pub use memory::MemoryGuestRepo;
