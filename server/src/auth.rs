mod admin_token;

pub use admin_token::{AdminToken, Administrator};
