/// REST clients for outside services
pub mod client;
/// Domain objects
pub mod domain;
/// Error enums
pub mod error;
/// CSV export of stored responses
pub mod export;
/// Models
pub mod model;
/// Repositories
pub mod repo;
/// Guest-count aggregation
pub mod summary;
