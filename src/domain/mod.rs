//! Domain records and value objects shared by the calculation core and the client.

pub mod client;
pub mod document;
pub mod line_item;
pub mod types;
pub mod user;
