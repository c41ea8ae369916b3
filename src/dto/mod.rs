//! Data handed from the calculation core and services to renderers.

pub mod admin;
pub mod summary;
