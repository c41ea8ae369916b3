//! Client for the invoice/quotation desk: a live calculation core, a typed
//! gateway to the REST API and page objects driving the editor and lists.

pub mod calc;
pub mod domain;
pub mod dto;
pub mod forms;

#[cfg(feature = "client")]
pub mod error_conversions;
#[cfg(feature = "client")]
pub mod models;
#[cfg(feature = "client")]
pub mod repository;
#[cfg(feature = "client")]
pub mod services;
#[cfg(feature = "client")]
pub mod session;
#[cfg(feature = "client")]
pub mod views;
