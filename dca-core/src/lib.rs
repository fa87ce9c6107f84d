pub mod anchor;
pub mod cell;
#[cfg(feature = "api")]
pub mod client;
pub mod decline;
pub mod error;
pub mod forecast;
pub mod series;
pub mod service;
