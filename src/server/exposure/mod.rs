//! API exposure modules
//!
//! Each exposure consumes the shared sales state and produces a Router.

pub mod rest;

pub use rest::RestExposure;
