//! Aggregator-facing configuration: API environments and Link settings.
//!
//! `environment` maps the three fixed Plaid environments onto their API hosts.
//! `settings` exposes validated [`LinkSettings`] (client name, products, country codes,
//! language) that every link-token request carries unchanged.

pub mod environment;
pub mod settings;

pub use environment::*;
pub use settings::*;
