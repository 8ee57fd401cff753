//! Bank-account linking backend for Plaid.
//!
//! One small axum server mints Link tokens, trades public tokens for access tokens, and
//! renders recent transactions for a connected item.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod flows;
pub mod http;
pub mod obs;
pub mod provider;
pub mod server;
pub mod store;

mod _prelude {
	pub use std::{
		collections::HashMap,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use parking_lot::Mutex;
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Date, Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use reqwest;
pub use url;
// The binary reports startup failures through `color-eyre`.
use color_eyre as _;
#[cfg(test)] use {httpmock as _, tower as _};
