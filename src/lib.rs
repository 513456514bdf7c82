//! The Rust client SDK for the Gravity recommendation engine.
//!
//! # Overview
//!
//! The SDK revolves around a [`GravityClient`] that transmits domain
//! entities ([`User`]s, [`Item`]s, [`Event`]s) to the engine and requests
//! item recommendations described by a [`RecommendationContext`]. Each call
//! maps to one remote method and returns the raw HTTP [`Response`] for the
//! caller to inspect; the client does not interpret status codes or parse
//! response bodies.
//!
//! A client is created from a validated [`ClientConfiguration`]. Methods
//! listed in the configuration's retry set are sent again, up to the
//! configured number of extra attempts, after a transport-level failure.
//! When client info forwarding is enabled, the end-user context supplied via
//! [`CallerContext`] travels along as `X-Forwarded-For` and related headers.
//!
//! # Collaborators
//!
//! The HTTP exchange itself is delegated to an [`HttpTransport`] and a
//! [`MessageFactory`]. The defaults (blocking
//! [`reqwest`](https://docs.rs/reqwest)) fit most applications; tests and
//! embedders with special transport needs can inject their own through
//! [`GravityClient::with_collaborators`].
//!
//! # Error Handling
//!
//! Errors are represented by the [`Error`] enum. Configuration errors fail
//! the client's construction before any I/O; transport failures are
//! propagated to the caller unchanged once the retry policy is exhausted.
//!
//! # Logging
//!
//! The package uses the [`log`](https://docs.rs/log/latest/log/) crate for
//! dispatch diagnostics. Consider integrating a `log`-compatible logger
//! implementation for better visibility into SDK operations.
//!
//! # Examples
//! ```no_run
//! use gravity_client::{ClientConfiguration, GravityClient, RecommendationContext};
//!
//! # fn main() -> gravity_client::Result<()> {
//! let client = GravityClient::new(
//!     ClientConfiguration::new("user", "password", "https://example.com/grrec").retry(2),
//! )?;
//!
//! let mut context = RecommendationContext::new("ITEM_PAGE");
//! context.name_values.push(("CurrentItemId", "item-1").into());
//! let response = client.get_item_recommendation("user-1", "cookie-1", Some(&context))?;
//! println!("{}", response.text());
//! # Ok(())
//! # }
//! ```

#![warn(rustdoc::missing_crate_level_docs)]
#![warn(missing_docs)]

mod client;
mod config;
mod context;
mod entities;
mod error;
mod plugins;
mod request;
mod transport;

pub use client::GravityClient;
pub use config::ClientConfiguration;
pub use context::CallerContext;
pub use entities::{event_type, Event, Item, NameValue, RecommendationContext, User};
pub use error::{Error, Result, TransportError};
pub use request::VERSION;
pub use transport::{
    DefaultMessageFactory, HttpTransport, MessageFactory, Method, Request, Response,
    ReqwestTransport, StatusCode, Url,
};
