//! Loomline API - Typed client for the remote REST service.
//!
//! The storefront, admin panel, and CLI all talk to the same remote API
//! (product sub-resources per category, orders, custom-order inquiries,
//! contact submissions, dashboard aggregates). This crate wraps it with
//! `reqwest`, typed request/response shapes from `loomline-core`, and a
//! short-lived `moka` cache for catalog reads.
//!
//! The base URL is injectable so tests can point the client at an
//! in-process stub server.
//!
//! # Behavioral notes
//!
//! - No client-side timeouts and no automatic retries: a failed request is
//!   only retried by explicit user action.
//! - Catalog reads are cached for five minutes; any product mutation
//!   invalidates the cache so the following refetch observes the change.
//! - `POST /orders` treats any 2xx response as success without parsing the
//!   body.
//! - `POST /contact` surfaces the response body's `error` field verbatim on
//!   a non-2xx status.

#![cfg_attr(not(test), forbid(unsafe_code))]

mod cache;
mod client;
mod error;
mod types;

pub use client::ApiClient;
pub use error::ApiError;
pub use types::{ContactReceipt, ContactRequest, ProductInput};
