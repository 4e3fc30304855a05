//! Storefront client for the Kiogloss cosmetics shop.
//!
//! This crate is the headless counterpart of the shop's web frontend: it
//! owns the session lifecycle, the local cart, checkout submission, and the
//! typed wrappers over the backend's REST API.
//!
//! # Architecture
//!
//! - [`api::Gateway`] is the single HTTP seam. It attaches the bearer token
//!   and enforces the refresh discipline: one `401` earns one token refresh
//!   and one replay, a second `401` is terminal for that call.
//! - [`auth::SessionManager`] drives sign-in, silent restore on startup,
//!   and sign-out over the shared [`auth::CredentialStore`].
//! - [`cart::CartStore`] holds the purely client-side cart, persisted after
//!   every mutation.
//! - [`checkout::Checkout`] turns a captured payment plus the cart into a
//!   recorded order.
//! - [`services`] wrap individual backend areas: catalog, orders, account,
//!   favorites, and the admin console.
//! - [`state::Storefront`] wires all of it together from a [`config::ClientConfig`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod auth;
pub mod cart;
pub mod checkout;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
pub mod storage;

pub use api::Gateway;
pub use auth::{AuthError, Identity, SessionManager, SessionState};
pub use cart::{CartLine, CartStore};
pub use checkout::{Checkout, CheckoutError, PaymentConfirmation};
pub use config::{ClientConfig, ConfigError};
pub use error::{ApiError, ClientError};
pub use state::Storefront;
