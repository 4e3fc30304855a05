//! KioGloss Core - Shared types library.
//!
//! This crate provides the domain types used across the KioGloss components:
//! - `client` - Headless storefront client library
//! - `cli` - Command-line storefront tools
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, and
//!   order statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
