//! Wire types for the KioGloss backend REST API.
//!
//! These mirror the backend's request/response JSON shapes exactly (field
//! renames carry the backend's spelling) and convert at the boundary to the
//! domain types in `kiogloss-core`. Nothing in here does I/O.

pub mod account;
pub mod catalog;
pub mod order;

pub use account::*;
pub use catalog::*;
pub use order::*;
