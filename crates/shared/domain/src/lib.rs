//! # Domain Models
//!
//! Plain data shared by every Quire crate: configuration, identifiers, and the
//! slice registry. No I/O and no business logic live here.

pub mod config;
pub mod constants;
pub mod registry;
