//! Data models for the TeamDynamix API.
//!
//! Remote documents are PascalCase JSON; the structs here type the fields
//! lantern operates on and flatten everything else through untouched, so
//! fetched documents can be posted back without losing fields.

mod asset;
mod attribute;
mod common;
mod person;
mod ticket;

pub use asset::*;
pub use attribute::*;
pub use common::*;
pub use person::*;
pub use ticket::*;
