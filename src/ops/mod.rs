//! Resource operations on a [`TdxInstance`](crate::instance::TdxInstance).
//!
//! Each operation is a thin translator: it accepts human-facing names,
//! resolves the identifiers the remote wants, builds the request body,
//! dispatches, and interprets the response. Failures surface immediately
//! as typed errors.

mod assets;
mod people;
mod tickets;
