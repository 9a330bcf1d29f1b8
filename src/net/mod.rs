//! Networking modules for the review admin JSON API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `transport` is the HTTP seam, `page` and `reviewer` are the thin
//! per-widget clients, and `types` defines the wire schema and errors.

pub mod page;
pub mod reviewer;
pub mod transport;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
