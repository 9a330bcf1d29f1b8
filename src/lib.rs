//! Client-side state and API layer for page review widgets in the CMS admin:
//! share links, inline comments and reviewer selection.
//!
//! SYSTEM CONTEXT
//! ==============
//! `state` holds the reducer-driven slices, `net` the JSON API clients,
//! `services` the async glue that turns API results into dispatched actions,
//! and `app` wires the stores, event queue and UI hooks together.
//! `annotation` is the render hook handed to the in-page annotation viewer.

pub mod annotation;
pub mod app;
pub mod config;
pub mod net;
pub mod services;
pub mod state;
